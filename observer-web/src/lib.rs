//! # Web
//!
//! Engine backend for browsers, compiled to WebAssembly with [`wasm-bindgen`][wasm_bindgen].
//!
//! Each engine is one [`IntersectionObserver`][io] created with the root, `rootMargin` and
//! `threshold` of its [`Configuration`]. Watching maps to `observe()`, unwatching to
//! `unobserve()`, and dropping the engine disconnects the observer.
//!
//! [io]: https://developer.mozilla.org/en-US/docs/Web/API/IntersectionObserver
//! [wasm_bindgen]: https://docs.rs/wasm-bindgen

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide), doc(cfg_hide(doc, docsrs)))]

use observer_core::{Configuration, Dispatch, EngineBackend, EngineError};
use web_sys::Element;

mod intersection_handle;

pub use crate::intersection_handle::IntersectionObserverHandle;

/// Creates [`IntersectionObserverHandle`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebBackend;

impl EngineBackend for WebBackend {
    type Engine = IntersectionObserverHandle;

    fn create_engine(
        &self,
        config: &Configuration<Element>,
        dispatch: Dispatch<Element>,
    ) -> Result<Self::Engine, EngineError> {
        IntersectionObserverHandle::new(config, dispatch)
    }
}
