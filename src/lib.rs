//! Shared intersection observers.
//!
//! Creating one native intersection observer per watched element is expensive. This crate keeps
//! one observer per distinct [`Configuration`] and routes the batches it reports to the
//! subscriber of each element.
//!
//! # Building blocks
//!
//! - [`ObserverRegistry`] maps configurations to shared [`ObserverInstance`]s. It is an explicit
//!   context object, typically created once at startup and passed around behind an `Rc`.
//! - [`ObserverInstance`] owns one engine handle and the per-element dispatch table.
//! - [`Subscription`] undoes one registration when released or dropped.
//! - [`InView`] binds a subscription to a UI component's lifecycle.
//!
//! The observation engine itself is abstracted by [`EngineBackend`]. On the Web the `web`
//! module provides one backed by `IntersectionObserver`.
//!
//! ```no_run
//! # use std::rc::Rc;
//! # use shared_observer::{EngineBackend, ElementOf, InView, InViewOptions, ObserverRegistry};
//! # use std::error::Error;
//! # fn mount<B: EngineBackend + Default>(element: ElementOf<B>) -> Result<(), Box<dyn Error>> {
//! let registry = Rc::new(ObserverRegistry::<B>::default());
//! let options = InViewOptions::default().with_root_margin("0px 0px 100px 0px")?;
//! let mut in_view = InView::new(registry, options)
//!     .with_listener(|records| println!("{} new records", records.len()));
//! in_view.set_element(Some(element))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! Everything here is single threaded: observers live on the UI thread and their batches are
//! delivered there. The types are `!Send` accordingly.
//!
//! # Cargo Features
//!
//! * `serde`: Enables serialization/deserialization of the configuration and record types.

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide), doc(cfg_hide(doc, docsrs)))]
#![forbid(unsafe_code)]

pub use observer_core::{
    config, engine, error, margin, record, ConfigError, Configuration, ConfigurationKey, Dispatch,
    ElementOf, EngineBackend, EngineError, MarginOffset, ObservationEngine, ObserverError, Rect,
    Root, RootMargin, Thresholds, VisibilityRecord,
};
#[doc(inline)]
#[cfg(web_platform)]
pub use observer_web as web;

pub use crate::in_view::{InView, InViewOptions};
pub use crate::instance::{ObserverCallback, ObserverInstance, Subscription, SubscriptionId};
pub use crate::registry::ObserverRegistry;

mod in_view;
mod instance;
#[cfg(test)]
mod mock;
mod registry;
