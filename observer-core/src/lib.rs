//! # Core API
//!
//! Value types and traits shared between the observer registry and the engine backends.
//!
//! - [`config`] holds the [`Configuration`] value that identifies one shareable observation setup.
//! - [`record`] holds the [`VisibilityRecord`] an engine reports for a watched element.
//! - [`engine`] defines the seam an observation engine backend plugs into.
//! - [`error`] holds the error types.
//!
//! ## Cargo Features
//!
//! * `serde`: Enables serialization/deserialization of the configuration and record types with
//!   [Serde](https://crates.io/crates/serde).

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide), doc(cfg_hide(doc, docsrs)))]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod margin;
pub mod record;

pub use crate::config::{Configuration, ConfigurationKey, Root, Thresholds};
pub use crate::engine::{Dispatch, ElementOf, EngineBackend, ObservationEngine};
pub use crate::error::{ConfigError, EngineError, ObserverError};
pub use crate::margin::{MarginOffset, RootMargin};
pub use crate::record::{Rect, VisibilityRecord};
