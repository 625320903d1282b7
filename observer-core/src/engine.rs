//! The seam between the observer registry and a host's observation engine.
//!
//! An engine tracks the visibility of watched elements relative to a root and reports changes
//! in batches, asynchronously, through the [`Dispatch`] it was created with. Intersection
//! geometry is entirely the engine's business.

use std::fmt;

use crate::config::Configuration;
use crate::error::EngineError;
use crate::record::VisibilityRecord;

/// A live engine handle bound to one [`Configuration`].
pub trait ObservationEngine: 'static {
    /// The host's element handle. Compared with `PartialEq` to route records to subscribers.
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    /// Start reporting visibility changes of `element`.
    fn watch(&self, element: &Self::Element);

    /// Stop reporting visibility changes of `element`.
    ///
    /// Unwatching an element that is not watched must be a no-op.
    fn unwatch(&self, element: &Self::Element);
}

/// The element type of a backend's engine.
pub type ElementOf<B> = <<B as EngineBackend>::Engine as ObservationEngine>::Element;

/// Creates engine handles.
pub trait EngineBackend: 'static {
    type Engine: ObservationEngine;

    /// Create an engine for `config` which reports every batch to `dispatch`.
    ///
    /// Backends reject configurations they can't honor with an [`EngineError`].
    fn create_engine(
        &self,
        config: &Configuration<ElementOf<Self>>,
        dispatch: Dispatch<ElementOf<Self>>,
    ) -> Result<Self::Engine, EngineError>;
}

/// The callback an engine reports batches of [`VisibilityRecord`]s to.
pub struct Dispatch<E> {
    handler: Box<dyn Fn(&[VisibilityRecord<E>])>,
}

impl<E> Dispatch<E> {
    pub fn new<F>(handler: F) -> Self
    where
        F: 'static + Fn(&[VisibilityRecord<E>]),
    {
        Self { handler: Box::new(handler) }
    }

    /// Deliver one batch. Records keep the order the engine produced them in.
    pub fn dispatch(&self, records: &[VisibilityRecord<E>]) {
        (self.handler)(records)
    }
}

impl<E> fmt::Debug for Dispatch<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn dispatch_forwards_batches() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let dispatch = Dispatch::new({
            let seen = seen.clone();
            move |records: &[VisibilityRecord<u32>]| {
                seen.borrow_mut().extend(records.iter().map(|record| record.target))
            }
        });

        dispatch.dispatch(&[VisibilityRecord::new(1, true), VisibilityRecord::new(2, false)]);
        dispatch.dispatch(&[]);
        dispatch.dispatch(&[VisibilityRecord::new(3, true)]);

        assert_eq!(*seen.borrow(), [1, 2, 3]);
        assert_eq!(format!("{dispatch:?}"), "Dispatch { .. }");
    }
}
