use std::cell::{Cell, RefCell};

use observer_core::{
    Configuration, Dispatch, EngineBackend, EngineError, ObservationEngine, VisibilityRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Watch(u32),
    Unwatch(u32),
}

/// Counts the engines it creates and optionally rejects configurations.
#[derive(Default)]
pub(crate) struct MockBackend {
    created: Cell<usize>,
    reject: Cell<bool>,
}

impl MockBackend {
    pub fn created(&self) -> usize {
        self.created.get()
    }

    pub fn reject(&self, reject: bool) {
        self.reject.set(reject);
    }
}

impl EngineBackend for MockBackend {
    type Engine = MockEngine;

    fn create_engine(
        &self,
        _: &Configuration<u32>,
        dispatch: Dispatch<u32>,
    ) -> Result<MockEngine, EngineError> {
        if self.reject.get() {
            return Err(EngineError::new("SyntaxError: rejected configuration"));
        }
        self.created.set(self.created.get() + 1);
        Ok(MockEngine { serial: self.created.get(), calls: RefCell::default(), dispatch })
    }
}

pub(crate) struct MockEngine {
    pub serial: usize,
    calls: RefCell<Vec<Call>>,
    dispatch: Dispatch<u32>,
}

impl MockEngine {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Report a batch the way a host would.
    pub fn emit(&self, records: &[VisibilityRecord<u32>]) {
        self.dispatch.dispatch(records);
    }
}

impl ObservationEngine for MockEngine {
    type Element = u32;

    fn watch(&self, element: &u32) {
        self.calls.borrow_mut().push(Call::Watch(*element));
    }

    fn unwatch(&self, element: &u32) {
        self.calls.borrow_mut().push(Call::Unwatch(*element));
    }
}
