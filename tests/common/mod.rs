#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use shared_observer::{
    Configuration, Dispatch, EngineBackend, EngineError, ObservationEngine, VisibilityRecord,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A DOM-like node handle: clones compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node(pub &'static str);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Watch(Node),
    Unwatch(Node),
}

/// Keeps every engine it creates reachable so tests can play the host.
#[derive(Default)]
pub struct FakeHost {
    engines: RefCell<Vec<Rc<EngineState>>>,
    fail_with: RefCell<Option<String>>,
}

impl FakeHost {
    pub fn engine_count(&self) -> usize {
        self.engines.borrow().len()
    }

    pub fn engine(&self, index: usize) -> Rc<EngineState> {
        self.engines.borrow()[index].clone()
    }

    pub fn fail_with(&self, message: Option<&str>) {
        *self.fail_with.borrow_mut() = message.map(str::to_owned);
    }
}

pub struct EngineState {
    pub config: Configuration<Node>,
    calls: RefCell<Vec<Call>>,
    dispatch: Dispatch<Node>,
    dropped: Cell<bool>,
}

impl EngineState {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Deliver a batch, as the host would after layout.
    pub fn report(&self, records: &[VisibilityRecord<Node>]) {
        self.dispatch.dispatch(records);
    }

    pub fn is_dropped(&self) -> bool {
        self.dropped.get()
    }
}

pub struct FakeEngine(Rc<EngineState>);

impl ObservationEngine for FakeEngine {
    type Element = Node;

    fn watch(&self, element: &Node) {
        self.0.calls.borrow_mut().push(Call::Watch(element.clone()));
    }

    fn unwatch(&self, element: &Node) {
        self.0.calls.borrow_mut().push(Call::Unwatch(element.clone()));
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        self.0.dropped.set(true);
    }
}

impl EngineBackend for FakeHost {
    type Engine = FakeEngine;

    fn create_engine(
        &self,
        config: &Configuration<Node>,
        dispatch: Dispatch<Node>,
    ) -> Result<FakeEngine, EngineError> {
        if let Some(message) = self.fail_with.borrow().as_deref() {
            return Err(EngineError::new(message));
        }

        let state = Rc::new(EngineState {
            config: config.clone(),
            calls: RefCell::default(),
            dispatch,
            dropped: Cell::new(false),
        });
        self.engines.borrow_mut().push(state.clone());
        Ok(FakeEngine(state))
    }
}
