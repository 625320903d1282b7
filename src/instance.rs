//! A single engine handle shared between many watched elements.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use observer_core::{
    Configuration, Dispatch, EngineBackend, EngineError, ObservationEngine, VisibilityRecord,
};
use tracing::{debug, trace};

/// A subscriber callback.
///
/// Receives the records of one batch that belong to the subscribed element, and the engine that
/// produced them.
pub type ObserverCallback<G> =
    Rc<dyn Fn(&[VisibilityRecord<<G as ObservationEngine>::Element>], &G)>;

/// Identifies one [`ObserverInstance::register_callback`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct SubscriptionRecord<G: ObservationEngine> {
    id: SubscriptionId,
    element: G::Element,
    callback: ObserverCallback<G>,
}

struct Shared<G: ObservationEngine> {
    config: Configuration<G::Element>,
    // Set right after the engine is created. The engine can't report before it watches anything.
    engine: OnceCell<G>,
    subscriptions: RefCell<Vec<SubscriptionRecord<G>>>,
    next_id: Cell<u64>,
}

impl<G: ObservationEngine> Shared<G> {
    fn dispatch(&self, records: &[VisibilityRecord<G::Element>]) {
        let Some(engine) = self.engine.get() else { return };

        // Collect first: callbacks may (un)subscribe while we deliver.
        let deliveries: Vec<_> = self
            .subscriptions
            .borrow()
            .iter()
            .filter_map(|subscription| {
                let matching: Vec<_> = records
                    .iter()
                    .filter(|record| record.target == subscription.element)
                    .cloned()
                    .collect();
                (!matching.is_empty()).then(|| (subscription.callback.clone(), matching))
            })
            .collect();

        trace!(records = records.len(), deliveries = deliveries.len(), "dispatching batch");
        for (callback, records) in deliveries {
            callback(&records, engine);
        }
    }

    fn release(&self, id: SubscriptionId, element: &G::Element) {
        if let Some(engine) = self.engine.get() {
            trace!(?element, "unwatching released element");
            engine.unwatch(element);
        }
        self.subscriptions
            .borrow_mut()
            .retain(|subscription| !(subscription.id == id && subscription.element == *element));
    }
}

/// One engine handle plus its per-element dispatch table.
///
/// Cloning yields another handle to the same instance.
pub struct ObserverInstance<G: ObservationEngine> {
    shared: Rc<Shared<G>>,
}

impl<G: ObservationEngine> Clone for ObserverInstance<G> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<G: ObservationEngine> ObserverInstance<G> {
    /// Create the engine for `config` through `backend`.
    pub fn new<B>(backend: &B, config: Configuration<G::Element>) -> Result<Self, EngineError>
    where
        B: EngineBackend<Engine = G>,
    {
        let shared = Rc::new(Shared {
            config,
            engine: OnceCell::new(),
            subscriptions: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        });

        let weak = Rc::downgrade(&shared);
        let dispatch = Dispatch::new(move |records: &[VisibilityRecord<G::Element>]| {
            if let Some(shared) = weak.upgrade() {
                shared.dispatch(records);
            }
        });

        let engine = backend.create_engine(&shared.config, dispatch)?;
        if shared.engine.set(engine).is_err() {
            unreachable!("engine initialized twice");
        }
        debug!(config = ?shared.config, "created observer instance");

        Ok(Self { shared })
    }

    /// Start watching `element` and route its records to `callback`.
    ///
    /// Registering several callbacks for one element appends, it never replaces.
    pub fn register_callback<F>(&self, callback: F, element: G::Element) -> Subscription<G>
    where
        F: 'static + Fn(&[VisibilityRecord<G::Element>], &G),
    {
        let id = SubscriptionId(self.shared.next_id.get());
        self.shared.next_id.set(id.0 + 1);

        trace!(?element, ?id, "watching element");
        self.engine().watch(&element);
        self.shared.subscriptions.borrow_mut().push(SubscriptionRecord {
            id,
            element: element.clone(),
            callback: Rc::new(callback),
        });

        Subscription { shared: Rc::downgrade(&self.shared), id, element }
    }

    /// Stop the engine watching `element`.
    ///
    /// Subscription records for `element` stay in the table: if the element is watched again,
    /// those callbacks receive its records too. Only releasing a [`Subscription`] removes its
    /// record.
    pub fn unregister_callback(&self, element: &G::Element) {
        trace!(?element, "unwatching element");
        self.engine().unwatch(element);
    }

    /// Route a batch to the subscribers of the elements it mentions.
    ///
    /// This is what the engine's [`Dispatch`] calls. Records of elements without a subscription
    /// are dropped.
    pub fn dispatch(&self, records: &[VisibilityRecord<G::Element>]) {
        self.shared.dispatch(records)
    }

    /// The configuration the engine was created with.
    pub fn configuration(&self) -> &Configuration<G::Element> {
        &self.shared.config
    }

    /// The engine shared by every subscriber of this instance.
    pub fn engine(&self) -> &G {
        self.shared.engine.get().expect("engine is set on construction")
    }

    /// Number of subscription records, including those of unregistered elements.
    pub fn subscription_count(&self) -> usize {
        self.shared.subscriptions.borrow().len()
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<G: ObservationEngine> fmt::Debug for ObserverInstance<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverInstance")
            .field("config", &self.shared.config)
            .field("subscriptions", &self.subscription_count())
            .finish_non_exhaustive()
    }
}

/// Undoes one registration: the engine stops watching the element and the record is removed.
///
/// Dropping the handle releases it. The handle does not keep its instance alive; once the
/// registry is disposed releasing does nothing.
#[must_use = "dropping a `Subscription` stops observing the element"]
pub struct Subscription<G: ObservationEngine> {
    shared: Weak<Shared<G>>,
    id: SubscriptionId,
    element: G::Element,
}

impl<G: ObservationEngine> Subscription<G> {
    /// Identifies the registration this handle undoes.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The watched element.
    pub fn element(&self) -> &G::Element {
        &self.element
    }

    /// Release now. Equivalent to dropping.
    pub fn release(self) {}
}

impl<G: ObservationEngine> Drop for Subscription<G> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.release(self.id, &self.element);
        }
    }
}

impl<G: ObservationEngine> fmt::Debug for Subscription<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}
