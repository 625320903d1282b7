//! The table mapping a [`Configuration`] to its shared [`ObserverInstance`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use observer_core::{
    Configuration, ConfigurationKey, ElementOf, EngineBackend, EngineError, VisibilityRecord,
};
use tracing::debug;

use crate::instance::{ObserverInstance, Subscription};

type Instance<B> = ObserverInstance<<B as EngineBackend>::Engine>;

/// Shares one observer per distinct configuration between any number of subscribers.
///
/// The registry is an explicit context object: create it once, hand it (usually behind an `Rc`)
/// to everything that observes elements, and [`dispose`](Self::dispose) or drop it on shutdown.
/// Instances are never removed while the registry is alive.
pub struct ObserverRegistry<B: EngineBackend> {
    backend: B,
    // Configurations rooted at different elements share a key, hence the buckets.
    instances: RefCell<HashMap<ConfigurationKey, Vec<Instance<B>>>>,
}

impl<B: EngineBackend> ObserverRegistry<B> {
    /// An empty registry creating its engines through `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend, instances: RefCell::new(HashMap::new()) }
    }

    /// The backend engines are created with.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The instance for `config`, created through the backend if no equal configuration was
    /// requested before.
    pub fn resolve_instance(
        &self,
        config: &Configuration<ElementOf<B>>,
    ) -> Result<Instance<B>, EngineError> {
        let key = config.key();
        if let Some(instance) = self
            .instances
            .borrow()
            .get(&key)
            .and_then(|bucket| bucket.iter().find(|instance| instance.configuration() == config))
        {
            return Ok(instance.clone());
        }

        // Not borrowed while the backend runs.
        let instance = ObserverInstance::new(&self.backend, config.clone())?;
        self.instances.borrow_mut().entry(key).or_default().push(instance.clone());
        debug!(instances = self.len(), "registered observer instance");

        Ok(instance)
    }

    /// Watch `element` with the observer for `config` and deliver its records to `callback`.
    ///
    /// The returned [`Subscription`] undoes exactly this registration.
    pub fn subscribe<F>(
        &self,
        config: &Configuration<ElementOf<B>>,
        element: ElementOf<B>,
        callback: F,
    ) -> Result<Subscription<B::Engine>, EngineError>
    where
        F: 'static + Fn(&[VisibilityRecord<ElementOf<B>>], &B::Engine),
    {
        Ok(self.resolve_instance(config)?.register_callback(callback, element))
    }

    /// Stop the observer for `config` watching `element`.
    ///
    /// Subscription records are left in place, see [`ObserverInstance::unregister_callback`].
    pub fn unsubscribe(
        &self,
        config: &Configuration<ElementOf<B>>,
        element: &ElementOf<B>,
    ) -> Result<(), EngineError> {
        self.resolve_instance(config)?.unregister_callback(element);
        Ok(())
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.borrow().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every instance, and with them their engines.
    ///
    /// Outstanding [`Subscription`]s become no-ops. The registry stays usable and creates fresh
    /// instances on demand.
    pub fn dispose(&self) {
        let instances = std::mem::take(&mut *self.instances.borrow_mut());
        debug!(instances = instances.values().map(Vec::len).sum::<usize>(), "disposing registry");
        drop(instances);
    }
}

impl<B: EngineBackend + Default> Default for ObserverRegistry<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: EngineBackend> fmt::Debug for ObserverRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry").field("instances", &self.len()).finish_non_exhaustive()
    }
}
