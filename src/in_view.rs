//! Lifecycle binding for UI components.
//!
//! [`InView`] is what a component holds to track the visibility of the element it renders. The
//! host feeds it the current element and options on every render/update; `InView` decides
//! whether to subscribe, re-subscribe or deactivate, and releases its subscription when dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use observer_core::{
    ConfigError, Configuration, ElementOf, EngineBackend, EngineError, RootMargin, Thresholds,
    VisibilityRecord,
};

use crate::instance::Subscription;
use crate::registry::ObserverRegistry;

type Listener<E> = Rc<dyn Fn(&[VisibilityRecord<E>])>;

/// Options of an [`InView`].
///
/// Defaults: the viewport as root, a `"0px 0px 0px 0px"` margin, a single `0` threshold, active.
#[derive(Debug, Clone, PartialEq)]
pub struct InViewOptions<E> {
    /// `None` observes against the viewport.
    pub root: Option<E>,
    pub root_margin: RootMargin,
    pub threshold: Thresholds,
    /// An inactive `InView` keeps its element but doesn't watch it.
    pub active: bool,
}

impl<E> Default for InViewOptions<E> {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: RootMargin::ZERO,
            threshold: Thresholds::default(),
            active: true,
        }
    }
}

impl<E: Clone> InViewOptions<E> {
    pub fn with_root(mut self, root: Option<E>) -> Self {
        self.root = root;
        self
    }

    pub fn with_root_margin(mut self, margin: &str) -> Result<Self, ConfigError> {
        self.root_margin = margin.parse()?;
        Ok(self)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        self.threshold = Thresholds::single(threshold)?;
        Ok(self)
    }

    pub fn with_thresholds(
        mut self,
        thresholds: impl IntoIterator<Item = f64>,
    ) -> Result<Self, ConfigError> {
        self.threshold = Thresholds::new(thresholds)?;
        Ok(self)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The observer configuration these options ask for.
    pub fn configuration(&self) -> Configuration<E> {
        Configuration::new()
            .with_root(self.root.clone().into())
            .with_margin(self.root_margin)
            .with_thresholds(self.threshold.clone())
    }
}

/// Visibility of one element, kept in sync with a shared [`ObserverRegistry`].
pub struct InView<B: EngineBackend> {
    registry: Rc<ObserverRegistry<B>>,
    options: InViewOptions<ElementOf<B>>,
    element: Option<ElementOf<B>>,
    subscription: Option<Subscription<B::Engine>>,
    // Cleared while a step is applied, so a failed step is retried on the next update.
    synced: bool,
    entries: Rc<RefCell<Vec<VisibilityRecord<ElementOf<B>>>>>,
    listener: Option<Listener<ElementOf<B>>>,
}

impl<B: EngineBackend> InView<B> {
    pub fn new(registry: Rc<ObserverRegistry<B>>, options: InViewOptions<ElementOf<B>>) -> Self {
        Self {
            registry,
            options,
            element: None,
            subscription: None,
            synced: true,
            entries: Rc::default(),
            listener: None,
        }
    }

    /// Call `listener` with every batch delivered for the element.
    ///
    /// Takes effect on the next subscription.
    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: 'static + Fn(&[VisibilityRecord<ElementOf<B>>]),
    {
        self.listener = Some(Rc::new(listener));
        self
    }

    /// The element was (re)mounted or unmounted.
    pub fn set_element(&mut self, element: Option<ElementOf<B>>) -> Result<(), EngineError> {
        if self.synced && self.element == element {
            return Ok(());
        }
        self.element = element;
        self.sync()
    }

    /// The component re-rendered with `options`.
    pub fn set_options(
        &mut self,
        options: InViewOptions<ElementOf<B>>,
    ) -> Result<(), EngineError> {
        if self.synced && self.options == options {
            return Ok(());
        }
        self.options = options;
        self.sync()
    }

    fn sync(&mut self) -> Result<(), EngineError> {
        self.synced = false;
        self.apply()?;
        self.synced = true;
        Ok(())
    }

    fn apply(&mut self) -> Result<(), EngineError> {
        // Undo the previous step before applying the new inputs.
        self.subscription = None;

        let Some(element) = &self.element else { return Ok(()) };
        let config = self.options.configuration();
        if !self.options.active {
            return self.registry.unsubscribe(&config, element);
        }

        let entries = Rc::downgrade(&self.entries);
        let listener = self.listener.clone();
        let subscription =
            self.registry.subscribe(&config, element.clone(), move |records, _| {
                store(&entries, records);
                if let Some(listener) = &listener {
                    listener(records);
                }
            })?;
        self.subscription = Some(subscription);

        Ok(())
    }

    /// The element last passed to [`set_element`](Self::set_element).
    pub fn element(&self) -> Option<&ElementOf<B>> {
        self.element.as_ref()
    }

    /// The options last passed to [`set_options`](Self::set_options) or [`new`](Self::new).
    pub fn options(&self) -> &InViewOptions<ElementOf<B>> {
        &self.options
    }

    /// The records of the latest batch, in engine order.
    pub fn entries(&self) -> Vec<VisibilityRecord<ElementOf<B>>> {
        self.entries.borrow().clone()
    }

    /// Whether the latest record reports the element as intersecting.
    pub fn is_intersecting(&self) -> bool {
        self.entries.borrow().last().is_some_and(|record| record.is_intersecting)
    }

    /// Whether the element is currently being watched.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }
}

fn store<E: Clone>(
    entries: &Weak<RefCell<Vec<VisibilityRecord<E>>>>,
    records: &[VisibilityRecord<E>],
) {
    if let Some(entries) = entries.upgrade() {
        *entries.borrow_mut() = records.to_vec();
    }
}

impl<B: EngineBackend> fmt::Debug for InView<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InView")
            .field("element", &self.element)
            .field("options", &self.options)
            .field("subscribed", &self.is_subscribed())
            .finish_non_exhaustive()
    }
}
