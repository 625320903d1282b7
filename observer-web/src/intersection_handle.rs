use js_sys::Array;
use observer_core::{
    Configuration, Dispatch, EngineError, ObservationEngine, Rect, Root, VisibilityRecord,
};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    DomRectReadOnly, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

/// One `IntersectionObserver` and the closure it reports to.
pub struct IntersectionObserverHandle {
    observer: IntersectionObserver,
    _closure: Closure<dyn FnMut(Array)>,
}

impl IntersectionObserverHandle {
    /// Create an observer for `config` reporting every batch to `dispatch`.
    ///
    /// Fails if the browser rejects the options.
    pub fn new(
        config: &Configuration<Element>,
        dispatch: Dispatch<Element>,
    ) -> Result<Self, EngineError> {
        let closure = Closure::new(move |entries: Array| {
            let records: Vec<_> = entries
                .iter()
                .filter_map(|entry| match entry.dyn_into::<IntersectionObserverEntry>() {
                    Ok(entry) => Some(record(&entry)),
                    Err(entry) => {
                        tracing::warn!("dropping unexpected observer entry: {entry:?}");
                        None
                    },
                })
                .collect();
            dispatch.dispatch(&records);
        });

        let options = IntersectionObserverInit::new();
        if let Root::Element(root) = config.root() {
            options.set_root(Some(root));
        }
        options.set_root_margin(&config.margin().to_string());
        let thresholds: Array =
            config.thresholds().as_slice().iter().copied().map(JsValue::from_f64).collect();
        options.set_threshold(&thresholds);

        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)
                .map_err(engine_error)?;

        Ok(Self { observer, _closure: closure })
    }

    /// The underlying `IntersectionObserver`.
    pub fn observer(&self) -> &IntersectionObserver {
        &self.observer
    }
}

impl ObservationEngine for IntersectionObserverHandle {
    type Element = Element;

    fn watch(&self, element: &Element) {
        self.observer.observe(element);
    }

    fn unwatch(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

impl Drop for IntersectionObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect()
    }
}

fn record(entry: &IntersectionObserverEntry) -> VisibilityRecord<Element> {
    VisibilityRecord {
        target: entry.target(),
        is_intersecting: entry.is_intersecting(),
        intersection_ratio: entry.intersection_ratio(),
        bounding_client_rect: rect(&entry.bounding_client_rect()),
        intersection_rect: rect(&entry.intersection_rect()),
        root_bounds: entry.root_bounds().as_ref().map(rect),
        time: entry.time(),
    }
}

fn rect(rect: &DomRectReadOnly) -> Rect {
    Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
}

// Constructor failures are `DOMException`s (a bad `rootMargin`) or `RangeError`s (a bad
// `threshold`), both of which are `Error`s.
fn engine_error(error: JsValue) -> EngineError {
    match error.dyn_ref::<js_sys::Error>() {
        Some(error) => EngineError::new(format!(
            "{}: {}",
            String::from(error.name()),
            String::from(error.message())
        )),
        None => EngineError::new(format!("{error:?}")),
    }
}

#[cfg(test)]
mod tests {
    use observer_core::{ElementOf, EngineBackend};

    use crate::WebBackend;

    fn needs_backend<B: EngineBackend>() {}

    #[test]
    fn web_backend_observes_elements() {
        // ensures that the backend builds on every target and watches DOM elements
        needs_backend::<WebBackend>();
        let _: fn(&ElementOf<WebBackend>) -> &web_sys::Element = |element| element;
    }
}
