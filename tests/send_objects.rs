#[allow(dead_code)]
fn needs_send<T: Send + Sync>() {}

#[test]
fn config_send() {
    // ensures that configurations can be built off the UI thread
    needs_send::<shared_observer::Configuration<u64>>();
    needs_send::<shared_observer::RootMargin>();
    needs_send::<shared_observer::Thresholds>();
}

#[test]
fn records_send() {
    // ensures that records copied out of a batch can be handed to worker threads
    needs_send::<shared_observer::VisibilityRecord<u64>>();
    needs_send::<shared_observer::Rect>();
}

#[test]
fn errors_send() {
    needs_send::<shared_observer::ConfigError>();
    needs_send::<shared_observer::EngineError>();
    needs_send::<shared_observer::ObserverError>();
}
