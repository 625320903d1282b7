#![cfg(feature = "serde")]

use serde::{Deserialize, Serialize};
use shared_observer::{MarginOffset, Rect, RootMargin, Thresholds, VisibilityRecord};

#[allow(dead_code)]
fn needs_serde<S: Serialize + Deserialize<'static>>() {}

#[test]
fn config_serde() {
    needs_serde::<MarginOffset>();
    needs_serde::<RootMargin>();
    needs_serde::<Thresholds>();
}

#[test]
fn record_serde() {
    needs_serde::<Rect>();
    needs_serde::<VisibilityRecord<u64>>();
    needs_serde::<VisibilityRecord<String>>();
}
