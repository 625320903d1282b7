//! Visibility records reported by an observation engine.

use dpi::{LogicalPosition, LogicalSize};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in logical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub origin: LogicalPosition<f64>,
    pub size: LogicalSize<f64>,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { origin: LogicalPosition::new(x, y), size: LogicalSize::new(width, height) }
    }

    pub fn area(&self) -> f64 {
        self.size.width * self.size.height
    }
}

/// One visibility change of one watched element.
///
/// Everything but [`target`](Self::target) is passed through from the engine untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VisibilityRecord<E> {
    /// The watched element this record belongs to.
    pub target: E,
    pub is_intersecting: bool,
    /// Fraction of the target's bounding box that is visible, in `0..=1`.
    pub intersection_ratio: f64,
    pub bounding_client_rect: Rect,
    pub intersection_rect: Rect,
    /// `None` when the engine does not expose the root's bounds, e.g. across origins.
    pub root_bounds: Option<Rect>,
    /// Milliseconds since the engine's time origin.
    pub time: f64,
}

impl<E> VisibilityRecord<E> {
    /// A record without geometry.
    pub fn new(target: E, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
            bounding_client_rect: Rect::default(),
            intersection_rect: Rect::default(),
            root_bounds: None,
            time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_geometry() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.origin, LogicalPosition::new(10.0, 20.0));
        assert_eq!(rect.area(), 1200.0);
        assert_eq!(Rect::default().area(), 0.0);
    }

    #[test]
    fn bare_record() {
        let record = VisibilityRecord::new("a", true);
        assert_eq!(record.intersection_ratio, 1.0);
        assert_eq!(record.root_bounds, None);
        assert!(!VisibilityRecord::new("a", false).is_intersecting);
    }
}
