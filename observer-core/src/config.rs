//! The [`Configuration`] value identifying one shareable observation setup.

use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::margin::RootMargin;

/// The box intersections are computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root<E> {
    /// The top-level viewport.
    Viewport,
    /// An ancestor of the watched elements.
    Element(E),
}

impl<E> Default for Root<E> {
    fn default() -> Self {
        Self::Viewport
    }
}

impl<E> Root<E> {
    pub fn element(&self) -> Option<&E> {
        match self {
            Self::Viewport => None,
            Self::Element(element) => Some(element),
        }
    }
}

impl<E> From<Option<E>> for Root<E> {
    fn from(value: Option<E>) -> Self {
        value.map_or(Self::Viewport, Self::Element)
    }
}

/// Visibility fractions at which the engine reports a change.
///
/// The list is never empty and every value is a finite number in `0..=1`. Order is preserved
/// and significant for equality: `[0, 1]` and `[1, 0]` are different configurations.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Thresholds(Vec<f64>);

impl Thresholds {
    /// Validate `values`. An empty list means `[0]`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Result<Self, ConfigError> {
        let mut thresholds = Vec::new();
        for value in values {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold(value));
            }
            // `-0` folds into `0`.
            thresholds.push(value + 0.0);
        }

        if thresholds.is_empty() {
            thresholds.push(0.0);
        }

        Ok(Self(thresholds))
    }

    pub fn single(value: f64) -> Result<Self, ConfigError> {
        Self::new([value])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self(vec![0.0])
    }
}

impl PartialEq for Thresholds {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Thresholds {}

impl Hash for Thresholds {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for value in &self.0 {
            value.to_bits().hash(state);
        }
    }
}

impl TryFrom<Vec<f64>> for Thresholds {
    type Error = ConfigError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Thresholds> for Vec<f64> {
    fn from(value: Thresholds) -> Self {
        value.0
    }
}

/// Root, margin and thresholds of an observation.
///
/// Two configurations built from different but equivalent inputs (`"10px"` and
/// `"10px 10px 10px 10px"`) compare equal and share one observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration<E> {
    root: Root<E>,
    margin: RootMargin,
    thresholds: Thresholds,
}

impl<E> Default for Configuration<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Configuration<E> {
    /// The viewport as root, no margin and a single `0` threshold.
    pub fn new() -> Self {
        Self { root: Root::Viewport, margin: RootMargin::ZERO, thresholds: Thresholds::default() }
    }

    /// Observe against `root`.
    pub fn with_root(mut self, root: Root<E>) -> Self {
        self.root = root;
        self
    }

    /// Grow or shrink the root's box by `margin`.
    pub fn with_margin(mut self, margin: RootMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Parse `margin` with the CSS `margin` shorthand, see [`RootMargin`].
    pub fn with_root_margin(self, margin: &str) -> Result<Self, ConfigError> {
        Ok(self.with_margin(margin.parse()?))
    }

    /// Report whenever the visible fraction crosses one of `thresholds`.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// A single threshold, validated like [`Thresholds::single`].
    pub fn with_threshold(self, threshold: f64) -> Result<Self, ConfigError> {
        Ok(self.with_thresholds(Thresholds::single(threshold)?))
    }

    pub fn root(&self) -> &Root<E> {
        &self.root
    }

    pub fn margin(&self) -> &RootMargin {
        &self.margin
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The hashable part of the configuration.
    ///
    /// Equal configurations have equal keys. Configurations rooted at different elements share a
    /// key, since host elements are only required to be comparable.
    pub fn key(&self) -> ConfigurationKey {
        ConfigurationKey {
            viewport: matches!(self.root, Root::Viewport),
            margin: self.margin,
            thresholds: self.thresholds.clone(),
        }
    }
}

/// See [`Configuration::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigurationKey {
    viewport: bool,
    margin: RootMargin,
    thresholds: Thresholds,
}
