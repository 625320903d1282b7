//! Root margins.
//!
//! A root margin grows or shrinks the root's bounding box before intersections are computed. It
//! is written with the CSS `margin` shorthand: one to four offsets, each in pixels or percent of
//! the root's size. Units are case-insensitive and an empty string means no margin.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One side of a [`RootMargin`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarginOffset {
    /// Logical pixels.
    Px(f64),
    /// Percent of the root's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginOffset {
    pub const ZERO: Self = Self::Px(0.0);

    /// The numeric part of the offset.
    pub fn value(self) -> f64 {
        match self {
            Self::Px(value) | Self::Percent(value) => value,
        }
    }

    // `-0` and `0` describe the same margin, so they must compare and hash alike.
    fn bits(self) -> (u8, u64) {
        let normalize = |value: f64| if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() };
        match self {
            Self::Px(value) => (0, normalize(value)),
            Self::Percent(value) => (1, normalize(value)),
        }
    }
}

impl Default for MarginOffset {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for MarginOffset {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for MarginOffset {}

impl Hash for MarginOffset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl fmt::Display for MarginOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print `-0` as `0`, the engine would otherwise see a different string for the same margin.
        let value = self.value() + 0.0;
        match self {
            Self::Px(_) => write!(f, "{value}px"),
            Self::Percent(_) => write!(f, "{value}%"),
        }
    }
}

impl FromStr for MarginOffset {
    type Err = &'static str;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let unit = token.len().checked_sub(2).and_then(|start| token.get(start..));
        let (number, percent) = if unit.is_some_and(|unit| unit.eq_ignore_ascii_case("px")) {
            (&token[..token.len() - 2], false)
        } else if let Some(number) = token.strip_suffix('%') {
            (number, true)
        } else {
            return Err("offsets must be in pixels or percent");
        };

        match number.parse::<f64>() {
            Ok(value) if value.is_finite() && percent => Ok(Self::Percent(value)),
            Ok(value) if value.is_finite() => Ok(Self::Px(value)),
            _ => Err("offset is not a finite number"),
        }
    }
}

/// Offsets applied to each side of the root, in CSS order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RootMargin {
    pub top: MarginOffset,
    pub right: MarginOffset,
    pub bottom: MarginOffset,
    pub left: MarginOffset,
}

impl RootMargin {
    /// No margin, `"0px 0px 0px 0px"`.
    pub const ZERO: Self = Self::uniform(MarginOffset::ZERO);

    pub const fn new(
        top: MarginOffset,
        right: MarginOffset,
        bottom: MarginOffset,
        left: MarginOffset,
    ) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(offset: MarginOffset) -> Self {
        Self::new(offset, offset, offset, offset)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = ConfigError;

    fn from_str(margin: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ConfigError::InvalidMargin { margin: margin.to_owned(), reason };

        let mut offsets = [MarginOffset::ZERO; 4];
        let mut len = 0;
        for token in margin.split_whitespace() {
            if len == offsets.len() {
                return Err(invalid("expected at most four offsets"));
            }
            offsets[len] = token.parse().map_err(invalid)?;
            len += 1;
        }

        let [a, b, c, d] = offsets;
        match len {
            0 => Ok(Self::ZERO),
            1 => Ok(Self::uniform(a)),
            2 => Ok(Self::new(a, b, a, b)),
            3 => Ok(Self::new(a, b, c, b)),
            _ => Ok(Self::new(a, b, c, d)),
        }
    }
}
