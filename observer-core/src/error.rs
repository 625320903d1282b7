//! Common error types.

use std::{error, fmt};

/// A [`Configuration`] could not be built from the given values.
///
/// [`Configuration`]: crate::config::Configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The root margin is not a valid one to four value offset list.
    InvalidMargin { margin: String, reason: &'static str },
    /// A threshold is not a finite number between `0` and `1`.
    InvalidThreshold(f64),
}

/// The observation engine refused to create an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    message: String,
}

/// A general error that may occur while setting up an observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverError {
    /// The requested configuration is invalid.
    Config(ConfigError),
    /// The engine could not be created for the requested configuration.
    Engine(EngineError),
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The message reported by the engine.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ConfigError> for ObserverError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<EngineError> for ObserverError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ConfigError::InvalidMargin { margin, reason } => {
                write!(f, "invalid root margin {margin:?}: {reason}")
            },
            ConfigError::InvalidThreshold(value) => {
                write!(f, "threshold {value} is not a number between 0 and 1")
            },
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(&format!("observation engine error: {}", self.message))
    }
}

impl fmt::Display for ObserverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ObserverError::Config(e) => e.fmt(f),
            ObserverError::Engine(e) => e.fmt(f),
        }
    }
}

impl error::Error for ConfigError {}
impl error::Error for EngineError {}

impl error::Error for ObserverError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ObserverError::Config(e) => Some(e),
            ObserverError::Engine(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::redundant_clone)]

    use super::*;

    #[test]
    fn ensure_fmt_does_not_panic() {
        let _ = format!(
            "{:?}, {}",
            ConfigError::InvalidThreshold(2.0),
            ConfigError::InvalidMargin { margin: "10".into(), reason: "missing unit" }.clone()
        );
        let _ = format!("{:?}, {}", EngineError::new("boom"), EngineError::new("boom").clone());
    }

    #[test]
    fn observer_error_wraps_sources() {
        let err: ObserverError = EngineError::new("SyntaxError").into();
        assert_eq!(err.to_string(), "observation engine error: SyntaxError");
        assert!(error::Error::source(&err).is_some());

        let err: ObserverError = ConfigError::InvalidThreshold(-1.0).into();
        assert_eq!(err.to_string(), "threshold -1 is not a number between 0 and 1");
    }
}
