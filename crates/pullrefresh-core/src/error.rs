//! Error types for building a pull-to-refresh widget and running its refresh.

use std::error::Error;
use std::fmt;

/// Rejected widget configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingContainer,
    MissingFrameScheduler,
    MissingSpawner,
    InvalidThreshold(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingContainer => write!(f, "pull-to-refresh requires a container"),
            ConfigError::MissingFrameScheduler => {
                write!(f, "pull-to-refresh requires a frame scheduler")
            }
            ConfigError::MissingSpawner => {
                write!(f, "pull-to-refresh requires a UI task spawner")
            }
            ConfigError::InvalidThreshold(value) => {
                write!(f, "threshold must be a positive finite number, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Failure reported by a refresh action.
///
/// The widget logs it and still restores the idle state.
#[derive(Debug)]
pub struct RefreshError {
    message: String,
    source: Option<Box<dyn Error + 'static>>,
}

impl RefreshError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Error + 'static) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "refresh failed: {}: {source}", self.message),
            None => write!(f, "refresh failed: {}", self.message),
        }
    }
}

impl Error for RefreshError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref()
    }
}
