//! Filter execution error types

use std::any::Any;

/// Error produced when a filter stage fails on a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The filter rejected its input.
    #[error("Filter '{filter}' failed: {message}")]
    Failed { filter: String, message: String },

    /// The filter panicked.
    #[error("Filter '{filter}' panicked: {message}")]
    Panicked { filter: String, message: String },
}

impl FilterError {
    /// Creates a failure for the given filter.
    pub fn failed(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            filter: filter.into(),
            message: message.into(),
        }
    }

    /// Creates a panic error from a caught panic payload.
    pub fn panicked(filter: impl Into<String>, panic: &Box<dyn Any + Send>) -> Self {
        Self::Panicked {
            filter: filter.into(),
            message: extract_panic_message(panic),
        }
    }

    /// Returns the name of the stage that failed.
    pub fn filter(&self) -> &str {
        match self {
            Self::Failed { filter, .. } | Self::Panicked { filter, .. } => filter,
        }
    }

    /// Attaches a stage name to an error raised by an anonymous function.
    pub(crate) fn with_filter(self, name: &str) -> Self {
        match self {
            Self::Failed { filter, message } if filter.is_empty() => Self::Failed {
                filter: name.to_string(),
                message,
            },
            other => other,
        }
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
