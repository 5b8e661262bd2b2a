//! Error taxonomy for the COR/tilt core.
//!
//! Lookups that miss (e.g. a slice with no stored sample) are not errors and
//! return `None` instead. Everything here is a precondition failure or a
//! failure bubbled up from a reconstruction backend.

use std::fmt;

/// Failure reported by an external reconstruction backend.
///
/// The coordinator forwards these unchanged and never retries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendError {
    pub backend: String,
    pub message: String,
}

impl BackendError {
    pub fn new(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.backend, self.message)
    }
}

impl std::error::Error for BackendError {}

#[derive(Clone, Debug, PartialEq)]
pub enum CorTiltError {
    /// An operation that needs a bound image stack ran without one, or a fit
    /// was required but is missing.
    InvalidState { operation: &'static str },
    /// Regression requested on an empty sample table.
    EmptyData,
    /// All samples share one slice index, so the slope is undefined.
    DegenerateData { slice: usize },
    /// Invalid construction arguments, e.g. a slice outside the stack.
    Configuration(String),
    /// No backend registered under the requested algorithm name.
    UnknownAlgorithm(String),
    Backend(BackendError),
    /// The progress sink was cancelled between two slice-level steps.
    Cancelled { completed: usize, total: usize },
}

impl fmt::Display for CorTiltError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorTiltError::InvalidState { operation } => {
                write!(f, "invalid state for {operation}: no image stack bound or no fit available")
            }
            CorTiltError::EmptyData => write!(f, "linear regression requires at least one sample"),
            CorTiltError::DegenerateData { slice } => write!(
                f,
                "linear regression is undefined: every sample is at slice {slice}"
            ),
            CorTiltError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            CorTiltError::UnknownAlgorithm(name) => {
                write!(f, "no reconstruction backend registered for '{name}'")
            }
            CorTiltError::Backend(err) => write!(f, "backend failure ({err})"),
            CorTiltError::Cancelled { completed, total } => {
                write!(f, "cancelled after {completed} of {total} steps")
            }
        }
    }
}

impl std::error::Error for CorTiltError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorTiltError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for CorTiltError {
    fn from(err: BackendError) -> Self {
        CorTiltError::Backend(err)
    }
}

pub type Result<T> = std::result::Result<T, CorTiltError>;
