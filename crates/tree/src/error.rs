use jsonize_jpath::JsonPath;
use thiserror::Error;

/// A failed read or write. `at` is the sub-path up to and including the
/// segment that could not be followed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("No value at '{at}'")]
    PathNotFound { at: JsonPath },

    #[error("Cannot index into a non-container value at '{at}'")]
    NotContainer { at: JsonPath },

    #[error("Index {index} at '{at}' is out of bounds for an array of length {len}")]
    IndexOutOfBounds { at: JsonPath, index: isize, len: usize },

    #[error("Unsupported operation at '{at}': {reason}")]
    UnsupportedOperation { at: JsonPath, reason: String },
}

impl AccessError {
    pub fn at(&self) -> &JsonPath {
        match self {
            AccessError::PathNotFound { at }
            | AccessError::NotContainer { at }
            | AccessError::IndexOutOfBounds { at, .. }
            | AccessError::UnsupportedOperation { at, .. } => at,
        }
    }

    /// True for the failures a write repairs by creating structure.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AccessError::UnsupportedOperation { .. })
    }

    pub(crate) fn unsupported(at: JsonPath, reason: &str) -> Self {
        AccessError::UnsupportedOperation {
            at,
            reason: reason.to_string(),
        }
    }
}
