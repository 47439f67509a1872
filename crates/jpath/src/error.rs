use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("JSONPath syntax error in '{path}': {message}")]
    Syntax { path: String, message: String },

    #[error("Split position {at} is out of range for a path of length {len}")]
    SplitOutOfRange { at: isize, len: usize },

    #[error("'{0}' is not a relative path")]
    NotRelative(String),

    #[error("'{ancestor}' is not an ancestor of '{path}'")]
    NotAnAncestor { path: String, ancestor: String },

    #[error("A slice step cannot be zero")]
    ZeroSliceStep,

    #[error("Cannot classify value: {0}")]
    Unclassifiable(String),
}
