use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XPathError {
    #[error("XPath syntax error in '{path}': {message}")]
    Syntax { path: String, message: String },

    #[error("Split position {at} is out of range for a path of length {len}")]
    SplitOutOfRange { at: isize, len: usize },

    #[error("'{0}' is not a relative path")]
    NotRelative(String),

    #[error("'{ancestor}' is not an ancestor of '{path}'")]
    NotAnAncestor { path: String, ancestor: String },

    #[error("Namespace '{0}' is not registered in the namespace table")]
    NamespaceNotFound(String),

    #[error("Prefix '{0}' is not registered in the namespace table")]
    PrefixNotFound(String),

    #[error("'{0}' does not refer to an attribute")]
    NotAnAttribute(String),

    #[error("Invalid repetition index {index} in '{path}': XPath indices start at 1")]
    InvalidIndex { path: String, index: usize },
}
