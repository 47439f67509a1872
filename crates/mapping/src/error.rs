use jsonize_jpath::{JsonType, PathError};
use jsonize_tree::AccessError;
use jsonize_xpath::XPathError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    XPath(#[from] XPathError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("The value {value} read from '{path}' cannot be cast to {target:?}")]
    Cast {
        path: String,
        value: String,
        target: JsonType,
    },

    #[error("Transformation '{0}' is not registered")]
    UnknownTransformation(String),

    #[error("The sequence mapping at '{0}' needs at least one item mapping")]
    MissingItemMappings(String),

    #[error("'{path}' is not inside the sequence '{sequence}'")]
    NotADescendant { path: String, sequence: String },
}
