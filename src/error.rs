// src/error.rs
use jsonize_jpath::PathError;
use jsonize_mapping::MappingError;
use jsonize_tree::AccessError;
use jsonize_xpath::XPathError;
use thiserror::Error;

/// Every way converting a document can fail.
#[derive(Error, Debug)]
pub enum JsonizeError {
    #[error("XML parsing failed: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mapping failed: {0}")]
    Mapping(#[from] MappingError),

    #[error("Invalid JSONPath: {0}")]
    Path(#[from] PathError),

    #[error("Invalid XPath: {0}")]
    XPath(#[from] XPathError),

    #[error("Tree access failed: {0}")]
    Access(#[from] AccessError),
}
