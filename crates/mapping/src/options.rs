//! Naming conventions used when mapping rules are inferred.
use serde::{Deserialize, Serialize};

fn default_value_marker() -> String {
    "value".to_string()
}

fn default_with_namespaces() -> bool {
    true
}

/// Controls how XML names turn into JSON keys.
///
/// - `attribute_marker` is prepended to attribute names (`"_"` gives `_id`).
/// - `value_marker` names the key holding an element's own text; an empty
///   marker maps the text straight onto the element's key.
/// - `with_namespaces` keeps short namespace prefixes in keys (`ns:tag`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingOptions {
    #[serde(default)]
    pub attribute_marker: String,
    #[serde(default = "default_value_marker")]
    pub value_marker: String,
    #[serde(default = "default_with_namespaces")]
    pub with_namespaces: bool,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            attribute_marker: String::new(),
            value_marker: default_value_marker(),
            with_namespaces: default_with_namespaces(),
        }
    }
}
