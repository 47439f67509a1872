//! The declarative mapping rule and its JSON wire format.
use crate::node::XmlNodeKind;
use jsonize_jpath::{JsonPath, JsonType};
use jsonize_xpath::XPath;
use serde::{Deserialize, Serialize};

/// Where a rule reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XmlEndpoint {
    pub path: XPath,
    #[serde(rename = "type")]
    pub kind: XmlNodeKind,
}

/// Where a rule writes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonEndpoint {
    pub path: JsonPath,
    #[serde(rename = "type")]
    pub kind: JsonType,
}

/// Pairs a source XPath and node kind with a destination JSONPath and type.
///
/// Sequence rules carry `item_mappings`: relative rules that build one array
/// item from each matched element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    pub from: XmlEndpoint,
    pub to: JsonEndpoint,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_mappings: Vec<MappingRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<String>,
}

impl MappingRule {
    pub fn new(from: XPath, from_kind: XmlNodeKind, to: JsonPath, to_kind: JsonType) -> Self {
        Self {
            from: XmlEndpoint {
                path: from,
                kind: from_kind,
            },
            to: JsonEndpoint { path: to, kind: to_kind },
            item_mappings: Vec::new(),
            transformation: None,
        }
    }

    pub fn with_item_mappings(mut self, item_mappings: Vec<MappingRule>) -> Self {
        self.item_mappings = item_mappings;
        self
    }

    pub fn with_transformation(mut self, name: impl Into<String>) -> Self {
        self.transformation = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let wire = json!({
            "from": {"path": "/a/b", "type": "sequence"},
            "to": {"path": "$.a.b", "type": "array"},
            "itemMappings": [
                {"from": {"path": "./child", "type": "value"}, "to": {"path": "@.child", "type": "infer"}},
                {
                    "from": {"path": "./@attrib", "type": "attribute"},
                    "to": {"path": "@.attrib", "type": "integer"},
                    "transformation": "trim"
                }
            ]
        });

        let rule: MappingRule = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(rule.from.kind, XmlNodeKind::Sequence);
        assert_eq!(rule.to.kind, JsonType::Array);
        assert_eq!(rule.item_mappings.len(), 2);
        assert_eq!(rule.item_mappings[1].transformation.as_deref(), Some("trim"));
        assert_eq!(serde_json::to_value(&rule).unwrap(), wire);
    }

    #[test]
    fn test_invalid_paths_are_rejected() {
        let wire = json!({"from": {"path": "a/b", "type": "value"}, "to": {"path": "$.a", "type": "infer"}});
        assert!(serde_json::from_value::<MappingRule>(wire).is_err());
        let wire = json!({"from": {"path": "/a", "type": "value"}, "to": {"path": "$.a[", "type": "infer"}});
        assert!(serde_json::from_value::<MappingRule>(wire).is_err());
    }
}
