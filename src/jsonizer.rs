// src/jsonizer.rs
use crate::builder::JsonizerBuilder;
use crate::error::JsonizeError;
use jsonize_mapping::{
    ApplyContext, MappingError, MappingOptions, MappingRule, TransformRegistry, XmlDocument, XmlNodeTree,
    apply_rules, build_node_tree, find_namespaces,
};
use jsonize_xpath::Namespaces;
use log::{debug, info};
use serde_json::{Map, Value};

/// Converts XML documents into JSON following a list of mapping rules, and
/// infers such rules from sample documents.
///
/// Without a configured namespace table each document's own declarations
/// (those on its document element) are used.
#[derive(Debug, Clone, Default)]
pub struct Jsonizer {
    pub(crate) options: MappingOptions,
    pub(crate) namespaces: Option<Namespaces>,
    pub(crate) transformations: TransformRegistry,
}

impl Jsonizer {
    /// A jsonizer with default options and the built-in transformations.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> JsonizerBuilder {
        JsonizerBuilder::new()
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    pub fn transformations(&self) -> &TransformRegistry {
        &self.transformations
    }

    /// Describes `xml` as sequences and leaves.
    pub fn node_tree(&self, xml: &str) -> Result<XmlNodeTree, JsonizeError> {
        let doc = XmlDocument::parse(xml)?;
        let namespaces = self.namespaces_for(&doc);
        Ok(build_node_tree(doc.root_node(), Some(&namespaces))?)
    }

    /// Infers the mapping rules that mirror the structure of `xml`.
    pub fn infer_map(&self, xml: &str) -> Result<Vec<MappingRule>, JsonizeError> {
        let rules = self.node_tree(xml)?.to_jsonize(&self.options)?;
        info!("Inferred {} mapping rules", rules.len());
        Ok(rules)
    }

    /// Maps `xml` into a new JSON object.
    pub fn convert(&self, xml: &str, rules: &[MappingRule]) -> Result<Value, JsonizeError> {
        self.convert_into(xml, rules, Value::Object(Map::new()))
    }

    /// Maps `xml` into an existing JSON value, returning the updated value.
    pub fn convert_into(&self, xml: &str, rules: &[MappingRule], mut json: Value) -> Result<Value, JsonizeError> {
        let doc = XmlDocument::parse(xml)?;
        let namespaces = self.namespaces_for(&doc);
        let ctx = ApplyContext::new(&namespaces, &self.transformations);

        debug!("Applying {} mapping rules", rules.len());
        apply_rules(rules, doc.root_node(), &mut json, &ctx)?;
        Ok(json)
    }

    /// Reads rules in their JSON wire format, checking that every
    /// transformation they name is registered.
    pub fn rules_from_json(&self, text: &str) -> Result<Vec<MappingRule>, JsonizeError> {
        let rules: Vec<MappingRule> = serde_json::from_str(text)?;
        self.check_transformations(&rules)?;
        Ok(rules)
    }

    pub fn rules_to_json(&self, rules: &[MappingRule]) -> Result<String, JsonizeError> {
        Ok(serde_json::to_string_pretty(rules)?)
    }

    fn check_transformations(&self, rules: &[MappingRule]) -> Result<(), MappingError> {
        for rule in rules {
            if let Some(name) = &rule.transformation
                && !self.transformations.contains(name)
            {
                return Err(MappingError::UnknownTransformation(name.clone()));
            }
            self.check_transformations(&rule.item_mappings)?;
        }
        Ok(())
    }

    fn namespaces_for(&self, doc: &XmlDocument<'_>) -> Namespaces {
        match &self.namespaces {
            Some(namespaces) => namespaces.clone(),
            None => find_namespaces(doc.root_node()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_with_inferred_rules() {
        let jsonizer = Jsonizer::new();
        let xml = r#"<a><b id="1">x</b></a>"#;
        let rules = jsonizer.infer_map(xml).unwrap();
        let json = jsonizer.convert(xml, &rules).unwrap();
        assert_eq!(json, json!({"a": {"b": {"id": 1, "value": "x"}}}));
    }

    #[test]
    fn test_malformed_xml() {
        let error = Jsonizer::new().infer_map("<a><b></a>").unwrap_err();
        assert!(matches!(error, JsonizeError::Xml(_)));
    }

    #[test]
    fn test_rules_from_json_checks_transformations() {
        let text = r#"[{
            "from": {"path": "/a/b", "type": "sequence"},
            "to": {"path": "$.b", "type": "array"},
            "itemMappings": [
                {"from": {"path": ".", "type": "value"}, "to": {"path": "@", "type": "string"}, "transformation": "shout"}
            ]
        }]"#;
        let error = Jsonizer::new().rules_from_json(text).unwrap_err();
        assert!(matches!(
            error,
            JsonizeError::Mapping(MappingError::UnknownTransformation(ref name)) if name == "shout"
        ));
    }
}
