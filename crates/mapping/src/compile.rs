//! Compiles node descriptors into mapping rules.
use crate::error::MappingError;
use crate::node::{NodeDescriptor, XmlNode, XmlNodeKind, XmlNodeTree, XmlSequenceNode};
use crate::options::MappingOptions;
use crate::rule::MappingRule;
use jsonize_jpath::{JsonPath, JsonType, PathSegment};

impl XmlNode {
    /// Maps this node onto the JSONPath that mirrors its XPath, typed `infer`.
    ///
    /// A value node writes below `options.value_marker` when the marker is
    /// set, so that an element's text does not collide with its children.
    /// A bare sequence node compiles like a sequence without children.
    pub fn to_jsonize(&self, options: &MappingOptions) -> Result<MappingRule, MappingError> {
        if self.kind == XmlNodeKind::Sequence {
            return XmlSequenceNode::new(self.path.clone(), Vec::new())?.to_jsonize(options);
        }

        let mut to = self.path.to_json_path(&options.attribute_marker, options.with_namespaces)?;
        if self.kind == XmlNodeKind::Value {
            with_value_marker(&mut to, &options.value_marker);
        }

        Ok(MappingRule::new(self.path.clone(), self.kind, to, JsonType::Infer))
    }
}

impl XmlSequenceNode {
    /// Maps this sequence onto an array, with one item mapping per child.
    ///
    /// The repetition index the sequence was discovered with is dropped, so
    /// that every repetition is selected.
    pub fn to_jsonize(&self, options: &MappingOptions) -> Result<MappingRule, MappingError> {
        let from = self.path().without_last_index();
        let to = from.to_json_path(&options.attribute_marker, options.with_namespaces)?;

        let item_mappings = self
            .children()
            .iter()
            .map(|child| child.to_jsonize(options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MappingRule::new(from, XmlNodeKind::Sequence, to, JsonType::Array).with_item_mappings(item_mappings))
    }
}

impl NodeDescriptor {
    pub fn to_jsonize(&self, options: &MappingOptions) -> Result<MappingRule, MappingError> {
        match self {
            NodeDescriptor::Node(node) => node.to_jsonize(options),
            NodeDescriptor::Sequence(sequence) => sequence.to_jsonize(options),
        }
    }
}

impl XmlNodeTree {
    /// Compiles every node of the tree, in tree order.
    pub fn to_jsonize(&self, options: &MappingOptions) -> Result<Vec<MappingRule>, MappingError> {
        self.iter().map(|node| node.to_jsonize(options)).collect()
    }
}

fn with_value_marker(path: &mut JsonPath, value_marker: &str) {
    if !value_marker.is_empty() {
        path.push(PathSegment::Key(value_marker.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonize_jpath::parse_path;
    use jsonize_xpath::parse_xpath;

    fn node(path: &str, kind: XmlNodeKind) -> XmlNode {
        XmlNode::new(parse_xpath(path).unwrap(), kind)
    }

    fn options(attribute_marker: &str, value_marker: &str, with_namespaces: bool) -> MappingOptions {
        MappingOptions {
            attribute_marker: attribute_marker.to_string(),
            value_marker: value_marker.to_string(),
            with_namespaces,
        }
    }

    #[test]
    fn test_value_node() {
        let rule = node("/ns:element/sub", XmlNodeKind::Value)
            .to_jsonize(&MappingOptions::default())
            .unwrap();
        assert_eq!(rule.from.path.to_string(), "/ns:element/sub");
        assert_eq!(rule.from.kind, XmlNodeKind::Value);
        assert_eq!(rule.to.path, parse_path("$.ns:element.sub.value").unwrap());
        assert_eq!(rule.to.kind, JsonType::Infer);
        assert!(rule.item_mappings.is_empty());

        let rule = node("/ns:element/sub", XmlNodeKind::Value)
            .to_jsonize(&options("", "val", false))
            .unwrap();
        assert_eq!(rule.to.path.to_string(), "$.element.sub.val");
    }

    #[test]
    fn test_element_and_attribute_nodes() {
        let opts = options("_", "value", true);
        let rule = node("/a/b", XmlNodeKind::Element).to_jsonize(&opts).unwrap();
        assert_eq!(rule.to.path.to_string(), "$.a.b");

        let rule = node("/a/b/@ns:id", XmlNodeKind::Attribute).to_jsonize(&opts).unwrap();
        assert_eq!(rule.to.path.to_string(), "$.a.b._ns:id");
        assert_eq!(rule.from.kind, XmlNodeKind::Attribute);
    }

    #[test]
    fn test_indexed_value_keeps_its_position() {
        let rule = node("/a/b[2]/c", XmlNodeKind::Value)
            .to_jsonize(&options("", "", true))
            .unwrap();
        assert_eq!(rule.to.path.to_string(), "$.a.b[1].c");
    }

    #[test]
    fn test_sequence_with_children() {
        let sequence = XmlSequenceNode::new(
            parse_xpath("/a/b[1]").unwrap(),
            vec![
                node("./child", XmlNodeKind::Value).into(),
                node("./@attrib", XmlNodeKind::Attribute).into(),
            ],
        )
        .unwrap();

        let rule = sequence.to_jsonize(&options("", "", true)).unwrap();
        assert_eq!(rule.from.path.to_string(), "/a/b");
        assert_eq!(rule.from.kind, XmlNodeKind::Sequence);
        assert_eq!(rule.to.path.to_string(), "$.a.b");
        assert_eq!(rule.to.kind, JsonType::Array);

        let items: Vec<(String, XmlNodeKind)> = rule
            .item_mappings
            .iter()
            .map(|item| (item.to.path.to_string(), item.from.kind))
            .collect();
        assert_eq!(
            items,
            vec![
                ("@.child".to_string(), XmlNodeKind::Value),
                ("@.attrib".to_string(), XmlNodeKind::Attribute)
            ]
        );
    }

    #[test]
    fn test_sequence_without_children_maps_item_value() {
        let sequence = XmlSequenceNode::new(parse_xpath("/a/b").unwrap(), vec![]).unwrap();

        let rule = sequence.to_jsonize(&MappingOptions::default()).unwrap();
        assert_eq!(rule.item_mappings.len(), 1);
        assert_eq!(rule.item_mappings[0].from.path.to_string(), ".");
        assert_eq!(rule.item_mappings[0].to.path.to_string(), "@.value");

        let rule = sequence.to_jsonize(&options("", "", true)).unwrap();
        assert_eq!(rule.item_mappings[0].to.path.to_string(), "@");
    }

    #[test]
    fn test_nested_sequences() {
        let inner = XmlSequenceNode::new(
            parse_xpath("/a/b/c").unwrap(),
            vec![node("/a/b/c/d", XmlNodeKind::Value).into()],
        )
        .unwrap();
        let outer = XmlSequenceNode::new(parse_xpath("/a/b").unwrap(), vec![inner.into()]).unwrap();

        let rule = outer.to_jsonize(&MappingOptions::default()).unwrap();
        let nested = &rule.item_mappings[0];
        assert_eq!(nested.from.path.to_string(), "./c");
        assert_eq!(nested.to.path.to_string(), "@.c");
        assert_eq!(nested.item_mappings[0].from.path.to_string(), "./d");
        assert_eq!(nested.item_mappings[0].to.path.to_string(), "@.d.value");
    }

    #[test]
    fn test_unshortened_namespace_fails() {
        let error = node("/{urn:x}a", XmlNodeKind::Value)
            .to_jsonize(&MappingOptions::default())
            .unwrap_err();
        assert!(matches!(error, MappingError::XPath(_)));
    }
}
