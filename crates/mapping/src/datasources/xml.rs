// XML datasource implementation using roxmltree
use jsonize_xpath::{DataSourceNode, ExpandedName, NodeType, XML_NAMESPACE};
use roxmltree::Node;
use std::hash::{Hash, Hasher};

/// An already-parsed XML document.
pub struct XmlDocument<'input> {
    doc: roxmltree::Document<'input>,
}

impl<'input> XmlDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self { doc })
    }

    /// The document node, parent of the document element.
    pub fn root_node(&self) -> DocumentNode<'_, 'input> {
        DocumentNode::Node(self.doc.root())
    }

    pub fn root_element(&self) -> DocumentNode<'_, 'input> {
        DocumentNode::Node(self.doc.root_element())
    }
}

/// A node of an [`XmlDocument`].
///
/// roxmltree keeps attributes as data on their element, so an attribute is
/// addressed through its element and position.
#[derive(Debug, Clone, Copy)]
pub enum DocumentNode<'a, 'input> {
    Node(Node<'a, 'input>),
    Attribute { parent: Node<'a, 'input>, index: usize },
}

impl<'a, 'input> DocumentNode<'a, 'input> {
    pub fn inner(&self) -> Option<Node<'a, 'input>> {
        match self {
            DocumentNode::Node(node) => Some(*node),
            DocumentNode::Attribute { .. } => None,
        }
    }

    fn attribute(&self) -> Option<roxmltree::Attribute<'a, 'input>> {
        match self {
            DocumentNode::Attribute { parent, index } => parent.attributes().nth(*index),
            DocumentNode::Node(_) => None,
        }
    }
}

impl PartialEq for DocumentNode<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DocumentNode::Node(a), DocumentNode::Node(b)) => a.id() == b.id(),
            (
                DocumentNode::Attribute { parent: p1, index: i1 },
                DocumentNode::Attribute { parent: p2, index: i2 },
            ) => p1.id() == p2.id() && i1 == i2,
            _ => false,
        }
    }
}

impl Eq for DocumentNode<'_, '_> {}

impl Hash for DocumentNode<'_, '_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            DocumentNode::Node(node) => {
                0u8.hash(state);
                node.id().hash(state);
            }
            DocumentNode::Attribute { parent, index } => {
                1u8.hash(state);
                parent.id().hash(state);
                index.hash(state);
            }
        }
    }
}

impl<'a> DataSourceNode<'a> for DocumentNode<'a, 'a> {
    fn node_type(&self) -> NodeType {
        match self {
            DocumentNode::Node(node) => {
                if node.is_root() {
                    NodeType::Root
                } else if node.is_text() {
                    NodeType::Text
                } else if node.is_comment() {
                    NodeType::Comment
                } else if node.is_pi() {
                    NodeType::ProcessingInstruction
                } else {
                    NodeType::Element
                }
            }
            DocumentNode::Attribute { .. } => NodeType::Attribute,
        }
    }

    fn name(&self) -> Option<ExpandedName<'a>> {
        match self {
            DocumentNode::Node(node) if node.is_element() => {
                let tag = node.tag_name();
                Some(ExpandedName {
                    namespace: tag.namespace(),
                    local_part: tag.name(),
                })
            }
            DocumentNode::Node(_) => None,
            DocumentNode::Attribute { .. } => self.attribute().map(|attr| ExpandedName {
                namespace: attr.namespace(),
                local_part: attr.name(),
            }),
        }
    }

    fn string_value(&self) -> String {
        match self {
            DocumentNode::Node(node) if node.is_element() || node.is_root() => node
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect(),
            DocumentNode::Node(node) => node.text().unwrap_or_default().to_string(),
            DocumentNode::Attribute { .. } => self
                .attribute()
                .map(|attr| attr.value().to_string())
                .unwrap_or_default(),
        }
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        match self {
            DocumentNode::Node(node) => {
                let parent = *node;
                let count = node.attributes().len();
                Box::new((0..count).map(move |index| DocumentNode::Attribute { parent, index }))
            }
            DocumentNode::Attribute { .. } => Box::new(std::iter::empty()),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        match self {
            DocumentNode::Node(node) => Box::new(node.children().map(DocumentNode::Node)),
            DocumentNode::Attribute { .. } => Box::new(std::iter::empty()),
        }
    }

    fn parent(&self) -> Option<Self> {
        match self {
            DocumentNode::Node(node) => node.parent().map(DocumentNode::Node),
            DocumentNode::Attribute { parent, .. } => Some(DocumentNode::Node(*parent)),
        }
    }

    /// Declarations in scope, except the implicit `xml` one.
    fn namespaces(&self) -> Vec<(Option<&'a str>, &'a str)> {
        match self {
            DocumentNode::Node(node) => node
                .namespaces()
                .filter(|ns| ns.uri() != XML_NAMESPACE)
                .map(|ns| (ns.name(), ns.uri()))
                .collect(),
            DocumentNode::Attribute { .. } => Vec::new(),
        }
    }
}
