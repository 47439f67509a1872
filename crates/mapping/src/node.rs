//! Descriptors for the XML nodes a mapping is built from.
use crate::error::MappingError;
use jsonize_xpath::{XPath, XPathError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a rule reads at its source XPath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XmlNodeKind {
    /// The full text content of an element.
    Element,
    /// The value of an attribute.
    Attribute,
    /// The text directly inside an element.
    Value,
    /// A repeated element acting as an array template.
    Sequence,
}

/// A path plus the kind of node found there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlNode {
    pub path: XPath,
    pub kind: XmlNodeKind,
}

impl XmlNode {
    pub fn new(path: XPath, kind: XmlNodeKind) -> Self {
        Self { path, kind }
    }

    pub fn is_descendant_of(&self, ancestor: &XPath) -> bool {
        self.path.is_descendant_of(ancestor)
    }

    /// True if no node in `nodes` lies below this one.
    ///
    /// Attributes are always leaves and never make their element a branch:
    /// an element carrying only attributes still maps its own text.
    pub fn is_leaf<'n>(&self, nodes: impl IntoIterator<Item = &'n XmlNode>) -> bool {
        self.kind == XmlNodeKind::Attribute
            || nodes
                .into_iter()
                .filter(|node| node.kind != XmlNodeKind::Attribute)
                .all(|node| !node.is_descendant_of(&self.path))
    }

    pub fn relative_to(&self, ancestor: &XPath) -> Result<XmlNode, XPathError> {
        Ok(XmlNode::new(self.path.relative_to(ancestor)?, self.kind))
    }
}

impl fmt::Display for XmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XML {:?} at {}", self.kind, self.path)
    }
}

/// A repeated element together with the nodes that make up each repetition.
///
/// Children are stored relative to the sequence. A sequence without
/// children maps each repetition's own text, held as one synthetic `.` child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSequenceNode {
    path: XPath,
    children: Vec<NodeDescriptor>,
}

impl XmlSequenceNode {
    /// Builds a sequence, relativizing absolute children against `path`.
    pub fn new(path: XPath, children: Vec<NodeDescriptor>) -> Result<Self, MappingError> {
        let mut relative = Vec::with_capacity(children.len().max(1));
        for child in children {
            if child.path().is_relative() {
                relative.push(child);
                continue;
            }
            let child = child.relative_to(&path).map_err(|_| MappingError::NotADescendant {
                path: child.path().to_string(),
                sequence: path.to_string(),
            })?;
            relative.push(child);
        }

        if relative.is_empty() {
            relative.push(NodeDescriptor::Node(XmlNode::new(XPath::context(), XmlNodeKind::Value)));
        }

        Ok(Self {
            path,
            children: relative,
        })
    }

    pub fn path(&self) -> &XPath {
        &self.path
    }

    pub fn children(&self) -> &[NodeDescriptor] {
        &self.children
    }

    fn relative_to(&self, ancestor: &XPath) -> Result<XmlSequenceNode, XPathError> {
        Ok(Self {
            path: self.path.relative_to(ancestor)?,
            children: self.children.clone(),
        })
    }
}

/// Either a plain node or a sequence with its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDescriptor {
    Node(XmlNode),
    Sequence(XmlSequenceNode),
}

impl NodeDescriptor {
    pub fn path(&self) -> &XPath {
        match self {
            NodeDescriptor::Node(node) => &node.path,
            NodeDescriptor::Sequence(sequence) => &sequence.path,
        }
    }

    pub fn kind(&self) -> XmlNodeKind {
        match self {
            NodeDescriptor::Node(node) => node.kind,
            NodeDescriptor::Sequence(_) => XmlNodeKind::Sequence,
        }
    }

    pub fn relative_to(&self, ancestor: &XPath) -> Result<NodeDescriptor, XPathError> {
        Ok(match self {
            NodeDescriptor::Node(node) => NodeDescriptor::Node(node.relative_to(ancestor)?),
            NodeDescriptor::Sequence(sequence) => NodeDescriptor::Sequence(sequence.relative_to(ancestor)?),
        })
    }
}

impl From<XmlNode> for NodeDescriptor {
    fn from(node: XmlNode) -> Self {
        NodeDescriptor::Node(node)
    }
}

impl From<XmlSequenceNode> for NodeDescriptor {
    fn from(sequence: XmlSequenceNode) -> Self {
        NodeDescriptor::Sequence(sequence)
    }
}

/// Every node of interest in a document, organized around sequences.
///
/// Order does not change which rules compile from the tree, only the order
/// they are listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNodeTree {
    nodes: Vec<NodeDescriptor>,
}

impl XmlNodeTree {
    pub fn new(nodes: Vec<NodeDescriptor>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn push(&mut self, node: impl Into<NodeDescriptor>) {
        self.nodes.push(node.into());
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeDescriptor> {
        self.nodes.iter()
    }
}

impl FromIterator<NodeDescriptor> for XmlNodeTree {
    fn from_iter<T: IntoIterator<Item = NodeDescriptor>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for XmlNodeTree {
    type Item = NodeDescriptor;
    type IntoIter = std::vec::IntoIter<NodeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'t> IntoIterator for &'t XmlNodeTree {
    type Item = &'t NodeDescriptor;
    type IntoIter = std::slice::Iter<'t, NodeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
