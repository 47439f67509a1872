//! Defines the core abstraction for a navigable, read-only XML tree.
use std::hash::Hash;

/// A name as it appears in a parsed document: namespace URI plus local part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpandedName<'a> {
    pub namespace: Option<&'a str>,
    pub local_part: &'a str,
}

/// The type of a node in the data source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Root,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
}

/// The contract for a node in an already-parsed, read-only XML tree.
///
/// Selection, node enumeration and rule execution are written against this
/// trait only, so any parser can back them.
///
/// `'a` is the lifetime of the underlying document.
pub trait DataSourceNode<'a>: std::fmt::Debug + Clone + Copy + PartialEq + Eq + Hash {
    fn node_type(&self) -> NodeType;

    /// The expanded name of an element or attribute; `None` for other node types.
    fn name(&self) -> Option<ExpandedName<'a>>;

    /// The value of an attribute or text node; for elements, the concatenated
    /// text of all descendants.
    fn string_value(&self) -> String;

    /// An iterator over the attribute nodes of this node, in document order.
    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// An iterator over the child nodes of this node, in document order.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// The parent node; `None` for the document root.
    fn parent(&self) -> Option<Self>;

    /// Namespace declarations in scope on this element, as `(prefix, uri)`.
    /// The default namespace has no prefix.
    fn namespaces(&self) -> Vec<(Option<&'a str>, &'a str)> {
        Vec::new()
    }

    /// The text directly inside an element, before its first child element.
    fn text(&self) -> Option<String> {
        self.children()
            .next()
            .filter(|child| child.node_type() == NodeType::Text)
            .map(|child| child.string_value())
    }

    /// Walks up to the node with no parent.
    fn document_root(&self) -> Self {
        let mut node = *self;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }
}

// Test utilities - publicly available for integration testing in downstream crates
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::hash::Hasher;

    #[derive(Debug, Clone)]
    struct MockNodeData<'a> {
        node_type: NodeType,
        name: Option<ExpandedName<'a>>,
        value: String,
        children: Vec<usize>,
        attributes: Vec<usize>,
        namespaces: Vec<(Option<&'a str>, &'a str)>,
    }

    #[derive(Debug)]
    pub struct MockTree<'a> {
        nodes: HashMap<usize, MockNodeData<'a>>,
        parent_map: HashMap<usize, usize>,
    }

    /// A node that holds a reference to its tree so it can navigate itself.
    #[derive(Debug, Clone, Copy)]
    pub struct MockNode<'a> {
        pub id: usize,
        pub tree: &'a MockTree<'a>,
    }

    impl<'a> PartialEq for MockNode<'a> {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }
    impl<'a> Eq for MockNode<'a> {}

    impl<'a> Hash for MockNode<'a> {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    impl<'a> MockTree<'a> {
        pub fn root(&'a self) -> MockNode<'a> {
            MockNode { id: 0, tree: self }
        }

        pub fn node(&'a self, id: usize) -> MockNode<'a> {
            MockNode { id, tree: self }
        }

        fn add(
            &mut self,
            id: usize,
            parent: usize,
            node_type: NodeType,
            name: Option<(Option<&'a str>, &'a str)>,
            value: &str,
        ) {
            let name = name.map(|(namespace, local_part)| ExpandedName { namespace, local_part });
            self.nodes.insert(
                id,
                MockNodeData {
                    node_type,
                    name,
                    value: value.to_string(),
                    children: vec![],
                    attributes: vec![],
                    namespaces: vec![],
                },
            );
            self.parent_map.insert(id, parent);
            if let Some(parent) = self.nodes.get_mut(&parent) {
                match node_type {
                    NodeType::Attribute => parent.attributes.push(id),
                    _ => parent.children.push(id),
                }
            }
        }
    }

    impl<'a> DataSourceNode<'a> for MockNode<'a> {
        fn node_type(&self) -> NodeType {
            self.tree.nodes[&self.id].node_type
        }

        fn name(&self) -> Option<ExpandedName<'a>> {
            self.tree.nodes[&self.id].name
        }

        fn string_value(&self) -> String {
            self.tree.nodes[&self.id].value.clone()
        }

        fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
            let tree = self.tree;
            let attribute_ids = tree.nodes[&self.id].attributes.clone();
            Box::new(attribute_ids.into_iter().map(move |id| MockNode { id, tree }))
        }

        fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
            let tree = self.tree;
            let children_ids = tree.nodes[&self.id].children.clone();
            Box::new(children_ids.into_iter().map(move |id| MockNode { id, tree }))
        }

        fn parent(&self) -> Option<Self> {
            self.tree.parent_map.get(&self.id).map(|&pid| MockNode {
                id: pid,
                tree: self.tree,
            })
        }

        fn namespaces(&self) -> Vec<(Option<&'a str>, &'a str)> {
            self.tree.nodes[&self.id].namespaces.clone()
        }
    }

    /// Creates a small namespaced library document:
    /// ```text
    /// <library xmlns="urn:books" xmlns:meta="urn:meta">   <!-- id 1 -->
    ///   <book id="b1" meta:lang="en">                       <!-- id 2, attrs 3 & 4 -->
    ///     <title>Dune</title>                                <!-- id 5, text 6 -->
    ///   </book>
    ///   <book id="b2">                                       <!-- id 7, attr 8 -->
    ///     <title>Emma</title>                                <!-- id 9, text 10 -->
    ///   </book>
    ///   <meta:note>loaned</meta:note>                        <!-- id 11, text 12 -->
    /// </library>
    /// ```
    pub fn create_test_tree<'a>() -> MockTree<'a> {
        const BOOKS: Option<&str> = Some("urn:books");
        const META: Option<&str> = Some("urn:meta");

        let mut tree = MockTree {
            nodes: HashMap::new(),
            parent_map: HashMap::new(),
        };
        tree.nodes.insert(
            0,
            MockNodeData {
                node_type: NodeType::Root,
                name: None,
                value: "DuneEmmaloaned".to_string(),
                children: vec![],
                attributes: vec![],
                namespaces: vec![],
            },
        );

        tree.add(1, 0, NodeType::Element, Some((BOOKS, "library")), "DuneEmmaloaned");
        if let Some(library) = tree.nodes.get_mut(&1) {
            library.namespaces = vec![(None, "urn:books"), (Some("meta"), "urn:meta")];
        }

        tree.add(2, 1, NodeType::Element, Some((BOOKS, "book")), "Dune");
        tree.add(3, 2, NodeType::Attribute, Some((None, "id")), "b1");
        tree.add(4, 2, NodeType::Attribute, Some((META, "lang")), "en");
        tree.add(5, 2, NodeType::Element, Some((BOOKS, "title")), "Dune");
        tree.add(6, 5, NodeType::Text, None, "Dune");

        tree.add(7, 1, NodeType::Element, Some((BOOKS, "book")), "Emma");
        tree.add(8, 7, NodeType::Attribute, Some((None, "id")), "b2");
        tree.add(9, 7, NodeType::Element, Some((BOOKS, "title")), "Emma");
        tree.add(10, 9, NodeType::Text, None, "Emma");

        tree.add(11, 1, NodeType::Element, Some((META, "note")), "loaned");
        tree.add(12, 11, NodeType::Text, None, "loaned");

        tree
    }
}
