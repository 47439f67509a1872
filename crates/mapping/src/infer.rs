//! Inference of a node tree from a parsed document.
//!
//! Every element and attribute of the document gets an absolute XPath;
//! repeated siblings carry their 1-based position. Paths that end in a
//! position mark sequences. Stripping positions folds all repetitions onto
//! one shape, whose leaves are then nested under their deepest enclosing
//! sequence.
use crate::error::MappingError;
use crate::node::{NodeDescriptor, XmlNode, XmlNodeKind, XmlNodeTree, XmlSequenceNode};
use indexmap::IndexSet;
use jsonize_xpath::{DataSourceNode, ExpandedName, Namespaces, Step, Tag, XPath, XPathError};
use log::debug;
use std::collections::{HashMap, VecDeque};
use std::marker::PhantomData;

/// Lazily walks a document, yielding the XPath of every element followed by
/// the XPaths of its attributes, in document order.
///
/// Created by [`generate_node_xpaths`]; call it again to start over. A clone
/// continues independently from the same position.
#[derive(Debug, Clone)]
pub struct NodeXPaths<'n, 'a, N> {
    stack: Vec<(N, XPath)>,
    attributes: VecDeque<XPath>,
    namespaces: Option<&'n Namespaces>,
    _document: PhantomData<&'a ()>,
}

/// Enumerates the XPaths of all elements and attributes below `document`.
///
/// With a namespace table the tags come out shortened to their prefixes
/// (unprefixed for the default namespace); without one, namespaced tags keep
/// the `{uri}local` form.
pub fn generate_node_xpaths<'n, 'a, N: DataSourceNode<'a>>(
    document: N,
    namespaces: Option<&'n Namespaces>,
) -> NodeXPaths<'n, 'a, N> {
    let mut stack = element_children(document.document_root(), &XPath::root());
    stack.reverse();
    NodeXPaths {
        stack,
        attributes: VecDeque::new(),
        namespaces,
        _document: PhantomData,
    }
}

impl<'a, N: DataSourceNode<'a>> NodeXPaths<'_, 'a, N> {
    fn finish(&self, path: XPath) -> Result<XPath, XPathError> {
        match self.namespaces {
            Some(namespaces) => path.shorten_namespaces(namespaces),
            None => Ok(path),
        }
    }
}

impl<'a, N: DataSourceNode<'a>> Iterator for NodeXPaths<'_, 'a, N> {
    type Item = Result<XPath, XPathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(attribute) = self.attributes.pop_front() {
            return Some(self.finish(attribute));
        }

        let (element, path) = self.stack.pop()?;
        self.attributes.extend(
            element
                .attributes()
                .filter_map(|attribute| attribute.name())
                .map(|name| path.child(Step::attribute(tag_of(name)))),
        );
        let mut children = element_children(element, &path);
        children.reverse();
        self.stack.extend(children);

        Some(self.finish(path))
    }
}

/// The element children of `parent` with their XPaths. Same-named siblings
/// are numbered only when there is more than one of them.
fn element_children<'a, N: DataSourceNode<'a>>(parent: N, parent_path: &XPath) -> Vec<(N, XPath)> {
    let elements: Vec<(N, ExpandedName<'a>)> = parent
        .children()
        .filter(|child| child.is_element())
        .filter_map(|child| child.name().map(|name| (child, name)))
        .collect();

    let mut totals: HashMap<ExpandedName<'a>, usize> = HashMap::new();
    for (_, name) in &elements {
        *totals.entry(*name).or_default() += 1;
    }

    let mut seen: HashMap<ExpandedName<'a>, usize> = HashMap::new();
    elements
        .into_iter()
        .map(|(child, name)| {
            let position = seen.entry(name).or_default();
            *position += 1;
            let step = if totals[&name] > 1 {
                Step::indexed(tag_of(name), *position)
            } else {
                Step::element(tag_of(name))
            };
            (child, parent_path.child(step))
        })
        .collect()
}

fn tag_of(name: ExpandedName<'_>) -> Tag {
    match name.namespace {
        Some(uri) => Tag::expanded(uri, name.local_part),
        None => Tag::local(name.local_part),
    }
}

/// The namespaces declared on (or in scope at) the document element. The
/// default namespace is listed without a prefix.
pub fn find_namespaces<'a, N: DataSourceNode<'a>>(document: N) -> Namespaces {
    document
        .document_root()
        .children()
        .find(|child| child.is_element())
        .map(|element| element.namespaces().into_iter().collect())
        .unwrap_or_default()
}

/// Describes a document as leaf nodes and the sequences that contain them.
///
/// Elements map their own text (kind `value`), attributes their value. An
/// element counts as a leaf when no other element lies below it. A sequence
/// whose element is itself a leaf maps each repetition's text.
pub fn build_node_tree<'a, N: DataSourceNode<'a>>(
    document: N,
    namespaces: Option<&Namespaces>,
) -> Result<XmlNodeTree, MappingError> {
    let mut nodes: IndexSet<XmlNode> = IndexSet::new();
    let mut sequences: IndexSet<XPath> = IndexSet::new();

    for path in generate_node_xpaths(document, namespaces) {
        let path = path?;
        let kind = if path.is_attribute() {
            XmlNodeKind::Attribute
        } else {
            XmlNodeKind::Value
        };
        if path.last_step().is_some_and(|step| step.index.is_some()) {
            sequences.insert(path.remove_indices());
        }
        nodes.insert(XmlNode::new(path.remove_indices(), kind));
    }

    let leaves: Vec<NodeDescriptor> = nodes
        .iter()
        .filter(|node| node.is_leaf(&nodes))
        .cloned()
        .map(NodeDescriptor::from)
        .collect();

    debug!(
        "Inferred {} distinct nodes, {} leaves and {} sequences",
        nodes.len(),
        leaves.len(),
        sequences.len()
    );

    let sequences = sequences
        .into_iter()
        .map(|path| XmlNode::new(path, XmlNodeKind::Sequence))
        .collect();
    Ok(XmlNodeTree::new(nest_in_sequences(sequences, leaves)?))
}

/// Moves every leaf under its deepest enclosing sequence, innermost
/// sequences first, until every sequence has been placed.
fn nest_in_sequences(
    mut pending: Vec<XmlNode>,
    mut leaves: Vec<NodeDescriptor>,
) -> Result<Vec<NodeDescriptor>, MappingError> {
    while !pending.is_empty() {
        let (deepest, rest): (Vec<XmlNode>, Vec<XmlNode>) =
            pending.iter().cloned().partition(|sequence| sequence.is_leaf(&pending));

        for sequence in deepest {
            let (inside, outside): (Vec<NodeDescriptor>, Vec<NodeDescriptor>) =
                leaves.into_iter().partition(|leaf| {
                    leaf.path() == &sequence.path || leaf.path().is_descendant_of(&sequence.path)
                });
            leaves = outside;
            leaves.push(XmlSequenceNode::new(sequence.path, inside)?.into());
        }

        pending = rest;
    }
    Ok(leaves)
}
