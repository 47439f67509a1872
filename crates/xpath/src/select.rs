//! Evaluates XPaths against a [`DataSourceNode`] tree.
use super::ast::XPath;
use crate::datasource::{DataSourceNode, NodeType};
use crate::error::XPathError;
use crate::namespaces::Namespaces;

/// Selects every node `path` addresses, in document order.
///
/// Absolute paths start at the document root; relative paths start at
/// `context`. A step without an index matches all same-named children.
pub fn select<'a, N: DataSourceNode<'a>>(
    path: &XPath,
    context: N,
    namespaces: &Namespaces,
) -> Result<Vec<N>, XPathError> {
    let start = if path.is_absolute() { context.document_root() } else { context };
    let mut current = vec![start];

    for step in path.steps() {
        let (namespace, local) = namespaces.resolve(&step.tag, step.is_attribute)?;
        let matches = |node: &N| {
            node.name()
                .is_some_and(|name| name.local_part == local && name.namespace == namespace)
        };

        let mut next = Vec::new();
        for node in current {
            let candidates: Vec<N> = if step.is_attribute {
                node.attributes().collect()
            } else {
                node.children()
                    .filter(|child| child.node_type() == NodeType::Element)
                    .collect()
            };
            let mut matching = candidates.into_iter().filter(|candidate| matches(candidate));
            match step.index {
                Some(index) => next.extend(index.checked_sub(1).and_then(|nth| matching.nth(nth))),
                None => next.extend(matching),
            }
        }

        if next.is_empty() {
            return Ok(next);
        }
        current = next;
    }

    Ok(current)
}

/// The first node `path` addresses, if any.
pub fn select_first<'a, N: DataSourceNode<'a>>(
    path: &XPath,
    context: N,
    namespaces: &Namespaces,
) -> Result<Option<N>, XPathError> {
    Ok(select(path, context, namespaces)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::tests::create_test_tree;
    use crate::parse_xpath;

    fn table() -> Namespaces {
        Namespaces::new().with(None, "urn:books").with(Some("meta"), "urn:meta")
    }

    #[test]
    fn test_select_all_repetitions() {
        let tree = create_test_tree();
        let books = select(&parse_xpath("/library/book").unwrap(), tree.root(), &table()).unwrap();
        assert_eq!(books.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2, 7]);
    }

    #[test]
    fn test_select_indexed_and_attribute() {
        let tree = create_test_tree();
        let path = parse_xpath("/library/book[2]/@id").unwrap();
        let id = select_first(&path, tree.root(), &table()).unwrap().unwrap();
        assert_eq!(id.string_value(), "b2");

        let lang = parse_xpath("/library/book[1]/@meta:lang").unwrap();
        assert_eq!(select_first(&lang, tree.root(), &table()).unwrap().unwrap().string_value(), "en");
    }

    #[test]
    fn test_relative_selection_from_context() {
        let tree = create_test_tree();
        let book = tree.node(7);
        let title = select_first(&parse_xpath("./title").unwrap(), book, &table()).unwrap().unwrap();
        assert_eq!(title.text().as_deref(), Some("Emma"));
        assert_eq!(select(&parse_xpath(".").unwrap(), book, &table()).unwrap(), vec![book]);
    }

    #[test]
    fn test_absolute_selection_from_any_node() {
        let tree = create_test_tree();
        let note = select_first(&parse_xpath("/library/meta:note").unwrap(), tree.node(9), &table())
            .unwrap()
            .unwrap();
        assert_eq!(note.id, 11);
    }

    #[test]
    fn test_expanded_names_match_without_table() {
        let tree = create_test_tree();
        let path = parse_xpath("/{urn:books}library/{urn:books}book[1]/{urn:books}title").unwrap();
        let title = select_first(&path, tree.root(), &Namespaces::new()).unwrap().unwrap();
        assert_eq!(title.id, 5);
    }

    #[test]
    fn test_missing_nodes_select_nothing() {
        let tree = create_test_tree();
        let table = table();
        assert!(select(&parse_xpath("/library/book[3]").unwrap(), tree.root(), &table).unwrap().is_empty());
        assert!(select(&parse_xpath("/library/magazine/title").unwrap(), tree.root(), &table).unwrap().is_empty());
        // Without the default namespace the unprefixed names do not match.
        assert!(select(&parse_xpath("/library").unwrap(), tree.root(), &Namespaces::new()).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_prefix_is_an_error() {
        let tree = create_test_tree();
        assert_eq!(
            select(&parse_xpath("/x:library").unwrap(), tree.root(), &table()),
            Err(XPathError::PrefixNotFound("x".to_string()))
        );
    }
}
