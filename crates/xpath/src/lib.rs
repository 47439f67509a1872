//! Namespace-qualified XPath addresses for XML documents.
//!
//! Supports the `/ns:a/b[2]/@c` subset: literal, optionally prefixed tags, one
//! 1-based repetition index per element and a trailing attribute. Paths can be
//! split, joined and relativized like JSONPaths, rewritten between prefixed and
//! `{uri}local` form, converted into JSONPaths and evaluated against any tree
//! implementing [`DataSourceNode`].

mod algebra;
pub mod ast;
mod convert;
pub mod datasource;
pub mod error;
pub mod namespaces;
mod parser;
pub mod select;

pub use ast::{Namespace, Step, Tag, XPath, XPathAnchor};
pub use datasource::{DataSourceNode, ExpandedName, NodeType};
pub use namespaces::{Namespaces, XML_NAMESPACE};
pub use select::{select, select_first};

// Re-export test utilities for integration testing in downstream crates
pub use datasource::tests;
pub use error::XPathError;
pub use parser::parse_xpath;
