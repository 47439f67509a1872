//! Declarative XML to JSON mapping.
//!
//! Mapping rules pair an XPath into the source document with a JSONPath into
//! the output. [`Jsonizer`] infers rules from a sample document, reads and
//! writes them in their JSON wire format and applies them to documents.
//!
//! ```no_run
//! use jsonize::Jsonizer;
//!
//! let xml = r#"<catalog><book id="bk101"><title>Midnight Rain</title></book></catalog>"#;
//! let jsonizer = Jsonizer::builder().with_value_marker("").build();
//! let rules = jsonizer.infer_map(xml)?;
//! let json = jsonizer.convert(xml, &rules)?;
//! assert_eq!(json["catalog"]["book"]["title"], "Midnight Rain");
//! # Ok::<(), jsonize::JsonizeError>(())
//! ```

pub mod builder;
pub mod error;
pub mod jsonizer;

// --- Public API ---
pub use builder::JsonizerBuilder;
pub use error::JsonizeError;
pub use jsonizer::Jsonizer;

pub use jsonize_jpath::{JsonPath, JsonType, PathSegment, classify, infer_value, parse_path};
pub use jsonize_mapping::{
    MappingOptions, MappingRule, NodeDescriptor, TransformRegistry, XmlNode, XmlNodeKind, XmlNodeTree,
    XmlSequenceNode,
};
pub use jsonize_tree::{get, put_cloned, put_in_place};
pub use jsonize_xpath::{Namespaces, XPath, parse_xpath};

/// The component crates, for lower-level access.
pub mod crates {
    pub use jsonize_jpath as jpath;
    pub use jsonize_mapping as mapping;
    pub use jsonize_tree as tree;
    pub use jsonize_xpath as xpath;
}
