//! From XML node descriptors to executable XML→JSON mapping rules.
//!
//! A document is described as an [`XmlNodeTree`] of leaves and sequences
//! (built by hand or inferred with [`build_node_tree`]), compiled into
//! [`MappingRule`]s with `to_jsonize`, and the rules are then applied to a
//! document to fill a `serde_json::Value`.

pub mod apply;
mod compile;
pub mod datasources;
pub mod error;
pub mod infer;
pub mod node;
pub mod options;
pub mod rule;
pub mod transform;

// --- Public API ---
pub use apply::{ApplyContext, apply_rules};
pub use datasources::{DocumentNode, XmlDocument};
pub use error::MappingError;
pub use infer::{NodeXPaths, build_node_tree, find_namespaces, generate_node_xpaths};
pub use node::{NodeDescriptor, XmlNode, XmlNodeKind, XmlNodeTree, XmlSequenceNode};
pub use options::MappingOptions;
pub use rule::{JsonEndpoint, MappingRule, XmlEndpoint};
pub use transform::{TransformRegistry, Transformation};
