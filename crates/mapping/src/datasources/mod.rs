//! Concrete document trees the mapping engine can read from.
pub mod xml;

pub use xml::{DocumentNode, XmlDocument};
