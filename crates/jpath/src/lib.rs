//! Dotted JSONPath addresses for nested JSON structures.
//!
//! This crate parses the `$.a.b[0][1:3]` subset of JSONPath into a
//! structured [`JsonPath`], provides the path algebra used when mapping
//! between documents (split, append, relativize, index stripping) and
//! classifies incoming values into JSON base types.

mod algebra;
pub mod ast;
pub mod error;
pub mod infer;
mod parser;

// --- Public API ---
pub use ast::{Anchor, JsonPath, PathSegment};
pub use error::PathError;
pub use infer::{JsonType, RawValue, classify, classify_text, infer_value};
pub use parser::parse_path;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split_and_render() {
        let path = parse_path("$.orders[1].lines[:2]").unwrap();
        let (head, tail) = path.split(3).unwrap();
        assert_eq!(head.to_string(), "$.orders[1]");
        assert_eq!(tail.to_string(), "@.lines[:2]");
        assert_eq!(head.joined(&tail).unwrap(), path);
    }

    #[test]
    fn test_relative_item_paths() {
        let sequence = parse_path("$.a.b").unwrap();
        let item = parse_path("$.a.b.child").unwrap();
        assert!(item.is_descendant_of(&sequence));
        assert_eq!(item.relative_to(&sequence).unwrap().to_string(), "@.child");
    }
}
