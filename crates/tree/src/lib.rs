//! Reading and writing values at JSONPath addresses inside `serde_json` trees.
//!
//! [`get`] walks a path and reports the first sub-path it cannot follow.
//! [`put_cloned`] and [`put_in_place`] write a value at a path, creating any
//! missing objects and arrays on the way; they share one algorithm and differ
//! only in who owns the tree being written.

pub mod access;
pub mod error;
pub mod value;
pub mod write;

// --- Public API ---
pub use access::{contains, get};
pub use error::AccessError;
pub use value::{TreeValue, TreeValueMut};
pub use write::{Cloned, InPlace, Ownership, put_cloned, put_in_place, put_with};
