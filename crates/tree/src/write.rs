//! Writing values at JSONPath addresses, creating missing structure on the way.
//!
//! A write looks up the parent of the target. If the lookup fails because
//! something is missing, the failing sub-path says where the existing tree
//! ends; the missing levels are then built innermost-first into a detached
//! value and attached with a single mutation. A failed write therefore never
//! leaves partial structure behind.
use crate::access::locate_mut;
use crate::error::AccessError;
use crate::value::{TreeValue, TreeValueMut};
use jsonize_jpath::{JsonPath, PathSegment};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Where the written tree lives and what a finished write hands back.
pub trait Ownership {
    type Output;

    fn target(&mut self) -> &mut Value;

    fn finish(self) -> Self::Output;
}

/// Writes into a private copy and returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cloned(pub Value);

impl Ownership for Cloned {
    type Output = Value;

    fn target(&mut self) -> &mut Value {
        &mut self.0
    }

    fn finish(self) -> Value {
        self.0
    }
}

/// Writes into a caller-owned tree.
#[derive(Debug)]
pub struct InPlace<'t>(pub &'t mut Value);

impl Ownership for InPlace<'_> {
    type Output = ();

    fn target(&mut self) -> &mut Value {
        self.0
    }

    fn finish(self) {}
}

/// Writes `item` at `path` into a copy of `tree` (or into a new tree when
/// `tree` is `None`) and returns the result. The input is never touched.
pub fn put_cloned(item: Value, path: &JsonPath, tree: Option<&Value>) -> Result<Value, AccessError> {
    put_with(item, path, Cloned(tree.cloned().unwrap_or(Value::Null)))
}

/// Writes `item` at `path` directly into `tree`. On error `tree` is unchanged.
pub fn put_in_place(item: Value, path: &JsonPath, tree: &mut Value) -> Result<(), AccessError> {
    put_with(item, path, InPlace(tree))
}

pub fn put_with<O: Ownership>(item: Value, path: &JsonPath, mut owner: O) -> Result<O::Output, AccessError> {
    write(item, path, owner.target())?;
    Ok(owner.finish())
}

fn write(item: Value, path: &JsonPath, root: &mut Value) -> Result<(), AccessError> {
    let segments = path.segments();
    let Some(last) = segments.last() else {
        // The path is the bare anchor: the tree becomes the item.
        *root = item;
        return Ok(());
    };
    let parent_depth = segments.len() - 1;

    let failure = match locate_mut(path, parent_depth, root) {
        Ok(parent) if TreeValue::from(&*parent).is_container() => return place(parent, last, item, path),
        Ok(parent) => {
            let value = build_missing(item, path, parent_depth)?;
            replace(parent, value, &path.prefix(parent_depth + 1));
            return Ok(());
        }
        Err(failure) if failure.is_recoverable() => failure,
        Err(failure) => return Err(failure),
    };

    // Number of segments in the failing sub-path; the failing segment is the last of them.
    let failed_depth = failure.at().len() - 1;
    match failure {
        AccessError::NotContainer { at } => {
            let holder_depth = failed_depth - 1;
            let value = build_missing(item, path, holder_depth)?;
            let holder = locate_mut(path, holder_depth, root)?;
            replace(holder, value, &at.prefix(holder_depth + 1));
            Ok(())
        }
        AccessError::PathNotFound { at } | AccessError::IndexOutOfBounds { at, .. } => {
            let value = build_missing(item, path, failed_depth)?;
            let container = locate_mut(path, failed_depth - 1, root)?;
            debug!("Creating missing structure at '{}' for a write to '{}'", at, path);
            place(container, &segments[failed_depth - 1], value, &at)
        }
        unsupported => Err(unsupported),
    }
}

/// Builds, innermost-first, the value that belongs after the first `depth`
/// segments of `path` so that `item` ends up at `path`. Each missing level is
/// an empty container shaped by the segment that will index into it.
fn build_missing(item: Value, path: &JsonPath, depth: usize) -> Result<Value, AccessError> {
    let segments = path.segments();
    let mut value = item;

    for position in (depth..segments.len()).rev() {
        let segment = &segments[position];
        let at = path.prefix(position + 2);
        let mut container = empty_container(segment, &at)?;
        place(&mut container, segment, value, &at)?;
        value = container;
    }

    Ok(value)
}

fn empty_container(segment: &PathSegment, at: &JsonPath) -> Result<Value, AccessError> {
    match segment {
        PathSegment::Key(_) => Ok(Value::Object(Map::new())),
        PathSegment::Index(_) => Ok(Value::Array(Vec::new())),
        PathSegment::Slice { .. } => Err(AccessError::unsupported(at.clone(), "a slice cannot be created")),
    }
}

fn replace(slot: &mut Value, value: Value, at: &JsonPath) {
    if !slot.is_null() {
        warn!("Replacing scalar {} at '{}' with a container", slot, at);
    }
    *slot = value;
}

/// Stores `item` under `segment` inside an existing container.
fn place(container: &mut Value, segment: &PathSegment, item: Value, at: &JsonPath) -> Result<(), AccessError> {
    if segment.is_slice() {
        return Err(AccessError::unsupported(at.clone(), "cannot write to a slice"));
    }

    match (TreeValueMut::from(container), segment) {
        (TreeValueMut::Object(map), PathSegment::Key(key)) => {
            if map.insert(key.clone(), item).is_some() {
                debug!("Overwrote existing value at '{}'", at);
            }
            Ok(())
        }
        (TreeValueMut::Array(items), PathSegment::Index(index)) => insert(items, *index, item, at),
        (TreeValueMut::Object(_), _) => Err(AccessError::unsupported(at.clone(), "an object cannot take an integer key")),
        (TreeValueMut::Array(_), _) => Err(AccessError::unsupported(at.clone(), "an array cannot take a string key")),
        (TreeValueMut::Scalar(_) | TreeValueMut::Null(_), _) => Err(AccessError::NotContainer { at: at.clone() }),
    }
}

/// Array insertion rules: `0..=len` inserts, `len + 1` pads with one null,
/// `-1` appends and `-len..-1` inserts so that reading the same index back
/// yields the item. Anything else is out of bounds.
fn insert(items: &mut Vec<Value>, index: isize, item: Value, at: &JsonPath) -> Result<(), AccessError> {
    let len = items.len();
    let out_of_bounds = || AccessError::IndexOutOfBounds {
        at: at.clone(),
        index,
        len,
    };

    if index >= 0 {
        let position = index as usize;
        if position <= len {
            items.insert(position, item);
        } else if position == len + 1 {
            items.push(Value::Null);
            items.push(item);
        } else {
            return Err(out_of_bounds());
        }
    } else if index == -1 {
        items.push(item);
    } else if index.unsigned_abs() <= len {
        items.insert(len + 1 - index.unsigned_abs(), item);
    } else {
        return Err(out_of_bounds());
    }
    Ok(())
}
