//! Reading values at JSONPath addresses.
use crate::error::AccessError;
use crate::value::{TreeValue, TreeValueMut};
use jsonize_jpath::{JsonPath, PathSegment};
use serde_json::Value;
use std::borrow::Cow;

/// Reads the value `path` addresses inside `tree`.
///
/// A slice is only allowed as the last segment and yields a new array;
/// everything else borrows from `tree`. On failure the error carries the
/// sub-path through the first segment that could not be followed.
pub fn get<'v>(path: &JsonPath, tree: &'v Value) -> Result<Cow<'v, Value>, AccessError> {
    let segments = path.segments();
    let mut current = tree;

    for (position, segment) in segments.iter().enumerate() {
        let at = || path.prefix(position + 2);

        if let PathSegment::Slice { start, stop, step } = segment {
            if position + 1 != segments.len() {
                return Err(AccessError::unsupported(at(), "a slice can only end a read path"));
            }
            if *step == Some(0) {
                return Err(AccessError::unsupported(at(), "a slice step cannot be zero"));
            }
            return match TreeValue::from(current) {
                TreeValue::Array(items) => Ok(Cow::Owned(Value::Array(slice(items, *start, *stop, *step)))),
                TreeValue::Object(_) => Err(AccessError::PathNotFound { at: at() }),
                TreeValue::Scalar(_) | TreeValue::Null => Err(AccessError::NotContainer { at: at() }),
            };
        }

        current = child(current, segment, at)?;
    }

    Ok(Cow::Borrowed(current))
}

/// True if `path` addresses an existing value.
pub fn contains(path: &JsonPath, tree: &Value) -> bool {
    get(path, tree).is_ok()
}

/// Follows the first `depth` segments of `path` for writing. Slices are
/// never followed.
pub(crate) fn locate_mut<'v>(path: &JsonPath, depth: usize, tree: &'v mut Value) -> Result<&'v mut Value, AccessError> {
    let mut current = tree;
    for (position, segment) in path.segments()[..depth].iter().enumerate() {
        let at = || path.prefix(position + 2);
        if segment.is_slice() {
            return Err(AccessError::unsupported(at(), "cannot write through a slice"));
        }
        current = child_mut(current, segment, at)?;
    }
    Ok(current)
}

fn child<'v>(value: &'v Value, segment: &PathSegment, at: impl Fn() -> JsonPath) -> Result<&'v Value, AccessError> {
    match (TreeValue::from(value), segment) {
        (TreeValue::Object(map), PathSegment::Key(key)) => {
            map.get(key).ok_or_else(|| AccessError::PathNotFound { at: at() })
        }
        (TreeValue::Array(items), PathSegment::Index(index)) => match resolve_index(*index, items.len()) {
            Some(position) => Ok(&items[position]),
            None => Err(AccessError::IndexOutOfBounds {
                at: at(),
                index: *index,
                len: items.len(),
            }),
        },
        (TreeValue::Object(_) | TreeValue::Array(_), _) => Err(AccessError::PathNotFound { at: at() }),
        (TreeValue::Scalar(_) | TreeValue::Null, _) => Err(AccessError::NotContainer { at: at() }),
    }
}

fn child_mut<'v>(
    value: &'v mut Value,
    segment: &PathSegment,
    at: impl Fn() -> JsonPath,
) -> Result<&'v mut Value, AccessError> {
    match (TreeValueMut::from(value), segment) {
        (TreeValueMut::Object(map), PathSegment::Key(key)) => {
            map.get_mut(key).ok_or_else(|| AccessError::PathNotFound { at: at() })
        }
        (TreeValueMut::Array(items), PathSegment::Index(index)) => {
            let len = items.len();
            match resolve_index(*index, len) {
                Some(position) => Ok(&mut items[position]),
                None => Err(AccessError::IndexOutOfBounds {
                    at: at(),
                    index: *index,
                    len,
                }),
            }
        }
        (TreeValueMut::Object(_) | TreeValueMut::Array(_), _) => Err(AccessError::PathNotFound { at: at() }),
        (TreeValueMut::Scalar(_) | TreeValueMut::Null(_), _) => Err(AccessError::NotContainer { at: at() }),
    }
}

/// Maps a possibly negative index onto `0..len`.
pub(crate) fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        let index = index as usize;
        (index < len).then_some(index)
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}

/// Open bounds default to the ends, negative bounds count from the end and
/// out-of-range bounds are clamped.
fn slice(items: &[Value], start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Vec<Value> {
    let len = items.len() as isize;
    let step = step.unwrap_or(1);

    let clamp = |bound: isize, low: isize, high: isize| {
        let bound = if bound < 0 { bound + len } else { bound };
        bound.clamp(low, high)
    };

    let mut selected = Vec::new();
    if step > 0 {
        let start = start.map_or(0, |s| clamp(s, 0, len));
        let stop = stop.map_or(len, |s| clamp(s, 0, len));
        let mut i = start;
        while i < stop {
            selected.push(items[i as usize].clone());
            i += step;
        }
    } else {
        let start = start.map_or(len - 1, |s| clamp(s, -1, len - 1));
        let stop = stop.map_or(-1, |s| clamp(s, -1, len - 1));
        let mut i = start;
        while i > stop {
            selected.push(items[i as usize].clone());
            i += step;
        }
    }
    selected
}
