//! Structural operations over parsed JSONPaths.
//!
//! Operations that produce a new path come in two flavours: a cloning method
//! that leaves `self` untouched and an in-place method that rewrites `self`
//! into exactly the value the cloning method would have returned.
use super::ast::{Anchor, JsonPath, PathSegment};
use crate::error::PathError;

impl JsonPath {
    /// Cuts the path at position `at` (the anchor is position 0; negative
    /// values count from the end). The first part keeps this path's anchor,
    /// the second is re-anchored at `@`.
    ///
    /// `JsonPath("$.a.b.c").split(2)` gives `($.a, @.b.c)`.
    pub fn split(&self, at: isize) -> Result<(JsonPath, JsonPath), PathError> {
        let len = self.len();
        let out_of_range = || PathError::SplitOutOfRange { at, len };

        if at == 0 || at.unsigned_abs() > len {
            return Err(out_of_range());
        }
        if len == 1 {
            return Ok((self.clone(), JsonPath::current()));
        }

        let cut = if at < 0 { len - at.unsigned_abs() } else { at as usize };
        // Cutting before the anchor would leave the first part empty.
        if cut == 0 {
            return Err(out_of_range());
        }

        let head = JsonPath::new(self.anchor, self.segments[..cut - 1].to_vec());
        let tail = JsonPath::new(Anchor::Current, self.segments[cut - 1..].to_vec());
        Ok((head, tail))
    }

    /// Splits off the last segment: `(parent, last)`. `None` for a bare anchor.
    pub fn split_last(&self) -> Option<(JsonPath, &PathSegment)> {
        let (last, rest) = self.segments.split_last()?;
        Some((JsonPath::new(self.anchor, rest.to_vec()), last))
    }

    /// Returns the path one level up, or `None` for a bare anchor.
    pub fn parent(&self) -> Option<JsonPath> {
        self.split_last().map(|(parent, _)| parent)
    }

    /// Appends the segments of a relative path in place.
    pub fn append(&mut self, relative: &JsonPath) -> Result<(), PathError> {
        if !relative.is_relative() {
            return Err(PathError::NotRelative(relative.to_string()));
        }
        self.segments.extend(relative.segments.iter().cloned());
        Ok(())
    }

    /// Returns a copy with the segments of a relative path appended.
    pub fn joined(&self, relative: &JsonPath) -> Result<JsonPath, PathError> {
        let mut path = self.clone();
        path.append(relative)?;
        Ok(path)
    }

    /// True iff `ancestor` is a literal prefix of this path and this path is longer.
    pub fn is_descendant_of(&self, ancestor: &JsonPath) -> bool {
        self.anchor == ancestor.anchor
            && self.segments.len() > ancestor.segments.len()
            && self.segments.starts_with(&ancestor.segments)
    }

    /// Expresses this path relative to `ancestor`, which must be a literal
    /// prefix. Returns `@` when both paths are equal.
    pub fn relative_to(&self, ancestor: &JsonPath) -> Result<JsonPath, PathError> {
        if self.anchor != ancestor.anchor || !self.segments.starts_with(&ancestor.segments) {
            return Err(PathError::NotAnAncestor {
                path: self.to_string(),
                ancestor: ancestor.to_string(),
            });
        }
        let rest = self.segments[ancestor.segments.len()..].to_vec();
        Ok(JsonPath::new(Anchor::Current, rest))
    }

    /// In-place variant of [`JsonPath::relative_to`].
    pub fn make_relative_to(&mut self, ancestor: &JsonPath) -> Result<(), PathError> {
        *self = self.relative_to(ancestor)?;
        Ok(())
    }

    /// Drops every positional segment, keeping keys in order.
    pub fn strip_indices(&mut self) {
        self.segments.retain(|segment| !segment.is_positional());
    }

    /// Returns a copy without positional segments.
    pub fn remove_indices(&self) -> JsonPath {
        let mut path = self.clone();
        path.strip_indices();
        path
    }
}
