//! Defines the structured representation of a JSONPath.
use crate::error::PathError;
use std::fmt;

/// The leading marker of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// `$`, the document root.
    Root,
    /// `@`, the current item.
    Current,
}

impl Anchor {
    pub fn symbol(self) -> char {
        match self {
            Anchor::Root => '$',
            Anchor::Current => '@',
        }
    }
}

/// Represents one step below the anchor of a JSONPath.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object member (e.g., `.name`).
    Key(String),
    /// A 0-based array position (e.g., `[0]`, `[-1]`). Negative values count from the end.
    Index(isize),
    /// A read-only range selector `[start:stop:step]` (e.g., `[1:5:2]`).
    Slice {
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    },
}

impl PathSegment {
    pub fn is_key(&self) -> bool {
        matches!(self, PathSegment::Key(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathSegment::Index(_))
    }

    pub fn is_slice(&self) -> bool {
        matches!(self, PathSegment::Slice { .. })
    }

    /// Builds a slice, dropping components that restate the default: a zero
    /// start with a forward step and a unit step. A zero step selects nothing
    /// meaningful and is rejected.
    pub fn slice(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Result<Self, PathError> {
        if step == Some(0) {
            return Err(PathError::ZeroSliceStep);
        }
        let step = step.filter(|&s| s != 1);
        let forward = step.is_none_or(|s| s > 0);
        let start = start.filter(|&s| !(forward && s == 0));
        Ok(PathSegment::Slice { start, stop, step })
    }

    /// True for segments that select by position rather than by name.
    pub fn is_positional(&self) -> bool {
        !self.is_key()
    }
}

/// Keys the dotted form cannot carry are written as `['key']`.
fn needs_quoting(name: &str) -> bool {
    name.is_empty() || name.contains(['.', '[', ']', '\''])
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) if needs_quoting(name) => {
                f.write_str("['")?;
                for ch in name.chars() {
                    if matches!(ch, '\'' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", ch)?;
                }
                f.write_str("']")
            }
            PathSegment::Key(name) => write!(f, ".{}", name),
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Slice { start, stop, step } => {
                f.write_str("[")?;
                if let Some(start) = start {
                    write!(f, "{}", start)?;
                }
                f.write_str(":")?;
                if let Some(stop) = stop {
                    write!(f, "{}", stop)?;
                }
                if let Some(step) = step {
                    write!(f, ":{}", step)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A parsed JSONPath: an anchor followed by zero or more segments.
///
/// Equality is structural, so two spellings of the same slice compare equal.
/// The anchor counts as position 0 for every positional operation
/// (`len`, `split`, `prefix`), which keeps indices aligned with the textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonPath {
    pub(crate) anchor: Anchor,
    pub(crate) segments: Vec<PathSegment>,
}

impl JsonPath {
    pub fn new(anchor: Anchor, segments: Vec<PathSegment>) -> Self {
        Self { anchor, segments }
    }

    /// The absolute root path, `$`.
    pub fn root() -> Self {
        Self::new(Anchor::Root, Vec::new())
    }

    /// The relative self path, `@`.
    pub fn current() -> Self {
        Self::new(Anchor::Current, Vec::new())
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The segments below the anchor.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Number of elements including the anchor; never zero.
    pub fn len(&self) -> usize {
        self.segments.len() + 1
    }

    /// Always false: a path holds at least its anchor.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_absolute(&self) -> bool {
        self.anchor == Anchor::Root
    }

    pub fn is_relative(&self) -> bool {
        self.anchor == Anchor::Current
    }

    /// Pushes a segment in place.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Returns a copy extended by one segment.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Returns a copy holding the first `len` elements (anchor included).
    /// `len` is clamped to `1..=self.len()`.
    pub fn prefix(&self, len: usize) -> Self {
        let keep = len.clamp(1, self.len()) - 1;
        Self::new(self.anchor, self.segments[..keep].to_vec())
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.anchor.symbol())?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
