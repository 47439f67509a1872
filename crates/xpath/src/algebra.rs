//! Structural operations over parsed XPaths, mirroring the JSONPath algebra.
use super::ast::{Step, Tag, XPath, XPathAnchor};
use crate::error::XPathError;

impl XPath {
    /// Cuts the path at position `at` (anchor is position 0, negative counts
    /// from the end). The second part is re-anchored at `.`.
    pub fn split(&self, at: isize) -> Result<(XPath, XPath), XPathError> {
        let len = self.len();
        let out_of_range = || XPathError::SplitOutOfRange { at, len };

        if at == 0 || at.unsigned_abs() > len {
            return Err(out_of_range());
        }
        if len == 1 {
            return Ok((self.clone(), XPath::context()));
        }

        let cut = if at < 0 { len - at.unsigned_abs() } else { at as usize };
        if cut == 0 {
            return Err(out_of_range());
        }

        let head = XPath::new(self.anchor, self.steps[..cut - 1].to_vec());
        let tail = XPath::new(XPathAnchor::Context, self.steps[cut - 1..].to_vec());
        Ok((head, tail))
    }

    /// The path of the enclosing element, or `None` for a bare anchor.
    pub fn parent(&self) -> Option<XPath> {
        let (_, rest) = self.steps.split_last()?;
        Some(XPath::new(self.anchor, rest.to_vec()))
    }

    /// The tag of the trailing attribute step.
    pub fn attribute_name(&self) -> Result<&Tag, XPathError> {
        match self.last_step() {
            Some(step) if step.is_attribute => Ok(&step.tag),
            _ => Err(XPathError::NotAnAttribute(self.to_string())),
        }
    }

    /// Appends the steps of a relative path in place.
    pub fn append(&mut self, relative: &XPath) -> Result<(), XPathError> {
        if !relative.is_relative() {
            return Err(XPathError::NotRelative(relative.to_string()));
        }
        if self.is_attribute() && !relative.steps.is_empty() {
            return Err(XPathError::Syntax {
                path: format!("{}{}", self, &relative.to_string()[1..]),
                message: "attribute step must be the last step".to_string(),
            });
        }
        self.steps.extend(relative.steps.iter().cloned());
        Ok(())
    }

    pub fn joined(&self, relative: &XPath) -> Result<XPath, XPathError> {
        let mut path = self.clone();
        path.append(relative)?;
        Ok(path)
    }

    /// True iff `ancestor` is a literal prefix of this path and this path is longer.
    pub fn is_descendant_of(&self, ancestor: &XPath) -> bool {
        self.anchor == ancestor.anchor
            && self.steps.len() > ancestor.steps.len()
            && self.steps.starts_with(&ancestor.steps)
    }

    /// Expresses this path relative to `ancestor`; `.` when both are equal.
    pub fn relative_to(&self, ancestor: &XPath) -> Result<XPath, XPathError> {
        if self.anchor != ancestor.anchor || !self.steps.starts_with(&ancestor.steps) {
            return Err(XPathError::NotAnAncestor {
                path: self.to_string(),
                ancestor: ancestor.to_string(),
            });
        }
        let rest = self.steps[ancestor.steps.len()..].to_vec();
        Ok(XPath::new(XPathAnchor::Context, rest))
    }

    pub fn make_relative_to(&mut self, ancestor: &XPath) -> Result<(), XPathError> {
        *self = self.relative_to(ancestor)?;
        Ok(())
    }

    /// Drops every repetition index, keeping the tags in order.
    pub fn strip_indices(&mut self) {
        for step in &mut self.steps {
            step.index = None;
        }
    }

    pub fn remove_indices(&self) -> XPath {
        let mut path = self.clone();
        path.strip_indices();
        path
    }

    /// Drops the repetition index of the last step only.
    pub fn without_last_index(&self) -> XPath {
        let mut path = self.clone();
        if let Some(Step { index, .. }) = path.steps.last_mut() {
            *index = None;
        }
        path
    }
}
