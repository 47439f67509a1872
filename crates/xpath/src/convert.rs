//! Conversion of XPaths into the JSONPaths that mirror them.
use super::ast::{Namespace, XPath, XPathAnchor};
use crate::error::XPathError;
use jsonize_jpath::{Anchor, JsonPath, PathSegment};

impl XPath {
    /// Converts this XPath into a JSONPath.
    ///
    /// `/` becomes `$` and `.` becomes `@`; each 1-based repetition index
    /// becomes the 0-based index that follows its key; the trailing attribute
    /// name is prefixed with `attribute_marker`. With `with_namespaces` the
    /// short prefix stays part of each key (`ns:tag`), otherwise it is dropped.
    ///
    /// Tags still carrying a full URI must be shortened first.
    pub fn to_json_path(&self, attribute_marker: &str, with_namespaces: bool) -> Result<JsonPath, XPathError> {
        let anchor = match self.anchor {
            XPathAnchor::Root => Anchor::Root,
            XPathAnchor::Context => Anchor::Current,
        };

        let mut segments = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let mut key = String::new();
            if step.is_attribute {
                key.push_str(attribute_marker);
            }
            match &step.tag.namespace {
                Some(Namespace::Prefix(prefix)) if with_namespaces => {
                    key.push_str(prefix);
                    key.push(':');
                }
                Some(Namespace::Uri(uri)) if with_namespaces && !uri.is_empty() => {
                    return Err(XPathError::NamespaceNotFound(uri.clone()));
                }
                _ => {}
            }
            key.push_str(&step.tag.local);
            segments.push(PathSegment::Key(key));

            match step.index {
                Some(0) => {
                    return Err(XPathError::InvalidIndex {
                        path: self.to_string(),
                        index: 0,
                    });
                }
                Some(index) => segments.push(PathSegment::Index(index as isize - 1)),
                None => {}
            }
        }

        Ok(JsonPath::new(anchor, segments))
    }
}
