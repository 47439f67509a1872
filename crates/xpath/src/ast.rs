//! Defines the structured representation of an XPath location.
use std::fmt;

/// How a tag's namespace is spelled: by registered prefix or by full URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// A short prefix (e.g., `ns` in `ns:element`).
    Prefix(String),
    /// A full namespace URI (e.g., `{urn:example}element`).
    Uri(String),
}

/// A namespace-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub namespace: Option<Namespace>,
    pub local: String,
}

impl Tag {
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    pub fn prefixed(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(Namespace::Prefix(prefix.into())),
            local: local.into(),
        }
    }

    pub fn expanded(uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(Namespace::Uri(uri.into())),
            local: local.into(),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        match &self.namespace {
            Some(Namespace::Prefix(prefix)) => Some(prefix),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(Namespace::Prefix(prefix)) => write!(f, "{}:{}", prefix, self.local),
            Some(Namespace::Uri(uri)) => write!(f, "{{{}}}{}", uri, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// One `/`-separated component: an element with an optional 1-based
/// repetition index, or a trailing attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Step {
    pub tag: Tag,
    pub index: Option<usize>,
    pub is_attribute: bool,
}

impl Step {
    pub fn element(tag: Tag) -> Self {
        Self {
            tag,
            index: None,
            is_attribute: false,
        }
    }

    pub fn indexed(tag: Tag, index: usize) -> Self {
        Self {
            tag,
            index: Some(index),
            is_attribute: false,
        }
    }

    pub fn attribute(tag: Tag) -> Self {
        Self {
            tag,
            index: None,
            is_attribute: true,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_attribute {
            f.write_str("@")?;
        }
        write!(f, "{}", self.tag)?;
        if let Some(index) = self.index {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

/// The leading marker of an XPath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XPathAnchor {
    /// `/`, the document.
    Root,
    /// `.`, the context node.
    Context,
}

/// A parsed XPath: an anchor followed by zero or more steps.
///
/// As with JSONPaths, the anchor is position 0 for `len` and `split`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XPath {
    pub(crate) anchor: XPathAnchor,
    pub(crate) steps: Vec<Step>,
}

impl XPath {
    pub fn new(anchor: XPathAnchor, steps: Vec<Step>) -> Self {
        Self { anchor, steps }
    }

    /// The document path, `/`.
    pub fn root() -> Self {
        Self::new(XPathAnchor::Root, Vec::new())
    }

    /// The context path, `.`.
    pub fn context() -> Self {
        Self::new(XPathAnchor::Context, Vec::new())
    }

    pub fn anchor(&self) -> XPathAnchor {
        self.anchor
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Number of elements including the anchor; never zero.
    pub fn len(&self) -> usize {
        self.steps.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_absolute(&self) -> bool {
        self.anchor == XPathAnchor::Root
    }

    pub fn is_relative(&self) -> bool {
        self.anchor == XPathAnchor::Context
    }

    pub fn is_attribute(&self) -> bool {
        self.last_step().is_some_and(|step| step.is_attribute)
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn child(&self, step: Step) -> Self {
        let mut path = self.clone();
        path.push(step);
        path
    }
}

impl fmt::Display for XPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.anchor {
            XPathAnchor::Root if self.steps.is_empty() => f.write_str("/"),
            XPathAnchor::Root => {
                for step in &self.steps {
                    write!(f, "/{}", step)?;
                }
                Ok(())
            }
            XPathAnchor::Context => {
                f.write_str(".")?;
                for step in &self.steps {
                    write!(f, "/{}", step)?;
                }
                Ok(())
            }
        }
    }
}
