//! Namespace tables and prefix/URI substitution on XPaths.
use super::ast::{Namespace, Step, Tag, XPath};
use crate::error::XPathError;
use std::collections::BTreeMap;

/// The namespace bound to the `xml` prefix by the XML specification.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A `prefix -> URI` table. The `None` prefix holds the default namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    entries: BTreeMap<Option<String>, String>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `uri` under `prefix`, returning the URI it replaces.
    pub fn insert(&mut self, prefix: Option<&str>, uri: impl Into<String>) -> Option<String> {
        self.entries.insert(prefix.map(str::to_string), uri.into())
    }

    pub fn with(mut self, prefix: Option<&str>, uri: impl Into<String>) -> Self {
        self.insert(prefix, uri);
        self
    }

    pub fn default_uri(&self) -> Option<&str> {
        self.entries.get(&None).map(String::as_str)
    }

    /// Looks up a prefix. `xml` resolves even when it is not registered.
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.entries
            .get(&Some(prefix.to_string()))
            .map(String::as_str)
            .or_else(|| (prefix == "xml").then_some(XML_NAMESPACE))
    }

    /// First explicit prefix registered for `uri`.
    pub fn prefix(&self, uri: &str) -> Option<&str> {
        if uri == XML_NAMESPACE {
            return Some("xml");
        }
        self.entries.iter().find_map(|(prefix, registered)| match prefix {
            Some(prefix) if registered == uri => Some(prefix.as_str()),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &str)> {
        self.entries
            .iter()
            .map(|(prefix, uri)| (prefix.as_deref(), uri.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The short form of one tag. Elements in the default namespace become
    /// unprefixed; attributes never pick up the default namespace.
    ///
    /// An element in no namespace keeps the empty `{}` form while a default
    /// namespace is registered, since an unprefixed tag would resolve to it.
    fn shorten_tag(&self, tag: &Tag, is_attribute: bool) -> Result<Tag, XPathError> {
        let no_namespace = match &tag.namespace {
            None => true,
            Some(Namespace::Uri(uri)) => uri.is_empty(),
            Some(Namespace::Prefix(_)) => false,
        };
        if no_namespace {
            return Ok(if !is_attribute && self.default_uri().is_some() {
                Tag::expanded("", tag.local.clone())
            } else {
                Tag::local(tag.local.clone())
            });
        }
        let Some(Namespace::Uri(uri)) = &tag.namespace else {
            return Ok(tag.clone());
        };
        if !is_attribute && uri != XML_NAMESPACE && self.default_uri() == Some(uri.as_str()) {
            return Ok(Tag::local(tag.local.clone()));
        }
        match self.prefix(uri) {
            Some(prefix) => Ok(Tag::prefixed(prefix, tag.local.clone())),
            None => Err(XPathError::NamespaceNotFound(uri.clone())),
        }
    }

    fn expand_tag(&self, tag: &Tag, is_attribute: bool) -> Result<Tag, XPathError> {
        match &tag.namespace {
            Some(Namespace::Prefix(prefix)) => match self.uri(prefix) {
                Some(uri) => Ok(Tag::expanded(uri, tag.local.clone())),
                None => Err(XPathError::PrefixNotFound(prefix.clone())),
            },
            None if !is_attribute => Ok(match self.default_uri() {
                Some(uri) => Tag::expanded(uri, tag.local.clone()),
                None => tag.clone(),
            }),
            _ => Ok(tag.clone()),
        }
    }

    /// Resolves a tag to the `(namespace URI, local name)` pair a document node carries.
    pub fn resolve<'t>(&'t self, tag: &'t Tag, is_attribute: bool) -> Result<(Option<&'t str>, &'t str), XPathError> {
        let namespace = match &tag.namespace {
            Some(Namespace::Uri(uri)) if uri.is_empty() => None,
            Some(Namespace::Uri(uri)) => Some(uri.as_str()),
            Some(Namespace::Prefix(prefix)) => {
                Some(self.uri(prefix).ok_or_else(|| XPathError::PrefixNotFound(prefix.clone()))?)
            }
            None if is_attribute => None,
            None => self.default_uri(),
        };
        Ok((namespace, tag.local.as_str()))
    }
}

impl<'a> FromIterator<(Option<&'a str>, &'a str)> for Namespaces {
    fn from_iter<T: IntoIterator<Item = (Option<&'a str>, &'a str)>>(iter: T) -> Self {
        let mut namespaces = Namespaces::new();
        for (prefix, uri) in iter {
            namespaces.insert(prefix, uri);
        }
        namespaces
    }
}

impl XPath {
    fn map_tags(
        &self,
        mut rewrite: impl FnMut(&Tag, bool) -> Result<Tag, XPathError>,
    ) -> Result<XPath, XPathError> {
        let steps = self
            .steps
            .iter()
            .map(|step| {
                Ok(Step {
                    tag: rewrite(&step.tag, step.is_attribute)?,
                    ..step.clone()
                })
            })
            .collect::<Result<Vec<_>, XPathError>>()?;
        Ok(XPath::new(self.anchor, steps))
    }

    /// Rewrites every `{uri}local` tag to its registered short form.
    pub fn shorten_namespaces(&self, namespaces: &Namespaces) -> Result<XPath, XPathError> {
        self.map_tags(|tag, is_attribute| namespaces.shorten_tag(tag, is_attribute))
    }

    /// In-place variant of [`XPath::shorten_namespaces`]; untouched on error.
    pub fn shorten_namespaces_in_place(&mut self, namespaces: &Namespaces) -> Result<(), XPathError> {
        *self = self.shorten_namespaces(namespaces)?;
        Ok(())
    }

    /// Rewrites prefixed (and default-namespace) tags to `{uri}local` form.
    pub fn expand_namespaces(&self, namespaces: &Namespaces) -> Result<XPath, XPathError> {
        self.map_tags(|tag, is_attribute| namespaces.expand_tag(tag, is_attribute))
    }

    pub fn expand_namespaces_in_place(&mut self, namespaces: &Namespaces) -> Result<(), XPathError> {
        *self = self.expand_namespaces(namespaces)?;
        Ok(())
    }
}
