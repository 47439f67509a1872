// src/builder.rs
use crate::jsonizer::Jsonizer;
use jsonize_mapping::{MappingOptions, TransformRegistry};
use jsonize_xpath::Namespaces;
use serde_json::Value;

/// A builder for creating a [`Jsonizer`].
#[derive(Debug, Default)]
pub struct JsonizerBuilder {
    options: MappingOptions,
    namespaces: Option<Namespaces>,
    transformations: TransformRegistry,
}

impl JsonizerBuilder {
    /// Default options and the built-in transformations.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(mut self, options: MappingOptions) -> Self {
        self.options = options;
        self
    }

    /// Prepended to attribute names in inferred JSON keys.
    pub fn with_attribute_marker(mut self, marker: impl Into<String>) -> Self {
        self.options.attribute_marker = marker.into();
        self
    }

    /// Key for an element's own text in inferred rules; empty maps the text
    /// onto the element's key.
    pub fn with_value_marker(mut self, marker: impl Into<String>) -> Self {
        self.options.value_marker = marker.into();
        self
    }

    /// Keeps namespace prefixes in inferred JSON keys.
    pub fn with_prefixed_keys(mut self, with_namespaces: bool) -> Self {
        self.options.with_namespaces = with_namespaces;
        self
    }

    /// Uses a fixed namespace table instead of each document's declarations.
    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = Some(namespaces);
        self
    }

    /// Replaces the whole transformation registry.
    pub fn with_transformations(mut self, transformations: TransformRegistry) -> Self {
        self.transformations = transformations;
        self
    }

    /// Registers one more transformation under `name`.
    pub fn with_transformation(
        mut self,
        name: &str,
        transformation: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.transformations.register(name, transformation);
        self
    }

    pub fn build(self) -> Jsonizer {
        Jsonizer {
            options: self.options,
            namespaces: self.namespaces,
            transformations: self.transformations,
        }
    }
}
