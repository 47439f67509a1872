//! Named value transformations referenced from mapping rules.
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A transformation takes the value read from the document and returns the
/// value to write. Returning `Value::Null` skips the write.
pub type Transformation = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Holds the transformations rules can name, keyed case-insensitively.
#[derive(Clone)]
pub struct TransformRegistry {
    transformations: HashMap<String, Transformation>,
}

impl TransformRegistry {
    /// An empty registry, without the built-ins.
    pub fn new() -> Self {
        Self {
            transformations: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, transformation: impl Fn(Value) -> Value + Send + Sync + 'static) {
        self.transformations
            .insert(name.to_lowercase(), Arc::new(transformation));
    }

    pub fn get(&self, name: &str) -> Option<&Transformation> {
        self.transformations.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transformations.keys().map(String::as_str)
    }
}

impl Default for TransformRegistry {
    /// A registry with the built-in string and sequence transformations.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("upper", |value| map_text(value, |text| text.to_uppercase()));
        registry.register("lower", |value| map_text(value, |text| text.to_lowercase()));
        registry.register("trim", |value| map_text(value, |text| text.trim().to_string()));
        registry.register("normalize-space", |value| {
            map_text(value, |text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        });
        registry.register("count", |value| match value {
            Value::Array(items) => Value::from(items.len()),
            other => other,
        });
        registry
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("TransformRegistry").field("transformations", &names).finish()
    }
}

fn map_text(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(text) => Value::String(f(&text)),
        other => other,
    }
}
