//! Exhaustive views over the shape of a JSON value.
use serde_json::{Map, Value};

/// A borrowed value classified by the shape the access engine cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeValue<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a Vec<Value>),
    Scalar(&'a Value),
    Null,
}

impl<'a> From<&'a Value> for TreeValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => TreeValue::Object(map),
            Value::Array(items) => TreeValue::Array(items),
            Value::Null => TreeValue::Null,
            scalar => TreeValue::Scalar(scalar),
        }
    }
}

/// The mutable counterpart of [`TreeValue`].
#[derive(Debug)]
pub enum TreeValueMut<'a> {
    Object(&'a mut Map<String, Value>),
    Array(&'a mut Vec<Value>),
    Scalar(&'a mut Value),
    Null(&'a mut Value),
}

impl<'a> From<&'a mut Value> for TreeValueMut<'a> {
    fn from(value: &'a mut Value) -> Self {
        match value {
            Value::Object(map) => TreeValueMut::Object(map),
            Value::Array(items) => TreeValueMut::Array(items),
            other if other.is_null() => TreeValueMut::Null(other),
            other => TreeValueMut::Scalar(other),
        }
    }
}

impl TreeValue<'_> {
    pub fn is_container(&self) -> bool {
        matches!(self, TreeValue::Object(_) | TreeValue::Array(_))
    }
}
