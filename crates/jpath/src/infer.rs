//! JSON base types and best-match classification of incoming values.
use crate::error::PathError;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// JSON base types. `Infer` is a placeholder meaning "decide from the runtime value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Integer,
    Number,
    Object,
    Array,
    Boolean,
    Null,
    Infer,
}

/// A value offered for classification, before it has been turned into JSON.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Absent,
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Mapping,
    Sequence,
}

impl<'a> From<&'a Value> for RawValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => RawValue::Absent,
            Value::Bool(b) => RawValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Integer(i),
                None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RawValue::Text(s),
            Value::Array(_) => RawValue::Sequence,
            Value::Object(_) => RawValue::Mapping,
        }
    }
}

/// Classifies a value into its best-matching JSON base type.
///
/// Non-finite floats have no JSON representation and are rejected.
pub fn classify(value: RawValue<'_>) -> Result<JsonType, PathError> {
    match value {
        RawValue::Absent => Ok(JsonType::Null),
        RawValue::Mapping => Ok(JsonType::Object),
        RawValue::Sequence => Ok(JsonType::Array),
        RawValue::Boolean(_) => Ok(JsonType::Boolean),
        RawValue::Integer(_) => Ok(JsonType::Integer),
        RawValue::Float(f) if !f.is_finite() => Err(PathError::Unclassifiable(format!("non-finite number {}", f))),
        RawValue::Float(f) if f.fract() == 0.0 => Ok(JsonType::Integer),
        RawValue::Float(_) => Ok(JsonType::Number),
        RawValue::Text(text) => Ok(classify_text(text)),
    }
}

/// Classifies text: boolean literal, then integer, then finite decimal, else string.
/// Surrounding whitespace does not stop text from reading as a number.
pub fn classify_text(text: &str) -> JsonType {
    if parse_bool(text).is_some() {
        JsonType::Boolean
    } else if is_integer_text(text) {
        JsonType::Integer
    } else if parse_finite(text).is_some() {
        JsonType::Number
    } else {
        JsonType::String
    }
}

/// Converts text into the JSON value its classification calls for.
pub fn infer_value(text: &str) -> Value {
    match classify_text(text) {
        JsonType::Boolean => Value::Bool(parse_bool(text).unwrap_or_default()),
        JsonType::Integer => match text.trim().parse::<i64>() {
            Ok(i) => Value::from(i),
            // Too wide for i64; keep it numeric.
            Err(_) => float_value(text),
        },
        JsonType::Number => float_value(text),
        _ => Value::String(text.to_string()),
    }
}

fn float_value(text: &str) -> Value {
    parse_finite(text)
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(text.to_string()))
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn is_integer_text(text: &str) -> bool {
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// The float parser accepts `nan`/`inf`/`infinity` spellings; those stay text.
fn parse_finite(text: &str) -> Option<f64> {
    let text = text.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if ["nan", "inf", "infinity"].iter().any(|word| unsigned.eq_ignore_ascii_case(word)) {
        return None;
    }
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}
