//! Structured key-value fields
//!
//! A [`Field`] is one key tagged with a closed set of value kinds. Fields are
//! kept in emission order; duplicate keys are allowed and the encoder decides
//! how to treat them (the console encoder keeps duplicates, the JSON encoder
//! deduplicates with last-writer-wins).

use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;

/// Value kinds supported by structured fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Time(DateTime<Local>),
    Error(String),
    Any(serde_json::Value),
}

/// One key-value pair attached to a record or bound to a logger handle
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Str(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i32) -> Self {
        Self::new(key, FieldValue::Int(i64::from(value)))
    }

    pub fn int64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    pub fn uint64(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, FieldValue::Uint(value))
    }

    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value))
    }

    pub fn bool_(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    /// Durations are encoded as seconds (floating point) by both encoders
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Local>) -> Self {
        Self::new(key, FieldValue::Time(value))
    }

    pub fn error(key: impl Into<String>, err: &dyn std::error::Error) -> Self {
        Self::new(key, FieldValue::Error(err.to_string()))
    }

    /// Escape hatch for values outside the closed kind set
    pub fn any(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self::new(key, FieldValue::Any(value))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => write!(f, "{}", d.as_secs_f64()),
            FieldValue::Time(t) => write!(f, "{}", t.format(crate::core::record::TIME_FORMAT)),
            FieldValue::Error(e) => write!(f, "{}", e),
            FieldValue::Any(v) => write!(f, "{}", v),
        }
    }
}

impl FieldValue {
    /// Convert to a `serde_json::Value` for the production encoder
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::Str(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Duration(d) => serde_json::Number::from_f64(d.as_secs_f64())
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Time(t) => serde_json::Value::String(
                t.format(crate::core::record::TIME_FORMAT).to_string(),
            ),
            FieldValue::Error(e) => serde_json::Value::String(e.clone()),
            FieldValue::Any(v) => v.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_constructors() {
        let f = Field::string("user", "alice");
        assert_eq!(f.key, "user");
        assert_eq!(f.value, FieldValue::Str("alice".to_string()));

        let f = Field::int("status", 200);
        assert_eq!(f.value, FieldValue::Int(200));

        let f = Field::bool_("cached", true);
        assert_eq!(f.value, FieldValue::Bool(true));
    }

    #[test]
    fn test_duration_renders_as_seconds() {
        let f = Field::duration("latency", Duration::from_millis(1500));
        assert_eq!(f.value.to_string(), "1.5");
        assert_eq!(f.value.to_json_value(), serde_json::json!(1.5));
    }

    #[test]
    fn test_error_field_captures_message() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let f = Field::error("cause", &err);
        assert_eq!(f.value, FieldValue::Error("gone".to_string()));
    }

    #[test]
    fn test_json_conversion() {
        assert_eq!(
            Field::uint64("n", 7).value.to_json_value(),
            serde_json::json!(7)
        );
        assert_eq!(
            Field::any("extra", serde_json::json!({"a": 1}))
                .value
                .to_json_value(),
            serde_json::json!({"a": 1})
        );
    }
}
