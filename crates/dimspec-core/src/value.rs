//! Scalar value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the value stored in a dimension or a table-row cell
///
/// Serializes untagged, so JSON `5`, `"5"`, and `true` map directly onto
/// the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// Boolean value
    Boolean(bool),

    /// String value (also used for manually-entered dates)
    String(String),
}

impl Value {
    /// Try to get the value as a number
    ///
    /// Strings are parsed (`"5"` → `5.0`); booleans do not coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
            Value::Boolean(_) => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the value is an empty string
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::String(String::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_number() {
        assert_eq!(Value::Number(5.0).as_number(), Some(5.0));
        assert_eq!(Value::String("5".into()).as_number(), Some(5.0));
        assert_eq!(Value::String(" 2.5 ".into()).as_number(), Some(2.5));
        assert_eq!(Value::String("x".into()).as_number(), None);
        assert_eq!(Value::Boolean(true).as_number(), None);
    }

    #[test]
    fn test_untagged_json() {
        let v: Value = serde_json::from_str("5").unwrap();
        assert_eq!(v, Value::Number(5.0));

        let v: Value = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(v, Value::String("5".into()));

        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v, Value::Boolean(true));

        assert_eq!(serde_json::to_string(&Value::Number(70.0)).unwrap(), "70.0");
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Value::default().is_empty());
        assert!(!Value::Number(0.0).is_empty());
    }
}
