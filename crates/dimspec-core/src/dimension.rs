//! Dimension types
//!
//! A dimension is a named, typed value attached to a specification.
//! Dimensions are either entered manually or computed from a formula that
//! references dimensions defined earlier in the same list.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a dimension's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free-form text
    String,
    /// Numeric value; the only type that may carry a formula
    Number,
    /// True/false flag
    Boolean,
    /// Date entered as text; never evaluated
    Date,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
        };
        write!(f, "{}", name)
    }
}

/// A named, typed value attached to a specification
///
/// Invariants:
/// - if `formula` is non-empty, `data_type` must be [`DataType::Number`]
///   (enforced by the calculation pass, which rejects violations before
///   evaluating anything);
/// - `is_calculated` is derived: true iff the dimension carries a formula.
///   The construction helpers keep it in sync; every calculation pass
///   recomputes it from scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Dimension name, unique within its list
    pub name: String,

    /// Current value; replaced with the computed result for formula dimensions
    #[serde(default)]
    pub value: Value,

    /// Display unit (e.g. "mm", "kg")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Declared value type
    pub data_type: DataType,

    /// Formula expression referencing earlier dimension names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Whether the current value was computed from the formula
    #[serde(default)]
    pub is_calculated: bool,
}

impl Dimension {
    /// Create a new dimension with an empty value
    pub fn new<S: Into<String>>(name: S, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            value: Value::default(),
            unit: None,
            data_type,
            formula: None,
            is_calculated: false,
        }
    }

    /// Create a number dimension with a manually-entered value
    pub fn number<S: Into<String>>(name: S, value: f64) -> Self {
        Self::new(name, DataType::Number).with_value(value)
    }

    /// Create a text dimension
    pub fn text<S: Into<String>, V: Into<String>>(name: S, value: V) -> Self {
        Self::new(name, DataType::String).with_value(Value::String(value.into()))
    }

    /// Set the value
    pub fn with_value<V: Into<Value>>(mut self, value: V) -> Self {
        self.value = value.into();
        self
    }

    /// Set the display unit
    pub fn with_unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Attach a formula; marks the dimension as calculated
    pub fn with_formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(formula.into());
        self.is_calculated = self.has_formula();
        self
    }

    /// Whether the dimension carries a non-blank formula
    pub fn has_formula(&self) -> bool {
        self.formula_text().is_some()
    }

    /// The trimmed formula text, if non-blank
    pub fn formula_text(&self) -> Option<&str> {
        match self.formula.as_deref().map(str::trim) {
            Some("") | None => None,
            text => text,
        }
    }
}
