//! Dynamic table schema and row data
//!
//! A table is a user-defined set of columns (e.g. a machine's production
//! log) plus rows of per-entry data. Formula columns are computed within a
//! single row; no cross-row references exist.

use crate::value::Value;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free-form text
    Text,
    /// Manually-entered number
    Number,
    /// Computed from other columns in the same row
    Formula,
    /// Date entered as text
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Formula => "formula",
            ColumnType::Date => "date",
        };
        write!(f, "{}", name)
    }
}

impl ColumnType {
    /// Whether values in this column participate in numeric aggregation
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Formula)
    }
}

/// Schema of one table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Column name, unique within the table
    pub name: String,

    /// Declared column type
    pub data_type: ColumnType,

    /// Whether the column must be filled before a row can be saved
    #[serde(default)]
    pub is_required: bool,

    /// Display position (0-based)
    #[serde(default)]
    pub order: u32,

    /// Input placeholder shown in empty cells
    #[serde(default)]
    pub placeholder: String,
}

impl TableColumn {
    /// Create a new column
    pub fn new<S: Into<String>>(name: S, data_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_required: false,
            order: 0,
            placeholder: String::new(),
        }
    }

    /// Mark the column as required
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Set the display position
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set the input placeholder
    pub fn with_placeholder<S: Into<String>>(mut self, placeholder: S) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// One row of table data, keyed by column name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Caller-assigned row identifier
    pub id: String,

    /// Cell values keyed by column name
    #[serde(default)]
    pub data: AHashMap<String, Value>,
}

impl TableRow {
    /// Create an empty row
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            data: AHashMap::new(),
        }
    }

    /// Set a cell value
    pub fn with_value<S: Into<String>, V: Into<Value>>(mut self, column: S, value: V) -> Self {
        self.data.insert(column.into(), value.into());
        self
    }

    /// Get a cell value
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.get(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_builder() {
        let col = TableColumn::new("Raw", ColumnType::Number)
            .required()
            .with_order(1)
            .with_placeholder("kg of raw material");

        assert!(col.is_required);
        assert_eq!(col.order, 1);
        assert!(col.data_type.is_numeric());
    }

    #[test]
    fn test_row_cells() {
        let row = TableRow::new("r1")
            .with_value("Raw", 100.0)
            .with_value("Operator", "amara");

        assert_eq!(row.get("Raw"), Some(&Value::Number(100.0)));
        assert_eq!(row.get("Net"), None);
    }

    #[test]
    fn test_formula_columns_are_numeric() {
        assert!(ColumnType::Formula.is_numeric());
        assert!(!ColumnType::Date.is_numeric());
    }
}
