//! Row-scoped table formula evaluation and column aggregation
//!
//! Table columns have no declared evaluation order among themselves, so a
//! row formula is computed by textual substitution: every *other* column's
//! name is replaced with its current row value as a numeric literal, and
//! the resulting purely-numeric expression is evaluated. This is a
//! deliberate divergence from the context mechanism used for dimension
//! lists.
//!
//! Failure policy: row evaluation is fail-silent. Any lint, parse, or
//! evaluation error, including a referenced cell holding a non-numeric
//! value, yields `0` for that cell instead of an error. This is inherited
//! behavior the rest of the system depends on; swallowed errors are logged
//! at debug level so they remain observable in development.

use ahash::AHashMap;
use dimspec_core::{ColumnType, Formula, TableColumn, TableRow, Value};
use dimspec_formula::{evaluate, substitute_identifier, EvaluationContext};

/// Format a cell value as an expression literal
///
/// Negative numbers are parenthesized so substitution into `a - b` cannot
/// produce a doubled minus.
fn literal(value: f64) -> String {
    if value < 0.0 {
        format!("({})", value)
    } else {
        format!("{}", value)
    }
}

/// Compute every formula cell of a single row
///
/// Returns a new row-data mapping: the input cells plus one computed
/// entry per formula column. A formula column with no formula attached is
/// left untouched. Cells referenced by a formula that are missing or
/// non-numeric stay unsubstituted, so the evaluator reports an undefined
/// identifier and the soft-failure policy zeroes the cell.
///
/// # Example
///
/// ```rust
/// use ahash::AHashMap;
/// use dimspec::prelude::*;
///
/// let columns = vec![
///     TableColumn::new("Raw", ColumnType::Number),
///     TableColumn::new("Wastage", ColumnType::Number),
///     TableColumn::new("Net", ColumnType::Formula),
/// ];
/// let mut formulas = AHashMap::new();
/// formulas.insert("Net".to_string(), Formula::from_expression("Raw - Wastage"));
///
/// let mut row_data = AHashMap::new();
/// row_data.insert("Raw".to_string(), Value::Number(100.0));
/// row_data.insert("Wastage".to_string(), Value::Number(30.0));
///
/// let computed = auto_calculate_row(&columns, &formulas, &row_data);
/// assert_eq!(computed["Net"], Value::Number(70.0));
/// ```
pub fn auto_calculate_row(
    columns: &[TableColumn],
    formulas: &AHashMap<String, Formula>,
    row_data: &AHashMap<String, Value>,
) -> AHashMap<String, Value> {
    let mut computed = row_data.clone();
    let empty = EvaluationContext::new();

    for column in columns {
        if column.data_type != ColumnType::Formula {
            continue;
        }

        let formula = match formulas.get(&column.name) {
            Some(f) => f,
            None => {
                log::warn!(
                    "formula column \"{}\" has no formula attached; leaving it alone",
                    column.name
                );
                continue;
            }
        };

        let mut expression = formula.expression.clone();
        for other in columns {
            if other.name == column.name {
                continue;
            }
            if let Some(n) = row_data.get(&other.name).and_then(Value::as_number) {
                expression = substitute_identifier(&expression, &other.name, &literal(n));
            }
        }

        let value = match evaluate(&expression, &empty) {
            Ok(n) => n,
            Err(e) => {
                log::debug!(
                    "formula column \"{}\" failed to evaluate (\"{}\"): {}; storing 0",
                    column.name,
                    expression,
                    e
                );
                0.0
            }
        };

        computed.insert(column.name.clone(), Value::Number(value));
    }

    computed
}

/// Sum a column's values across rows
///
/// Only `number` and `formula` columns aggregate; any other column type,
/// or a name that matches no column, totals `0`. Non-numeric cells
/// contribute nothing.
pub fn column_total(columns: &[TableColumn], name: &str, rows: &[TableRow]) -> f64 {
    let column = match columns.iter().find(|c| c.name == name) {
        Some(c) => c,
        None => return 0.0,
    };
    if !column.data_type.is_numeric() {
        return 0.0;
    }

    rows.iter()
        .filter_map(|row| row.get(name).and_then(Value::as_number))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimspec_formula::FormulaExt;
    use pretty_assertions::assert_eq;

    fn production_columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("Raw", ColumnType::Number),
            TableColumn::new("Wastage", ColumnType::Number),
            TableColumn::new("Net", ColumnType::Formula),
        ]
    }

    fn net_formula() -> AHashMap<String, Formula> {
        let mut formulas = AHashMap::new();
        formulas.insert("Net".to_string(), Formula::from_expression("Raw - Wastage"));
        formulas
    }

    fn row(raw: Value, wastage: Value) -> AHashMap<String, Value> {
        let mut data = AHashMap::new();
        data.insert("Raw".to_string(), raw);
        data.insert("Wastage".to_string(), wastage);
        data
    }

    #[test]
    fn test_row_formula() {
        let computed = auto_calculate_row(
            &production_columns(),
            &net_formula(),
            &row(Value::Number(100.0), Value::Number(30.0)),
        );
        assert_eq!(computed["Net"], Value::Number(70.0));
        // Manual cells pass through untouched
        assert_eq!(computed["Raw"], Value::Number(100.0));
    }

    #[test]
    fn test_non_numeric_cell_soft_fails_to_zero() {
        let computed = auto_calculate_row(
            &production_columns(),
            &net_formula(),
            &row(Value::String("x".into()), Value::Number(5.0)),
        );
        assert_eq!(computed["Net"], Value::Number(0.0));
    }

    #[test]
    fn test_missing_cell_soft_fails_to_zero() {
        let mut data = AHashMap::new();
        data.insert("Raw".to_string(), Value::Number(100.0));

        let computed = auto_calculate_row(&production_columns(), &net_formula(), &data);
        assert_eq!(computed["Net"], Value::Number(0.0));
    }

    #[test]
    fn test_negative_value_substitution() {
        let computed = auto_calculate_row(
            &production_columns(),
            &net_formula(),
            &row(Value::Number(100.0), Value::Number(-30.0)),
        );
        assert_eq!(computed["Net"], Value::Number(130.0));
    }

    #[test]
    fn test_string_number_cells_substitute() {
        let computed = auto_calculate_row(
            &production_columns(),
            &net_formula(),
            &row(Value::String("100".into()), Value::String("30".into())),
        );
        assert_eq!(computed["Net"], Value::Number(70.0));
    }

    #[test]
    fn test_broken_formula_soft_fails_to_zero() {
        let mut formulas = AHashMap::new();
        formulas.insert("Net".to_string(), Formula::from_expression("Raw -- Wastage"));

        let computed = auto_calculate_row(
            &production_columns(),
            &formulas,
            &row(Value::Number(100.0), Value::Number(30.0)),
        );
        assert_eq!(computed["Net"], Value::Number(0.0));
    }

    #[test]
    fn test_column_total() {
        let columns = production_columns();
        let rows = vec![
            TableRow::new("r1").with_value("Raw", 100.0).with_value("Net", 70.0),
            TableRow::new("r2").with_value("Raw", 50.0).with_value("Net", 45.0),
            TableRow::new("r3").with_value("Raw", "not a number"),
        ];

        assert_eq!(column_total(&columns, "Raw", &rows), 150.0);
        assert_eq!(column_total(&columns, "Net", &rows), 115.0);
    }

    #[test]
    fn test_column_total_non_numeric_column() {
        let columns = vec![TableColumn::new("Operator", ColumnType::Text)];
        let rows = vec![TableRow::new("r1").with_value("Operator", "amara")];

        assert_eq!(column_total(&columns, "Operator", &rows), 0.0);
        assert_eq!(column_total(&columns, "Unknown", &rows), 0.0);
    }
}
