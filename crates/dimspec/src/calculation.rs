//! Dimension list calculation and static reference validation
//!
//! Dimensions are an ordered list; a formula may only reference dimensions
//! defined earlier in the same list. [`evaluate_dimensions`] walks the
//! list once, building the evaluation context incrementally, and aborts on
//! the first failure: the caller replaces its whole working copy with the
//! result or shows the error, never a mix. [`validate_references`] is the
//! pre-save counterpart: it evaluates nothing and collects *every* problem
//! in one pass so the user gets a complete report.
//!
//! # Example
//!
//! ```rust
//! use dimspec::prelude::*;
//!
//! let dimensions = vec![
//!     Dimension::number("width", 4.0),
//!     Dimension::number("height", 3.0),
//!     Dimension::new("area", DataType::Number).with_formula("width * height"),
//! ];
//!
//! let evaluated = evaluate_dimensions(&dimensions).unwrap();
//! assert_eq!(evaluated[2].value, Value::Number(12.0));
//! ```

use ahash::{AHashMap, AHashSet};
use dimspec_core::{ColumnType, DataType, Dimension, Formula, TableColumn, Value};
use dimspec_formula::{extract_identifiers, EvalError, EvaluationContext};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for dimension calculation
pub type CalculationResult<T> = std::result::Result<T, CalculationError>;

/// Errors that abort a dimension calculation pass
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// A formula is attached to a dimension whose type is not `number`
    #[error("dimension \"{name}\" has data type {data_type} but carries a formula; formulas require the number type")]
    TypeMismatch { name: String, data_type: DataType },

    /// A formula failed to evaluate
    #[error("dimension \"{name}\": {source}")]
    Formula {
        name: String,
        #[source]
        source: EvalError,
    },
}

/// Evaluate an ordered dimension list
///
/// Walks the list in order with a context that starts empty. Manual
/// number dimensions feed the context; formula dimensions are evaluated
/// against it and their computed value both replaces `value` and joins
/// the context for later formulas. `is_calculated` is recomputed for
/// every dimension.
///
/// Fail-fast and all-or-nothing: the first problem aborts the pass and
/// no partial list is returned. The input is never mutated; on success a
/// brand-new list is returned, and running the pass again on its own
/// output yields an identical list.
pub fn evaluate_dimensions(dimensions: &[Dimension]) -> CalculationResult<Vec<Dimension>> {
    let mut context = EvaluationContext::new();
    let mut evaluated = Vec::with_capacity(dimensions.len());

    for dimension in dimensions {
        let mut result = dimension.clone();

        match result.formula_text() {
            None => {
                result.is_calculated = false;
                if result.data_type == DataType::Number {
                    // A number-typed value that does not parse is left out of
                    // the context; referencing it fails as an undefined
                    // variable rather than poisoning later formulas.
                    if let Some(n) = result.value.as_number() {
                        context.insert(result.name.clone(), n);
                    }
                }
            }
            Some(formula) => {
                if result.data_type != DataType::Number {
                    return Err(CalculationError::TypeMismatch {
                        name: result.name.clone(),
                        data_type: result.data_type,
                    });
                }

                let value = dimspec_formula::evaluate(formula, &context).map_err(|source| {
                    CalculationError::Formula {
                        name: result.name.clone(),
                        source,
                    }
                })?;

                result.value = Value::Number(value);
                result.is_calculated = true;
                context.insert(result.name.clone(), value);
            }
        }

        evaluated.push(result);
    }

    Ok(evaluated)
}

/// Outcome of a static validation pass
///
/// `valid` iff `errors` is empty. Ships to the UI as a blocking pre-save
/// report, so it serializes camelCase like the rest of the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True iff no errors were found
    pub valid: bool,

    /// Every problem found, in list order
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Statically validate a dimension list's names and references
///
/// Evaluates nothing. Reports duplicate names and formula references to
/// names that are undefined or only defined later (a dimension may not
/// reference itself). Collects every error in one pass; this runs once
/// before a save to present the complete report, not keystroke-by-
/// keystroke.
pub fn validate_references(dimensions: &[Dimension]) -> ValidationReport {
    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut errors = Vec::new();

    for dimension in dimensions {
        if seen.contains(dimension.name.as_str()) {
            errors.push(format!("duplicate dimension name \"{}\"", dimension.name));
        }

        if let Some(formula) = dimension.formula_text() {
            for referenced in extract_identifiers(formula) {
                if !seen.contains(referenced.as_str()) {
                    errors.push(format!(
                        "dimension \"{}\"'s formula references \"{}\", which is not defined or is defined later",
                        dimension.name, referenced
                    ));
                }
            }
        }

        seen.insert(dimension.name.as_str());
    }

    ValidationReport::from_errors(errors)
}

/// Statically validate a table's column schema and formulas
///
/// The machine-table counterpart of [`validate_references`], run before a
/// table configuration is saved. Reports duplicate column names, formulas
/// attached to non-formula columns, formulas for columns that do not
/// exist, and formula references to unknown columns or to the formula's
/// own column. Column formulas have no ordering rule (any other column
/// may be referenced), so only existence is checked.
pub fn validate_columns(
    columns: &[TableColumn],
    formulas: &AHashMap<String, Formula>,
) -> ValidationReport {
    let mut errors = Vec::new();

    let mut names: AHashSet<&str> = AHashSet::new();
    for column in columns {
        if !names.insert(column.name.as_str()) {
            errors.push(format!("duplicate column name \"{}\"", column.name));
        }
    }

    for column in columns {
        let formula = match formulas.get(&column.name) {
            Some(f) => f,
            None => continue,
        };

        if column.data_type != ColumnType::Formula {
            errors.push(format!(
                "column \"{}\" has data type {} but carries a formula",
                column.name, column.data_type
            ));
        }

        for referenced in extract_identifiers(&formula.expression) {
            if referenced == column.name {
                errors.push(format!(
                    "column \"{}\"'s formula references itself",
                    column.name
                ));
            } else if !names.contains(referenced.as_str()) {
                errors.push(format!(
                    "column \"{}\"'s formula references \"{}\", which is not a column of this table",
                    column.name, referenced
                ));
            }
        }
    }

    let mut orphaned: Vec<&String> = formulas
        .keys()
        .filter(|name| !names.contains(name.as_str()))
        .collect();
    orphaned.sort();
    for name in orphaned {
        errors.push(format!(
            "a formula is attached to \"{}\", which is not a column of this table",
            name
        ));
    }

    ValidationReport::from_errors(errors)
}
