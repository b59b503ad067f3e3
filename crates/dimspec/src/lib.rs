//! # dimspec
//!
//! Formula core for specification dimensions and dynamic machine tables.
//!
//! dimspec is the algorithmic heart behind three kinds of form: the
//! spec builder (named, typed dimensions, some computed from formulas
//! over earlier dimensions), the machine-table configuration (user-defined
//! columns with row-scoped formula cells), and the calculation builder
//! (live formula authoring with inline diagnostics). It owns no state and
//! performs no I/O: callers hand in a complete snapshot and receive a new
//! snapshot or a typed failure back.
//!
//! - [`evaluate_dimensions`] - ordered, fail-fast dimension calculation
//! - [`validate_references`] / [`validate_columns`] - exhaustive pre-save
//!   static checks
//! - [`test_formula`] - keystroke-by-keystroke formula diagnosis with
//!   sample-value trial evaluation
//! - [`auto_calculate_row`] / [`column_total`] - row-scoped table formulas
//!   and cross-row totals
//! - [`evaluate`] - the underlying closed-grammar expression evaluator
//!
//! ## Example
//!
//! ```rust
//! use dimspec::prelude::*;
//!
//! let dimensions = vec![
//!     Dimension::number("width", 4.0).with_unit("mm"),
//!     Dimension::number("height", 3.0).with_unit("mm"),
//!     Dimension::new("area", DataType::Number).with_formula("width * height"),
//! ];
//!
//! // Blocking pre-save check
//! let report = validate_references(&dimensions);
//! assert!(report.valid);
//!
//! // Full recompute after an edit
//! let evaluated = evaluate_dimensions(&dimensions).unwrap();
//! assert_eq!(evaluated[2].value, Value::Number(12.0));
//! ```

pub mod calculation;
pub mod prelude;
pub mod table;

// Re-export calculation types
pub use calculation::{
    evaluate_dimensions, validate_columns, validate_references, CalculationError,
    CalculationResult, ValidationReport,
};

// Re-export table types
pub use table::{auto_calculate_row, column_total};

// Re-export core types
pub use dimspec_core::{ColumnType, DataType, Dimension, Formula, TableColumn, TableRow, Value};

// Re-export formula-engine types
pub use dimspec_formula::{
    evaluate, extract_identifiers, lint, parse_expression, substitute_identifier, test_formula,
    EvalError, EvalResult, EvaluationContext, FormulaExt, FormulaTest, MathFunction, TrialResult,
    MAX_EXPRESSION_LEN, MAX_NESTING_DEPTH, TEST_VALUE,
};
