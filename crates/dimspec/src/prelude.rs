//! Prelude module - common imports for dimspec users
//!
//! ```rust
//! use dimspec::prelude::*;
//! ```

pub use crate::{
    // Table evaluation
    auto_calculate_row,
    column_total,
    // Dimension calculation
    evaluate_dimensions,
    // Expression engine
    evaluate,
    test_formula,
    validate_columns,
    validate_references,

    CalculationError,
    CalculationResult,
    // Core types
    ColumnType,
    DataType,
    Dimension,
    EvalError,
    EvaluationContext,
    Formula,
    // Extension traits
    FormulaExt,
    FormulaTest,
    TableColumn,
    TableRow,
    TrialResult,
    ValidationReport,
    Value,
};
