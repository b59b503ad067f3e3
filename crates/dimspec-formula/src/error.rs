//! Expression engine error types

use thiserror::Error;

/// Result type for expression operations
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while linting, parsing, or evaluating an expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Structural or grammar violation
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Identifier not present in the evaluation context
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// Call to a name outside the closed function set
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments to a function
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Evaluation produced NaN or ±infinity
    #[error("Non-numeric result: {0}")]
    NonNumericResult(String),
}
