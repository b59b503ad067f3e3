//! # dimspec-formula
//!
//! Expression engine for dimspec.
//!
//! This crate provides:
//! - Expression parsing (text → AST) over a restricted arithmetic grammar
//! - Expression evaluation (AST → number) against a name → number context
//! - Structural linting and identifier extraction shared with callers
//! - The live formula tester behind the calculation-builder UI
//!
//! The grammar is a closed interpreter: numeric literals, identifiers,
//! `+ - * /`, unary minus, parentheses, and a fixed set of thirteen math
//! functions. No other syntax is accepted, so user-supplied formula text
//! can never reach a general-purpose runtime.
//!
//! ## Example
//!
//! ```rust
//! use dimspec_formula::{evaluate, test_formula, EvaluationContext};
//!
//! let mut ctx = EvaluationContext::new();
//! ctx.insert("w".to_string(), 4.0);
//! ctx.insert("h".to_string(), 3.0);
//! assert_eq!(evaluate("w * h", &ctx).unwrap(), 12.0);
//!
//! let test = test_formula("w * h", &["w", "h"]);
//! assert!(test.is_valid);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod syntax;
pub mod tester;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{EvalError, EvalResult};
pub use evaluator::{evaluate, evaluate_expr, EvaluationContext};
pub use functions::{is_function_name, MathFunction};
pub use parser::parse_expression;
pub use syntax::{extract_identifiers, lint, substitute_identifier, FormulaExt};
pub use tester::{test_formula, FormulaTest, TrialResult, TEST_VALUE};

/// Maximum accepted expression length, in bytes
///
/// Formulas originate from user input destined for a shared backend; the
/// cap bounds worst-case parse cost for adversarial strings.
pub const MAX_EXPRESSION_LEN: usize = 1024;

/// Maximum parenthesis nesting depth
pub const MAX_NESTING_DEPTH: usize = 32;
