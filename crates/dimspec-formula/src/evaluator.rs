//! Expression evaluator
//!
//! Evaluates expression ASTs against a numeric context. Every arithmetic
//! step is checked for NaN/∞ so a non-numeric value can never escape as a
//! "successful" result.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{EvalError, EvalResult};
use crate::parser::parse_expression;
use crate::syntax;
use ahash::AHashMap;

/// The ephemeral name → number mapping used while evaluating a formula
///
/// Rebuilt from scratch on every evaluation call; never persisted or
/// shared across calls.
pub type EvaluationContext = AHashMap<String, f64>;

/// Evaluate an expression string against a context
///
/// Runs the structural checks of [`syntax::lint`], parses, and walks the
/// AST. Deterministic and side-effect free for a given
/// `(expression, context)` pair.
///
/// # Example
/// ```rust
/// use dimspec_formula::{evaluate, EvaluationContext};
///
/// let mut ctx = EvaluationContext::new();
/// ctx.insert("w".to_string(), 4.0);
/// ctx.insert("h".to_string(), 3.0);
///
/// assert_eq!(evaluate("w * h", &ctx).unwrap(), 12.0);
/// ```
pub fn evaluate(expression: &str, context: &EvaluationContext) -> EvalResult<f64> {
    if let Some(problem) = syntax::lint(expression).into_iter().next() {
        return Err(EvalError::Syntax(problem));
    }

    let expr = parse_expression(expression)?;
    evaluate_expr(&expr, context)
}

/// Evaluate an already-parsed AST against a context
pub fn evaluate_expr(expr: &Expr, context: &EvaluationContext) -> EvalResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::Ident(name) => context
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),

        Expr::UnaryOp { op, operand } => {
            let value = evaluate_expr(operand, context)?;
            match op {
                UnaryOp::Negate => Ok(-value),
            }
        }

        Expr::BinaryOp { op, left, right } => {
            let lhs = evaluate_expr(left, context)?;
            let rhs = evaluate_expr(right, context)?;

            let value = match op {
                BinaryOp::Add => lhs + rhs,
                BinaryOp::Subtract => lhs - rhs,
                BinaryOp::Multiply => lhs * rhs,
                BinaryOp::Divide => {
                    if rhs == 0.0 {
                        return Err(EvalError::NonNumericResult(
                            "division by zero".to_string(),
                        ));
                    }
                    lhs / rhs
                }
            };

            if value.is_finite() {
                Ok(value)
            } else {
                Err(EvalError::NonNumericResult(
                    "arithmetic overflow".to_string(),
                ))
            }
        }

        Expr::Call { function, args } => {
            let values = args
                .iter()
                .map(|arg| evaluate_expr(arg, context))
                .collect::<EvalResult<Vec<f64>>>()?;

            let value = function.apply(&values);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(EvalError::NonNumericResult(format!(
                    "{}() produced a non-numeric result",
                    function.name()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(pairs: &[(&str, f64)]) -> EvaluationContext {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_arithmetic() {
        let empty = EvaluationContext::new();
        assert_eq!(evaluate("1 + 2 * 3", &empty).unwrap(), 7.0);
        assert_eq!(evaluate("(1 + 2) * 3", &empty).unwrap(), 9.0);
        assert_eq!(evaluate("10 / 4", &empty).unwrap(), 2.5);
        assert_eq!(evaluate("-3 + 5", &empty).unwrap(), 2.0);
    }

    #[test]
    fn test_context_lookup() {
        let ctx = ctx(&[("w", 4.0), ("h", 3.0)]);
        assert_eq!(evaluate("w * h", &ctx).unwrap(), 12.0);
        assert_eq!(evaluate("w * h + 1", &ctx).unwrap(), 13.0);
    }

    #[test]
    fn test_undefined_variable() {
        let ctx = ctx(&[("w", 4.0)]);
        let err = evaluate("w * q", &ctx).unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("q".to_string()));
    }

    #[test]
    fn test_functions() {
        let empty = EvaluationContext::new();
        assert_eq!(evaluate("sqrt(16)", &empty).unwrap(), 4.0);
        assert_eq!(evaluate("pow(2, 10)", &empty).unwrap(), 1024.0);
        assert_eq!(evaluate("min(3, 7) + max(3, 7)", &empty).unwrap(), 10.0);
        assert_eq!(evaluate("floor(2.7) + ceil(2.2) + round(2.5)", &empty).unwrap(), 8.0);
        assert_eq!(evaluate("abs(-5)", &empty).unwrap(), 5.0);
    }

    #[test]
    fn test_division_by_zero() {
        let empty = EvaluationContext::new();
        let err = evaluate("1 / 0", &empty).unwrap_err();
        assert_eq!(
            err,
            EvalError::NonNumericResult("division by zero".to_string())
        );
    }

    #[test]
    fn test_nan_result_rejected() {
        let empty = EvaluationContext::new();
        let err = evaluate("sqrt(0 - 1)", &empty).unwrap_err();
        assert!(matches!(err, EvalError::NonNumericResult(_)));
    }

    #[test]
    fn test_structurally_broken_input() {
        let empty = EvaluationContext::new();
        assert!(matches!(
            evaluate("1 ** 2", &empty).unwrap_err(),
            EvalError::Syntax(_)
        ));
        assert!(matches!(
            evaluate("(1 + 2", &empty).unwrap_err(),
            EvalError::Syntax(_)
        ));
    }

    #[test]
    fn test_deterministic() {
        let ctx = ctx(&[("a", 2.5)]);
        let first = evaluate("a * a + 1", &ctx).unwrap();
        let second = evaluate("a * a + 1", &ctx).unwrap();
        assert_eq!(first, second);
    }
}
