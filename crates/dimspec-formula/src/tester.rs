//! Live formula tester
//!
//! Interactive diagnostic behind the calculation-builder UI: it lints the
//! expression, checks every referenced name against the pool of available
//! dimension names, and, when both pass, runs a trial evaluation with a
//! sentinel value bound to every name. It never fails; every problem is
//! encoded in the returned structure so the caller can render it inline
//! on each keystroke.

use crate::evaluator::{evaluate, EvaluationContext};
use crate::syntax::{extract_identifiers, lint};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample value bound to every available name during a trial evaluation
pub const TEST_VALUE: f64 = 10.0;

/// Structured result of [`test_formula`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaTest {
    /// True iff `errors` is empty
    pub is_valid: bool,

    /// Every problem found, as human-readable strings
    pub errors: Vec<String>,

    /// Referenced names not present in the available pool,
    /// first-appearance order (stable, so the UI can render suggestion
    /// chips against it)
    pub missing_dimensions: Vec<String>,

    /// Outcome of the trial evaluation, when one was attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_result: Option<TrialResult>,
}

/// A successful trial evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialResult {
    /// The computed value
    pub result: f64,

    /// The sample values actually referenced by the formula,
    /// first-appearance order
    pub test_values: Vec<(String, f64)>,
}

impl fmt::Display for TrialResult {
    /// Renders the operator-facing explanation, e.g.
    /// `if w = 10, h = 10 then the result is 100`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ")?;
        for (i, (name, value)) in self.test_values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        write!(f, " then the result is {}", self.result)
    }
}

/// Diagnose a formula against a pool of available dimension names
///
/// Pipeline: structural lint, then reference check, then a trial
/// evaluation with [`TEST_VALUE`] bound to every available name. The trial
/// only runs when the first two steps are clean and at least one known
/// name is referenced. Never
/// panics and never returns an error; every failure mode lands in the
/// result.
///
/// # Example
/// ```rust
/// use dimspec_formula::test_formula;
///
/// let test = test_formula("w * h", &["w", "h"]);
/// assert!(test.is_valid);
/// assert_eq!(test.test_result.unwrap().result, 100.0);
///
/// let test = test_formula("q * 2", &["w", "h"]);
/// assert_eq!(test.missing_dimensions, vec!["q"]);
/// ```
pub fn test_formula<S: AsRef<str>>(formula: &str, available: &[S]) -> FormulaTest {
    let mut errors = lint(formula);

    let pool: AHashSet<&str> = available.iter().map(|s| s.as_ref()).collect();
    let identifiers = extract_identifiers(formula);

    let missing_dimensions: Vec<String> = identifiers
        .iter()
        .filter(|name| !pool.contains(name.as_str()))
        .cloned()
        .collect();
    if !missing_dimensions.is_empty() {
        errors.push(format!(
            "unknown dimensions: {}",
            missing_dimensions.join(", ")
        ));
    }

    let referenced: Vec<String> = identifiers
        .into_iter()
        .filter(|name| pool.contains(name.as_str()))
        .collect();

    let mut test_result = None;
    if errors.is_empty() && !referenced.is_empty() {
        let context: EvaluationContext = pool
            .iter()
            .map(|name| (name.to_string(), TEST_VALUE))
            .collect();

        match evaluate(formula, &context) {
            Ok(result) => {
                test_result = Some(TrialResult {
                    result,
                    test_values: referenced
                        .into_iter()
                        .map(|name| (name, TEST_VALUE))
                        .collect(),
                });
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    FormulaTest {
        is_valid: errors.is_empty(),
        errors,
        missing_dimensions,
        test_result,
    }
}
