//! Formula types

use serde::{Deserialize, Serialize};

/// An arithmetic expression attached to a table column
///
/// `dependencies` is the ordered set of names the expression mentions. It
/// is derived from the expression text, never authored independently:
/// build formulas through the engine's identifier scanner (see the
/// `FormulaExt` trait in `dimspec-formula`) so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    /// The expression text (e.g. "Raw - Wastage")
    pub expression: String,

    /// Names referenced by the expression, first-appearance order,
    /// de-duplicated
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Operator-facing description of what the formula computes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Formula {
    /// Create a formula with an already-derived dependency list
    pub fn new<S: Into<String>>(expression: S, dependencies: Vec<String>) -> Self {
        Self {
            expression: expression.into(),
            dependencies,
            description: None,
        }
    }

    /// Set the description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}
