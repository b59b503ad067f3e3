//! Structural expression checks and identifier utilities
//!
//! The checks here run on raw expression text, before any parsing. They
//! are shared by the evaluator (which refuses structurally-broken input)
//! and the live formula tester (which reports every violation as a
//! human-readable string while the user types).

use crate::functions::is_function_name;
use crate::{MAX_EXPRESSION_LEN, MAX_NESTING_DEPTH};
use ahash::AHashSet;
use dimspec_core::Formula;
use lazy_regex::regex;

/// Operator pairs rejected outright
const DOUBLED_OPERATORS: [&str; 5] = ["**", "//", "++", "--", "%%"];

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

/// Check an expression's structure without parsing it
///
/// Returns one human-readable message per violation; an empty vector means
/// the expression is structurally sound (it may still fail to parse or
/// evaluate). Checks: emptiness, length cap, doubled operators, leading
/// and trailing operators, operator pairs (a minus introducing a negative
/// literal is the one exception), and parenthesis balance, emptiness, and
/// nesting depth.
pub fn lint(expression: &str) -> Vec<String> {
    let mut errors = Vec::new();

    let trimmed = expression.trim();
    if trimmed.is_empty() {
        errors.push("expression is empty".to_string());
        return errors;
    }
    if expression.len() > MAX_EXPRESSION_LEN {
        errors.push(format!(
            "expression exceeds the maximum length of {} characters",
            MAX_EXPRESSION_LEN
        ));
        return errors;
    }

    // Operator checks ignore whitespace so "w *  * h" and "w ** h" read the same.
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    for pair in DOUBLED_OPERATORS {
        if compact.contains(pair) {
            errors.push(format!("invalid doubled operator \"{}\"", pair));
        }
    }

    let first = compact.chars().next().unwrap_or('\0');
    let last = compact.chars().last().unwrap_or('\0');
    if matches!(first, '+' | '*' | '/') {
        errors.push(format!("expression starts with operator \"{}\"", first));
    }
    if is_operator(last) {
        errors.push(format!("expression ends with operator \"{}\"", last));
    }

    let chars: Vec<char> = compact.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        let (a, b) = (chars[i], chars[i + 1]);
        if !is_operator(a) || !is_operator(b) {
            continue;
        }
        if a == b {
            // Already reported by the doubled-operator check
            continue;
        }
        let negative_literal = b == '-'
            && chars
                .get(i + 2)
                .map_or(false, |c| c.is_ascii_digit() || *c == '.');
        if !negative_literal {
            errors.push(format!("operators \"{}{}\" may not appear in sequence", a, b));
        }
    }

    let mut depth: i32 = 0;
    let mut max_depth: i32 = 0;
    let mut unbalanced = false;
    let mut empty_parens = false;
    let mut prev = None;
    for c in compact.chars() {
        match c {
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' => {
                if prev == Some('(') {
                    empty_parens = true;
                }
                depth -= 1;
                if depth < 0 {
                    unbalanced = true;
                }
            }
            _ => {}
        }
        prev = Some(c);
    }
    if unbalanced || depth != 0 {
        errors.push("unbalanced parentheses".to_string());
    }
    if empty_parens {
        errors.push("empty parentheses \"()\"".to_string());
    }
    if max_depth as usize > MAX_NESTING_DEPTH {
        errors.push(format!(
            "parentheses nested deeper than {} levels",
            MAX_NESTING_DEPTH
        ));
    }

    errors
}

/// Extract the names an expression references
///
/// Identifier tokens (`[A-Za-z_][A-Za-z0-9_]*`) in first-appearance order,
/// de-duplicated, with the math function whitelist excluded.
pub fn extract_identifiers(expression: &str) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut names = Vec::new();
    for m in regex!(r"[A-Za-z_][A-Za-z0-9_]*").find_iter(expression) {
        let name = m.as_str();
        if is_function_name(name) {
            continue;
        }
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace every whole-token occurrence of `from` with `to`
///
/// Token-aware: `substitute_identifier("Raw - RawTotal", "Raw", "100")`
/// rewrites only the standalone `Raw`. Used for literal substitution in
/// row formulas and for the "replace a missing name with a suggested one"
/// repair in formula authoring.
pub fn substitute_identifier(expression: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(expression.len());
    let mut last = 0;
    for m in regex!(r"[A-Za-z_][A-Za-z0-9_]*").find_iter(expression) {
        if m.as_str() == from {
            out.push_str(&expression[last..m.start()]);
            out.push_str(to);
            last = m.end();
        }
    }
    out.push_str(&expression[last..]);
    out
}

/// Extension methods tying [`Formula`] to the identifier scanner
///
/// Formulas built through this trait always carry a dependency list that
/// matches their expression text.
pub trait FormulaExt {
    /// Build a formula from expression text, deriving `dependencies`
    fn from_expression<S: Into<String>>(expression: S) -> Self;

    /// Recompute `dependencies` after the expression text changed
    fn refresh_dependencies(&mut self);
}

impl FormulaExt for Formula {
    fn from_expression<S: Into<String>>(expression: S) -> Self {
        let expression = expression.into();
        let dependencies = extract_identifiers(&expression);
        Formula::new(expression, dependencies)
    }

    fn refresh_dependencies(&mut self) {
        self.dependencies = extract_identifiers(&self.expression);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lint_clean_expression() {
        assert!(lint("w * h").is_empty());
        assert!(lint("(a + b) / 2").is_empty());
        assert!(lint("-5 + x").is_empty());
        assert!(lint("w * -2").is_empty());
    }

    #[test]
    fn test_lint_empty() {
        let errors = lint("   ");
        assert_eq!(errors, vec!["expression is empty".to_string()]);
    }

    #[test]
    fn test_lint_doubled_operators() {
        let errors = lint("w ** h");
        assert!(errors.iter().any(|e| e.contains("doubled operator")));

        let errors = lint("a -- 2");
        assert!(errors.iter().any(|e| e.contains("\"--\"")));
    }

    #[test]
    fn test_lint_leading_and_trailing_operators() {
        assert!(lint("* w").iter().any(|e| e.contains("starts with")));
        assert!(lint("w +").iter().any(|e| e.contains("ends with")));
        // A leading minus is a negative literal, not a violation
        assert!(lint("-2 + w").is_empty());
    }

    #[test]
    fn test_lint_operator_sequences() {
        assert!(lint("a +* b").iter().any(|e| e.contains("sequence")));
        // Minus before an identifier is not a negative literal
        assert!(lint("a * -b").iter().any(|e| e.contains("sequence")));
    }

    #[test]
    fn test_lint_parentheses() {
        assert!(lint("(w + h").iter().any(|e| e.contains("unbalanced")));
        assert!(lint("w + h)").iter().any(|e| e.contains("unbalanced")));
        assert!(lint("w + ()").iter().any(|e| e.contains("empty parentheses")));
    }

    #[test]
    fn test_lint_depth_cap() {
        let deep = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        assert!(lint(&deep).iter().any(|e| e.contains("nested deeper")));
    }

    #[test]
    fn test_lint_length_cap() {
        let long = "a + ".repeat(400) + "a";
        assert!(lint(&long).iter().any(|e| e.contains("maximum length")));
    }

    #[test]
    fn test_extract_identifiers() {
        assert_eq!(extract_identifiers("pow(w, h) + w"), vec!["w", "h"]);
        assert_eq!(
            extract_identifiers("Net_Weight * 2 + tare"),
            vec!["Net_Weight", "tare"]
        );
        assert!(extract_identifiers("1 + 2").is_empty());
    }

    #[test]
    fn test_substitute_identifier_is_token_aware() {
        assert_eq!(
            substitute_identifier("Raw - RawTotal", "Raw", "100"),
            "100 - RawTotal"
        );
        assert_eq!(
            substitute_identifier("w * h + w", "w", "10"),
            "10 * h + 10"
        );
        assert_eq!(substitute_identifier("a + b", "c", "1"), "a + b");
    }

    #[test]
    fn test_formula_from_expression() {
        let f = Formula::from_expression("Raw - Wastage");
        assert_eq!(f.dependencies, vec!["Raw", "Wastage"]);

        let mut f = Formula::from_expression("a + b");
        f.expression = "a * c".to_string();
        f.refresh_dependencies();
        assert_eq!(f.dependencies, vec!["a", "c"]);
    }
}
