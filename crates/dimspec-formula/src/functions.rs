//! The closed math function set
//!
//! The grammar accepts exactly these functions and nothing else; there is
//! no user-extensible registry. `pow`, `min`, and `max` take two
//! arguments, the rest take one. Arity is checked at parse time.

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// A function from the closed whitelist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Sqrt,
    Abs,
    Sin,
    Cos,
    Tan,
    /// Natural logarithm
    Log,
    Exp,
    Pow,
    Min,
    Max,
    Floor,
    Ceil,
    Round,
}

impl MathFunction {
    /// Every whitelisted function
    pub const ALL: [MathFunction; 13] = [
        MathFunction::Sqrt,
        MathFunction::Abs,
        MathFunction::Sin,
        MathFunction::Cos,
        MathFunction::Tan,
        MathFunction::Log,
        MathFunction::Exp,
        MathFunction::Pow,
        MathFunction::Min,
        MathFunction::Max,
        MathFunction::Floor,
        MathFunction::Ceil,
        MathFunction::Round,
    ];

    /// Look up a function by its (lowercase) name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(MathFunction::Sqrt),
            "abs" => Some(MathFunction::Abs),
            "sin" => Some(MathFunction::Sin),
            "cos" => Some(MathFunction::Cos),
            "tan" => Some(MathFunction::Tan),
            "log" => Some(MathFunction::Log),
            "exp" => Some(MathFunction::Exp),
            "pow" => Some(MathFunction::Pow),
            "min" => Some(MathFunction::Min),
            "max" => Some(MathFunction::Max),
            "floor" => Some(MathFunction::Floor),
            "ceil" => Some(MathFunction::Ceil),
            "round" => Some(MathFunction::Round),
            _ => None,
        }
    }

    /// The function's name as it appears in formulas
    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Sqrt => "sqrt",
            MathFunction::Abs => "abs",
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Log => "log",
            MathFunction::Exp => "exp",
            MathFunction::Pow => "pow",
            MathFunction::Min => "min",
            MathFunction::Max => "max",
            MathFunction::Floor => "floor",
            MathFunction::Ceil => "ceil",
            MathFunction::Round => "round",
        }
    }

    /// Number of arguments the function takes
    pub fn arity(&self) -> usize {
        match self {
            MathFunction::Pow | MathFunction::Min | MathFunction::Max => 2,
            _ => 1,
        }
    }

    /// Apply the function to already-evaluated arguments
    ///
    /// `args` must match [`MathFunction::arity`]; the parser guarantees
    /// this for every AST it produces. The result may be NaN or infinite
    /// (e.g. `sqrt(-1)`); the evaluator rejects those at the call site.
    pub fn apply(&self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity());
        match self {
            MathFunction::Sqrt => args[0].sqrt(),
            MathFunction::Abs => args[0].abs(),
            MathFunction::Sin => args[0].sin(),
            MathFunction::Cos => args[0].cos(),
            MathFunction::Tan => args[0].tan(),
            MathFunction::Log => args[0].ln(),
            MathFunction::Exp => args[0].exp(),
            MathFunction::Pow => args[0].powf(args[1]),
            MathFunction::Min => args[0].min(args[1]),
            MathFunction::Max => args[0].max(args[1]),
            MathFunction::Floor => args[0].floor(),
            MathFunction::Ceil => args[0].ceil(),
            MathFunction::Round => args[0].round(),
        }
    }
}

static FUNCTION_NAMES: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| MathFunction::ALL.iter().map(|f| f.name()).collect());

/// Whether `name` is one of the whitelisted function names
pub fn is_function_name(name: &str) -> bool {
    FUNCTION_NAMES.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_round_trip() {
        for f in MathFunction::ALL {
            assert_eq!(MathFunction::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn test_arity() {
        assert_eq!(MathFunction::Pow.arity(), 2);
        assert_eq!(MathFunction::Min.arity(), 2);
        assert_eq!(MathFunction::Sqrt.arity(), 1);
    }

    #[test]
    fn test_apply() {
        assert_eq!(MathFunction::Sqrt.apply(&[16.0]), 4.0);
        assert_eq!(MathFunction::Pow.apply(&[2.0, 10.0]), 1024.0);
        assert_eq!(MathFunction::Max.apply(&[3.0, 7.0]), 7.0);
        assert!(MathFunction::Sqrt.apply(&[-1.0]).is_nan());
    }

    #[test]
    fn test_is_function_name() {
        assert!(is_function_name("sqrt"));
        assert!(!is_function_name("SQRT"));
        assert!(!is_function_name("hypot"));
    }
}
