//! Operator codes of the parse tree and the read-only table of their names and evaluators.
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Action {
    /// a tree that failed to parse
    Corrupted,
    /// a leaf: variable, constant or numeric literal
    NoOp,
    UMinus,
    Sum,
    Reciprocal,
    Product,
    Power,
    Sqrt,
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Abs,
}

/// Operator table in matching order. Index 0..4 are the infix operators, the rest are
/// named unary functions; a string is matched against the first name it starts with.
pub const FNAMES: [(&str, Action); 12] = [
    ("-", Action::UMinus),
    ("+", Action::Sum),
    ("/", Action::Reciprocal),
    ("*", Action::Product),
    ("^", Action::Power),
    ("sqrt", Action::Sqrt),
    ("exp", Action::Exp),
    ("log", Action::Log),
    ("sin", Action::Sin),
    ("cos", Action::Cos),
    ("tan", Action::Tan),
    ("abs", Action::Abs),
];

impl Action {
    /// first entry of [`FNAMES`] that `target` starts with
    pub fn find_first(target: &str) -> Option<(&'static str, Action)> {
        FNAMES
            .iter()
            .find(|(name, _)| target.starts_with(name))
            .copied()
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self,
            Action::Sqrt
                | Action::Exp
                | Action::Log
                | Action::Sin
                | Action::Cos
                | Action::Tan
                | Action::Abs
        )
    }

    /// printed name of a unary function
    pub fn name(&self) -> Option<&'static str> {
        FNAMES.iter().find(|(_, a)| a == self).map(|(n, _)| *n)
    }

    /// Applies the operator to already evaluated operands. None for leaves and corrupted
    /// nodes, or when the operand count does not fit the operator.
    pub fn apply(&self, args: &[f64]) -> Option<f64> {
        let first = || args.first().copied();
        match self {
            Action::Corrupted | Action::NoOp => None,
            Action::UMinus => first().map(|v| -v),
            Action::Sum => Some(args.iter().sum()),
            Action::Reciprocal => first().map(|v| 1.0 / v),
            Action::Product => Some(args.iter().product()),
            Action::Power => match args {
                [b, e] => Some(b.powf(*e)),
                _ => None,
            },
            Action::Sqrt => first().map(f64::sqrt),
            Action::Exp => first().map(f64::exp),
            Action::Log => first().map(f64::ln),
            Action::Sin => first().map(f64::sin),
            Action::Cos => first().map(f64::cos),
            Action::Tan => first().map(f64::tan),
            Action::Abs => first().map(f64::abs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_function_names_match_first_prefix() {
        assert_eq!(Action::find_first("sin(x)").map(|f| f.1), Some(Action::Sin));
        assert_eq!(Action::find_first("-x").map(|f| f.1), Some(Action::UMinus));
        assert!(Action::find_first("x").is_none());
        let functions: Vec<Action> = Action::iter().filter(|a| a.is_function()).collect();
        assert_eq!(functions.len(), 7);
        assert!(functions.iter().all(|f| f.name().is_some()));
    }

    #[test]
    fn test_evaluation_table() {
        assert_eq!(Action::Sum.apply(&[1.0, 2.0, 3.0]), Some(6.0));
        assert_eq!(Action::Product.apply(&[]), Some(1.0));
        assert_eq!(Action::Power.apply(&[2.0, 3.0]), Some(8.0));
        assert_eq!(Action::Reciprocal.apply(&[4.0]), Some(0.25));
        assert_eq!(Action::NoOp.apply(&[1.0]), None);
    }
}
