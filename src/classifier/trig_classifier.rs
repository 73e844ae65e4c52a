use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::solved::solved_graph::{SolveError, SolvedGraph};
use crate::solved::transcendental::{solved_cosine, solved_sine, solved_tangent, solved_trig};

/// which trigonometric functions the input mentions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrigContent {
    pub sin: bool,
    pub cos: bool,
    pub tan: bool,
}

impl TrigContent {
    pub fn detect(input: &str) -> Self {
        TrigContent {
            sin: input.contains("sin"),
            cos: input.contains("cos"),
            tan: input.contains("tan"),
        }
    }

    pub fn has_multiples(&self) -> bool {
        [self.sin, self.cos, self.tan].iter().filter(|b| **b).count() > 1
    }
}

/// Routes equations built on `sin`, `cos` or `tan` to the matching feature builder.
#[derive(Debug, Clone, Default)]
pub struct TrigClassifier {}

impl TrigClassifier {
    pub fn new() -> Self {
        TrigClassifier {}
    }

    pub fn features(&self, ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
        let t = TrigContent::detect(ae.input_equation());
        if t.has_multiples() {
            solved_trig(ae)
        } else if t.sin {
            solved_sine(ae)
        } else if t.cos {
            solved_cosine(ae)
        } else if t.tan {
            solved_tangent(ae)
        } else {
            solved_trig(ae)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let t = TrigContent::detect("y = 2*sin(3*x)");
        assert!(t.sin && !t.cos && !t.tan);
        assert!(!t.has_multiples());
        assert!(TrigContent::detect("y = sin(x) + cos(x)").has_multiples());
        assert_eq!(TrigContent::detect("y = x"), TrigContent::default());
    }
}
