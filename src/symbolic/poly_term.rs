use crate::symbolic::action::Action;
use crate::symbolic::expression::Expression;
use crate::symbolic::parse_node::ParseNode;
use std::collections::BTreeMap;

/// signature of the term without variables
pub const CONSTANT: &str = "#$CONSTANT$#";

/// A monomial: coefficient expression times a product of variable powers.
#[derive(Debug, Clone)]
pub struct PolyTerm {
    exponents: BTreeMap<String, i32>,
    coefficient: Expression,
}

/// `x^2:y^1` for sorted variables, or [`CONSTANT`]
pub fn make_signature(exponents: &BTreeMap<String, i32>) -> String {
    if exponents.is_empty() {
        return CONSTANT.to_string();
    }
    exponents
        .iter()
        .map(|(v, e)| format!("{}^{}", v, e))
        .collect::<Vec<_>>()
        .join(":")
}

impl PolyTerm {
    pub fn constant(coefficient: Expression) -> PolyTerm {
        PolyTerm {
            exponents: BTreeMap::new(),
            coefficient,
        }
    }

    /// `1 * v`; the variable is keyed by its printed form, so `sin(x)` can act as a variable
    pub fn variable(v: &Expression) -> PolyTerm {
        let mut exponents = BTreeMap::new();
        exponents.insert(v.to_string(), 1);
        PolyTerm {
            exponents,
            coefficient: Expression::new("1"),
        }
    }

    pub fn with_exponents(coefficient: Expression, exponents: BTreeMap<String, i32>) -> PolyTerm {
        PolyTerm {
            exponents,
            coefficient,
        }
    }

    pub fn coefficient(&self) -> &Expression {
        &self.coefficient
    }

    pub fn coefficient_mut(&mut self) -> &mut Expression {
        &mut self.coefficient
    }

    pub fn variables(&self) -> impl Iterator<Item = &String> {
        self.exponents.keys()
    }

    pub fn degree_of_variable(&self, var: &str) -> i32 {
        self.exponents.get(var).copied().unwrap_or(0)
    }

    pub fn degree(&self) -> i32 {
        self.exponents.values().sum()
    }

    pub fn signature(&self) -> String {
        make_signature(&self.exponents)
    }

    /// sum of two terms with the same signature
    pub fn sum(&self, other: &PolyTerm) -> PolyTerm {
        PolyTerm {
            exponents: self.exponents.clone(),
            coefficient: self.coefficient.sum(&other.coefficient).condensed(),
        }
    }

    pub fn negative(&self) -> PolyTerm {
        PolyTerm {
            exponents: self.exponents.clone(),
            coefficient: self.coefficient.negate().condensed(),
        }
    }

    pub fn product(&self, other: &PolyTerm) -> PolyTerm {
        let mut exponents = self.exponents.clone();
        for (v, e) in &other.exponents {
            *exponents.entry(v.clone()).or_insert(0) += e;
        }
        PolyTerm {
            exponents,
            coefficient: self.coefficient.product(&other.coefficient).condensed(),
        }
    }

    /// None when the term does not depend on `var`
    pub fn derivative(&self, var: &str) -> Option<PolyTerm> {
        let n = *self.exponents.get(var)?;
        let mut exponents = self.exponents.clone();
        if n > 1 {
            exponents.insert(var.to_string(), n - 1);
        } else {
            exponents.remove(var);
        }
        Some(PolyTerm {
            exponents,
            coefficient: self
                .coefficient
                .product(&Expression::new(&n.to_string()))
                .condensed(),
        })
    }

    /// `coefficient * v1^d1 * v2 ...`
    pub fn make_expression(&self) -> Expression {
        if self.exponents.is_empty() {
            return self.coefficient.clone();
        }
        let mut factors = vec![self.coefficient.root.clone()];
        for (v, d) in &self.exponents {
            let base = ParseNode::new(v);
            if *d > 1 {
                factors.push(ParseNode::internal(
                    Action::Power,
                    vec![base, ParseNode::leaf(&d.to_string())],
                ));
            } else {
                factors.push(base);
            }
        }
        Expression::from_node(ParseNode::internal(Action::Product, factors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures_are_sorted() {
        let mut e = BTreeMap::new();
        e.insert("y".to_string(), 2);
        e.insert("x".to_string(), 1);
        let t = PolyTerm::with_exponents(Expression::new("3"), e);
        assert_eq!(t.signature(), "x^1:y^2");
        assert_eq!(t.degree(), 3);
        assert_eq!(PolyTerm::constant(Expression::new("2")).signature(), CONSTANT);
    }

    #[test]
    fn test_product_and_derivative() {
        let x = PolyTerm::variable(&Expression::new("x"));
        let x2 = x.product(&x);
        assert_eq!(x2.signature(), "x^2");
        let d = x2.derivative("x").unwrap();
        assert_eq!(d.signature(), "x^1");
        assert_eq!(d.coefficient().value, Some(2.0));
        assert!(x2.derivative("y").is_none());
        assert_eq!(x2.make_expression().to_string(), "1*x^2");
    }
}
