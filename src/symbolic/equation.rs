use crate::symbolic::expression::Expression;
use crate::symbolic::polynomial::Polynomial;
use crate::symbolic::rational_expression::RationalExpression;
use std::fmt;

/// `left = right` reduced to the single polynomial `left - right`.
///
/// When both sides are rational expressions the sides are cross-multiplied, so
/// `y = 1/x` becomes `x*y - 1`. An input without exactly one `=`, with an empty side or with a
/// malformed side is bad; `polynomial()` is then None.
#[derive(Debug, Clone)]
pub struct Equation {
    pub left: Option<Expression>,
    pub right: Option<Expression>,
    main_polynomial: Option<Polynomial>,
    bad: bool,
}

impl Equation {
    pub fn new(s: &str) -> Equation {
        let mut eq = Equation {
            left: None,
            right: None,
            main_polynomial: None,
            bad: true,
        };
        let pieces: Vec<&str> = s.split('=').collect();
        let [l, r] = pieces.as_slice() else {
            return eq;
        };
        if l.trim().is_empty() || r.trim().is_empty() {
            return eq;
        }
        let left = Expression::new(l);
        let right = Expression::new(r);
        eq.bad = !left.is_valid() || !right.is_valid();
        if !eq.bad {
            eq.main_polynomial = Some(
                Equation::solve_rational(&left, &right)
                    .unwrap_or_else(|| Polynomial::new(&left).difference(&Polynomial::new(&right))),
            );
        }
        eq.left = Some(left);
        eq.right = Some(right);
        eq
    }

    fn solve_rational(left: &Expression, right: &Expression) -> Option<Polynomial> {
        let l = RationalExpression::new(left);
        if !l.is_rational_expression() {
            return None;
        }
        let r = RationalExpression::new(right);
        if !r.is_rational_expression() {
            return None;
        }
        let pl = l.numerator().product(r.denominator());
        let pr = r.numerator().product(l.denominator());
        Some(pl.difference(&pr))
    }

    pub fn is_bad(&self) -> bool {
        self.bad
    }

    pub fn polynomial(&self) -> Option<&Polynomial> {
        self.main_polynomial.as_ref()
    }

    pub fn polynomial_mut(&mut self) -> Option<&mut Polynomial> {
        self.main_polynomial.as_mut()
    }

    /// the side that is a lone variable, left first
    pub fn simple_side(&self) -> Option<&Expression> {
        [&self.left, &self.right]
            .into_iter()
            .flatten()
            .find(|e| e.is_simple())
    }

    /// the side opposite the lone variable returned by `simple_side`
    pub fn other_side(&self) -> Option<&Expression> {
        match (&self.left, &self.right) {
            (Some(l), Some(r)) if l.is_simple() => Some(r),
            (Some(l), Some(r)) if r.is_simple() => Some(l),
            _ => None,
        }
    }

    pub fn one_variable_polynomial(&self, var: &str) -> Option<Polynomial> {
        self.main_polynomial
            .as_ref()
            .map(|p| p.one_variable_polynomial(var))
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.left, &self.right) {
            (Some(l), Some(r)) => write!(f, "{} = {}", l, r),
            _ => write!(f, "bad equation"),
        }
    }
}
