use crate::math::math_util::log_one_plus_x;
use crate::symbolic::action::Action;
use crate::symbolic::expression::Expression;
use crate::symbolic::parse_node::ParseNode;
use crate::symbolic::polynomial::Polynomial;
use std::collections::HashMap;
use std::fmt;

/// Quotient of two polynomials recovered from an expression tree.
///
/// `is_rational_expression()` is false when the tree contains anything other than sums,
/// products, reciprocals, negations and integer powers of variables and constants.
#[derive(Debug, Clone)]
pub struct RationalExpression {
    expression: Expression,
    numerator: Polynomial,
    denominator: Polynomial,
    is_rational: bool,
}

impl Default for RationalExpression {
    fn default() -> Self {
        RationalExpression {
            expression: Expression::new("1"),
            numerator: Polynomial::make_constant(Expression::new("1")),
            denominator: Polynomial::make_constant(Expression::new("1")),
            is_rational: false,
        }
    }
}

impl RationalExpression {
    pub fn new(e: &Expression) -> RationalExpression {
        let mut r = RationalExpression {
            expression: e.clone(),
            ..Default::default()
        };
        if let Some(parts) = RationalExpression::make_it(&e.root) {
            r.numerator = parts.numerator;
            r.denominator = parts.denominator;
            r.is_rational = true;
        }
        r
    }

    pub fn parse(s: &str) -> RationalExpression {
        RationalExpression::new(&Expression::new(s))
    }

    fn constant(v: f64) -> RationalExpression {
        RationalExpression {
            numerator: Polynomial::make_constant(Expression::from_value(v)),
            ..Default::default()
        }
    }

    fn variable(var: &str) -> RationalExpression {
        RationalExpression {
            numerator: Polynomial::new(&Expression::new(var)),
            ..Default::default()
        }
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.numerator
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.denominator
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn is_rational_expression(&self) -> bool {
        self.is_rational
    }

    pub fn set_parameter_hash(&mut self, h: &HashMap<String, f64>) {
        self.expression.set_parameter_hash(h);
        self.numerator.set_parameter_hash(h);
        self.denominator.set_parameter_hash(h);
    }

    pub fn sum(&self, other: &RationalExpression) -> RationalExpression {
        self.add(other).transformed()
    }

    pub fn product(&self, other: &RationalExpression) -> RationalExpression {
        self.multiply(other).transformed()
    }

    pub fn difference(&self, other: &RationalExpression) -> RationalExpression {
        self.add(&other.negated()).transformed()
    }

    pub fn quotient(&self, other: &RationalExpression) -> RationalExpression {
        self.multiply(&other.inverted()).transformed()
    }

    /// the expression part re-parsed from the printed quotient
    fn transformed(mut self) -> RationalExpression {
        self.expression = Expression::new(&self.to_string());
        self.is_rational = true;
        self
    }

    fn multiply(&self, other: &RationalExpression) -> RationalExpression {
        RationalExpression {
            numerator: self.numerator.product(&other.numerator),
            denominator: self.denominator.product(&other.denominator),
            ..Default::default()
        }
    }

    fn negated(&self) -> RationalExpression {
        RationalExpression {
            numerator: self.numerator.negative(),
            denominator: self.denominator.clone(),
            ..Default::default()
        }
    }

    fn inverted(&self) -> RationalExpression {
        RationalExpression {
            numerator: self.denominator.clone(),
            denominator: self.numerator.clone(),
            ..Default::default()
        }
    }

    fn add(&self, other: &RationalExpression) -> RationalExpression {
        let t1 = self.numerator.product(&other.denominator);
        let t2 = other.numerator.product(&self.denominator);
        RationalExpression {
            numerator: t1.sum(&t2),
            denominator: self.denominator.product(&other.denominator),
            ..Default::default()
        }
    }

    fn make_it(q: &ParseNode) -> Option<RationalExpression> {
        let mut r = RationalExpression::default();
        match q.operator {
            Action::Sum => {
                r.numerator = Polynomial::make_constant(Expression::new("0"));
                for c in &q.children {
                    r = RationalExpression::make_it(c)?.add(&r);
                }
            }
            Action::Product => {
                for c in &q.children {
                    r = RationalExpression::make_it(c)?.multiply(&r);
                }
            }
            Action::UMinus => {
                r = RationalExpression::make_it(q.children.first()?)?.negated();
            }
            Action::Reciprocal => {
                r = RationalExpression::make_it(q.children.first()?)?.inverted();
            }
            Action::Power => {
                let [base, exponent] = q.children.as_slice() else {
                    return None;
                };
                let pf = Expression::from_node(exponent.clone()).value?;
                if pf.round() != pf {
                    return None;
                }
                let mut factor = RationalExpression::make_it(base)?;
                if pf < 0.0 {
                    factor = factor.inverted();
                }
                for _ in 0..(pf.abs() as usize) {
                    r = r.multiply(&factor);
                }
            }
            Action::NoOp => {
                r.numerator = Polynomial::new(&Expression::from_node(q.clone()));
            }
            _ => return q.value.map(RationalExpression::constant),
        }
        Some(r)
    }
}

impl fmt::Display for RationalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator.is_monomial() {
            write!(f, "{}/({})", self.numerator, self.denominator)
        } else {
            write!(f, "({})/({})", self.numerator, self.denominator)
        }
    }
}

const INITIAL_TOLERANCE: f64 = 1.0e-10;
const MAX_ERROR_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
struct Remainder {
    a: f64,
    theta: f64,
}

impl Remainder {
    fn new(x: f64, tolerance: f64) -> Remainder {
        let rounded = x.round_ties_even();
        if (x - rounded).abs() < tolerance {
            return Remainder { a: rounded, theta: 0.0 };
        }
        let a = x.floor();
        Remainder { a, theta: x - a }
    }
}

/// Continued fraction expansion of a real number, stopped as soon as a remainder repeats.
///
/// A repeat of the zero remainder means the number is rational; a repeat of an earlier
/// nonzero remainder means it is a root of an integer quadratic. The tolerance grows with the
/// partial quotients and the expansion gives up once the accumulated probability of a false
/// match passes one half.
#[derive(Debug, Clone)]
pub struct ContinuedFraction {
    first: i32,
    a: Vec<f64>,
    tolerance: f64,
    log_prob_correct: f64,
}

impl ContinuedFraction {
    /// `max_size` is accepted for call-site symmetry; the error probability bounds the length.
    pub fn new(x: f64, _max_size: usize) -> ContinuedFraction {
        let mut cf = ContinuedFraction {
            first: -1,
            a: Vec::new(),
            tolerance: INITIAL_TOLERANCE,
            log_prob_correct: 0.0,
        };
        let mut r = Remainder::new(x, cf.tolerance);
        cf.adjust_tolerance(&r);
        let mut remainders = vec![Remainder::new(0.0, cf.tolerance)];
        let mut n = 1;
        while cf.acceptable_err(n) {
            cf.first = cf.first_close_match(&remainders, &r);
            if cf.first >= 0 {
                break;
            }
            remainders.push(r);
            r = Remainder::new(1.0 / r.theta, cf.tolerance);
            cf.adjust_tolerance(&r);
            n += 1;
        }
        remainders.push(r);
        cf.a = remainders[1..=n].iter().map(|r| r.a).collect();
        cf
    }

    fn acceptable_err(&mut self, n: usize) -> bool {
        let c = 2.0 * n as f64 * self.tolerance;
        if c < 1.0 {
            self.log_prob_correct += log_one_plus_x(-c);
        } else {
            self.log_prob_correct = f64::NEG_INFINITY;
        }
        self.log_prob_correct >= log_one_plus_x(-MAX_ERROR_PROBABILITY)
    }

    fn adjust_tolerance(&mut self, r: &Remainder) {
        let p = r.a.abs();
        if p == 0.0 {
            return;
        }
        let n = p.log2().floor() as i32;
        for _ in 0..=n {
            self.tolerance *= 2.1;
        }
    }

    fn first_close_match(&self, l: &[Remainder], r: &Remainder) -> i32 {
        l.iter()
            .position(|t| (r.theta - t.theta).abs() < self.tolerance)
            .map_or(-1, |i| i as i32)
    }

    pub fn size(&self) -> usize {
        self.a.len()
    }

    /// partial quotients
    pub fn partial_quotients(&self) -> &[f64] {
        &self.a
    }

    pub fn is_rational(&self) -> bool {
        self.first == 0
    }

    pub fn is_quadratic(&self) -> bool {
        self.first > 0
    }

    /// probability that the classification as rational or quadratic is wrong
    pub fn error_probability(&self) -> f64 {
        if self.log_prob_correct > f64::NEG_INFINITY {
            -self.log_prob_correct.exp_m1()
        } else {
            1.0
        }
    }

    /// the finite expansion folded back into a quotient of constants
    pub fn iterate(&self) -> Option<RationalExpression> {
        if !self.is_rational() {
            return None;
        }
        let mut n = self.a.len() - 1;
        let mut r = RationalExpression::constant(self.a[n]);
        while n > 0 {
            n -= 1;
            r = r.inverted().add(&RationalExpression::constant(self.a[n]));
        }
        Some(r.transformed())
    }

    /// The remainders at the start and the end of the period, as rational functions of `var`.
    pub fn iterate_quadratic(&self, var: &str) -> Option<(RationalExpression, RationalExpression)> {
        if !self.is_quadratic() {
            return None;
        }
        let f = (self.first - 1) as usize;
        let l = self.a.len() - 1;
        let mut n = 0;
        let mut r = RationalExpression::variable(var).add(&RationalExpression::constant(-self.a[0]));
        let mut r0 = None;
        loop {
            if n == f {
                r0 = Some(r.clone());
            }
            n += 1;
            r = r.inverted().add(&RationalExpression::constant(-self.a[n]));
            if n == l {
                break;
            }
        }
        Some((r0?.transformed(), r.transformed()))
    }

    /// integer quadratic in `x` that the number solves
    pub fn quadratic_polynomial(&self) -> Option<Polynomial> {
        let (r0, r1) = self.iterate_quadratic("x")?;
        let l = r0.numerator.product(&r1.denominator);
        let r = r1.numerator.product(&r0.denominator);
        Some(l.difference(&r))
    }

    /// `[den, -num]` for a rational, `[a, b, c]` of `a*x^2 + b*x + c` for a quadratic
    /// irrational, empty otherwise
    pub fn polynomial_coefficients(&self) -> Vec<f64> {
        if let Some((n, d)) = self.rational_parts() {
            return vec![d, -n];
        }
        match self.quadratic_polynomial() {
            Some(p) => {
                let c = Polynomial::evaluate_coefficients(&Polynomial::coefficients_of(&p, "x"));
                if c.len() == 3 { c } else { Vec::new() }
            }
            None => Vec::new(),
        }
    }

    /// numerator and denominator of a rational number
    pub fn rational_parts(&self) -> Option<(f64, f64)> {
        let r = self.iterate()?;
        let n = r.numerator.get_constant().value?;
        let d = r.denominator.get_constant().value?;
        Some((n, d))
    }

    pub fn rational_string(&self) -> Option<String> {
        self.iterate().map(|r| r.to_string())
    }

    pub fn quadratic_equation(&self) -> Option<String> {
        self.quadratic_polynomial().map(|p| format!("{} = 0", p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{PI, SQRT_2};

    #[test]
    fn test_quotient_of_linear_polynomials() {
        let r = RationalExpression::parse("(x+1)/(x-1)");
        assert!(r.is_rational_expression());
        assert_eq!(r.numerator().to_string(), "1*x +1");
        assert_eq!(r.denominator().to_string(), "1*x -1");
        assert_eq!(r.to_string(), "(1*x +1)/(1*x -1)");
    }

    #[test]
    fn test_common_denominator() {
        let r = RationalExpression::parse("x^2 + 1/x");
        assert!(r.is_rational_expression());
        assert_eq!(r.numerator().get_degree(), 3);
        assert_eq!(r.denominator().get_degree(), 1);
    }

    #[test]
    fn test_transcendental_is_not_rational() {
        assert!(!RationalExpression::parse("sin(x)").is_rational_expression());
        assert!(RationalExpression::parse("sqrt(2)*x").is_rational_expression());
    }

    #[test]
    fn test_sum_evaluates() {
        let s = RationalExpression::parse("1/x").sum(&RationalExpression::parse("1/y"));
        let h: HashMap<String, f64> =
            [("x".to_string(), 1.0), ("y".to_string(), 2.0)].into_iter().collect();
        assert_relative_eq!(s.expression().evaluate(&h).unwrap(), 1.5);
        let q = RationalExpression::parse("x").quotient(&RationalExpression::parse("y"));
        assert_relative_eq!(q.expression().evaluate(&h).unwrap(), 0.5);
    }

    #[test]
    fn test_rational_fractions() {
        let cf = ContinuedFraction::new(0.5, 20);
        assert!(cf.is_rational());
        assert_eq!(cf.rational_parts(), Some((1.0, 2.0)));
        assert_eq!(ContinuedFraction::new(3.0, 20).rational_parts(), Some((3.0, 1.0)));
        assert_eq!(ContinuedFraction::new(-0.75, 20).rational_parts(), Some((-3.0, 4.0)));
        assert_eq!(ContinuedFraction::new(-0.75, 20).partial_quotients(), &[-1.0, 4.0]);
    }

    #[test]
    fn test_rounded_inputs() {
        // ten digits still pin down 2/3
        let cf = ContinuedFraction::new(0.6666666667, 20);
        assert!(cf.is_rational());
        assert_eq!(cf.rational_parts(), Some((2.0, 3.0)));
        // eight digits of sqrt 2 are outside the starting tolerance of 1e-10
        let cf = ContinuedFraction::new(1.41421356, 20);
        assert!(!cf.is_quadratic());
        assert!(cf.polynomial_coefficients().is_empty());
    }

    #[test]
    fn test_quadratic_irrational() {
        let cf = ContinuedFraction::new(SQRT_2, 20);
        assert!(cf.is_quadratic());
        assert!(!cf.is_rational());
        assert_eq!(cf.polynomial_coefficients(), vec![1.0, 0.0, -2.0]);
    }

    #[test]
    fn test_pi_is_not_rational() {
        let cf = ContinuedFraction::new(PI, 20);
        assert!(!cf.is_rational());
        assert!(cf.rational_parts().is_none());
    }
}
