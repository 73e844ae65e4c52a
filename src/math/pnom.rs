use crate::math::math_util::DOUBLE_MIN;
use crate::math::roots::{RootFactor, real_roots_with_multiplicities};
use crate::symbolic::polynomial::Polynomial;
use std::fmt;

/// Polynomial in one variable stored as highest-first coefficients. Leading coefficients
/// that are negligible relative to the whole vector are trimmed; the empty polynomial
/// has degree -1.
#[derive(Clone, Debug, PartialEq)]
pub struct PNom {
    degree: i32,
    coefficients: Vec<f64>,
    epsilon: f64,
}

impl Default for PNom {
    fn default() -> Self {
        PNom {
            degree: -1,
            coefficients: Vec::new(),
            epsilon: 0.0,
        }
    }
}

impl PNom {
    pub fn new(c: &[f64]) -> Self {
        let n = c.len();
        let sum: f64 = c.iter().map(|v| v.abs()).sum();
        let epsilon = 1.0e-8 * sum / (n as f64 + 1.0) + DOUBLE_MIN;
        let first = c.iter().position(|v| v.abs() > epsilon).unwrap_or(n);
        let coefficients = c[first..].to_vec();
        PNom {
            degree: coefficients.len() as i32 - 1,
            coefficients,
            epsilon,
        }
    }

    pub fn constant(s: f64) -> Self {
        PNom::new(&[s])
    }

    /// coefficients of `p` seen as a polynomial in `var`, evaluated to doubles
    pub fn from_polynomial(p: &Polynomial, var: &str) -> Self {
        let ec = p.coefficients_as_expressions(var);
        PNom::new(&Polynomial::evaluate_coefficients(&ec))
    }

    pub fn is_trivial(&self) -> bool {
        self.degree < 0
    }

    pub fn is_constant(&self) -> bool {
        self.degree < 1
    }

    pub fn degree(&self) -> i32 {
        self.degree
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn to_polynomial(&self) -> Polynomial {
        Polynomial::doubles_to_poly(&self.coefficients, "x")
    }

    pub fn sum(&self, other: &PNom) -> PNom {
        let d = self.coefficients.len().max(other.coefficients.len());
        let mut c = vec![0.0; d];
        for (i, v) in other.coefficients.iter().rev().enumerate() {
            c[d - 1 - i] = *v;
        }
        for (i, v) in self.coefficients.iter().rev().enumerate() {
            c[d - 1 - i] += *v;
        }
        PNom::new(&c)
    }

    pub fn product(&self, other: &PNom) -> PNom {
        if self.is_trivial() || other.is_trivial() {
            return PNom::default();
        }
        let mut c = vec![0.0; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                c[i + j] += a * b;
            }
        }
        PNom::new(&c)
    }

    pub fn negative(&self) -> PNom {
        let c: Vec<f64> = self.coefficients.iter().map(|v| -v).collect();
        PNom::new(&c)
    }

    pub fn difference(&self, other: &PNom) -> PNom {
        self.sum(&other.negative())
    }

    /// (quotient, remainder); None for division by the empty polynomial
    pub fn quotient(&self, other: &PNom) -> Option<(PNom, PNom)> {
        if other.is_trivial() {
            return None;
        }
        if self.degree < other.degree {
            return Some((PNom::default(), PNom::new(&self.coefficients)));
        }
        let degree = self.degree as usize;
        let new_d = (self.degree - other.degree) as usize;
        let mut qr = self.coefficients.clone();
        for i in 0..=new_d {
            qr[i] /= other.coefficients[0];
            for j in 1..other.coefficients.len() {
                qr[i + j] -= qr[i] * other.coefficients[j];
            }
        }
        let qp = PNom::new(&qr[..=new_d]);
        let rest = &qr[new_d + 1..=degree];
        let remainder = match rest.iter().position(|v| v.abs() > qp.epsilon) {
            Some(k) => PNom::new(&rest[k..]),
            None => PNom::default(),
        };
        Some((qp, remainder))
    }

    pub fn derivative(&self) -> PNom {
        if self.degree < 1 {
            return PNom::default();
        }
        let d = self.degree as usize;
        let c: Vec<f64> = (0..d)
            .map(|i| (d - i) as f64 * self.coefficients[i])
            .collect();
        PNom::new(&c)
    }

    /// value at x; at +-infinity the sign follows the leading coefficient and the degree parity
    pub fn eval(&self, x: f64) -> f64 {
        if self.is_trivial() {
            return 0.0;
        }
        if self.is_constant() {
            return self.coefficients[0];
        }
        let lead = self.coefficients[0];
        if x.is_infinite() {
            let positive = if self.degree % 2 == 0 || x > 0.0 {
                lead > 0.0
            } else {
                lead < 0.0
            };
            return if positive {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        match self.quotient(&PNom::new(&[1.0, -x])) {
            Some((_, r)) if !r.is_trivial() => r.coefficients[0],
            _ => 0.0,
        }
    }

    pub fn real_roots(&self) -> Vec<RootFactor> {
        real_roots_with_multiplicities(&self.coefficients)
    }

    /// Real zeros with the sign of the polynomial just left and just right of each one.
    /// None for the empty polynomial.
    pub fn real_zeros(&self) -> Option<Vec<RealZero>> {
        if self.is_trivial() {
            return None;
        }
        if self.is_constant() {
            return Some(Vec::new());
        }
        let rf = self.real_roots();
        let Some(first) = rf.first() else {
            return Some(Vec::new());
        };
        let mut previous_sign = if self.eval(first.value - 1.0) > 0.0 { 2 } else { 0 };
        let zeros = rf
            .iter()
            .map(|f| {
                let next_sign = if f.multiplicity % 2 == 0 {
                    previous_sign >> 1
                } else {
                    1 - (previous_sign >> 1)
                };
                let z = RealZero::with_signature(f.value, previous_sign | next_sign);
                previous_sign = next_sign << 1;
                z
            })
            .collect();
        Some(zeros)
    }

    fn private_gcd(big: &PNom, little: &PNom) -> PNom {
        match big.quotient(little) {
            Some((_, r)) if !r.is_trivial() => PNom::private_gcd(little, &r),
            _ => little.clone(),
        }
    }

    pub fn gcd(p: &PNom, q: &PNom) -> PNom {
        if p.is_trivial() {
            return q.clone();
        }
        if q.is_trivial() {
            return p.clone();
        }
        if p.degree <= q.degree {
            PNom::private_gcd(q, p)
        } else {
            PNom::private_gcd(p, q)
        }
    }
}

impl fmt::Display for PNom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_polynomial())
    }
}

/// End-point sign signatures of a zero: sign just left (bit 1) and just right (bit 0).
pub const MINUS_MINUS: u8 = 0;
pub const MINUS_PLUS: u8 = 1;
pub const PLUS_MINUS: u8 = 2;
pub const PLUS_PLUS: u8 = 3;
pub const UNDEFINED: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealZero {
    pub x: f64,
    pub signature: u8,
}

impl RealZero {
    pub fn new(x: f64) -> Self {
        RealZero {
            x,
            signature: UNDEFINED,
        }
    }

    pub fn with_signature(x: f64, signature: u8) -> Self {
        RealZero { x, signature }
    }

    /// signature of the product of this zero's polynomial with `factor`
    pub fn signature_of(&self, factor: &PNom) -> u8 {
        let v = factor.eval(self.x);
        if v == 0.0 {
            UNDEFINED
        } else if v < 0.0 {
            (3 - self.signature) & 3
        } else {
            self.signature
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_leading_zeros_are_trimmed() {
        let p = PNom::new(&[0.0, 0.0, 1.0, 2.0]);
        assert_eq!(p.degree(), 1);
        assert_eq!(p.coefficients(), &[1.0, 2.0]);
        assert!(PNom::new(&[0.0]).is_trivial());
    }

    #[test]
    fn test_arithmetic() {
        let p = PNom::new(&[1.0, 2.0, 3.0]);
        let q = PNom::new(&[1.0, -1.0]);
        assert_eq!(p.sum(&q).coefficients(), &[1.0, 3.0, 2.0]);
        assert_eq!(p.product(&q).coefficients(), &[1.0, 1.0, 1.0, -3.0]);
        assert_eq!(p.difference(&p).degree(), -1);
        let (quot, rem) = p.product(&q).quotient(&q).unwrap();
        assert_eq!(quot.coefficients(), &[1.0, 2.0, 3.0]);
        assert!(rem.is_trivial());
        assert!(p.quotient(&PNom::default()).is_none());
        assert_eq!(p.derivative().coefficients(), &[2.0, 2.0]);
    }

    #[test]
    fn test_evaluation_including_infinity() {
        let p = PNom::new(&[-1.0, 0.0, 4.0, 0.0]);
        assert_relative_eq!(p.eval(2.0), 0.0);
        assert_relative_eq!(p.eval(1.0), 3.0);
        assert_eq!(p.eval(f64::INFINITY), f64::NEG_INFINITY);
        assert_eq!(p.eval(f64::NEG_INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_gcd_of_shared_factor() {
        let f = PNom::new(&[1.0, -1.0]);
        let p = f.product(&PNom::new(&[1.0, 2.0]));
        let q = f.product(&PNom::new(&[1.0, 5.0]));
        let g = PNom::gcd(&p, &q);
        assert_eq!(g.degree(), 1);
        assert_relative_eq!(g.eval(1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zeros_carry_sign_signatures() {
        // (x - 1)^2 (x - 3): negative left of 1, negative between, positive after 3
        let p = PNom::new(&[1.0, -5.0, 7.0, -3.0]);
        let z = p.real_zeros().unwrap();
        assert_eq!(z.len(), 2);
        assert_relative_eq!(z[0].x, 1.0, epsilon = 1e-6);
        assert_eq!(z[0].signature, MINUS_MINUS);
        assert_relative_eq!(z[1].x, 3.0, epsilon = 1e-9);
        assert_eq!(z[1].signature, MINUS_PLUS);
        assert_eq!(z[1].signature_of(&PNom::constant(-1.0)), PLUS_MINUS);
    }
}
