use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::classifier::data_model::{
    ModelBuilder, PolynomialModelBuilder, best_signature, prune_model,
};
use crate::math::math_util::make_integer;
use crate::math::points::MultiPointXY;
use crate::solved::equation_data::solved_equation_data;
use crate::solved::rational_function::{solved_cubic_polynomial, solved_rational_function};
use crate::solved::solved_graph::{SolveError, SolvedGraph};
use crate::solved::transcendental::{solved_absolute_value, solved_square_root};
use crate::symbolic::expression::Expression;
use crate::symbolic::polynomial::Polynomial;
use log::debug;
use std::fmt;

const SIZE: usize = 8;
const DEGREE: usize = SIZE - 1;
pub const WORST_FIT: f64 = -12.0;

/// Fit shared by every polynomial model: the winning signature, its model vector and the
/// complexity used to rank finalists.
#[derive(Debug, Clone)]
struct FittedSignature {
    fit: f64,
    model_vector: Vec<f64>,
    signature: Vec<usize>,
    complexity: f64,
}

impl FittedSignature {
    fn evaluate(builder: &impl ModelBuilder, signatures: &[Vec<usize>]) -> Self {
        let (m, which) = best_signature(builder, signatures);
        let signature = signatures.get(which).cloned().unwrap_or_default();
        let mut model_vector = m.model;
        let complexity = if m.fit < f64::INFINITY {
            let n = model_vector.len() as f64;
            let pruned = prune_model(&mut model_vector) as f64;
            signature.len() as f64 - pruned / n
        } else {
            f64::INFINITY
        };
        FittedSignature {
            fit: m.fit,
            model_vector,
            signature,
            complexity,
        }
    }
}

/// `Ax^2 + Bxy + Cy^2 + Dx + Ey + F = 0` fitted to the samples.
#[derive(Debug, Clone)]
pub struct QuadraticModel {
    fitted: FittedSignature,
}

impl QuadraticModel {
    pub fn new(builder: &PolynomialModelBuilder) -> Self {
        let (dx, dy) = (builder.x_degree(), builder.y_degree());
        let mut signature = Vec::new();
        let mut k = 0;
        for i in 0..=dy {
            for j in 0..=dx {
                if i + j <= 2 {
                    signature.push(k);
                }
                k += 1;
            }
        }
        let mut fitted = FittedSignature::evaluate(builder, &[signature]);
        fitted.complexity = 0.0;
        QuadraticModel { fitted }
    }

    pub fn fit(&self) -> f64 {
        self.fitted.fit
    }

    /// model coefficients of `1, x, x^2, y, xy, y^2`
    pub fn model_vector(&self) -> &[f64] {
        &self.fitted.model_vector
    }

    pub fn polynomial(&self) -> Polynomial {
        if self.fitted.model_vector.len() != 6 {
            return Polynomial::default();
        }
        let mv = make_integer(&self.fitted.model_vector, 100);
        let generators = ["1", "x", "x^2", "y", "x*y", "y^2"];
        let mut p = Polynomial::default();
        for (c, g) in mv.iter().zip(generators) {
            if *c != 0.0 {
                let term = Expression::from_value(*c).product(&Expression::new(g));
                p = p.sum(&Polynomial::new(&term));
            }
        }
        p
    }
}

impl fmt::Display for QuadraticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.polynomial())
    }
}

/// `y = N(x) / D(x)` fitted to the samples.
#[derive(Debug, Clone)]
pub struct RationalModel {
    fitted: FittedSignature,
    numerator_degree: usize,
    denominator_degree: usize,
}

impl RationalModel {
    pub fn new(builder: &PolynomialModelBuilder, numerator_degree: usize, denominator_degree: usize) -> Self {
        let dx = builder.x_degree();
        let n = numerator_degree.min(dx);
        let d = denominator_degree.min(dx);
        let mut signature: Vec<usize> = (0..=n).collect();
        signature.extend((0..=d).map(|i| i + dx + 1));
        RationalModel {
            fitted: FittedSignature::evaluate(builder, &[signature]),
            numerator_degree: n,
            denominator_degree: d,
        }
    }

    pub fn fit(&self) -> f64 {
        self.fitted.fit
    }

    pub fn numerator_degree(&self) -> usize {
        self.numerator_degree
    }

    pub fn denominator_degree(&self) -> usize {
        self.denominator_degree
    }

    /// numerator coefficients, highest power first
    pub fn numerator_coefficients(&self) -> Vec<f64> {
        let mv = &self.fitted.model_vector;
        let n = self.numerator_degree;
        if mv.len() < n + 1 {
            return Vec::new();
        }
        let c: Vec<f64> = (0..=n).map(|i| -mv[n - i]).collect();
        make_integer(&c, 100)
    }

    /// denominator coefficients, highest power first
    pub fn denominator_coefficients(&self) -> Vec<f64> {
        let mv = &self.fitted.model_vector;
        let (n, d) = (self.numerator_degree, self.denominator_degree);
        if mv.len() < n + d + 2 {
            return Vec::new();
        }
        let mut c = vec![0.0; d + 1];
        for i in 0..=d {
            c[d - i] = mv[1 + i + n];
        }
        make_integer(&c, 100)
    }

    pub fn numerator(&self) -> Polynomial {
        Polynomial::doubles_to_poly(&self.numerator_coefficients(), "x")
    }

    pub fn denominator(&self) -> Polynomial {
        Polynomial::doubles_to_poly(&self.denominator_coefficients(), "x")
    }
}

impl fmt::Display for RationalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Numerator = {}\nDenominator = {}",
            self.numerator(),
            self.denominator()
        )
    }
}

#[derive(Debug, Clone)]
pub enum PolynomialModel {
    Quadratic(QuadraticModel),
    Rational(RationalModel),
}

impl PolynomialModel {
    fn fitted(&self) -> &FittedSignature {
        match self {
            PolynomialModel::Quadratic(q) => &q.fitted,
            PolynomialModel::Rational(r) => &r.fitted,
        }
    }

    pub fn fit(&self) -> f64 {
        self.fitted().fit
    }

    pub fn complexity(&self) -> f64 {
        self.fitted().complexity
    }

    pub fn signature(&self) -> &[usize] {
        &self.fitted().signature
    }
}

impl fmt::Display for PolynomialModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolynomialModel::Quadratic(q) => write!(f, "{}", q),
            PolynomialModel::Rational(r) => write!(f, "{}", r),
        }
    }
}

/// Picks the simplest quadratic or rational model that fits the samples within the worst
/// acceptable fit.
#[derive(Debug, Clone)]
pub struct PolynomialClassifier {
    best_guess: Option<PolynomialModel>,
}

impl PolynomialClassifier {
    pub fn new(points: &[MultiPointXY]) -> Self {
        PolynomialClassifier::with_worst_fit(points, WORST_FIT)
    }

    pub fn with_worst_fit(points: &[MultiPointXY], worst_fit: f64) -> Self {
        let mut q_builder = PolynomialModelBuilder::new(2, 2);
        let mut r_builder = PolynomialModelBuilder::new(DEGREE, 1);
        for p in points {
            q_builder.add_multi_point(p);
            r_builder.add_multi_point(p);
        }
        let mut ranked = Vec::with_capacity(1 + SIZE * SIZE);
        ranked.push(PolynomialModel::Quadratic(QuadraticModel::new(&q_builder)));
        for i in 0..SIZE * SIZE {
            ranked.push(PolynomialModel::Rational(RationalModel::new(
                &r_builder,
                i / SIZE,
                i % SIZE,
            )));
        }
        ranked.sort_by(|a, b| a.fit().total_cmp(&b.fit()));
        let mut best_guess: Option<PolynomialModel> = None;
        for m in ranked.into_iter().take_while(|m| m.fit() <= worst_fit) {
            match &best_guess {
                Some(b) if m.complexity() >= b.complexity() => {}
                _ => best_guess = Some(m),
            }
        }
        if let Some(b) = &best_guess {
            debug!(
                "best polynomial model has fit {:.2} and complexity {:.2}",
                b.fit(),
                b.complexity()
            );
        }
        PolynomialClassifier { best_guess }
    }

    pub fn best_guess(&self) -> Option<&PolynomialModel> {
        self.best_guess.as_ref()
    }

    pub fn features(&self, ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
        if !ae.is_solvable_function() {
            return SolvedGraph::xy_graph(ae, None);
        }
        if !ae.is_polynomial() {
            let input = ae.input_equation();
            if input.contains("abs(") {
                solved_absolute_value(ae)
            } else if input.contains("sqrt(") {
                solved_square_root(ae)
            } else {
                solved_equation_data(ae, self.best_guess())
            }
        } else if ae.degree() == 3 {
            solved_cubic_polynomial(ae)
        } else {
            solved_rational_function(ae)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(f: impl Fn(f64) -> f64) -> Vec<MultiPointXY> {
        (0..600)
            .map(|i| {
                let x = -10.0 + 20.0 * i as f64 / 599.0;
                MultiPointXY::single(x, f(x))
            })
            .collect()
    }

    #[test]
    fn test_parabola_samples_give_a_quadratic() {
        let pc = PolynomialClassifier::new(&samples(|x| x * x - 4.0));
        let Some(PolynomialModel::Quadratic(q)) = pc.best_guess() else {
            panic!("expected a quadratic model");
        };
        assert!(q.fit() <= WORST_FIT);
        let mv = make_integer(q.model_vector(), 100);
        // -4 + x^2 - y, up to sign
        assert_relative_eq!(mv[0] / mv[2], -4.0, epsilon = 1e-6);
        assert_relative_eq!(mv[3] / mv[2], -1.0, epsilon = 1e-6);
        assert_relative_eq!(mv[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_unevenly_spaced_parabola_samples() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(17);
        let mut xs: Vec<f64> = (0..300).map(|_| rng.random_range(-10.0..10.0)).collect();
        xs.sort_by(f64::total_cmp);
        let points: Vec<MultiPointXY> = xs
            .iter()
            .map(|&x| MultiPointXY::single(x, 2.0 * x * x + x - 3.0))
            .collect();
        let pc = PolynomialClassifier::new(&points);
        let Some(PolynomialModel::Quadratic(q)) = pc.best_guess() else {
            panic!("expected a quadratic model");
        };
        // -3 + x + 2x^2 - y
        let mv = q.model_vector();
        assert_relative_eq!(mv[0] / mv[2], -1.5, epsilon = 1e-6);
        assert_relative_eq!(mv[1] / mv[2], 0.5, epsilon = 1e-6);
        assert_relative_eq!(mv[3] / mv[2], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_reciprocal_samples_give_a_rational_or_quadratic() {
        // y = 1/(x^2+1) is no conic
        let pc = PolynomialClassifier::new(&samples(|x| 1.0 / (x * x + 1.0)));
        match pc.best_guess() {
            Some(PolynomialModel::Rational(r)) => {
                assert_eq!(r.numerator_degree(), 0);
                assert_eq!(r.denominator_degree(), 2);
                let n = r.numerator_coefficients();
                let d = r.denominator_coefficients();
                assert_relative_eq!(d[0] / n[0], 1.0, epsilon = 1e-6);
                assert_relative_eq!(d[2] / n[0], 1.0, epsilon = 1e-6);
            }
            other => panic!("unexpected model {:?}", other.map(|m| m.to_string())),
        }
    }

    #[test]
    fn test_noise_has_no_model() {
        let pc = PolynomialClassifier::new(&samples(|x| (3.0 * x).sin() + (7.1 * x).cos()));
        assert!(pc.best_guess().is_none());
    }

    #[test]
    fn test_rational_model_signature() {
        let b = PolynomialModelBuilder::new(7, 1);
        let r = RationalModel::new(&b, 2, 1);
        let m = PolynomialModel::Rational(r);
        assert_eq!(m.signature(), &[0, 1, 2, 8, 9]);
        assert_eq!(m.fit(), f64::INFINITY);
        assert_eq!(m.complexity(), f64::INFINITY);
    }
}
