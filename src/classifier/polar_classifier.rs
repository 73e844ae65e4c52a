use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::classifier::data_model::{PolarModelBuilder, best_signature, prune_model};
use crate::classifier::quadratic_classifier::QuadraticType;
use crate::math::points::MultiPointXY;
use crate::solved::polar::{
    solved_polar_conic, solved_polar_lemniscate, solved_polar_line, solved_polar_rose,
    solved_polar_trochoid,
};
use crate::solved::solved_graph::{SolveError, SolvedGraph};
use log::debug;
use std::fmt;
use strum_macros::Display;

pub const WORST_FIT: f64 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PolarIdentity {
    Unknown,
    Conic,
    Line,
    Rose,
    Trochoid,
    Lemniscate,
    Enchilada,
}

impl PolarIdentity {
    /// model signatures over the polar generators
    fn signatures(&self) -> Vec<Vec<usize>> {
        match self {
            PolarIdentity::Enchilada => vec![(0..12).collect()],
            PolarIdentity::Trochoid => vec![
                vec![0, 1, 4, 5],
                vec![0, 1, 6, 7],
                vec![0, 1, 8, 9],
                vec![0, 1, 10, 11],
            ],
            PolarIdentity::Conic => vec![vec![0, 2, 4, 5], vec![0, 1]],
            PolarIdentity::Rose => vec![
                vec![1, 4, 5],
                vec![1, 6, 7],
                vec![1, 8, 9],
                vec![1, 10, 11],
            ],
            PolarIdentity::Line => vec![vec![2, 4, 5]],
            PolarIdentity::Lemniscate => vec![vec![3, 6, 7]],
            PolarIdentity::Unknown => Vec::new(),
        }
    }

    fn model_name(&self) -> &'static str {
        match self {
            PolarIdentity::Enchilada => "enchilada",
            PolarIdentity::Trochoid => "trochoid",
            PolarIdentity::Conic => "conic",
            PolarIdentity::Rose => "rose",
            PolarIdentity::Line => "line",
            PolarIdentity::Lemniscate => "lemniscate",
            PolarIdentity::Unknown => "unknown",
        }
    }
}

pub fn amplitude(a: f64, b: f64) -> f64 {
    a.hypot(b)
}

pub fn phase_in_rads(a: f64, b: f64) -> f64 {
    b.atan2(a)
}

pub fn phase_in_deg(a: f64, b: f64) -> f64 {
    phase_in_rads(a, b).to_degrees()
}

/// One family of polar curves fitted to `(theta, r)` samples. `model_vector` holds the
/// coefficients of the generators in the winning signature, in signature order.
#[derive(Debug, Clone)]
pub struct PolarModel {
    pub identity: PolarIdentity,
    pub fit: f64,
    pub model_vector: Vec<f64>,
    pub signature: Vec<usize>,
    pub which_signature: usize,
    pub degree: usize,
    pub complexity: f64,
    /// eccentricity of a conic model
    pub eccentricity: f64,
    pub conic_identity: QuadraticType,
}

impl PolarModel {
    pub fn new(builder: &PolarModelBuilder, identity: PolarIdentity) -> Self {
        let signatures = identity.signatures();
        let (m, which) = best_signature(builder, &signatures);
        let signature = signatures.get(which).cloned().unwrap_or_default();
        let mut model_vector = m.model;
        prune_model(&mut model_vector);
        let n = signatures.len().max(1) as f64;
        let degree = signature.len();
        let mut model = PolarModel {
            identity,
            fit: m.fit,
            model_vector,
            signature,
            which_signature: which,
            degree,
            complexity: degree as f64 + (n - 1.0) / n,
            eccentricity: 0.0,
            conic_identity: QuadraticType::Unknown,
        };
        if identity == PolarIdentity::Conic {
            model.classify_conic();
        }
        model
    }

    fn classify_conic(&mut self) {
        if self.which_signature != 0 || self.model_vector.len() != 4 {
            self.conic_identity = QuadraticType::Ellipse;
            return;
        }
        let mv = &mut self.model_vector;
        let e = amplitude(mv[2], mv[3]) / mv[0].abs();
        self.eccentricity = e;
        self.conic_identity = if (e - 1.0).abs() < 1.0e-6 {
            mv[0] /= e;
            self.eccentricity = 1.0;
            QuadraticType::Parabola
        } else if e < 1.0 {
            QuadraticType::Ellipse
        } else {
            QuadraticType::Hyperbola
        };
    }

    pub fn name(&self) -> &'static str {
        self.identity.model_name()
    }

    /// Coefficients `[A, B, C, D, E, F]` of the Cartesian `Ax^2 + Bxy + Cy^2 + Dx + Ey + F = 0`
    /// traced by a conic model.
    pub fn cartesian_conic(&self) -> Option<[f64; 6]> {
        if self.identity != PolarIdentity::Conic {
            return None;
        }
        let mv = &self.model_vector;
        match (self.which_signature, mv.len()) {
            // mv0 r + mv1 + mv2 x + mv3 y = 0
            (0, 4) => {
                let m0 = mv[0] * mv[0];
                Some([
                    m0 - mv[2] * mv[2],
                    -2.0 * mv[2] * mv[3],
                    m0 - mv[3] * mv[3],
                    -2.0 * mv[1] * mv[2],
                    -2.0 * mv[1] * mv[3],
                    -mv[1] * mv[1],
                ])
            }
            // mv0 + mv1 r = 0
            (1, 2) => {
                let m1 = mv[1] * mv[1];
                Some([m1, 0.0, m1, 0.0, 0.0, -mv[0] * mv[0]])
            }
            _ => None,
        }
    }

    /// Cartesian equation text of a conic model
    pub fn cartesian_equation(&self) -> Option<String> {
        let [a, b, c, d, e, f] = self.cartesian_conic()?;
        Some(format!(
            "({})*x^2 + ({})*x*y + ({})*y^2 + ({})*x + ({})*y + ({}) = 0",
            a, b, c, d, e, f
        ))
    }
}

impl fmt::Display for PolarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fits every polar model family to `(theta, r)` samples and keeps the simplest one among
/// those fitting within the worst acceptable fit.
#[derive(Debug, Clone)]
pub struct PolarClassifier {
    best_guess: Option<PolarModel>,
}

impl PolarClassifier {
    pub fn new(polar_points: &[MultiPointXY]) -> Self {
        PolarClassifier::with_worst_fit(polar_points, WORST_FIT)
    }

    pub fn with_worst_fit(polar_points: &[MultiPointXY], worst_fit: f64) -> Self {
        let mut pmb = PolarModelBuilder::new();
        for p in polar_points {
            pmb.add_multi_point(p);
        }
        let mut ranked: Vec<PolarModel> = [
            PolarIdentity::Enchilada,
            PolarIdentity::Trochoid,
            PolarIdentity::Conic,
            PolarIdentity::Rose,
            PolarIdentity::Line,
            PolarIdentity::Lemniscate,
        ]
        .into_iter()
        .map(|id| PolarModel::new(&pmb, id))
        .collect();
        ranked.sort_by(|a, b| a.fit.total_cmp(&b.fit));
        let mut best_guess: Option<PolarModel> = None;
        for m in ranked.into_iter().take_while(|m| m.fit <= worst_fit) {
            match &best_guess {
                Some(b) if m.complexity >= b.complexity => {}
                _ => best_guess = Some(m),
            }
        }
        if let Some(b) = &best_guess {
            debug!("best polar model is a {} with fit {:.2}", b.name(), b.fit);
        }
        PolarClassifier { best_guess }
    }

    pub fn best_guess(&self) -> Option<&PolarModel> {
        self.best_guess.as_ref()
    }

    pub fn features(&self, ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
        let model = self
            .best_guess
            .as_ref()
            .ok_or_else(|| SolveError::NoModel("polar".to_string()))?;
        match model.identity {
            PolarIdentity::Line => solved_polar_line(ae, model),
            PolarIdentity::Conic => solved_polar_conic(ae, model),
            PolarIdentity::Rose => solved_polar_rose(ae, model),
            PolarIdentity::Lemniscate => solved_polar_lemniscate(ae, model),
            PolarIdentity::Trochoid => solved_polar_trochoid(ae, model),
            PolarIdentity::Enchilada | PolarIdentity::Unknown => {
                Err(SolveError::WrongFamily(format!("polar {}", model.name())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn polar_samples(f: impl Fn(f64) -> f64) -> Vec<MultiPointXY> {
        (0..600)
            .map(|i| {
                let t = 2.0 * PI * i as f64 / 599.0;
                MultiPointXY::single(t, f(t))
            })
            .collect()
    }

    #[test]
    fn test_circle_is_a_conic() {
        let pc = PolarClassifier::new(&polar_samples(|_| 2.0));
        let m = pc.best_guess().unwrap();
        assert_eq!(m.identity, PolarIdentity::Conic);
        assert_eq!(m.conic_identity, QuadraticType::Ellipse);
        let [a, _, c, _, _, f] = m.cartesian_conic().unwrap();
        assert_relative_eq!(f / a, -4.0, epsilon = 1e-9);
        assert_relative_eq!(c, a);
    }

    #[test]
    fn test_three_petal_rose() {
        let pc = PolarClassifier::new(&polar_samples(|t| 2.0 * (3.0 * t).cos()));
        let m = pc.best_guess().unwrap();
        assert_eq!(m.identity, PolarIdentity::Rose);
        assert_eq!(m.which_signature, 2);
        assert_relative_eq!(-m.model_vector[1] / m.model_vector[0], 2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_cardioid_is_a_trochoid() {
        let pc = PolarClassifier::new(&polar_samples(|t| 1.0 + t.cos()));
        let m = pc.best_guess().unwrap();
        assert_eq!(m.identity, PolarIdentity::Trochoid);
        assert_eq!(m.which_signature, 0);
    }

    #[test]
    fn test_parabola_eccentricity() {
        // r = 1 / (1 - cos(theta)) has eccentricity 1
        let pc = PolarClassifier::new(&polar_samples(|t| 1.0 / (1.0 - t.cos())));
        let m = pc.best_guess().unwrap();
        assert_eq!(m.identity, PolarIdentity::Conic);
        assert_eq!(m.conic_identity, QuadraticType::Parabola);
        assert_eq!(m.eccentricity, 1.0);
    }
}
