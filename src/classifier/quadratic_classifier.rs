use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::math::math_util::{is_within_tolerance, make_integer, trim_double};
use crate::math::points::PointXY;
use crate::solved::conics::{
    solved_ellipse, solved_hyperbola, solved_line, solved_parabola, solved_two_intersecting_lines,
    solved_two_lines,
};
use crate::solved::solved_graph::{SolveError, SolvedGraph};
use crate::symbolic::polynomial::Polynomial;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum QuadraticType {
    Unknown,
    NullSet,
    SinglePoint,
    TwoPoints,
    AllPoints,
    VerticalLine,
    HorizontalLine,
    TwoVerticalLines,
    TwoHorizontalLines,
    SlopingLine,
    Parabola,
    Cross,
    Hyperbola,
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClassificationFailureReason {
    NoReason,
    DegreeGreaterThan2,
    TooManyVariables,
    NonPolynomial,
    Polar,
}

/// Identity of the normalized quadratic `a*u^2 + b*v^2 + c*u + d*v + e = 0`. A coefficient
/// counts as present when it is not within tolerance of zero relative to `norm`.
pub fn compute_identity(a: f64, b: f64, c: f64, d: f64, e: f64, norm: f64) -> QuadraticType {
    let has = |v: f64| !is_within_tolerance(v, norm);
    let (has_a, has_b, has_c, has_d, has_e) = (has(a), has(b), has(c), has(d), has(e));
    // order matters
    if !(has_a || has_b || has_c || has_d) {
        if has_e {
            QuadraticType::NullSet
        } else {
            QuadraticType::AllPoints
        }
    } else if !(has_a || has_b) {
        if !has_c {
            QuadraticType::HorizontalLine
        } else if !has_d {
            QuadraticType::VerticalLine
        } else {
            QuadraticType::SlopingLine
        }
    } else if !(has_b || has_d) {
        match line_pair(a, c, e, norm) {
            LinePair::One => QuadraticType::VerticalLine,
            LinePair::Two => QuadraticType::TwoVerticalLines,
            LinePair::None => QuadraticType::NullSet,
        }
    } else if !(has_a || has_c) {
        match line_pair(b, d, e, norm) {
            LinePair::One => QuadraticType::HorizontalLine,
            LinePair::Two => QuadraticType::TwoHorizontalLines,
            LinePair::None => QuadraticType::NullSet,
        }
    } else if !has_a || !has_b {
        QuadraticType::Parabola
    } else if a * b < 0.0 {
        if has_e {
            QuadraticType::Hyperbola
        } else {
            QuadraticType::Cross
        }
    } else if !has_e {
        QuadraticType::SinglePoint
    } else if a * e > 0.0 {
        QuadraticType::NullSet
    } else {
        QuadraticType::Ellipse
    }
}

enum LinePair {
    None,
    One,
    Two,
}

/// real roots of `square*t^2 + linear*t + constant`
fn line_pair(square: f64, linear: f64, constant: f64, norm: f64) -> LinePair {
    let discriminant = linear * linear - 4.0 * square * constant;
    if is_within_tolerance(discriminant, norm * norm) {
        LinePair::One
    } else if discriminant > 0.0 {
        LinePair::Two
    } else {
        LinePair::None
    }
}

/// `c` signed for use after a previous term; a leading positive coefficient gets no sign
pub fn make_coefficient(c: f64, leading: bool) -> String {
    let xs = trim_double(c.abs(), 6);
    if c > 0.0 {
        if leading { xs } else { format!("+{}", xs) }
    } else {
        format!("-{}", xs)
    }
}

fn pretty_print_linear_equation(coeffs: &[f64], vars: &[String; 2], t: f64) -> String {
    let mut r = String::new();
    let mut leading = true;
    for (c, v) in coeffs.iter().zip(vars.iter()) {
        if !is_within_tolerance(*c, t) {
            r.push_str(&format!("{}*{}", make_coefficient(*c, leading), v));
            leading = false;
        }
    }
    if !is_within_tolerance(coeffs[2], t) {
        r.push_str(&make_coefficient(coeffs[2], leading));
    }
    r.push_str(" = 0");
    r
}

/// Equation of the line through `p` inclined at `inc` degrees, e.g. `2*x-1*y+1 = 0`.
pub fn equation_of_a_line(p: PointXY, inc: f64, vars: &[String; 2]) -> String {
    if is_within_tolerance(inc.abs() - 90.0, 1.0e-8) {
        return equation_of_a_vertical_line(p.x, vars);
    }
    let m = (inc.to_radians()).tan();
    let coeffs = [m, -1.0, p.y - m * p.x];
    let t = (0.33 * coeffs.iter().map(|c| c * c).sum::<f64>()).sqrt();
    pretty_print_linear_equation(&make_integer(&coeffs, 100), vars, t)
}

pub fn equation_of_a_vertical_line(x: f64, vars: &[String; 2]) -> String {
    let coeffs = [1.0, 0.0, -x];
    let t = (0.5 * (1.0 + x * x)).sqrt();
    pretty_print_linear_equation(&make_integer(&coeffs, 100), vars, t)
}

/// Reduces a polynomial of degree at most two to the normal form of its conic by a rotation
/// that removes the cross term, completing the squares and scaling the constant to `-1`.
#[derive(Debug, Clone)]
pub struct QuadraticClassifier {
    lhs: Polynomial,
    identity: QuadraticType,
    reason: ClassificationFailureReason,
    degree: i32,
    /// A x^2 + B xy + C y^2 + D x + E y + F
    original: [f64; 6],
    norm: f64,
    alpha: f64,
    new_axes: [[f64; 2]; 2],
    /// a' u^2 + b' v^2 + c' u + d' v + e'
    primes: [f64; 5],
    u0: f64,
    v0: f64,
    actual_variables: Vec<String>,
    trans_vars: [String; 2],
}

impl QuadraticClassifier {
    pub fn new(lhs: &Polynomial) -> Self {
        let mut qc = QuadraticClassifier {
            lhs: lhs.clone(),
            identity: QuadraticType::Unknown,
            reason: ClassificationFailureReason::NoReason,
            degree: lhs.get_degree(),
            original: [0.0; 6],
            norm: 0.0,
            alpha: 0.0,
            new_axes: [[1.0, 0.0], [0.0, 1.0]],
            primes: [0.0; 5],
            u0: 0.0,
            v0: 0.0,
            actual_variables: vec!["x".to_string(), "y".to_string()],
            trans_vars: ["x".to_string(), "y".to_string()],
        };
        qc.classify();
        debug!("{} = 0 is {} ({})", qc.lhs, qc.identity, qc.reason);
        qc
    }

    fn classify(&mut self) {
        let temp = self.lhs.to_expression().var_strings;
        if self.degree > 2 {
            self.reason = ClassificationFailureReason::DegreeGreaterThan2;
        }
        if temp.len() > 2 {
            self.actual_variables = temp;
            self.reason = ClassificationFailureReason::TooManyVariables;
            return;
        }
        if !self.lhs.has_constant_coefficients() {
            self.reason = ClassificationFailureReason::NonPolynomial;
        }
        let user = self.lhs.variables().to_vec();
        match user.as_slice() {
            [v0, v1] => self.actual_variables = vec![v0.clone(), v1.clone()],
            [v] if v == "r" || v == "theta" => {
                self.actual_variables = vec!["r".to_string(), "theta".to_string()];
            }
            [v] => {
                if *v != self.actual_variables[1] {
                    self.actual_variables[0] = v.clone();
                }
            }
            _ => {}
        }
        if self.actual_variables[0] == "r" && self.actual_variables[1] == "theta" {
            self.reason = ClassificationFailureReason::Polar;
        }
        if self.reason != ClassificationFailureReason::NoReason {
            return;
        }
        let x = self.actual_variables[0].clone();
        let y = self.actual_variables[1].clone();
        self.trans_vars = [x.clone(), y.clone()];
        let empty = HashMap::new();
        let coefficient = |vars: &[String], exps: &[i32]| {
            self.lhs
                .get_coefficient(vars, exps)
                .evaluate(&empty)
                .unwrap_or(f64::NAN)
        };
        self.original = [
            coefficient(&[x.clone()], &[2]),
            coefficient(&[x.clone(), y.clone()], &[1, 1]),
            coefficient(&[y.clone()], &[2]),
            coefficient(&[x.clone()], &[1]),
            coefficient(&[y.clone()], &[1]),
            self.lhs.get_constant().evaluate(&empty).unwrap_or(f64::NAN),
        ];
        self.norm = 0.17 * self.original.iter().map(|c| c * c).sum::<f64>().sqrt();
        if self.flunks_infinity_test() {
            return;
        }
        self.normalize_rotation();
        self.complete_square();
        self.normalize_constant();
        let [a, b, c, d, e] = self.primes;
        self.identity = compute_identity(a, b, c, d, e, self.norm);
    }

    fn is_zero(&self, v: f64) -> bool {
        is_within_tolerance(v, self.norm)
    }

    /// A single infinite coefficient becomes 1 with every other one 0; anything else that
    /// is not finite leaves the quadratic unclassified.
    fn flunks_infinity_test(&mut self) -> bool {
        if self.norm.is_finite() {
            return false;
        }
        if self.original.iter().any(|c| c.is_nan()) {
            return true;
        }
        let infinite: Vec<usize> = (0..6).filter(|i| self.original[*i].is_infinite()).collect();
        if infinite.len() != 1 {
            return true;
        }
        self.original = [0.0; 6];
        self.original[infinite[0]] = 1.0;
        self.norm = 1.0;
        false
    }

    fn normalize_rotation(&mut self) {
        let [a, b, c, d, e, f] = self.original;
        if self.is_zero(b) {
            self.primes = [a, c, d, e, f];
            return;
        }
        let sigma = a + c;
        let delta = a - c;
        let disc = (delta * delta + b * b).sqrt();
        let lambdas = [0.5 * (sigma + disc), 0.5 * (sigma - disc)];
        // eigenvectors (u1, v1) and (u2, v2)
        let (u1, v1) = (0.5 * b, lambdas[0] - a);
        let (u2, v2) = (lambdas[1] - c, 0.5 * b);
        let n1 = 1.0 / (u1 * u1 + v1 * v1).sqrt();
        let n2 = 1.0 / (u2 * u2 + v2 * v2).sqrt();
        let mut xi = [[n1 * u1, n1 * v1], [n2 * u2, n2 * v2]];
        // the new u axis is the eigenvector closest to the x axis, pointing right
        let i_max = if xi[0][0].abs() > xi[1][0].abs() { 0 } else { 1 };
        let unit = xi[i_max][0].signum();
        xi[i_max][0] *= unit;
        xi[i_max][1] *= unit;
        self.new_axes = [
            [xi[i_max][0], xi[i_max][1]],
            [-xi[i_max][1], xi[i_max][0]],
        ];
        let ax = self.new_axes;
        self.primes = [
            lambdas[i_max],
            lambdas[1 - i_max],
            ax[0][0] * d + ax[0][1] * e,
            ax[1][0] * d + ax[1][1] * e,
            f,
        ];
        self.alpha = ax[0][1].atan2(ax[0][0]).to_degrees();
        self.set_transform_variables();
    }

    fn set_transform_variables(&mut self) {
        for t in [["u", "v"], ["r", "s"], ["x", "y"]] {
            let clash = self
                .actual_variables
                .iter()
                .take(2)
                .any(|v| v == t[0] || v == t[1]);
            if !clash {
                self.trans_vars = [t[0].to_string(), t[1].to_string()];
                return;
            }
        }
    }

    fn complete_square(&mut self) {
        let [a, b, c, d, _] = self.primes;
        if !self.is_zero(a) {
            self.u0 = -0.5 * c / a;
            self.primes[4] -= 0.25 * c * c / a;
            self.primes[2] = 0.0;
        }
        if !self.is_zero(b) {
            self.v0 = -0.5 * d / b;
            self.primes[4] -= 0.25 * d * d / b;
            self.primes[3] = 0.0;
        }
    }

    fn normalize_constant(&mut self) {
        if self.is_zero(self.primes[4]) {
            self.primes[4] = 0.0;
            return;
        }
        let factor = -1.0 / self.primes[4];
        for p in self.primes.iter_mut() {
            *p *= factor;
        }
        self.norm = (0.2 * self.primes.iter().map(|p| p * p).sum::<f64>()).sqrt();
        let norm = self.norm;
        for p in self.primes.iter_mut() {
            if is_within_tolerance(*p, norm) {
                *p = 0.0;
            }
        }
    }

    pub fn identity(&self) -> QuadraticType {
        self.identity
    }

    pub fn reason(&self) -> ClassificationFailureReason {
        self.reason
    }

    pub fn lhs(&self) -> &Polynomial {
        &self.lhs
    }

    pub fn actual_variables(&self) -> [String; 2] {
        [
            self.actual_variables[0].clone(),
            self.actual_variables.get(1).cloned().unwrap_or_else(|| "y".to_string()),
        ]
    }

    /// `[A, B, C, D, E, F]` of `Ax^2 + Bxy + Cy^2 + Dx + Ey + F`
    pub fn original_coefficients(&self) -> [f64; 6] {
        self.original
    }

    /// `[a, b, c, d, e]` of `a(u-u0)^2 + b(v-v0)^2 + cu + dv + e`
    pub fn normalized_coefficients(&self) -> [f64; 5] {
        self.primes
    }

    /// unit vectors of the rotated u and v axes in x, y coordinates
    pub fn new_axes(&self) -> [[f64; 2]; 2] {
        self.new_axes
    }

    /// rotation of the u axis from the x axis, in degrees
    pub fn rotation(&self) -> f64 {
        self.alpha
    }

    pub fn translation(&self) -> [f64; 2] {
        [self.u0, self.v0]
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn uv_to_xy(&self, uv: [f64; 2]) -> PointXY {
        let ax = &self.new_axes;
        PointXY::new(
            uv[0] * ax[0][0] + uv[1] * ax[1][0],
            uv[0] * ax[0][1] + uv[1] * ax[1][1],
        )
    }

    pub fn xy_to_uv(&self, xy: PointXY) -> [f64; 2] {
        let ax = &self.new_axes;
        [
            ax[0][0] * xy.x + ax[0][1] * xy.y,
            ax[1][0] * xy.x + ax[1][1] * xy.y,
        ]
    }

    /// The normal form as text, None when every non-constant coefficient vanished.
    pub fn normalized_equation(&self) -> Option<String> {
        let [a, b, c, d, e] = self.primes;
        let [tu, tv] = &self.trans_vars;
        let mut r = String::new();
        let mut leading = true;
        if !self.is_zero(a) {
            r.push_str(&format!(
                "{}*({}{})^2 ",
                make_coefficient(a, leading),
                tu,
                make_coefficient(-self.u0, false)
            ));
            leading = false;
        }
        if !self.is_zero(b) {
            r.push_str(&format!(
                "{}*({}{})^2 ",
                make_coefficient(b, leading),
                tv,
                make_coefficient(-self.v0, false)
            ));
            leading = false;
        }
        if !self.is_zero(c) {
            r.push_str(&format!("{}*{} ", make_coefficient(c, leading), tu));
            leading = false;
        }
        if !self.is_zero(d) {
            r.push_str(&format!("{}*{} ", make_coefficient(d, leading), tv));
            leading = false;
        }
        if leading {
            return None;
        }
        r.push_str(&format!(" = {}", trim_double(-e, 6)));
        Some(r)
    }

    pub fn rotation_transform(&self) -> String {
        if self.alpha == 0.0 {
            return "There was no rotation, so the transform is the identity.".to_string();
        }
        let ax = &self.new_axes;
        let [x, y] = self.actual_variables();
        format!(
            "{} = {}*{} {}*{}\n{} = {}*{} {}*{}",
            self.trans_vars[0],
            make_coefficient(ax[0][0], true),
            x,
            make_coefficient(ax[0][1], false),
            y,
            self.trans_vars[1],
            make_coefficient(ax[1][0], true),
            x,
            make_coefficient(ax[1][1], false),
            y
        )
    }

    /// Features of the conic this quadratic describes; Unknown identities have none.
    pub fn features(&self, ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
        match self.identity {
            QuadraticType::HorizontalLine | QuadraticType::VerticalLine | QuadraticType::SlopingLine => {
                solved_line(ae, self)
            }
            QuadraticType::Parabola => solved_parabola(ae, self),
            QuadraticType::SinglePoint | QuadraticType::Ellipse => solved_ellipse(ae, self),
            QuadraticType::Hyperbola => solved_hyperbola(ae, self),
            QuadraticType::NullSet => SolvedGraph::xy_graph(ae, Some("null set")),
            QuadraticType::AllPoints => SolvedGraph::xy_graph(ae, Some("all points")),
            QuadraticType::TwoHorizontalLines | QuadraticType::TwoVerticalLines => {
                solved_two_lines(ae, self)
            }
            QuadraticType::Cross => solved_two_intersecting_lines(ae, self),
            QuadraticType::Unknown | QuadraticType::TwoPoints => {
                Err(SolveError::WrongFamily(format!("{} quadratic", self.identity)))
            }
        }
    }
}

impl fmt::Display for QuadraticClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Describes the equation:\n{} = 0", self.lhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::equation::Equation;
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    fn classify(s: &str) -> QuadraticClassifier {
        let e = Equation::new(s);
        QuadraticClassifier::new(e.polynomial().unwrap())
    }

    #[test]
    fn test_identities() {
        let cases = [
            ("y = 2*x + 3", QuadraticType::SlopingLine),
            ("y = 5", QuadraticType::HorizontalLine),
            ("x = 3", QuadraticType::VerticalLine),
            ("y = x^2 - 4", QuadraticType::Parabola),
            ("x = y^2", QuadraticType::Parabola),
            ("x^2 + y^2 = 4", QuadraticType::Ellipse),
            ("x^2 + 4*y^2 = 4", QuadraticType::Ellipse),
            ("x^2 - y^2 = 1", QuadraticType::Hyperbola),
            ("x^2 - y^2 = 0", QuadraticType::Cross),
            ("x^2 + y^2 = 0", QuadraticType::SinglePoint),
            ("x^2 + y^2 = -1", QuadraticType::NullSet),
            ("x^2 = 4", QuadraticType::TwoVerticalLines),
            ("y^2 = 9", QuadraticType::TwoHorizontalLines),
            ("x^2 = 0", QuadraticType::VerticalLine),
            ("y^2 = -1", QuadraticType::NullSet),
            ("x*y = 1", QuadraticType::Hyperbola),
        ];
        for (s, t) in cases {
            assert_eq!(classify(s).identity(), t, "{}", s);
        }
    }

    #[test]
    fn test_every_identity_has_a_name() {
        let names: Vec<String> = QuadraticType::iter().map(|t| t.to_string()).collect();
        assert_eq!(names.len(), 14);
        assert!(names.contains(&"TwoHorizontalLines".to_string()));
    }

    #[test]
    fn test_parabola_normal_form() {
        let qc = classify("y = x^2 - 4");
        assert_eq!(qc.rotation(), 0.0);
        assert_eq!(qc.translation(), [0.0, 0.0]);
        let [a, b, c, d, e] = qc.normalized_coefficients();
        assert_relative_eq!(a, 0.25);
        assert_eq!(b, 0.0);
        assert_eq!(c, 0.0);
        assert_relative_eq!(d, -0.25);
        assert_relative_eq!(e, -1.0);
        assert_eq!(
            qc.rotation_transform(),
            "There was no rotation, so the transform is the identity."
        );
    }

    #[test]
    fn test_rotated_hyperbola() {
        let qc = classify("x*y = 1");
        assert_relative_eq!(qc.rotation().abs(), 45.0, epsilon = 1e-9);
        let uv = qc.xy_to_uv(PointXY::new(1.0, 2.0));
        let back = qc.uv_to_xy(uv);
        assert_relative_eq!(back.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(back.y, 2.0, epsilon = 1e-12);
        assert!(qc.rotation_transform().starts_with("u = "));
    }

    #[test]
    fn test_circle_center() {
        let qc = classify("(x-1)^2 + (y+2)^2 = 9");
        assert_eq!(qc.identity(), QuadraticType::Ellipse);
        let [u0, v0] = qc.translation();
        assert_relative_eq!(u0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v0, -2.0, epsilon = 1e-12);
        assert!(qc.normalized_equation().is_some());
    }

    #[test]
    fn test_failure_reasons() {
        assert_eq!(
            classify("y = x^3").reason(),
            ClassificationFailureReason::DegreeGreaterThan2
        );
        assert_eq!(classify("y = x^3").identity(), QuadraticType::Unknown);
        assert_eq!(
            classify("r = 2").reason(),
            ClassificationFailureReason::Polar
        );
        assert_eq!(
            classify("y = x + z").reason(),
            ClassificationFailureReason::TooManyVariables
        );
    }

    #[test]
    fn test_line_equations() {
        let vars = ["x".to_string(), "y".to_string()];
        assert_eq!(
            equation_of_a_line(PointXY::new(0.0, 1.0), 45.0, &vars),
            "1*x-1*y+1 = 0"
        );
        assert_eq!(equation_of_a_line(PointXY::new(3.0, 0.0), 90.0, &vars), "1*x-3 = 0");
        assert_eq!(equation_of_a_vertical_line(-2.0, &vars), "1*x+2 = 0");
        assert_eq!(make_coefficient(2.5, true), "2.5");
        assert_eq!(make_coefficient(2.5, false), "+2.5");
        assert_eq!(make_coefficient(-2.5, true), "-2.5");
    }
}
