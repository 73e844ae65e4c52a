use crate::Utils::settings::MdeSettings;
use crate::analysis::analyzed_data::DataError;
use crate::analysis::analyzed_item::AnalyzedItem;
use crate::analysis::graph_trail::{GraphTrail, graph_trails, segment_boundaries};
use crate::analysis::points_util::to_cartesian;
use crate::classifier::classifier::Classifier;
use crate::classifier::polar_classifier::PolarClassifier;
use crate::classifier::polynomial_classifier::{PolynomialClassifier, PolynomialModel};
use crate::classifier::quadratic_classifier::QuadraticClassifier;
use crate::classifier::trig_classifier::TrigClassifier;
use crate::math::bounds::Bounds;
use crate::math::math_util::trim_double;
use crate::math::points::{MultiPointXY, PointXY};
use crate::math::roots::real_roots;
use crate::solved::solved_graph::SolvedGraph;
use crate::symbolic::equation::Equation;
use crate::symbolic::expression::Expression;
use crate::symbolic::polynomial::Polynomial;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;
use std::fmt;
use strum_macros::Display;

// property flags
pub const CONSTANT: u8 = 1;
pub const FUNCTION: u8 = 2;
pub const POLYNOMIAL: u8 = 4;
pub const QUADRATIC: u8 = 8;
pub const MORE_THAN_TWO_VARIABLES: u8 = 16;
pub const UNDEFINED: u8 = 32;
pub const NO_SOLUTION: u8 = 64;

/// width under which the search for a change in the number of solutions stops
const BOUNDARY_RESOLUTION: f64 = 1.0e-8;
/// neighbouring solutions closer than this make a sample multi-valued
const FUNCTION_TOLERANCE: f64 = 1.0e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EquationType {
    Unknown,
    Cartesian,
    Polar,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    Unknown(String),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::Unknown(name) => {
                write!(f, "attempt to access undefined parameter {}", name)
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// samples of the last range solved, reused while the range is unchanged
#[derive(Debug, Clone)]
struct SavedSamples {
    low: f64,
    high: f64,
    points: Vec<MultiPointXY>,
}

/// An equation in two variables with everything needed to sample and classify it.
///
/// Construction parses the input, binds parameters, picks the independent and dependent
/// variables and reduces the equation to a polynomial in the dependent variable whose
/// coefficients may only depend on the independent one. Sampling then solves that polynomial
/// numerically at evenly spaced values of the independent variable.
#[derive(Debug, Clone)]
pub struct AnalyzedEquation {
    input: String,
    equation: Equation,
    bad: bool,
    equation_type: EquationType,
    properties: u8,
    parameter_hash: HashMap<String, f64>,
    lhs: Polynomial,
    dvp_coefficients: Vec<Expression>,
    actual_variables: [String; 2],
    extra_variables: Vec<String>,
    independent_variable: String,
    dependent_variable: String,
    degree: i32,
    num_points: usize,
    default_bound: f64,
    preferred_bounds: Bounds,
    points: Vec<MultiPointXY>,
    trails: Vec<GraphTrail>,
    features: Option<SolvedGraph>,
    max_jump: f64,
    function_over_interval: bool,
    constant_solution: Option<Vec<f64>>,
    saved: Option<SavedSamples>,
}

impl AnalyzedEquation {
    pub fn new(s: &str) -> AnalyzedEquation {
        AnalyzedEquation::with_settings(s, &MdeSettings::default())
    }

    pub fn with_settings(s: &str, settings: &MdeSettings) -> AnalyzedEquation {
        let b = settings.default_bound;
        let mut ae = AnalyzedEquation {
            input: s.to_string(),
            equation: Equation::new(s),
            bad: false,
            equation_type: EquationType::Unknown,
            properties: 0,
            parameter_hash: HashMap::new(),
            lhs: Polynomial::default(),
            dvp_coefficients: Vec::new(),
            actual_variables: ["x".to_string(), "y".to_string()],
            extra_variables: Vec::new(),
            independent_variable: "x".to_string(),
            dependent_variable: "y".to_string(),
            degree: 0,
            num_points: settings.num_points.max(2),
            default_bound: b,
            preferred_bounds: Bounds::new(-b, b, b, -b),
            points: Vec::new(),
            trails: Vec::new(),
            features: None,
            max_jump: 0.0,
            function_over_interval: false,
            constant_solution: None,
            saved: None,
        };
        let Some(p) = ae.equation.polynomial().cloned() else {
            warn!("could not parse the equation {}", s);
            ae.bad = true;
            return ae;
        };
        ae.lhs = p;
        ae.check_variables(&settings.parameters);
        if ae.has_more_than_two_variables() {
            info!("{} has more than two variables: {:?}", s, ae.extra_variables);
            return ae;
        }
        match ae.equation_type {
            EquationType::Cartesian => {
                if ae.lhs.has_constant_coefficients() {
                    ae.properties |= POLYNOMIAL;
                    if ae.lhs.get_degree() <= 2 {
                        ae.properties |= QUADRATIC;
                    }
                }
                ae.independent_variable = ae.actual_variables[0].clone();
                ae.dependent_variable = ae.actual_variables[1].clone();
                ae.degree = ae.lhs.get_degree();
                if ae.check_for_solvable() {
                    match ae.dvp_degree() {
                        0 => ae.properties |= UNDEFINED,
                        1 => {
                            ae.properties |= FUNCTION;
                            ae.check_for_constant();
                        }
                        _ => ae.check_for_constant(),
                    }
                }
            }
            EquationType::Polar => {
                ae.dependent_variable = "r".to_string();
                ae.independent_variable = "theta".to_string();
                ae.degree = ae.lhs.get_degree();
                if ae.check_for_solvable() {
                    ae.check_for_constant();
                }
            }
            EquationType::Unknown => {}
        }
        if ae.is_constant() {
            ae.constant_solution = ae.get_solution(0.0).map(|p| p.y_array);
        }
        debug!(
            "{}: {} equation, properties {:#09b}, {} = f({})",
            s, ae.equation_type, ae.properties, ae.dependent_variable, ae.independent_variable
        );
        ae
    }

    /// Splits the variables of the equation into parameters (names found in `table`) and the
    /// real variables, then decides between cartesian and polar form.
    fn check_variables(&mut self, table: &BTreeMap<String, f64>) {
        let all = self.lhs.to_expression().var_strings;
        for v in &all {
            let lower = v.to_lowercase();
            if let Some(value) = table.get(&lower) {
                self.parameter_hash.insert(lower, *value);
            }
        }
        self.lhs.set_parameter_hash(&self.parameter_hash);
        let real: Vec<String> = all
            .into_iter()
            .filter(|v| !self.parameter_hash.contains_key(&v.to_lowercase()))
            .collect();
        match real.as_slice() {
            [] => {}
            [v] if v == "r" || v == "theta" => {
                self.actual_variables = ["r".to_string(), "theta".to_string()];
            }
            [v] => {
                if *v != self.actual_variables[1] {
                    self.actual_variables[0] = v.clone();
                }
            }
            [v0, v1] => self.actual_variables = [v0.clone(), v1.clone()],
            _ => {
                self.extra_variables = real;
                self.properties |= MORE_THAN_TWO_VARIABLES;
                return;
            }
        }
        self.equation_type = if self.actual_variables[0] == "r" && self.actual_variables[1] == "theta" {
            EquationType::Polar
        } else {
            EquationType::Cartesian
        };
    }

    /// every coefficient of the dependent variable polynomial may only hold the independent one
    fn check_for_solvable(&mut self) -> bool {
        let dvp = self.lhs.one_variable_polynomial(&self.dependent_variable);
        let mut ce = Polynomial::coefficients_of(&dvp, &self.dependent_variable);
        for c in ce.iter_mut() {
            c.set_parameter_hash(&self.parameter_hash);
        }
        self.dvp_coefficients = ce;
        let indep = &self.independent_variable;
        let solvable = self
            .dvp_coefficients
            .iter()
            .all(|c| c.var_strings.is_empty() || (c.var_strings.len() == 1 && c.var_strings[0] == *indep));
        if !solvable {
            self.properties |= NO_SOLUTION;
        }
        solvable
    }

    fn check_for_constant(&mut self) {
        if self.dvp_coefficients.iter().all(|c| c.var_strings.is_empty()) {
            self.properties |= CONSTANT;
        }
    }

    fn dvp_degree(&self) -> i32 {
        self.dvp_coefficients.len() as i32 - 1
    }

    pub fn input_equation(&self) -> &str {
        &self.input
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    /// `left - right` with parameters bound
    pub fn lhs(&self) -> &Polynomial {
        &self.lhs
    }

    pub fn degree(&self) -> i32 {
        self.degree
    }

    pub fn equation_type(&self) -> EquationType {
        self.equation_type
    }

    pub fn properties(&self) -> u8 {
        self.properties
    }

    pub fn is_bad(&self) -> bool {
        self.bad
    }

    pub fn is_unknown(&self) -> bool {
        self.equation_type == EquationType::Unknown
    }

    pub fn is_cartesian(&self) -> bool {
        self.equation_type == EquationType::Cartesian
    }

    fn has(&self, flag: u8) -> bool {
        self.properties & flag != 0
    }

    pub fn is_constant(&self) -> bool {
        self.has(CONSTANT)
    }

    pub fn is_function(&self) -> bool {
        self.has(FUNCTION)
    }

    pub fn is_polynomial(&self) -> bool {
        self.has(POLYNOMIAL)
    }

    pub fn is_quadratic(&self) -> bool {
        self.has(QUADRATIC)
    }

    pub fn has_more_than_two_variables(&self) -> bool {
        self.has(MORE_THAN_TWO_VARIABLES)
    }

    pub fn is_undefined(&self) -> bool {
        self.has(UNDEFINED)
    }

    pub fn cannot_be_solved(&self) -> bool {
        self.has(NO_SOLUTION)
    }

    pub fn is_solvable_function(&self) -> bool {
        self.is_function() && !self.cannot_be_solved()
    }

    pub fn is_function_over_interval(&self) -> bool {
        self.function_over_interval
    }

    pub fn actual_variables(&self) -> [String; 2] {
        self.actual_variables.clone()
    }

    pub fn independent_variable(&self) -> &str {
        &self.independent_variable
    }

    pub fn dependent_variable(&self) -> &str {
        &self.dependent_variable
    }

    /// coefficients of the dependent variable polynomial, highest power first
    pub fn dvp_coefficients(&self) -> &[Expression] {
        &self.dvp_coefficients
    }

    /// `y = f(x)` for a solvable function: `-c1/c0`
    pub fn function(&self) -> Option<Expression> {
        if !self.is_solvable_function() || self.dvp_coefficients.len() != 2 {
            return None;
        }
        let mut f = self.dvp_coefficients[1].quotient(&self.dvp_coefficients[0]).negate();
        f.set_parameter_hash(&self.parameter_hash);
        Some(f)
    }

    ////////////////////////////////////////////////////////////////
    //  PARAMETERS
    ////////////////////////////////////////////////////////////////
    /// names of the bound parameters, sorted
    pub fn parameters(&self) -> Vec<String> {
        let mut r: Vec<String> = self.parameter_hash.keys().cloned().collect();
        r.sort();
        r
    }

    pub fn parameter_hash(&self) -> &HashMap<String, f64> {
        &self.parameter_hash
    }

    pub fn contains_parameter(&self, name: &str) -> bool {
        self.parameter_hash.contains_key(name)
    }

    pub fn parameter_value(&self, name: &str) -> Result<f64, ParameterError> {
        self.parameter_hash
            .get(name)
            .copied()
            .ok_or_else(|| ParameterError::Unknown(name.to_string()))
    }

    /// Rebinds a parameter already used by the equation. Cached samples are dropped.
    pub fn set_parameter_value(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        match self.parameter_hash.get_mut(name) {
            Some(v) => *v = value,
            None => return Err(ParameterError::Unknown(name.to_string())),
        }
        self.lhs.set_parameter_hash(&self.parameter_hash);
        for c in self.dvp_coefficients.iter_mut() {
            c.set_parameter_hash(&self.parameter_hash);
        }
        self.saved = None;
        self.constant_solution = None;
        if self.is_constant() {
            self.constant_solution = self.get_solution(0.0).map(|p| p.y_array);
        }
        Ok(())
    }

    /// the parsed input, parameters shown by name
    pub fn print_original_equation(&self) -> String {
        self.equation.to_string()
    }

    /// the parsed input with parameter values substituted
    pub fn print_equation(&self) -> String {
        match (&self.equation.left, &self.equation.right) {
            (Some(l), Some(r)) => {
                let mut l = Expression::from_node(l.root.clone());
                let mut r = Expression::from_node(r.root.clone());
                l.set_parameter_hash(&self.parameter_hash);
                r.set_parameter_hash(&self.parameter_hash);
                format!("{} = {}", l, r)
            }
            _ => self.input.clone(),
        }
    }

    ////////////////////////////////////////////////////////////////
    //  ROOT FINDING
    ////////////////////////////////////////////////////////////////
    /// coefficients of the dependent variable polynomial at `x`
    pub fn coefficients_at(&self, x: f64) -> Vec<f64> {
        Polynomial::evaluate_coefficients_at(&self.dvp_coefficients, &self.independent_variable, x)
    }

    fn get_solution(&self, x: f64) -> Option<MultiPointXY> {
        if self.cannot_be_solved() || self.is_undefined() || self.bad {
            return None;
        }
        Some(AnalyzedEquation::actually_solve(&self.coefficients_at(x), x))
    }

    /// Every real value of the dependent variable at `x`; none when the equation can not be
    /// solved there.
    pub fn find_real_solutions(&self, x: f64) -> MultiPointXY {
        if let Some(c) = &self.constant_solution {
            return MultiPointXY::new(x, c.clone());
        }
        self.get_solution(x).unwrap_or_else(|| MultiPointXY::empty(x))
    }

    /// Real roots of `coeffs` (highest power first).
    ///
    /// Leading coefficients below a tolerance relative to the coefficient sizes are dropped;
    /// the remaining degree decides between the linear formula, the quadratic formula and the
    /// general root finder.
    pub fn actually_solve(coeffs: &[f64], x: f64) -> MultiPointXY {
        if coeffs.is_empty() || coeffs.iter().any(|c| c.is_nan()) {
            return MultiPointXY::empty(x);
        }
        let deg = coeffs.len() - 1;
        let et = coeffs.iter().map(|c| c.abs()).sum::<f64>() * 1.0e-8 + f64::MIN_POSITIVE;
        let et2 = coeffs.iter().map(|c| c * c).sum::<f64>() * 1.0e-16 + f64::MIN_POSITIVE;
        let ez = |v: f64| v.abs() < et;
        let ez2 = |v: f64| v.abs() < et2;
        let Some(n) = coeffs.iter().position(|c| !ez(*c)) else {
            return MultiPointXY::empty(x);
        };
        match deg - n {
            0 | 1 => {
                if deg >= 1 && !ez(coeffs[deg - 1]) {
                    MultiPointXY::single(x, -coeffs[deg] / coeffs[deg - 1])
                } else {
                    MultiPointXY::empty(x)
                }
            }
            2 => {
                let t0 = -0.5 * coeffs[deg - 1] / coeffs[deg - 2];
                let t1 = coeffs[deg] / coeffs[deg - 2];
                let d2 = t0 * t0 - t1;
                if ez2(d2) {
                    MultiPointXY::new(x, vec![t0, t0])
                } else if d2 < 0.0 {
                    MultiPointXY::empty(x)
                } else {
                    let disc = d2.sqrt();
                    MultiPointXY::new(x, vec![t0 - disc, t0 + disc])
                }
            }
            _ => MultiPointXY::new(x, real_roots(&coeffs[n..])),
        }
    }

    fn has_multiples(y: &[f64]) -> bool {
        y.windows(2).any(|w| w[0] == w[1])
    }

    /// Bisects towards the abscissa where the number of solutions changes between `mp0` and
    /// `mp1`, returning the sample on the side with more solutions.
    fn find_boundary(&self, mp0: &MultiPointXY, mp1: &MultiPointXY) -> MultiPointXY {
        let (n0, n1) = (mp0.len(), mp1.len());
        if mp1.x - mp0.x < BOUNDARY_RESOLUTION {
            return if n0 > n1 { mp0.clone() } else { mp1.clone() };
        }
        let x = 0.5 * (mp0.x + mp1.x);
        if n1 > n0 {
            if AnalyzedEquation::has_multiples(&mp1.y_array) {
                return mp1.clone();
            }
            let mp = self.find_real_solutions(x);
            return if mp.len() != n1 {
                self.find_boundary(&mp, mp1)
            } else {
                self.find_boundary(mp0, &mp)
            };
        }
        if n1 < n0 {
            if AnalyzedEquation::has_multiples(&mp0.y_array) {
                return mp0.clone();
            }
            let mp = self.find_real_solutions(x);
            return if mp.len() != n0 {
                self.find_boundary(mp0, &mp)
            } else {
                self.find_boundary(&mp, mp1)
            };
        }
        mp0.clone()
    }

    fn jump_tolerance(&self) -> f64 {
        if self.max_jump > 0.0 {
            self.max_jump
        } else {
            2.0 * self.default_bound
        }
    }

    /// Solutions at `num_points` evenly spaced abscissas in `[low, high]`, with the samples
    /// next to every change in the number of solutions moved onto that change.
    /// Samples of an unchanged range are reused.
    pub fn sample_points(&self, low: f64, high: f64) -> Vec<MultiPointXY> {
        if let Some(s) = &self.saved {
            if s.low == low && s.high == high {
                return s.points.clone();
            }
        }
        let n = self.num_points;
        let delta = (high - low) / (n as f64 - 1.0);
        let mut r: Vec<MultiPointXY> = (0..n)
            .map(|i| {
                let x = if i == n - 1 { high } else { low + i as f64 * delta };
                self.find_real_solutions(x)
            })
            .collect();
        let sb = segment_boundaries(&r, self.jump_tolerance());
        for &b in &sb[1..sb.len() - 1] {
            if r[b - 1].len() == r[b].len() {
                continue;
            }
            let new_r = self.find_boundary(&r[b - 1], &r[b]);
            if new_r.len() == r[b - 1].len() {
                r[b - 1] = new_r.clone();
            }
            if new_r.len() == r[b].len() {
                r[b] = new_r;
            }
        }
        r
    }

    fn solve_for_points(&mut self, low: f64, high: f64) -> Vec<MultiPointXY> {
        let r = self.sample_points(low, high);
        self.saved = Some(SavedSamples {
            low,
            high,
            points: r.clone(),
        });
        r
    }

    /// y values where the curve crosses `x = 0`
    pub fn y_intercepts(&self) -> Vec<f64> {
        if self.cannot_be_solved() {
            return Vec::new();
        }
        self.find_real_solutions(0.0).y_array
    }

    /// x values where the curve crosses `y = 0`
    pub fn x_intercepts(&self) -> Vec<f64> {
        if self.bad {
            return Vec::new();
        }
        let ce = self.lhs.coefficients_as_expressions(&self.independent_variable);
        if ce.len() <= 1 {
            return Vec::new();
        }
        let c = Polynomial::evaluate_coefficients_at(&ce, &self.dependent_variable, 0.0);
        AnalyzedEquation::actually_solve(&c, 0.0).y_array
    }

    /// Vertical lines at the x intercepts inside the bounds, each drawn bottom to top.
    fn vertical_lines(&self, b: &Bounds) -> Result<(Vec<MultiPointXY>, Vec<GraphTrail>), DataError> {
        let xs: Vec<f64> = self
            .x_intercepts()
            .into_iter()
            .filter(|x| *x >= b.left && *x <= b.right)
            .collect();
        if xs.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        let per_line = (self.num_points / xs.len()).max(2);
        let delta = (b.top - b.bottom) / (per_line as f64 - 1.0);
        let mut points = Vec::with_capacity(per_line * xs.len());
        let mut trails = Vec::with_capacity(xs.len());
        for x in xs {
            let line: Vec<PointXY> = (0..per_line)
                .map(|i| PointXY::new(x, b.bottom + i as f64 * delta))
                .collect();
            points.extend(line.iter().map(|p| MultiPointXY::single(p.x, p.y)));
            trails.push(GraphTrail::new(line)?);
        }
        Ok((points, trails))
    }

    /// false when any sample has distinct solutions or no sample has one
    fn function_test(&self) -> bool {
        let mut found = false;
        for p in &self.points {
            if p.is_empty() {
                continue;
            }
            found = true;
            if p.y_array.windows(2).any(|w| (w[1] - w[0]).abs() > FUNCTION_TOLERANCE) {
                return false;
            }
        }
        found
    }

    ////////////////////////////////////////////////////////////////
    //  CLASSIFICATION
    ////////////////////////////////////////////////////////////////
    /// Picks the classifier for this equation: quadratics and polar equations have their own,
    /// trigonometric ones theirs, everything else is fitted numerically.
    pub fn classifier(&self) -> Classifier {
        if self.is_quadratic() {
            return Classifier::Quadratic(QuadraticClassifier::new(&self.lhs));
        }
        if self.is_polar() {
            return Classifier::Polar(PolarClassifier::new(&self.sample_points(0.0, 2.0 * PI)));
        }
        let text = self.lhs.to_string();
        if ["sin", "tan", "cos"].iter().any(|f| text.contains(f)) {
            return Classifier::Trig(TrigClassifier::new());
        }
        let (low, high) = match &self.saved {
            Some(s) if s.low < s.high => (s.low, s.high),
            _ => (-self.default_bound, self.default_bound),
        };
        let pc = PolynomialClassifier::new(&self.sample_points(low, high));
        match pc.best_guess() {
            None => Classifier::Default,
            Some(PolynomialModel::Quadratic(q)) => {
                let p = q.polynomial();
                if AnalyzedEquation::new(&format!("{} = 0", p)).is_function() {
                    Classifier::Quadratic(QuadraticClassifier::new(&p))
                } else {
                    Classifier::Polynomial(pc)
                }
            }
            Some(_) => Classifier::Polynomial(pc),
        }
    }
}

impl AnalyzedItem for AnalyzedEquation {
    fn name(&self) -> String {
        self.input.clone()
    }

    fn compute_points(&mut self, b: &Bounds) -> Result<(), DataError> {
        self.max_jump = (b.top - b.bottom).abs();
        if self.bad {
            self.points.clear();
            self.trails.clear();
            return Ok(());
        }
        if self.is_polar() {
            let polar = self.solve_for_points(0.0, 2.0 * PI);
            let cartesian: Vec<Vec<PointXY>> = graph_trails(&polar, self.max_jump)
                .iter()
                .map(|t| to_cartesian(t.points()))
                .collect();
            let extent = cartesian
                .iter()
                .flatten()
                .fold(f64::NEG_INFINITY, |m, p| m.max(p.x.abs()).max(p.y.abs()));
            let right = if extent.is_finite() {
                extent.min(self.default_bound)
            } else {
                self.default_bound
            };
            self.points = cartesian
                .iter()
                .flatten()
                .map(|p| MultiPointXY::single(p.x, p.y))
                .collect();
            self.trails = cartesian
                .into_iter()
                .map(GraphTrail::new)
                .collect::<Result<Vec<_>, _>>()?;
            self.preferred_bounds = Bounds::new(-right, right, right, -right);
        } else if self.is_undefined() {
            let (points, trails) = self.vertical_lines(b)?;
            self.points = points;
            self.trails = trails;
            self.preferred_bounds = *b;
        } else {
            self.points = self.solve_for_points(b.left, b.right);
            self.trails = graph_trails(&self.points, self.max_jump);
            self.preferred_bounds = *b;
        }
        self.function_over_interval = self.function_test();
        debug!(
            "{}: {} samples, {} trails in {}",
            self.input,
            self.points.len(),
            self.trails.len(),
            self.preferred_bounds
        );
        Ok(())
    }

    fn preferred_bounds(&self) -> Bounds {
        self.preferred_bounds
    }

    fn update_features(&mut self) {
        let classifier = self.classifier();
        info!("classifying {} with the {} classifier", self.input, classifier.name());
        let features = classifier.features_for_equation(self);
        self.features = Some(features);
    }

    fn features(&self) -> Option<&SolvedGraph> {
        self.features.as_ref()
    }

    fn points(&self) -> &[MultiPointXY] {
        &self.points
    }

    fn graph_trails(&self) -> &[GraphTrail] {
        &self.trails
    }

    fn is_polar(&self) -> bool {
        self.equation_type == EquationType::Polar
    }
}

impl PartialEq for AnalyzedEquation {
    fn eq(&self, other: &Self) -> bool {
        self.print_original_equation() == other.print_original_equation()
    }
}

impl fmt::Display for AnalyzedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.equation_type {
            EquationType::Cartesian => {
                write!(f, "Cartesian equation\nX intercepts:")?;
                for x in self.x_intercepts() {
                    write!(f, " {}", trim_double(x, 4))?;
                }
            }
            EquationType::Polar => write!(f, "Polar equation")?,
            EquationType::Unknown => return write!(f, "Unknown equation format."),
        }
        let notes = [
            (CONSTANT, "Constant"),
            (FUNCTION, "It's a function"),
            (POLYNOMIAL, "It's a polynomial"),
            (QUADRATIC, "It's a quadratic"),
            (MORE_THAN_TWO_VARIABLES, "It has more than two variables"),
            (UNDEFINED, "It's undefined"),
            (NO_SOLUTION, "It can't be solved"),
        ];
        for (flag, note) in notes {
            if self.has(flag) {
                write!(f, "\n{}", note)?;
            }
        }
        Ok(())
    }
}
