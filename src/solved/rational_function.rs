//! Interval analysis of rational functions `y = N(x)/D(x)` with constant coefficients.
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::math::intervals::IntervalXY;
use crate::math::pnom::{MINUS_MINUS, MINUS_PLUS, PLUS_MINUS, PLUS_PLUS, PNom};
use crate::math::points::PointXY;
use crate::solved::curve_features::{CurveFeatures, FunctionAnalysis};
use crate::solved::intervals::{EndpointType, IntervalDescription, IntervalEndpoint};
use crate::solved::solved_graph::{GraphFeature, SolveError, SolvedGraph};
use crate::solver::feature_node::MdeFeatureNode;
use crate::symbolic::rational_expression::RationalExpression;
use itertools::Itertools;
use log::debug;

/// `N/D` reduced to lowest terms, split into `Q + R/D`, with the reduced derivative.
#[derive(Debug, Clone)]
pub struct RationalFunction {
    numerator: PNom,
    denominator: PNom,
    quotient: PNom,
    remainder: PNom,
    d_numerator: PNom,
    d_denominator: PNom,
}

fn reduce(n: PNom, d: PNom) -> (PNom, PNom) {
    let cf = PNom::gcd(&n, &d);
    if cf.is_constant() {
        return (n, d);
    }
    match (n.quotient(&cf), d.quotient(&cf)) {
        (Some((nq, _)), Some((dq, _))) => (nq, dq),
        _ => (n, d),
    }
}

impl RationalFunction {
    pub fn new(ae: &AnalyzedEquation) -> Result<Self, SolveError> {
        let f = ae
            .function()
            .ok_or_else(|| SolveError::WrongFamily(format!("{} is not a function", ae.input_equation())))?;
        let mut r = RationalExpression::new(&f);
        if !r.is_rational_expression() {
            return Err(SolveError::WrongFamily(format!("{} is not rational", f)));
        }
        r.set_parameter_hash(ae.parameter_hash());
        if !r.numerator().has_constant_coefficients() || !r.denominator().has_constant_coefficients() {
            return Err(SolveError::WrongFamily(format!("{} has variable coefficients", f)));
        }
        let iv = ae.independent_variable();
        let (numerator, denominator) = reduce(
            PNom::from_polynomial(r.numerator(), iv),
            PNom::from_polynomial(r.denominator(), iv),
        );
        let (quotient, remainder) = numerator
            .quotient(&denominator)
            .ok_or_else(|| SolveError::Degenerate(format!("zero denominator in {}", f)))?;
        let (d_numerator, d_denominator) = reduce(
            denominator
                .product(&numerator.derivative())
                .difference(&numerator.product(&denominator.derivative())),
            denominator.product(&denominator),
        );
        Ok(RationalFunction {
            numerator,
            denominator,
            quotient,
            remainder,
            d_numerator,
            d_denominator,
        })
    }

    pub fn is_polynomial(&self) -> bool {
        self.remainder.is_trivial()
    }

    pub fn quotient(&self) -> &PNom {
        &self.quotient
    }

    /// value at `x`, the limit at infinite `x`
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_infinite() {
            return self.quotient.eval(x);
        }
        self.quotient.eval(x) + self.remainder.eval(x) / self.denominator.eval(x)
    }

    /// Critical points, vertical asymptotes and the two ends of `[left, right]`, sorted by x.
    pub fn endpoints(&self, left: f64, right: f64) -> Vec<IntervalEndpoint> {
        let inside = |x: f64| x >= left && x <= right;
        let mut points = Vec::new();
        for z in self.d_numerator.real_zeros().unwrap_or_default() {
            if !inside(z.x) {
                continue;
            }
            let kind = match z.signature_of(&self.d_denominator) {
                PLUS_PLUS | MINUS_MINUS => EndpointType::InflectionPoint,
                MINUS_PLUS => EndpointType::LocalMin,
                PLUS_MINUS => EndpointType::LocalMax,
                _ => EndpointType::Undefined,
            };
            let y = self.numerator.eval(z.x) / self.denominator.eval(z.x);
            points.push(IntervalEndpoint::with_type(PointXY::new(z.x, y), kind));
        }
        for z in self.denominator.real_zeros().unwrap_or_default() {
            if !inside(z.x) {
                continue;
            }
            let n = self.numerator.eval(z.x);
            let (inf, ninf) = (f64::INFINITY * n, f64::NEG_INFINITY * n);
            let (left_y, right_y) = match z.signature {
                MINUS_MINUS => (ninf, ninf),
                PLUS_PLUS => (inf, inf),
                PLUS_MINUS => (inf, ninf),
                MINUS_PLUS => (ninf, inf),
                _ => (f64::NAN, f64::NAN),
            };
            points.push(IntervalEndpoint::discontinuity(
                z.x,
                left_y,
                right_y,
                EndpointType::VerticalAsymptote,
            ));
        }
        for x in [left, right] {
            if !points.iter().any(|p| p.x == x) {
                points.push(IntervalEndpoint::at(PointXY::new(x, self.eval(x))));
            }
        }
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        points
    }

    pub fn analysis(&self, left: f64, right: f64) -> FunctionAnalysis {
        let endpoints = self.endpoints(left, right);
        let intervals = endpoints
            .iter()
            .tuple_windows()
            .map(|(l, r)| IntervalDescription::new(*l, *r))
            .collect();
        FunctionAnalysis {
            degree: self.is_polynomial().then(|| self.quotient.degree()),
            endpoints,
            intervals,
        }
    }
}

/// `FunctionAnalysisData` node: optional degree, every endpoint, then every interval.
pub fn function_analysis_node(fa: &FunctionAnalysis) -> MdeFeatureNode {
    let mut node = MdeFeatureNode::new();
    if let Some(d) = fa.degree {
        node.put("degree", d.to_string());
    }
    node.add_key("EndPoint");
    node.add_key("intervalDescription");
    for e in &fa.endpoints {
        node.put("EndPoint", e.to_feature_node());
    }
    for i in &fa.intervals {
        node.put("intervalDescription", i.to_feature_node());
    }
    node
}

pub fn solved_rational_function(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    let rf = RationalFunction::new(ae)?;
    let fa = rf.analysis(f64::NEG_INFINITY, f64::INFINITY);
    let mut g = SolvedGraph::xy_graph(ae, None)?;
    g.add_features(&["FunctionAnalysisData"]);
    let name = if rf.is_polynomial() {
        "polynomial"
    } else {
        "RationalFunction"
    };
    debug!(
        "{} {} has {} interval endpoints",
        name,
        ae.input_equation(),
        fa.endpoints.len()
    );
    g.put_feature(GraphFeature::GraphName, name)?;
    g.put_feature("FunctionAnalysisData", function_analysis_node(&fa))?;
    g.set_curve(CurveFeatures::Rational(fa));
    Ok(g)
}

/// Cubic polynomial functions: the rational analysis plus their unbounded domain and range.
pub fn solved_cubic_polynomial(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    let mut g = solved_rational_function(ae)?;
    let [x, y] = ae.actual_variables();
    g.put_feature(GraphFeature::Domain, IntervalXY::all_reals(&x))?;
    g.put_feature(GraphFeature::Range, IntervalXY::all_reals(&y))?;
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solved::intervals::Direction;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_extrema() {
        let ae = AnalyzedEquation::new("y = x^3 - 3*x");
        let g = solved_cubic_polynomial(&ae).unwrap();
        assert_eq!(g.graph_name().unwrap(), "polynomial");
        let fa = g.curve().function_analysis().unwrap();
        assert_eq!(fa.degree, Some(3));
        assert_eq!(fa.endpoints.len(), 4);
        assert_eq!(fa.endpoints[1].kind, EndpointType::LocalMax);
        assert_relative_eq!(fa.endpoints[1].x, -1.0, epsilon = 1e-8);
        assert_relative_eq!(fa.endpoints[1].left_y, 2.0, epsilon = 1e-8);
        assert_eq!(fa.endpoints[2].kind, EndpointType::LocalMin);
        let directions: Vec<Direction> = fa.intervals.iter().map(|i| i.direction).collect();
        assert_eq!(
            directions,
            vec![Direction::Increases, Direction::Decreases, Direction::Increases]
        );
        assert_eq!(g.domain().unwrap(), "{x such that -infinity < x < infinity}");
    }

    #[test]
    fn test_reciprocal_asymptote() {
        let ae = AnalyzedEquation::new("y = 1/(x - 1)");
        let rf = RationalFunction::new(&ae).unwrap();
        assert!(!rf.is_polynomial());
        let fa = rf.analysis(f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(fa.degree, None);
        assert_eq!(fa.endpoints.len(), 3);
        let asymptote = fa.endpoints[1];
        assert_eq!(asymptote.kind, EndpointType::VerticalAsymptote);
        assert_relative_eq!(asymptote.x, 1.0, epsilon = 1e-8);
        assert_eq!(asymptote.left_y, f64::NEG_INFINITY);
        assert_eq!(asymptote.right_y, f64::INFINITY);
        assert_eq!(fa.endpoints[0].kind, EndpointType::HorizontalAsymptote);
        assert!(fa.intervals.iter().all(|i| i.direction == Direction::Decreases));
    }

    #[test]
    fn test_common_factor_is_removed() {
        // (x^2 - 1)/(x - 1) is x + 1 away from x = 1
        let ae = AnalyzedEquation::new("y = (x^2 - 1)/(x - 1)");
        let rf = RationalFunction::new(&ae).unwrap();
        assert!(rf.is_polynomial());
        assert_eq!(rf.quotient().degree(), 1);
        assert_relative_eq!(rf.eval(3.0), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_feature_node() {
        let ae = AnalyzedEquation::new("y = 1/(x - 1)");
        let g = solved_rational_function(&ae).unwrap();
        assert_eq!(g.graph_name().unwrap(), "RationalFunction");
        let nodes = g.get_nodes("FunctionAnalysisData");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].child_nodes("EndPoint").unwrap().len(), 3);
        assert_eq!(nodes[0].child_nodes("intervalDescription").unwrap().len(), 2);
    }

    #[test]
    fn test_non_rational_is_rejected() {
        let ae = AnalyzedEquation::new("y = sqrt(x)");
        assert!(matches!(RationalFunction::new(&ae), Err(SolveError::WrongFamily(_))));
    }
}
