//! Trigonometric functions, square roots and absolute values of the form
//! `y = A * f(B*x + C) + D`.
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::math::intervals::{EXCLUDE_HIGH_X, EXCLUDE_LOW_X, IntervalXY};
use crate::math::math_util::trim_double;
use crate::math::number_model::{AngleModel, NumberModel};
use crate::math::points::PointXY;
use crate::solved::curve_features::{CurveFeatures, RadicalFeatures, TrigFeatures, TrigKind};
use crate::solved::solved_graph::{GraphFeature, SolveError, SolvedGraph};
use crate::symbolic::action::Action;
use crate::symbolic::expression::Expression;
use crate::symbolic::parse_node::ParseNode;
use log::{debug, info};
use std::f64::consts::PI;

/// Coefficients of `y = a * f(b*x + c) + d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterInner {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

fn collect_nodes<'a>(node: &'a ParseNode, action: Action, out: &mut Vec<&'a ParseNode>) {
    if node.operator == action {
        out.push(node);
    }
    for c in &node.children {
        collect_nodes(c, action, out);
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1.0e-6 * a.abs().max(b.abs()).max(1.0)
}

/// Fits `y = a * f(b*x + c) + d` to a function with exactly one `action` node. The argument is
/// probed at three points to read `b` and `c`; `a` and `d` come from the values at arguments
/// `t0` and `t1`, where `f(t0) = 0` and `f(t1) = 1`, and the fit is checked at `checks`.
fn fit_outer_inner(
    ae: &AnalyzedEquation,
    action: Action,
    t0: f64,
    t1: f64,
    checks: &[f64],
    f: impl Fn(f64) -> f64,
) -> Option<OuterInner> {
    let function: Expression = ae.function()?;
    let mut nodes = Vec::new();
    collect_nodes(&function.root, action, &mut nodes);
    let [node] = nodes.as_slice() else {
        return None;
    };
    let inner = node.children.first()?;
    let var = ae.independent_variable().to_string();
    let params = &function.parameters;
    let arg = |x: f64| {
        inner.eval_with(&|name: &str| {
            if name == var {
                Some(x)
            } else {
                params.get(&name.to_lowercase()).copied()
            }
        })
    };
    let (g0, g1, g2) = (arg(0.0)?, arg(1.0)?, arg(2.0)?);
    let b = g1 - g0;
    if b == 0.0 || !b.is_finite() || !close(g2 - g0, 2.0 * b) {
        return None;
    }
    let c = g0;
    let y = |t: f64| function.evaluate_at(&var, (t - c) / b);
    let d = y(t0)?;
    let a = y(t1)? - d;
    for t in checks {
        let expected = a * f(*t) + d;
        if !close(y(*t)?, expected) {
            return None;
        }
    }
    Some(OuterInner { a, b, c, d })
}

/// `y = a*sin(b*x + c) + d`
pub fn sine_form(ae: &AnalyzedEquation) -> Option<OuterInner> {
    fit_outer_inner(ae, Action::Sin, 0.0, PI / 2.0, &[PI / 6.0, 1.0, -2.5], f64::sin)
}

pub fn cosine_form(ae: &AnalyzedEquation) -> Option<OuterInner> {
    fit_outer_inner(ae, Action::Cos, PI / 2.0, 0.0, &[PI / 3.0, 1.0, -2.5], f64::cos)
}

pub fn tangent_form(ae: &AnalyzedEquation) -> Option<OuterInner> {
    fit_outer_inner(ae, Action::Tan, 0.0, PI / 4.0, &[PI / 6.0, 1.0, -0.5], f64::tan)
}

pub fn square_root_form(ae: &AnalyzedEquation) -> Option<OuterInner> {
    fit_outer_inner(ae, Action::Sqrt, 0.0, 1.0, &[4.0, 2.5], f64::sqrt)
}

pub fn absolute_value_form(ae: &AnalyzedEquation) -> Option<OuterInner> {
    fit_outer_inner(ae, Action::Abs, 0.0, 1.0, &[-1.0, 2.0, -3.5], f64::abs)
}

fn not_in_form(ae: &AnalyzedEquation, graph_name: &str) -> Result<SolvedGraph, SolveError> {
    info!(
        "{} is not of the form y = A*f(B*x+C)+D, features limited to the Cartesian graph",
        ae.input_equation()
    );
    SolvedGraph::xy_graph(ae, Some(graph_name))
}

////////////////////////////////////////////////////////////////
//  TRIGONOMETRIC FUNCTIONS
////////////////////////////////////////////////////////////////
fn solved_periodic(ae: &AnalyzedEquation, kind: TrigKind, m: OuterInner) -> Result<SolvedGraph, SolveError> {
    let graph_name = format!("{} function", kind);
    let mut g = SolvedGraph::xy_graph(ae, Some(&graph_name))?;
    g.add_features(&["frequency", "amplitude", "phase", "offset", "period"]);
    g.put_feature(GraphFeature::EquationType, "trigonometric equation")?;
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    let [x, y] = ae.actual_variables();
    let period = 2.0 * PI / m.b.abs();
    g.put_feature("amplitude", NumberModel::new(m.a.abs()))?;
    g.put_feature("phase", NumberModel::new(-m.c / m.b))?;
    g.put_feature("offset", NumberModel::new(m.d))?;
    g.put_feature("frequency", NumberModel::new(1.0 / period))?;
    g.put_feature("period", AngleModel::from_radians(period))?;
    g.put_feature(GraphFeature::Domain, IntervalXY::all_reals(&x))?;
    g.put_feature(
        GraphFeature::Range,
        IntervalXY::new(&y, m.d - m.a.abs(), m.d + m.a.abs())?,
    )?;
    g.set_curve(CurveFeatures::Trig(TrigFeatures {
        kind,
        amplitude: m.a,
        frequency: m.b,
        shift: m.c,
        offset: m.d,
        period,
    }));
    Ok(g)
}

pub fn solved_sine(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    match sine_form(ae) {
        Some(m) => solved_periodic(ae, TrigKind::Sine, m),
        None => not_in_form(ae, "sine function"),
    }
}

pub fn solved_cosine(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    match cosine_form(ae) {
        Some(m) => solved_periodic(ae, TrigKind::Cosine, m),
        None => not_in_form(ae, "cosine function"),
    }
}

pub fn solved_tangent(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    let Some(m) = tangent_form(ae) else {
        return not_in_form(ae, "tangent function");
    };
    let mut g = SolvedGraph::xy_graph(ae, Some("tangent function"))?;
    g.add_features(&[
        "frequency",
        "phase",
        "offset",
        "period",
        "orientation",
        "asymptotes",
        "rate",
    ]);
    g.put_feature(GraphFeature::EquationType, "trigonometric equation")?;
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    let [x, y] = ae.actual_variables();
    let period = PI / m.b.abs();
    // the argument reaches pi/2 here; the others repeat every period
    let asymptote = (PI / 2.0 - m.c) / m.b;
    let orientation = if m.a * m.b > 0.0 {
        "ascending"
    } else {
        "descending"
    };
    g.put_feature("phase", NumberModel::new(-m.c / m.b))?;
    g.put_feature("offset", NumberModel::new(m.d))?;
    g.put_feature("frequency", NumberModel::new(1.0 / period))?;
    g.put_feature("period", AngleModel::from_radians(period))?;
    g.put_feature("orientation", orientation)?;
    g.put_feature("rate", NumberModel::new(m.a))?;
    g.put_feature(
        "asymptotes",
        format!(
            "{} = {} + n*{} for every integer n",
            x,
            trim_double(asymptote, 3),
            trim_double(period, 3)
        ),
    )?;
    g.put_feature(
        GraphFeature::Domain,
        format!(
            "{{{} such that {} is all real numbers except where {} = {} + n*{}}}",
            x,
            x,
            x,
            trim_double(asymptote, 3),
            trim_double(period, 3)
        ),
    )?;
    g.put_feature(GraphFeature::Range, IntervalXY::all_reals(&y))?;
    g.set_curve(CurveFeatures::Trig(TrigFeatures {
        kind: TrigKind::Tangent,
        amplitude: m.a,
        frequency: m.b,
        shift: m.c,
        offset: m.d,
        period,
    }));
    Ok(g)
}

/// sums and products of different trigonometric functions
pub fn solved_trig(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    let mut g = SolvedGraph::xy_graph(ae, Some("trig function"))?;
    g.put_feature(GraphFeature::EquationType, "trigonometric equation")?;
    Ok(g)
}

////////////////////////////////////////////////////////////////
//  RADICALS
////////////////////////////////////////////////////////////////
pub fn solved_square_root(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    let Some(m) = square_root_form(ae) else {
        return not_in_form(ae, "square root");
    };
    let mut g = SolvedGraph::xy_graph(ae, Some("square root"))?;
    g.add_features(&["vertex", "orientation"]);
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    let [x, y] = ae.actual_variables();
    let vertex = PointXY::new(-m.c / m.b, m.d);
    let (inf, ninf) = (f64::INFINITY, f64::NEG_INFINITY);
    let domain = if m.b > 0.0 {
        IntervalXY::new(&x, vertex.x, inf)?.with_exclusions(EXCLUDE_HIGH_X)?
    } else {
        IntervalXY::new(&x, ninf, vertex.x)?.with_exclusions(EXCLUDE_LOW_X)?
    };
    let range = if m.a > 0.0 {
        IntervalXY::new(&y, vertex.y, inf)?.with_exclusions(EXCLUDE_HIGH_X)?
    } else {
        IntervalXY::new(&y, ninf, vertex.y)?.with_exclusions(EXCLUDE_LOW_X)?
    };
    let orientation = match (m.a > 0.0, m.b > 0.0) {
        (true, true) => "quadrant I",
        (true, false) => "quadrant II",
        (false, false) => "quadrant III",
        (false, true) => "quadrant IV",
    };
    debug!("square root with vertex {} in {}", vertex, orientation);
    g.put_feature("vertex", vertex)?;
    g.put_feature("orientation", orientation)?;
    g.put_feature(GraphFeature::Domain, domain)?;
    g.put_feature(GraphFeature::Range, range)?;
    g.set_curve(CurveFeatures::SquareRoot(RadicalFeatures {
        vertex,
        scale: m.a,
        rate: m.b,
    }));
    Ok(g)
}

pub fn solved_absolute_value(ae: &AnalyzedEquation) -> Result<SolvedGraph, SolveError> {
    let Some(m) = absolute_value_form(ae) else {
        return not_in_form(ae, "absolute value");
    };
    let mut g = SolvedGraph::xy_graph(ae, Some("absolute value"))?;
    g.add_features(&["vertex", "absDirection"]);
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    let [x, y] = ae.actual_variables();
    let vertex = PointXY::new(-m.c / m.b, m.d);
    let (range, direction) = if m.a > 0.0 {
        (
            IntervalXY::new(&y, vertex.y, f64::INFINITY)?.with_exclusions(EXCLUDE_HIGH_X)?,
            "up",
        )
    } else {
        (
            IntervalXY::new(&y, f64::NEG_INFINITY, vertex.y)?.with_exclusions(EXCLUDE_LOW_X)?,
            "down",
        )
    };
    g.put_feature("vertex", vertex)?;
    g.put_feature("absDirection", direction)?;
    g.put_feature(GraphFeature::Domain, IntervalXY::all_reals(&x))?;
    g.put_feature(GraphFeature::Range, range)?;
    g.set_curve(CurveFeatures::AbsoluteValue(RadicalFeatures {
        vertex,
        scale: m.a,
        rate: m.b,
    }));
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sine_form() {
        let ae = AnalyzedEquation::new("y = 3*sin(2*x + 1) - 4");
        let m = sine_form(&ae).unwrap();
        assert_relative_eq!(m.a, 3.0, epsilon = 1e-9);
        assert_relative_eq!(m.b, 2.0, epsilon = 1e-9);
        assert_relative_eq!(m.c, 1.0, epsilon = 1e-9);
        assert_relative_eq!(m.d, -4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sine_features() {
        let ae = AnalyzedEquation::new("y = 3*sin(2*x + 1) - 4");
        let g = solved_sine(&ae).unwrap();
        assert_eq!(g.graph_name().unwrap(), "sine function");
        assert_relative_eq!(g.curve().amplitude().unwrap(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(g.curve().period().unwrap(), PI, epsilon = 1e-9);
        assert_relative_eq!(g.get_number("phase").unwrap(), -0.5, epsilon = 1e-9);
        assert_eq!(g.range().unwrap(), "{y such that -7 <= y <= -1}");
    }

    #[test]
    fn test_cosine_with_negative_amplitude() {
        let ae = AnalyzedEquation::new("y = -cos(x/2)");
        let g = solved_cosine(&ae).unwrap();
        let CurveFeatures::Trig(t) = g.curve() else {
            panic!("expected a trig curve");
        };
        assert_eq!(t.kind, TrigKind::Cosine);
        assert_relative_eq!(t.amplitude, -1.0, epsilon = 1e-9);
        assert_relative_eq!(t.period, 4.0 * PI, epsilon = 1e-9);
        assert_eq!(g.range().unwrap(), "{y such that -1 <= y <= 1}");
    }

    #[test]
    fn test_tangent() {
        let ae = AnalyzedEquation::new("y = tan(x)");
        let g = solved_tangent(&ae).unwrap();
        assert_eq!(g.get_value("orientation").unwrap(), "ascending");
        assert_relative_eq!(g.curve().period().unwrap(), PI, epsilon = 1e-9);
        assert!(g.get_value("asymptotes").unwrap().starts_with("x = 1.571"));
    }

    #[test]
    fn test_not_in_form() {
        let ae = AnalyzedEquation::new("y = sin(x)^2");
        assert!(sine_form(&ae).is_none());
        let g = solved_sine(&ae).unwrap();
        assert_eq!(g.graph_name().unwrap(), "sine function");
        assert_eq!(g.curve(), &CurveFeatures::Unclassified);
    }

    #[test]
    fn test_square_root() {
        let ae = AnalyzedEquation::new("y = 2*sqrt(x - 1) + 3");
        let g = solved_square_root(&ae).unwrap();
        let v = g.curve().vertex().unwrap();
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(v.y, 3.0, epsilon = 1e-9);
        assert_eq!(g.get_value("orientation").unwrap(), "quadrant I");
        assert_eq!(g.domain().unwrap(), "{x such that 1 <= x < infinity}");
    }

    #[test]
    fn test_absolute_value() {
        let ae = AnalyzedEquation::new("y = -abs(x + 2) + 1");
        let g = solved_absolute_value(&ae).unwrap();
        let v = g.curve().vertex().unwrap();
        assert_relative_eq!(v.x, -2.0, epsilon = 1e-9);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-9);
        assert_eq!(g.get_value("absDirection").unwrap(), "down");
        assert_eq!(g.range().unwrap(), "{y such that -infinity < y <= 1}");
    }

    #[test]
    fn test_mixed_trig() {
        let ae = AnalyzedEquation::new("y = sin(x) + cos(x)");
        let g = solved_trig(&ae).unwrap();
        assert_eq!(g.graph_name().unwrap(), "trig function");
    }
}
