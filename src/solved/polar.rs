//! Polar curves described from the best fitting [`PolarModel`].
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::classifier::polar_classifier::{PolarModel, amplitude, phase_in_rads};
use crate::classifier::quadratic_classifier::QuadraticClassifier;
use crate::math::number_model::{AngleModel, NumberModel};
use crate::math::points::PointRT;
use crate::solved::conics::solved_line;
use crate::solved::curve_features::{
    CurveFeatures, LemniscateFeatures, RoseFeatures, TrochoidFeatures,
};
use crate::solved::solved_graph::{GraphFeature, SolveError, SolvedGraph, compass_direction};
use crate::solver::feature_node::MdeFeatureNode;
use log::debug;
use std::f64::consts::PI;

const EPSILON: f64 = 1.0e-8;

/// Header shared by the polar families.
fn polar_graph(ae: &AnalyzedEquation, graph_name: &str) -> Result<SolvedGraph, SolveError> {
    let mut g = SolvedGraph::new();
    g.put_feature(GraphFeature::GraphName, graph_name)?;
    g.put_feature(GraphFeature::CoordinateSystem, "Polar")?;
    g.put_feature(GraphFeature::EquationPrint, ae.print_equation())?;
    if !ae.parameters().is_empty() {
        g.put_feature(GraphFeature::OriginalEquationPrint, ae.print_original_equation())?;
    }
    g.put_feature(GraphFeature::EquationType, "polar equation")?;
    Ok(g)
}

/// Replaces the Cartesian header of a converted equation by the polar one.
fn restate_as_polar(g: &mut SolvedGraph, ae: &AnalyzedEquation, equation_type: &str) -> Result<(), SolveError> {
    g.put_new_feature(GraphFeature::EquationPrint, ae.print_equation())?;
    if !ae.parameters().is_empty() {
        g.put_new_feature(GraphFeature::OriginalEquationPrint, ae.print_original_equation())?;
    }
    g.put_new_feature(GraphFeature::EquationType, equation_type)?;
    g.put_new_feature(GraphFeature::CoordinateSystem, "Polar")?;
    Ok(())
}

fn wrong_model(builder: &str, model: &PolarModel) -> SolveError {
    SolveError::WrongFamily(format!("{} given a polar {}", builder, model.name()))
}

/// `mv0/r + mv1*cos(theta) + mv2*sin(theta) = 0` is the line `mv1*x + mv2*y + mv0 = 0`.
pub fn solved_polar_line(ae: &AnalyzedEquation, model: &PolarModel) -> Result<SolvedGraph, SolveError> {
    let [c, a, b] = model.model_vector[..] else {
        return Err(wrong_model("polar line", model));
    };
    let ce = AnalyzedEquation::new(&format!("{}*x + ({})*y + ({}) = 0", a, b, c));
    let qc = QuadraticClassifier::new(ce.lhs());
    let mut g = solved_line(&ce, &qc)?;
    restate_as_polar(&mut g, ae, "polar form of a line")?;
    Ok(g)
}

/// Conics are converted to their Cartesian quadratic and described by the conic builders.
pub fn solved_polar_conic(ae: &AnalyzedEquation, model: &PolarModel) -> Result<SolvedGraph, SolveError> {
    let equation = model
        .cartesian_equation()
        .ok_or_else(|| wrong_model("polar conic", model))?;
    debug!("polar {} traces {}", model.conic_identity, equation);
    let ce = AnalyzedEquation::new(&equation);
    let qc = QuadraticClassifier::new(ce.lhs());
    let mut g = qc.features(&ce)?;
    restate_as_polar(&mut g, ae, "polar form of a conic section")?;
    Ok(g)
}

/// `r = A*cos(n*theta) + B*sin(n*theta)`: n petals for odd n, 2n for even n.
pub fn solved_polar_rose(ae: &AnalyzedEquation, model: &PolarModel) -> Result<SolvedGraph, SolveError> {
    let [m0, m1, m2] = model.model_vector[..] else {
        return Err(wrong_model("polar rose", model));
    };
    if m0 == 0.0 {
        return Err(SolveError::Degenerate("rose without a radial term".to_string()));
    }
    let n = model.which_signature + 1;
    let petals = if n % 2 == 0 { 2 * n } else { n };
    let (a, b) = (-m1 / m0, -m2 / m0);
    let petal_length = amplitude(a, b);
    let theta = phase_in_rads(a, b) / n as f64;
    let mut g = polar_graph(ae, "polar rose")?;
    g.add_features(&["numPetals", "petalLength", "petalInclinations", "petalTips"]);
    g.put_feature("numPetals", petals.to_string())?;
    g.put_feature("petalLength", NumberModel::new(petal_length))?;
    let mut inclinations = Vec::with_capacity(petals);
    for i in 0..petals {
        let r = theta + 2.0 * PI * i as f64 / petals as f64;
        inclinations.push(r.to_degrees());
        g.put_feature("petalInclinations", AngleModel::from_radians(r))?;
        g.put_feature("petalTips", PointRT::new(petal_length, r).to_cartesian())?;
    }
    g.set_curve(CurveFeatures::Rose(RoseFeatures {
        petals,
        petal_length,
        petal_inclinations: inclinations,
    }));
    Ok(g)
}

/// `r^2 = A*cos(2*theta) + B*sin(2*theta)`
pub fn solved_polar_lemniscate(ae: &AnalyzedEquation, model: &PolarModel) -> Result<SolvedGraph, SolveError> {
    let [m0, m1, m2] = model.model_vector[..] else {
        return Err(wrong_model("polar lemniscate", model));
    };
    if m0 == 0.0 {
        return Err(SolveError::Degenerate("lemniscate without a radial term".to_string()));
    }
    let (a, b) = (-m1 / m0, -m2 / m0);
    let blade_length = amplitude(a, b).sqrt();
    let theta = 0.5 * phase_in_rads(a, b);
    let mut g = polar_graph(ae, "polar lemniscate")?;
    g.add_features(&["inclination", "bladeLength"]);
    g.put_feature("bladeLength", NumberModel::new(blade_length))?;
    g.put_feature("inclination", AngleModel::from_radians(theta))?;
    g.set_curve(CurveFeatures::Lemniscate(LemniscateFeatures {
        blade_length,
        inclination: theta.to_degrees(),
    }));
    Ok(g)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopCase {
    Cardioid,
    Loopy,
    Lumpy,
}

/// `graphObject` node listing `n` angles starting at `start`, `2*pi/n` apart
fn loop_angles(object: &str, start: f64, n: usize) -> MdeFeatureNode {
    let mut node = MdeFeatureNode::new();
    node.put("graphObject", object);
    for i in 0..n {
        let a = AngleModel::from_radians(start + 2.0 * PI * i as f64 / n as f64);
        node.put("angleInfo", a.to_feature_node());
    }
    node
}

fn axis_text(phi: f64) -> String {
    let deg = phi.to_degrees();
    format!(
        "{} to {}",
        compass_direction(180.0 + deg),
        compass_direction(deg)
    )
}

/// `r = A*cos(n*(theta - phi)) + B`: cardioids, limacons and their n-fold relatives.
pub fn solved_polar_trochoid(ae: &AnalyzedEquation, model: &PolarModel) -> Result<SolvedGraph, SolveError> {
    let mut mv = model.model_vector.clone();
    if mv.len() != 4 {
        return Err(wrong_model("polar trochoid", model));
    }
    let n = model.which_signature + 1;
    if mv[1] == 0.0 {
        return polar_graph(ae, "collection of radial lines through the origin");
    }
    let m1 = mv[1];
    for v in mv.iter_mut() {
        *v /= m1;
    }
    let big_a = amplitude(-mv[2], -mv[3]);
    let mut phi = phase_in_rads(-mv[2], -mv[3]) / n as f64;
    let mut big_b = -mv[0];
    if big_b < 0.0 {
        big_b = -big_b;
        phi += PI * ((n % 2) as f64 - 1.0 / n as f64);
    }
    let case = if (big_a - big_b).abs() < EPSILON * (big_a.abs() + big_b.abs()) {
        LoopCase::Cardioid
    } else if big_a > big_b {
        LoopCase::Loopy
    } else {
        LoopCase::Lumpy
    };
    let mut g = polar_graph(ae, "trochoid")?;
    g.add_features(&[
        "thetaMultiple",
        "hasLoops",
        "maxLength",
        "isConvex",
        "minLength",
        "loopAngles",
        "axis",
        "axisInclination",
        "oddMultiple",
    ]);
    g.put_feature("maxLength", NumberModel::new(big_a + big_b))?;
    g.put_feature("thetaMultiple", n.to_string())?;
    g.put_feature("oddMultiple", (n % 2 == 1).to_string())?;
    g.put_feature("hasLoops", (case == LoopCase::Loopy).to_string())?;
    let dented = big_b < (n * n) as f64 * big_a + big_a;
    if case == LoopCase::Lumpy {
        g.put_feature("isConvex", (!dented).to_string())?;
    }
    let min_length = (big_a - big_b).abs();
    let shape = if n == 1 {
        let (shape, axis) = match case {
            LoopCase::Cardioid => ("cardioid", phi),
            LoopCase::Loopy => ("loopWithinALoop", phi),
            LoopCase::Lumpy => ("eccentricCircle", phi + PI),
        };
        g.put_feature("axis", axis_text(axis))?;
        g.put_feature("axisInclination", AngleModel::from_radians(axis))?;
        shape
    } else {
        let offset = phi - PI / n as f64;
        match case {
            LoopCase::Cardioid => {
                g.put_feature("loopAngles", loop_angles("loops", phi, n))?;
                "pinchedLoops"
            }
            LoopCase::Lumpy => {
                g.put_feature("loopAngles", loop_angles("bulges", phi, n))?;
                if dented {
                    g.put_feature("loopAngles", loop_angles("dents", offset, n))?;
                }
                "lumpyCircle"
            }
            LoopCase::Loopy => {
                g.put_feature("loopAngles", loop_angles("longer loops", phi, n))?;
                if n % 2 == 0 {
                    g.put_feature("loopAngles", loop_angles("shorter loops", offset, n))?;
                    "alternatingLoops"
                } else {
                    "nestedLoops"
                }
            }
        }
    };
    if case != LoopCase::Cardioid {
        g.put_feature("minLength", NumberModel::new(min_length))?;
    }
    g.put_new_feature(GraphFeature::GraphName, shape)?;
    g.set_curve(CurveFeatures::Trochoid(TrochoidFeatures {
        shape: shape.to_string(),
        theta_multiple: n,
        max_length: big_a + big_b,
        min_length: if case == LoopCase::Cardioid { 0.0 } else { min_length },
    }));
    Ok(g)
}
