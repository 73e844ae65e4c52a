//! Features of lines, conic sections and degenerate conics, computed from the normal form
//! of a [`QuadraticClassifier`].
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::classifier::quadratic_classifier::{
    QuadraticClassifier, QuadraticType, equation_of_a_line, equation_of_a_vertical_line,
};
use crate::math::intervals::{EXCLUDE_HIGH_X, EXCLUDE_LOW_X, IntervalXY};
use crate::math::math_util::{normalize_angle_in_degrees, trim_double};
use crate::math::number_model::NumberModel;
use crate::math::points::PointXY;
use crate::solved::curve_features::{
    CurveFeatures, EllipseFeatures, HyperbolaFeatures, LineFeatures, LinePairFeatures,
    ParabolaFeatures,
};
use crate::solved::solved_graph::{GeneralDirection, GraphFeature, SolveError, SolvedGraph};
use log::debug;
use std::f64::consts::PI;

fn wrong_family(builder: &str, qc: &QuadraticClassifier) -> SolveError {
    SolveError::WrongFamily(format!("{} given a {}", builder, qc.identity()))
}

/// displacement of length `len` along `inclination` degrees
fn displacement(len: f64, inclination: f64) -> PointXY {
    let t = inclination.to_radians();
    PointXY::new(len * t.cos(), len * t.sin())
}

fn is_axis_parallel(inclination: f64) -> bool {
    let r = normalize_angle_in_degrees(inclination).abs();
    [0.0, 90.0, 180.0].iter().any(|a| (r - a).abs() < 1.0e-9)
}

////////////////////////////////////////////////////////////////
//  LINES
////////////////////////////////////////////////////////////////
pub fn solved_line(ae: &AnalyzedEquation, qc: &QuadraticClassifier) -> Result<SolvedGraph, SolveError> {
    let mut id = qc.identity();
    if !matches!(
        id,
        QuadraticType::HorizontalLine | QuadraticType::VerticalLine | QuadraticType::SlopingLine
    ) {
        return Err(wrong_family("line", qc));
    }
    let alpha = qc.rotation();
    let vars = ae.actual_variables();
    let mut coeffs = qc.original_coefficients();
    let [u0, v0] = qc.translation();
    let mut g = SolvedGraph::xy_graph(ae, None)?;
    g.add_features(&["slope", "inclination", "slopeDefined", "incrad", "reducedEquation"]);
    g.put_feature(GraphFeature::EquationType, "linear equation")?;
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    let mut reduced = None;
    if alpha != 0.0 {
        let axes = qc.new_axes();
        let (axis, offset) = match id {
            QuadraticType::HorizontalLine => (axes[1], v0),
            QuadraticType::VerticalLine => (axes[0], u0),
            _ => return Err(SolveError::Degenerate(format!("rotated {}", id))),
        };
        coeffs[3] = axis[0];
        coeffs[4] = axis[1];
        coeffs[5] = -offset;
        reduced = Some(if coeffs[4] != 0.0 {
            equation_of_a_line(PointXY::new(0.0, -coeffs[5] / coeffs[4]), alpha, &vars)
        } else {
            equation_of_a_vertical_line(-coeffs[5] / coeffs[3], &vars)
        });
        id = QuadraticType::SlopingLine;
    } else if coeffs[0] != 0.0 || coeffs[2] != 0.0 {
        match id {
            QuadraticType::HorizontalLine => {
                coeffs[3] = 0.0;
                coeffs[4] = 1.0;
                coeffs[5] = -v0;
                reduced = Some(equation_of_a_line(PointXY::new(0.0, v0), 0.0, &vars));
            }
            QuadraticType::VerticalLine => {
                coeffs[3] = 1.0;
                coeffs[4] = 0.0;
                coeffs[5] = -u0;
                reduced = Some(equation_of_a_vertical_line(u0, &vars));
            }
            _ => return Err(SolveError::Degenerate(format!("quadratic {}", id))),
        }
    }
    if let Some(r) = &reduced {
        g.put_feature("reducedEquation", r.as_str())?;
    }
    let (a, b, c) = (coeffs[3], coeffs[4], coeffs[5]);
    let all_x = IntervalXY::all_reals(&vars[0]);
    let all_y = IntervalXY::all_reals(&vars[1]);
    let mut slope = f64::INFINITY;
    let mut inclination = 90.0;
    if id != QuadraticType::VerticalLine {
        slope = -a / b + 0.0;
        let z = slope.atan();
        inclination = z.to_degrees();
        g.put_feature("slopeDefined", "true")?;
        g.put_feature("slope", NumberModel::new(slope))?;
        g.put_feature("incrad", NumberModel::new(z))?;
        g.put_feature("inclination", NumberModel::new(inclination))?;
        g.put_feature(GraphFeature::Domain, all_x.clone())?;
    }
    match id {
        QuadraticType::SlopingLine => {
            g.put_feature(GraphFeature::GraphName, "line")?;
            if slope > 0.0 {
                g.put_feature(GraphFeature::AscendingRegions, all_x)?;
            } else if slope < 0.0 {
                g.put_feature(GraphFeature::DescendingRegions, all_x)?;
            }
            g.put_feature(GraphFeature::Range, all_y)?;
        }
        QuadraticType::HorizontalLine => {
            g.put_feature(GraphFeature::GraphName, "horizontal line")?;
            g.put_feature(GraphFeature::Range, IntervalXY::new(&vars[1], -c / b, -c / b)?)?;
        }
        _ => {
            g.put_feature(GraphFeature::GraphName, "vertical line")?;
            g.put_feature("slopeDefined", "false")?;
            g.put_feature("inclination", NumberModel::new(90.0))?;
            g.put_feature("incrad", NumberModel::new(PI / 2.0))?;
            g.put_feature(GraphFeature::Domain, IntervalXY::new(&vars[0], -c / a, -c / a)?)?;
            g.put_feature(GraphFeature::Range, all_y)?;
        }
    }
    g.set_curve(CurveFeatures::Line(LineFeatures {
        slope,
        inclination,
        reduced_equation: reduced,
    }));
    Ok(g)
}

////////////////////////////////////////////////////////////////
//  PARABOLA
////////////////////////////////////////////////////////////////
pub fn solved_parabola(ae: &AnalyzedEquation, qc: &QuadraticClassifier) -> Result<SolvedGraph, SolveError> {
    if qc.identity() != QuadraticType::Parabola {
        return Err(wrong_family("parabola", qc));
    }
    let alpha = qc.rotation();
    let mut coeffs = qc.normalized_coefficients();
    let [u0, v0] = qc.translation();
    let vars = ae.actual_variables();
    let mut g = SolvedGraph::xy_graph(ae, Some("parabola"))?;
    g.add_features(&[
        "vertex",
        "focalLength",
        "focus",
        "directrix",
        "axis",
        "axisInclination",
        "directrixInclination",
        "openDirection",
    ]);
    g.put_feature(GraphFeature::EquationType, "conic section")?;
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    // scale so the linear term is -v (or -u): v = a (u - u0)^2 + e
    let vertical = coeffs[0].abs() > coeffs[1].abs();
    let linear = if vertical { coeffs[3] } else { coeffs[2] };
    if linear == 0.0 {
        return Err(SolveError::Degenerate("parabola without a linear term".to_string()));
    }
    let t = -1.0 / linear;
    for c in coeffs.iter_mut() {
        *c *= t;
    }
    let (opens, focal_length, vertex_uv, axis_inclination) = if vertical {
        let up = coeffs[0] > 0.0;
        (
            if up { GeneralDirection::Upwards } else { GeneralDirection::Downwards },
            (0.25 / coeffs[0]).abs(),
            [u0, coeffs[4]],
            if up { alpha + 90.0 } else { alpha - 90.0 },
        )
    } else {
        let right = coeffs[1] > 0.0;
        (
            if right { GeneralDirection::Right } else { GeneralDirection::Left },
            (0.25 / coeffs[1]).abs(),
            [coeffs[4], v0],
            if right { alpha } else { alpha + 180.0 },
        )
    };
    let directrix_inclination = normalize_angle_in_degrees(axis_inclination - 90.0);
    let axis_inclination = normalize_angle_in_degrees(axis_inclination);
    let vertex = qc.uv_to_xy(vertex_uv);
    let d = displacement(focal_length, axis_inclination);
    let focus = vertex.sum(&d);
    let directrix_point = vertex.difference(&d);
    g.put_feature("vertex", vertex)?;
    g.put_feature(
        "axis",
        format!("line given by {}", equation_of_a_line(vertex, axis_inclination, &vars)),
    )?;
    g.put_feature("axisInclination", NumberModel::new(axis_inclination))?;
    g.put_feature("directrixInclination", NumberModel::new(directrix_inclination))?;
    g.put_feature("focalLength", NumberModel::new(focal_length))?;
    g.put_feature("focus", focus)?;
    g.put_feature(
        "directrix",
        format!(
            "line given by {}",
            equation_of_a_line(directrix_point, directrix_inclination, &vars)
        ),
    )?;
    g.put_feature("openDirection", opens.to_string())?;
    if alpha == 0.0 {
        let x = &vars[0];
        let y = &vars[1];
        let (inf, ninf) = (f64::INFINITY, f64::NEG_INFINITY);
        match opens {
            GeneralDirection::Upwards | GeneralDirection::Downwards => {
                g.put_feature(GraphFeature::Domain, IntervalXY::all_reals(x))?;
                let up = opens == GeneralDirection::Upwards;
                let range = if up {
                    IntervalXY::new(y, vertex.y, inf)?.with_exclusions(EXCLUDE_HIGH_X)?
                } else {
                    IntervalXY::new(y, ninf, vertex.y)?.with_exclusions(EXCLUDE_LOW_X)?
                };
                g.put_feature(GraphFeature::Range, range)?;
                let right_half = IntervalXY::new(x, vertex.x, inf)?.with_exclusions(EXCLUDE_HIGH_X)?;
                let left_half = IntervalXY::new(x, ninf, vertex.x)?.with_exclusions(EXCLUDE_LOW_X)?;
                let (ascending, descending) = if up {
                    (right_half, left_half)
                } else {
                    (left_half, right_half)
                };
                g.put_feature(GraphFeature::AscendingRegions, ascending)?;
                g.put_feature(GraphFeature::DescendingRegions, descending)?;
            }
            _ => {
                let domain = if opens == GeneralDirection::Right {
                    IntervalXY::new(x, vertex.x, inf)?.with_exclusions(EXCLUDE_HIGH_X)?
                } else {
                    IntervalXY::new(x, ninf, vertex.x)?.with_exclusions(EXCLUDE_LOW_X)?
                };
                g.put_feature(GraphFeature::Domain, domain)?;
                g.put_feature(GraphFeature::Range, IntervalXY::all_reals(y))?;
            }
        }
    }
    debug!("parabola with vertex {} opening {}", vertex, opens);
    g.set_curve(CurveFeatures::Parabola(ParabolaFeatures {
        vertex,
        focus,
        focal_length,
        axis_inclination,
        opens,
    }));
    Ok(g)
}

////////////////////////////////////////////////////////////////
//  ELLIPSE
////////////////////////////////////////////////////////////////
pub fn solved_ellipse(ae: &AnalyzedEquation, qc: &QuadraticClassifier) -> Result<SolvedGraph, SolveError> {
    let alpha = qc.rotation();
    let center = qc.uv_to_xy(qc.translation());
    let vars = ae.actual_variables();
    let mut g = SolvedGraph::xy_graph(ae, None)?;
    g.add_features(&[
        "center",
        "focus",
        "focalLength",
        "eccentricity",
        "semiMajorAxis",
        "semiMinorAxis",
        "majorAxis",
        "minorAxis",
        "majorAxisInclination",
        "minorAxisInclination",
        "radius",
    ]);
    match qc.identity() {
        QuadraticType::SinglePoint => {
            g.put_feature(GraphFeature::GraphName, "single point")?;
            g.put_feature("center", center)?;
            g.set_curve(CurveFeatures::Ellipse(EllipseFeatures {
                center,
                semi_major_axis: 0.0,
                semi_minor_axis: 0.0,
                foci: vec![center],
                eccentricity: 0.0,
                major_axis_inclination: alpha,
            }));
            return Ok(g);
        }
        QuadraticType::Ellipse => {}
        _ => return Err(wrong_family("ellipse", qc)),
    }
    g.put_feature("center", center)?;
    g.put_feature(GraphFeature::EquationType, "conic section")?;
    g.put_feature(GraphFeature::GraphClosure, "true")?;
    let mut coeffs = qc.normalized_coefficients();
    let e = -coeffs[4];
    for c in coeffs.iter_mut() {
        *c /= e;
    }
    if coeffs[0] <= 0.0 || coeffs[1] <= 0.0 || coeffs[2] != 0.0 || coeffs[3] != 0.0 {
        return Err(SolveError::Degenerate("ellipse coefficients".to_string()));
    }
    if coeffs[0] == coeffs[1] {
        let r = 1.0 / coeffs[0].sqrt();
        g.put_feature(GraphFeature::GraphName, "circle")?;
        g.put_feature("radius", NumberModel::new(r))?;
        g.put_feature(GraphFeature::Domain, IntervalXY::new(&vars[0], center.x - r, center.x + r)?)?;
        g.put_feature(GraphFeature::Range, IntervalXY::new(&vars[1], center.y - r, center.y + r)?)?;
        g.set_curve(CurveFeatures::Ellipse(EllipseFeatures {
            center,
            semi_major_axis: r,
            semi_minor_axis: r,
            foci: vec![center],
            eccentricity: 0.0,
            major_axis_inclination: alpha,
        }));
        return Ok(g);
    }
    let horizontal = coeffs[0] < coeffs[1];
    let (a, b) = if horizontal {
        (1.0 / coeffs[0].sqrt(), 1.0 / coeffs[1].sqrt())
    } else {
        (1.0 / coeffs[1].sqrt(), 1.0 / coeffs[0].sqrt())
    };
    g.put_feature(GraphFeature::GraphName, "ellipse")?;
    g.put_feature("semiMajorAxis", NumberModel::new(a))?;
    g.put_feature("semiMinorAxis", NumberModel::new(b))?;
    let major = if horizontal { alpha } else { alpha + 90.0 };
    let minor = normalize_angle_in_degrees(major + 90.0);
    let major = normalize_angle_in_degrees(major);
    g.put_feature("majorAxisInclination", NumberModel::new(major))?;
    g.put_feature("minorAxisInclination", NumberModel::new(minor))?;
    let c = (a * a - b * b).sqrt();
    let d = displacement(c, major);
    let foci = vec![center.sum(&d), center.difference(&d)];
    g.put_feature("focalLength", NumberModel::new(c))?;
    g.put_feature("eccentricity", NumberModel::new(c / a))?;
    for f in &foci {
        g.put_feature("focus", *f)?;
    }
    g.put_feature("majorAxis", equation_of_a_line(center, major, &vars))?;
    g.put_feature("minorAxis", equation_of_a_line(center, minor, &vars))?;
    if alpha == 0.0 {
        let (dx, dy) = if horizontal { (a, b) } else { (b, a) };
        g.put_feature(GraphFeature::Domain, IntervalXY::new(&vars[0], center.x - dx, center.x + dx)?)?;
        g.put_feature(GraphFeature::Range, IntervalXY::new(&vars[1], center.y - dy, center.y + dy)?)?;
    }
    g.set_curve(CurveFeatures::Ellipse(EllipseFeatures {
        center,
        semi_major_axis: a,
        semi_minor_axis: b,
        foci,
        eccentricity: c / a,
        major_axis_inclination: major,
    }));
    Ok(g)
}

////////////////////////////////////////////////////////////////
//  HYPERBOLA
////////////////////////////////////////////////////////////////
pub fn solved_hyperbola(ae: &AnalyzedEquation, qc: &QuadraticClassifier) -> Result<SolvedGraph, SolveError> {
    if qc.identity() != QuadraticType::Hyperbola {
        return Err(wrong_family("hyperbola", qc));
    }
    let alpha = qc.rotation();
    let center = qc.uv_to_xy(qc.translation());
    let vars = ae.actual_variables();
    let mut g = SolvedGraph::xy_graph(ae, Some("hyperbola"))?;
    g.add_features(&[
        "center",
        "focus",
        "focalLength",
        "eccentricity",
        "transverseAxis",
        "conjugateAxis",
        "transverseAxisInclination",
        "conjugateAxisInclination",
        "semiTransverseAxis",
        "semiConjugateAxis",
        "vertex",
        "asymptotes",
    ]);
    g.put_feature(GraphFeature::EquationType, "conic section")?;
    g.put_feature("center", center)?;
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    let mut coeffs = qc.normalized_coefficients();
    if coeffs[4] == 0.0 {
        return Err(SolveError::Degenerate("hyperbola without a constant".to_string()));
    }
    let e = -coeffs[4];
    for c in coeffs.iter_mut() {
        *c /= e;
    }
    if coeffs[0] * coeffs[1] >= 0.0 || coeffs[2] != 0.0 || coeffs[3] != 0.0 {
        return Err(SolveError::Degenerate("hyperbola coefficients".to_string()));
    }
    let horizontal = coeffs[0] > 0.0;
    let (a, b, transverse, asymptote) = if horizontal {
        let (a, b) = (1.0 / coeffs[0].sqrt(), 1.0 / (-coeffs[1]).sqrt());
        (a, b, alpha, (b / a).atan().to_degrees())
    } else {
        let (a, b) = (1.0 / coeffs[1].sqrt(), 1.0 / (-coeffs[0]).sqrt());
        (a, b, alpha + 90.0, (a / b).atan().to_degrees())
    };
    g.put_feature("semiTransverseAxis", NumberModel::new(a))?;
    g.put_feature("semiConjugateAxis", NumberModel::new(b))?;
    let conjugate = normalize_angle_in_degrees(transverse + 90.0);
    let transverse = normalize_angle_in_degrees(transverse);
    g.put_feature("transverseAxisInclination", NumberModel::new(transverse))?;
    g.put_feature("conjugateAxisInclination", NumberModel::new(conjugate))?;
    let c = (a * a + b * b).sqrt();
    let ecc = c / a;
    let vd = displacement(a, transverse);
    let fd = PointXY::new(ecc * vd.x, ecc * vd.y);
    let foci = [center.sum(&fd), center.difference(&fd)];
    let vertices = [center.sum(&vd), center.difference(&vd)];
    g.put_feature("focalLength", NumberModel::new(c))?;
    g.put_feature("eccentricity", NumberModel::new(ecc))?;
    for p in foci {
        g.put_feature("focus", p)?;
    }
    for p in vertices {
        g.put_feature("vertex", p)?;
    }
    g.put_feature("transverseAxis", equation_of_a_line(center, transverse, &vars))?;
    g.put_feature("conjugateAxis", equation_of_a_line(center, conjugate, &vars))?;
    let asymptotes = [alpha + asymptote, alpha - asymptote];
    for inc in asymptotes {
        g.put_feature("asymptotes", equation_of_a_line(center, inc, &vars))?;
    }
    hyperbola_domain_and_range(&mut g, &vars, center, a, horizontal, alpha, asymptotes)?;
    g.set_curve(CurveFeatures::Hyperbola(HyperbolaFeatures {
        center,
        semi_transverse_axis: a,
        semi_conjugate_axis: b,
        foci,
        vertices,
        eccentricity: ecc,
        transverse_axis_inclination: transverse,
        asymptotes,
    }));
    Ok(g)
}

/// Unrotated hyperbolas get the two rays of the transverse direction; rotated ones whose
/// asymptotes are vertical and horizontal exclude the asymptotes. Others get no domain.
fn hyperbola_domain_and_range(
    g: &mut SolvedGraph,
    vars: &[String; 2],
    center: PointXY,
    a: f64,
    horizontal: bool,
    alpha: f64,
    asymptotes: [f64; 2],
) -> Result<(), SolveError> {
    let [x, y] = vars;
    let rays = |v: &str, c: f64| {
        format!(
            "{{{} such that {} <= {} or {} >= {}}}",
            v,
            v,
            trim_double(c - a, 3),
            v,
            trim_double(c + a, 3)
        )
    };
    let except = |v: &str, c: f64| {
        format!(
            "{{{} such that {} is all real numbers except where {} = {}}}",
            v,
            v,
            v,
            trim_double(c, 3)
        )
    };
    if alpha == 0.0 {
        if horizontal {
            g.put_feature(GraphFeature::Domain, rays(x, center.x))?;
            g.put_feature(GraphFeature::Range, IntervalXY::all_reals(y))?;
        } else {
            g.put_feature(GraphFeature::Domain, IntervalXY::all_reals(x))?;
            g.put_feature(GraphFeature::Range, rays(y, center.y))?;
        }
    } else if asymptotes.iter().all(|i| is_axis_parallel(*i)) {
        g.put_feature(GraphFeature::Domain, except(x, center.x))?;
        g.put_feature(GraphFeature::Range, except(y, center.y))?;
    }
    Ok(())
}

////////////////////////////////////////////////////////////////
//  DEGENERATE CONICS
////////////////////////////////////////////////////////////////
pub fn solved_two_lines(ae: &AnalyzedEquation, qc: &QuadraticClassifier) -> Result<SolvedGraph, SolveError> {
    let alpha = qc.rotation();
    let inclination = match qc.identity() {
        QuadraticType::TwoHorizontalLines => alpha,
        QuadraticType::TwoVerticalLines => alpha + 90.0,
        _ => return Err(wrong_family("two lines", qc)),
    };
    let vars = ae.actual_variables();
    let mut g = SolvedGraph::xy_graph(ae, Some("two lines"))?;
    g.add_features(&["inclination", "separation", "equationStrings"]);
    g.put_feature(GraphFeature::EquationType, "degenerate parabola")?;
    g.put_feature(GraphFeature::GraphClosure, "false")?;
    g.put_feature("inclination", NumberModel::new(inclination))?;
    let mut y_ints = ae.y_intercepts();
    y_ints.dedup();
    let mut x_ints = ae.x_intercepts();
    x_ints.dedup();
    let (separation, points) = if inclination.abs() <= 45.0 {
        let d = match y_ints.as_slice() {
            [a, b] => (a - b).abs(),
            _ => 0.0,
        };
        let points: Vec<PointXY> = y_ints.iter().map(|y| PointXY::new(0.0, *y)).collect();
        (d * inclination.to_radians().cos(), points)
    } else {
        let d = match x_ints.as_slice() {
            [a, b] => (a - b).abs(),
            _ => 0.0,
        };
        let points: Vec<PointXY> = x_ints.iter().map(|x| PointXY::new(*x, 0.0)).collect();
        (d * inclination.to_radians().sin().abs(), points)
    };
    g.put_feature("separation", NumberModel::new(separation))?;
    let equations: Vec<String> = points
        .iter()
        .take(2)
        .map(|p| equation_of_a_line(*p, inclination, &vars))
        .collect();
    for e in &equations {
        g.put_feature("equationStrings", e.as_str())?;
    }
    g.set_curve(CurveFeatures::TwoLines(LinePairFeatures {
        inclinations: vec![inclination],
        separation: Some(separation),
        intersection: None,
        equations,
    }));
    Ok(g)
}

pub fn solved_two_intersecting_lines(
    ae: &AnalyzedEquation,
    qc: &QuadraticClassifier,
) -> Result<SolvedGraph, SolveError> {
    if qc.identity() != QuadraticType::Cross {
        return Err(wrong_family("two intersecting lines", qc));
    }
    let alpha = qc.rotation();
    let coeffs = qc.normalized_coefficients();
    let a = coeffs[0].abs().sqrt();
    let b = coeffs[1].abs().sqrt();
    let intersection = qc.uv_to_xy(qc.translation());
    let vars = ae.actual_variables();
    let phi = a.atan2(b).to_degrees();
    let inclinations = vec![alpha - phi, alpha + phi];
    let mut g = SolvedGraph::xy_graph(ae, Some("two intersecting lines"))?;
    g.add_features(&["intersectionPoint", "inclination", "equationStrings"]);
    g.put_feature("intersectionPoint", intersection)?;
    let equations: Vec<String> = inclinations
        .iter()
        .map(|i| equation_of_a_line(intersection, *i, &vars))
        .collect();
    for (i, e) in inclinations.iter().zip(&equations) {
        g.put_feature("inclination", NumberModel::new(*i))?;
        g.put_feature("equationStrings", e.as_str())?;
    }
    g.set_curve(CurveFeatures::IntersectingLines(LinePairFeatures {
        inclinations,
        separation: None,
        intersection: Some(intersection),
        equations,
    }));
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn features(s: &str) -> SolvedGraph {
        let ae = AnalyzedEquation::new(s);
        QuadraticClassifier::new(ae.lhs()).features(&ae).unwrap()
    }

    #[test]
    fn test_sloping_line() {
        let g = features("y = 2*x + 3");
        assert_eq!(g.graph_name().unwrap(), "line");
        assert_relative_eq!(g.get_number("slope").unwrap(), 2.0);
        assert_eq!(g.y_intercepts(), vec![3.0]);
        assert_eq!(g.x_intercepts(), vec![-1.5]);
        assert_eq!(g.curve().slope(), Some(2.0));
        assert!(g.get_values(GraphFeature::AscendingRegions).unwrap().len() == 1);
    }

    #[test]
    fn test_horizontal_and_vertical_lines() {
        let g = features("y = 3");
        assert_eq!(g.graph_name().unwrap(), "horizontal line");
        assert_eq!(g.get_number("slope").unwrap(), 0.0);
        assert_eq!(g.range().unwrap(), "{y such that 3 <= y <= 3}");
        let g = features("x = -2");
        assert_eq!(g.graph_name().unwrap(), "vertical line");
        assert_eq!(g.get_value("slopeDefined").unwrap(), "false");
        assert_eq!(g.domain().unwrap(), "{x such that -2 <= x <= -2}");
    }

    #[test]
    fn test_parabola_opening_up() {
        let g = features("y = x^2 - 4");
        assert_eq!(g.graph_name().unwrap(), "parabola");
        let v = g.curve().vertex().unwrap();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, -4.0, epsilon = 1e-12);
        assert_eq!(g.get_value("openDirection").unwrap(), "upwards");
        assert_relative_eq!(g.curve().focal_length().unwrap(), 0.25);
        let mut xi = g.x_intercepts();
        xi.sort_by(f64::total_cmp);
        assert_eq!(xi, vec![-2.0, 2.0]);
        assert_eq!(g.y_intercepts(), vec![-4.0]);
        assert_eq!(g.range().unwrap(), "{y such that -4 <= y < infinity}");
    }

    #[test]
    fn test_parabola_opening_left() {
        let g = features("x = -(y - 1)^2");
        assert_eq!(g.get_value("openDirection").unwrap(), "to the left");
        let v = g.curve().vertex().unwrap();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_circle_and_ellipse() {
        let g = features("x^2 + y^2 = 4");
        assert_eq!(g.graph_name().unwrap(), "circle");
        assert_relative_eq!(g.get_number("radius").unwrap(), 2.0, epsilon = 1e-12);
        let g = features("x^2/25 + y^2/9 = 1");
        assert_eq!(g.graph_name().unwrap(), "ellipse");
        let CurveFeatures::Ellipse(e) = g.curve() else {
            panic!("expected an ellipse");
        };
        assert_relative_eq!(e.semi_major_axis, 5.0, epsilon = 1e-9);
        assert_relative_eq!(e.semi_minor_axis, 3.0, epsilon = 1e-9);
        assert_relative_eq!(e.eccentricity, 0.8, epsilon = 1e-9);
        assert_relative_eq!(e.foci[0].x.abs(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hyperbola() {
        let g = features("x^2 - y^2 = 1");
        assert_eq!(g.graph_name().unwrap(), "hyperbola");
        let a = g.curve().asymptote_inclinations().unwrap();
        assert_relative_eq!(a[0], 45.0, epsilon = 1e-9);
        assert_relative_eq!(a[1], -45.0, epsilon = 1e-9);
        assert_eq!(g.domain().unwrap(), "{x such that x <= -1 or x >= 1}");
        assert_eq!(g.get_values("vertex").unwrap().len(), 2);
    }

    #[test]
    fn test_two_intersecting_lines() {
        let g = features("(x-2y+1)*(2x+y+1) = 0");
        assert_eq!(g.graph_name().unwrap(), "two intersecting lines");
        let CurveFeatures::IntersectingLines(l) = g.curve() else {
            panic!("expected two intersecting lines");
        };
        assert_relative_eq!((l.inclinations[1] - l.inclinations[0]).abs(), 90.0, epsilon = 1e-9);
        assert_eq!(l.equations.len(), 2);
        // x - 2y + 1 = 0 and 2x + y + 1 = 0 meet at (-0.6, 0.2)
        let p = l.intersection.unwrap();
        assert_relative_eq!(p.x, -0.6, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_two_horizontal_lines() {
        let g = features("y^2 = 4");
        assert_eq!(g.graph_name().unwrap(), "two lines");
        assert_relative_eq!(g.get_number("separation").unwrap(), 4.0, epsilon = 1e-9);
        assert_eq!(g.get_values("equationStrings").unwrap().len(), 2);
    }

    #[test]
    fn test_wrong_family() {
        let ae = AnalyzedEquation::new("y = 2*x + 3");
        let qc = QuadraticClassifier::new(ae.lhs());
        assert!(matches!(solved_parabola(&ae, &qc), Err(SolveError::WrongFamily(_))));
    }
}
