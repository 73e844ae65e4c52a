use crate::analysis::analyzed_data::AnalyzedData;
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::analysis::analyzed_item::AnalyzedItem;
use crate::analysis::graph_trail::GraphTrail;
use crate::classifier::polynomial_classifier::{PolynomialClassifier, PolynomialModel};
use crate::math::points::PointXY;
use crate::solved::curve_features::{CurveFeatures, FunctionAnalysis};
use crate::solved::intervals::{
    Direction, EndpointType, IntervalDescription, IntervalEndpoint, MIN_INTERVAL_LENGTH,
};
use crate::solved::rational_function::function_analysis_node;
use crate::solved::solved_graph::{GraphFeature, SolveError, SolvedGraph};
use crate::solver::feature_node::MdeFeatureNode;
use itertools::Itertools;
use log::debug;

////////////////////////////////////////////////////////////////
//  ENDPOINTS FROM SAMPLES
////////////////////////////////////////////////////////////////

/// Averages runs of endpoints closer than `MIN_INTERVAL_LENGTH` with no change in y between them.
fn merge_close(eps: &[IntervalEndpoint]) -> Vec<IntervalEndpoint> {
    let mut merged = Vec::new();
    let mut i = 0;
    while i < eps.len() {
        let (mut x, mut y, mut count) = (eps[i].x, eps[i].left_y, 1.0);
        let mut j = i + 1;
        while j < eps.len() {
            let (e0, e1) = (&eps[j - 1], &eps[j]);
            if e1.x - e0.x > MIN_INTERVAL_LENGTH
                || IntervalDescription::direction_between(e0, e1) != Direction::RemainsConstant
            {
                break;
            }
            x += e1.x;
            y += e1.left_y;
            count += 1.0;
            j += 1;
        }
        merged.push(IntervalEndpoint::at(PointXY::new(x / count, y / count)));
        i = j;
    }
    merged
}

fn interior_type(before: Direction, after: Direction) -> EndpointType {
    use Direction::*;
    match (before, after) {
        (RemainsConstant, _) | (_, RemainsConstant) => EndpointType::Undefined,
        (Increases, Decreases) => EndpointType::LocalMax,
        (Decreases, Increases) => EndpointType::LocalMin,
        (Increases, Increases) | (Decreases, Decreases) => EndpointType::InflectionPoint,
        _ => EndpointType::Undefined,
    }
}

/// Both ends of a trail plus every sample where the direction of travel changes,
/// with near coincident points merged and interior points classified by the
/// directions on either side.
pub fn find_endpoints(points: &[PointXY]) -> Vec<IntervalEndpoint> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if points.len() == 1 {
        return vec![IntervalEndpoint::with_type(*first, EndpointType::BoundaryPoint)];
    }
    let mut eps = vec![
        IntervalEndpoint::with_type(*first, EndpointType::BoundaryPoint),
        IntervalEndpoint::with_type(*last, EndpointType::BoundaryPoint),
    ];
    if points.len() == 2 {
        return eps;
    }
    let mut sense = IntervalDescription::direction_between(
        &IntervalEndpoint::at(points[0]),
        &IntervalEndpoint::at(points[1]),
    );
    for w in points[1..].windows(2) {
        let (e0, e1) = (IntervalEndpoint::at(w[0]), IntervalEndpoint::at(w[1]));
        let next = IntervalDescription::direction_between(&e0, &e1);
        if next != sense {
            eps.push(e0);
            sense = next;
        }
    }
    eps.sort_by(|a, b| a.x.total_cmp(&b.x));
    let mut eps = merge_close(&eps);
    if eps.len() > 2 {
        for i in 1..eps.len() - 1 {
            let before = IntervalDescription::direction_between(&eps[i - 1], &eps[i]);
            let after = IntervalDescription::direction_between(&eps[i], &eps[i + 1]);
            eps[i].kind = interior_type(before, after);
        }
    }
    eps
}

pub fn trail_analysis(trail: &GraphTrail) -> FunctionAnalysis {
    let endpoints = find_endpoints(trail.points());
    let intervals = endpoints
        .iter()
        .tuple_windows()
        .map(|(l, r)| IntervalDescription::new(*l, *r))
        .collect();
    FunctionAnalysis {
        degree: None,
        endpoints,
        intervals,
    }
}

////////////////////////////////////////////////////////////////
//  FUNCTION OVER INTERVAL
////////////////////////////////////////////////////////////////

/// Fills `g` with the sampled description of an item: its id, the number of trails, a fitted
/// conic when one was found, and one `FunctionAnalysisData` node per trail.
fn describe_samples(
    mut g: SolvedGraph,
    name: String,
    trails: &[GraphTrail],
    model: Option<&PolynomialModel>,
) -> Result<SolvedGraph, SolveError> {
    g.add_features(&["ComputedFunctionData", "DataID"]);
    g.put_feature("DataID", name.as_str())?;
    g.put_feature(GraphFeature::GraphName, "FunctionOverInterval")?;

    let mut node = MdeFeatureNode::new();
    node.put("NumSegments", trails.len().to_string());
    if let Some(PolynomialModel::Quadratic(q)) = model {
        node.put("AlternateEquation", format!("{} = 0", q.polynomial()));
    }
    node.add_key("FunctionAnalysisData");
    let analyses: Vec<FunctionAnalysis> = trails.iter().map(trail_analysis).collect();
    for fa in &analyses {
        node.put("FunctionAnalysisData", function_analysis_node(fa));
    }
    debug!("{}: {} trails described", name, analyses.len());
    g.put_feature("ComputedFunctionData", node)?;
    g.set_curve(CurveFeatures::EquationData(analyses));
    Ok(g)
}

/// Sampled description of an equation no closed-form family fits. `model` is the
/// polynomial fit of its samples, if any.
pub fn solved_equation_data(
    ae: &AnalyzedEquation,
    model: Option<&PolynomialModel>,
) -> Result<SolvedGraph, SolveError> {
    let g = SolvedGraph::xy_graph(ae, None)?;
    describe_samples(g, ae.name(), ae.graph_trails(), model)
}

/// Sampled description of a data series, with a polynomial fit of its resampled points.
pub fn solved_data(ad: &AnalyzedData) -> Result<SolvedGraph, SolveError> {
    let mut g = SolvedGraph::new();
    g.put_feature(GraphFeature::CoordinateSystem, "Cartesian")?;
    g.put_feature(GraphFeature::AbscissaSymbol, ad.x_name())?;
    g.put_feature(GraphFeature::OrdinateSymbol, ad.y_name())?;
    let pc = PolynomialClassifier::new(ad.points());
    describe_samples(g, ad.name(), ad.graph_trails(), pc.best_guess())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::bounds::Bounds;
    use approx::assert_relative_eq;

    fn pts(xy: &[(f64, f64)]) -> Vec<PointXY> {
        xy.iter().map(|&(x, y)| PointXY::new(x, y)).collect()
    }

    #[test]
    fn test_v_shape_has_minimum() {
        let p: Vec<PointXY> = (0..=20)
            .map(|i| PointXY::new(i as f64, (i as f64 - 10.0).abs()))
            .collect();
        let eps = find_endpoints(&p);
        assert_eq!(eps.len(), 3);
        assert_eq!(eps[0].kind, EndpointType::BoundaryPoint);
        assert_eq!(eps[1].kind, EndpointType::LocalMin);
        assert_relative_eq!(eps[1].x, 10.0);
        assert_relative_eq!(eps[1].left_y, 0.0);
        assert_eq!(eps[2].kind, EndpointType::BoundaryPoint);
    }

    #[test]
    fn test_plateau_ends_are_undefined() {
        let p = pts(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, 2.0),
            (4.0, 2.0),
            (5.0, 1.0),
            (6.0, 0.0),
        ]);
        let eps = find_endpoints(&p);
        let kinds: Vec<EndpointType> = eps.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EndpointType::BoundaryPoint,
                EndpointType::Undefined,
                EndpointType::Undefined,
                EndpointType::BoundaryPoint
            ]
        );
    }

    #[test]
    fn test_close_flat_points_are_merged() {
        let eps = merge_close(&[
            IntervalEndpoint::at(PointXY::new(1.0, 5.0)),
            IntervalEndpoint::at(PointXY::new(1.1, 5.0)),
            IntervalEndpoint::at(PointXY::new(3.0, 7.0)),
        ]);
        assert_eq!(eps.len(), 2);
        assert_relative_eq!(eps[0].x, 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_short_trails() {
        assert!(find_endpoints(&[]).is_empty());
        assert_eq!(find_endpoints(&pts(&[(1.0, 1.0)])).len(), 1);
        assert_eq!(find_endpoints(&pts(&[(1.0, 1.0), (2.0, 3.0)])).len(), 2);
    }

    #[test]
    fn test_data_features() {
        let x: Vec<f64> = (0..=40).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|v| (v - 10.0).abs()).collect();
        let mut ad = AnalyzedData::new("time", "height", &x, &y).unwrap();
        ad.compute_points(&Bounds::new(0.0, 20.0, 20.0, -20.0)).unwrap();
        let g = solved_data(&ad).unwrap();
        assert_eq!(g.graph_name().unwrap(), "FunctionOverInterval");
        assert_eq!(g.get_value("DataID").unwrap(), "height");
        assert_eq!(g.get_value(GraphFeature::AbscissaSymbol).unwrap(), "time");
        let data = g.get_nodes("ComputedFunctionData");
        assert_eq!(data[0].first_string("NumSegments").unwrap(), "1");
        let CurveFeatures::EquationData(analyses) = g.curve() else {
            panic!("expected sampled analysis");
        };
        let minima: Vec<&IntervalEndpoint> = analyses[0]
            .endpoints
            .iter()
            .filter(|e| e.kind == EndpointType::LocalMin)
            .collect();
        assert_eq!(minima.len(), 1);
        assert_relative_eq!(minima[0].x, 10.0, epsilon = 0.1);
    }

    #[test]
    fn test_equation_samples() {
        let mut ae = AnalyzedEquation::new("y = x^3 - 3*x");
        ae.compute_points(&Bounds::new(-3.0, 3.0, 20.0, -20.0)).unwrap();
        let g = solved_equation_data(&ae, None).unwrap();
        assert_eq!(g.get_value("DataID").unwrap(), "y = x^3 - 3*x");
        let fa = g.curve().function_analysis().unwrap();
        let count = |k: EndpointType| fa.endpoints.iter().filter(|e| e.kind == k).count();
        assert_eq!(count(EndpointType::LocalMax), 1);
        assert_eq!(count(EndpointType::LocalMin), 1);
    }
}
