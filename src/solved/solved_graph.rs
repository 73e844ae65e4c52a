use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::math::intervals::{IntervalError, IntervalXY};
use crate::math::math_util::trim_double;
use crate::math::number_model::{AngleModel, NumberModel};
use crate::math::points::{PointRT, PointXY};
use crate::solved::curve_features::CurveFeatures;
use crate::solver::feature_node::{FeatureError, FeatureValue, MdeFeatureNode};
use crate::solver::feature_node_manager::{
    GRAPH_DATA_NAME, GRAPH_DATA_PATH, MDE_NAME, MdeFeatureNodeManager, ROOT_PATH, WhichNode,
};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

/// Keys every solved graph declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum GraphFeature {
    GraphName,
    GraphBoundaries,
    EquationType,
    EquationPrint,
    OriginalEquationPrint,
    GraphDescriptionDomain,
    GraphDescriptionRange,
    Domain,
    Range,
    AbscissaSymbol,
    OrdinateSymbol,
    AbscissaLabel,
    OrdinateLabel,
    CoordinateSystem,
    GraphClosure,
    XIntercepts,
    YIntercepts,
    Maxima,
    Minima,
    AscendingRegions,
    DescendingRegions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum CompassDirection {
    East,
    ENE,
    NE,
    NNE,
    North,
    NNW,
    NW,
    WNW,
    West,
    WSW,
    SW,
    SSW,
    South,
    SSE,
    SE,
    ESE,
}

/// Nearest of the 16 compass points to an angle measured counterclockwise from east.
pub fn compass_direction(theta: f64) -> CompassDirection {
    let turns = (theta + 11.25) / 360.0;
    let phi = 360.0 * (turns - turns.floor());
    let n = ((phi / 22.5).floor() as usize).min(15);
    CompassDirection::iter().nth(n).unwrap_or(CompassDirection::East)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum GeneralDirection {
    Nowhere,
    Upwards,
    Downwards,
    Right,
    Left,
}

impl fmt::Display for GeneralDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GeneralDirection::Nowhere => "nowhere",
            GeneralDirection::Upwards => "upwards",
            GeneralDirection::Downwards => "downwards",
            GeneralDirection::Right => "to the right",
            GeneralDirection::Left => "to the left",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised while building the features of a curve
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// the builder does not describe this kind of curve
    WrongFamily(String),
    /// coefficients do not have the shape the builder needs
    Degenerate(String),
    /// a numeric classifier found no model within tolerance
    NoModel(String),
    Feature(FeatureError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::WrongFamily(s) => write!(f, "Wrong curve family: {}", s),
            SolveError::Degenerate(s) => write!(f, "Degenerate equation: {}", s),
            SolveError::NoModel(s) => write!(f, "No {} model fits the samples", s),
            SolveError::Feature(e) => write!(f, "Feature tree error: {}", e),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<FeatureError> for SolveError {
    fn from(e: FeatureError) -> Self {
        SolveError::Feature(e)
    }
}

impl From<IntervalError> for SolveError {
    fn from(e: IntervalError) -> Self {
        SolveError::Degenerate(e.to_string())
    }
}

impl From<NumberModel> for FeatureValue {
    fn from(n: NumberModel) -> Self {
        FeatureValue::Node(n.to_feature_node())
    }
}

impl From<AngleModel> for FeatureValue {
    fn from(a: AngleModel) -> Self {
        FeatureValue::Node(a.to_feature_node())
    }
}

impl From<PointXY> for FeatureValue {
    fn from(p: PointXY) -> Self {
        FeatureValue::Text(p.to_string())
    }
}

impl From<PointRT> for FeatureValue {
    fn from(p: PointRT) -> Self {
        FeatureValue::Text(p.to_string())
    }
}

impl From<IntervalXY> for FeatureValue {
    fn from(i: IntervalXY) -> Self {
        FeatureValue::Text(i.to_string())
    }
}

/// Features of one analyzed item: the feature tree rooted at `/MDE/GraphData` plus the
/// numeric payload of the recognised curve.
#[derive(Debug, Clone)]
pub struct SolvedGraph {
    tree: MdeFeatureNodeManager,
    curve: CurveFeatures,
}

impl Default for SolvedGraph {
    fn default() -> Self {
        SolvedGraph::new()
    }
}

impl SolvedGraph {
    pub fn new() -> Self {
        let mut tree = MdeFeatureNodeManager::new();
        tree.add_node(ROOT_PATH, MDE_NAME);
        // both paths were just created, so they resolve
        let _ = tree.set_current(MDE_NAME);
        tree.add_node(ROOT_PATH, GRAPH_DATA_NAME);
        let _ = tree.set_current(GRAPH_DATA_NAME);
        for feature in GraphFeature::iter() {
            tree.add_key(feature.as_ref());
        }
        SolvedGraph {
            tree,
            curve: CurveFeatures::Unclassified,
        }
    }

    /// Cartesian description shared by every equation: symbols, printed forms and intercepts.
    /// `null set` and `all points` graphs have no intercepts.
    pub fn xy_graph(ae: &AnalyzedEquation, graph_name: Option<&str>) -> Result<SolvedGraph, SolveError> {
        let mut g = SolvedGraph::new();
        let mut null_or_all = false;
        if let Some(name) = graph_name {
            g.put_feature(GraphFeature::GraphName, name)?;
            null_or_all = name == "null set" || name == "all points";
        }
        g.put_feature(GraphFeature::CoordinateSystem, "Cartesian")?;
        g.put_feature(GraphFeature::EquationPrint, ae.print_equation())?;
        if !ae.parameters().is_empty() {
            g.put_feature(GraphFeature::OriginalEquationPrint, ae.print_original_equation())?;
        }
        let [x, y] = ae.actual_variables();
        g.put_feature(GraphFeature::AbscissaSymbol, x)?;
        g.put_feature(GraphFeature::OrdinateSymbol, y)?;
        if null_or_all {
            return Ok(g);
        }
        let mut xi = ae.x_intercepts();
        xi.dedup();
        for v in xi {
            g.put_feature(GraphFeature::XIntercepts, trim_double(v, 6))?;
        }
        let mut yi = ae.y_intercepts();
        yi.dedup();
        for v in yi {
            g.put_feature(GraphFeature::YIntercepts, trim_double(v, 6))?;
        }
        Ok(g)
    }

    ////////////////////////////////////////////////////////////////
    //  WRITING
    ////////////////////////////////////////////////////////////////
    /// declares keys of the current node, keeping values already stored under them
    pub fn add_features(&mut self, keys: &[&str]) {
        for k in keys {
            if !self.tree.current().has_key(k) {
                self.tree.add_key(k);
            }
        }
    }

    /// appends a value to a declared key
    pub fn put_feature(&mut self, key: impl AsRef<str>, value: impl Into<FeatureValue>) -> Result<(), FeatureError> {
        self.tree.add_value(key.as_ref(), value)
    }

    /// (re)declares `key` and stores `value` as its only value
    pub fn put_new_feature(&mut self, key: impl AsRef<str>, value: impl Into<FeatureValue>) -> Result<(), FeatureError> {
        self.tree.add_key(key.as_ref());
        self.tree.add_value(key.as_ref(), value)
    }

    /// appends an empty sub-node under `key` of the current node
    pub fn add_feature_node(&mut self, key: &str) {
        self.tree.add_node(ROOT_PATH, key);
    }

    /// Appends `value` under `key` in the last node matched by the relative `path`,
    /// declaring the key there when needed.
    pub fn put_feature_at(&mut self, path: &str, key: &str, value: impl Into<FeatureValue>) -> Result<(), FeatureError> {
        let declared = self
            .tree
            .get_nodes(path)
            .last()
            .map(|n| n.has_key(key))
            .ok_or_else(|| FeatureError::PathNotFound(path.to_string()))?;
        if !declared {
            self.tree.add_key_at(path, key, WhichNode::Last)?;
        }
        self.tree.add_value_at(path, key, value, WhichNode::Last)
    }

    pub fn set_curve(&mut self, curve: CurveFeatures) {
        self.curve = curve;
    }

    ////////////////////////////////////////////////////////////////
    //  READING
    ////////////////////////////////////////////////////////////////
    pub fn curve(&self) -> &CurveFeatures {
        &self.curve
    }

    /// the node holding the graph features
    pub fn graph_data(&self) -> &MdeFeatureNode {
        self.tree.current()
    }

    /// first value of `key` among the nodes matched by `path`
    pub fn get_value_at(&self, path: &str, key: &str) -> Result<String, FeatureError> {
        self.tree
            .get_nodes(path)
            .iter()
            .find_map(|n| n.first_string(key).ok())
            .ok_or_else(|| FeatureError::MissingValue(key.to_string()))
    }

    /// text values of `key` in the first node matched by `path` that declares it
    pub fn get_values_at(&self, path: &str, key: &str) -> Result<Vec<String>, FeatureError> {
        self.tree
            .get_nodes(path)
            .iter()
            .find_map(|n| n.child_strings(key).ok())
            .ok_or_else(|| FeatureError::UndeclaredKey(key.to_string()))
    }

    pub fn get_value(&self, key: impl AsRef<str>) -> Result<String, FeatureError> {
        self.get_value_at(GRAPH_DATA_PATH, key.as_ref())
    }

    pub fn get_values(&self, key: impl AsRef<str>) -> Result<Vec<String>, FeatureError> {
        self.get_values_at(GRAPH_DATA_PATH, key.as_ref())
    }

    /// sub-nodes stored under `key` of the graph data node
    pub fn get_nodes(&self, key: &str) -> Vec<&MdeFeatureNode> {
        self.tree.get_nodes(&format!("{}{}", GRAPH_DATA_PATH, key))
    }

    /// decimal value of a number stored under `key`
    pub fn get_number(&self, key: &str) -> Result<f64, FeatureError> {
        let s = self.get_value_at(&format!("{}{}", GRAPH_DATA_PATH, key), "decimalValue")?;
        s.parse::<f64>()
            .map_err(|_| FeatureError::MissingValue(format!("{}/decimalValue", key)))
    }

    fn numbers(&self, key: GraphFeature) -> Vec<f64> {
        self.get_values(key)
            .unwrap_or_default()
            .iter()
            .filter_map(|s| s.parse::<f64>().ok())
            .collect()
    }

    pub fn x_intercepts(&self) -> Vec<f64> {
        self.numbers(GraphFeature::XIntercepts)
    }

    pub fn y_intercepts(&self) -> Vec<f64> {
        self.numbers(GraphFeature::YIntercepts)
    }

    pub fn domain(&self) -> Result<String, FeatureError> {
        self.get_value(GraphFeature::Domain)
    }

    pub fn range(&self) -> Result<String, FeatureError> {
        self.get_value(GraphFeature::Range)
    }

    pub fn graph_name(&self) -> Option<String> {
        self.get_value(GraphFeature::GraphName).ok()
    }

    /// every `key: value` pair of the graph data node with a value, nested nodes inlined
    pub fn feature_pairs(&self) -> Vec<(String, String)> {
        let node = self.graph_data();
        node.keys()
            .flat_map(|k| {
                node.values(k)
                    .unwrap_or_default()
                    .iter()
                    .map(move |v| (k.to_string(), v.to_string()))
            })
            .collect()
    }

    pub fn to_xml(&self) -> String {
        self.tree.to_xml()
    }
}

impl fmt::Display for SolvedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_xml())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_schema() {
        let g = SolvedGraph::new();
        for f in GraphFeature::iter() {
            assert!(g.graph_data().has_key(f.as_ref()), "{} missing", f);
        }
        assert_eq!(GraphFeature::XIntercepts.to_string(), "xIntercepts");
        assert!(g.get_values(GraphFeature::Domain).unwrap().is_empty());
        assert!(matches!(
            g.get_value(GraphFeature::Domain),
            Err(FeatureError::MissingValue(_))
        ));
    }

    #[test]
    fn test_undeclared_key_is_rejected() {
        let mut g = SolvedGraph::new();
        assert_eq!(
            g.put_feature("vertex", PointXY::new(0.0, 1.0)),
            Err(FeatureError::UndeclaredKey("vertex".to_string()))
        );
        g.add_features(&["vertex"]);
        g.put_feature("vertex", PointXY::new(0.0, 1.0)).unwrap();
        assert_eq!(g.get_value("vertex").unwrap(), "(0, 1)");
    }

    #[test]
    fn test_numbers_become_nodes() {
        let mut g = SolvedGraph::new();
        g.put_new_feature("slope", NumberModel::new(0.5)).unwrap();
        assert_eq!(g.get_number("slope").unwrap(), 0.5);
        assert!(g.to_xml().contains("<slope>\n<decimalValue>0.5</decimalValue>"));
    }

    #[test]
    fn test_nested_features() {
        let mut g = SolvedGraph::new();
        g.add_feature_node("FunctionAnalysisData");
        g.put_feature_at("FunctionAnalysisData", "degree", "3").unwrap();
        g.put_feature_at("FunctionAnalysisData", "EndPoint", "a").unwrap();
        g.put_feature_at("FunctionAnalysisData", "EndPoint", "b").unwrap();
        let nodes = g.get_nodes("FunctionAnalysisData");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].child_strings("EndPoint").unwrap(), vec!["a", "b"]);
        assert!(g.put_feature_at("Nothing", "x", "1").is_err());
    }

    #[test]
    fn test_compass_points() {
        assert_eq!(compass_direction(0.0), CompassDirection::East);
        assert_eq!(compass_direction(90.0), CompassDirection::North);
        assert_eq!(compass_direction(-90.0), CompassDirection::South);
        assert_eq!(compass_direction(200.0), CompassDirection::WSW);
        assert_eq!(compass_direction(350.0), CompassDirection::East);
        assert_eq!(GeneralDirection::Right.to_string(), "to the right");
    }
}
