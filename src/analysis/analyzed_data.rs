use crate::analysis::analyzed_item::AnalyzedItem;
use crate::analysis::graph_trail::{GraphTrail, graph_trails};
use crate::analysis::points_util::{copy_points, decimate_points, interpolate_points};
use crate::analysis::NUM_POINTS;
use crate::classifier::classifier::Classifier;
use crate::math::bounds::Bounds;
use crate::math::points::{MultiPointXY, PointXY};
use crate::solved::solved_graph::SolvedGraph;
use log::debug;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    LengthMismatch(usize, usize),
    Empty,
    InvertedRange(usize, usize),
    EmptyTrail,
    /// unreadable data file
    Io(String),
    /// 1-based data row that does not hold two numbers
    BadRecord(usize),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::LengthMismatch(nx, ny) => write!(
                f,
                "X and Y data arrays are not the same length ({} and {})",
                nx, ny
            ),
            DataError::Empty => write!(f, "X and Y data arrays must contain data"),
            DataError::InvertedRange(l, r) => write!(
                f,
                "can not have left bound > right bound (indices {} and {})",
                l, r
            ),
            DataError::EmptyTrail => write!(f, "a graph trail needs at least one point"),
            DataError::Io(e) => write!(f, "cannot read data: {}", e),
            DataError::BadRecord(row) => write!(f, "data row {} is not a pair of numbers", row),
        }
    }
}

impl std::error::Error for DataError {}

/// A named series of (x, y) samples.
///
/// The data is sorted by x on construction; when an x value occurs more than once the last y
/// given for it is kept.
#[derive(Debug, Clone)]
pub struct AnalyzedData {
    x_name: String,
    y_name: String,
    x_data: Vec<f64>,
    y_data: Vec<f64>,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    preferred_bounds: Bounds,
    left_index_bound: Option<usize>,
    right_index_bound: Option<usize>,
    points: Vec<MultiPointXY>,
    x_point_values: Vec<f64>,
    trails: Vec<GraphTrail>,
    features: Option<SolvedGraph>,
}

impl AnalyzedData {
    pub fn new(x_name: &str, y_name: &str, x: &[f64], y: &[f64]) -> Result<Self, DataError> {
        if x.len() != y.len() {
            return Err(DataError::LengthMismatch(x.len(), y.len()));
        }
        if x.is_empty() {
            return Err(DataError::Empty);
        }
        // reversed so that the stable sort puts the last duplicate first
        let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).rev().collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        pairs.dedup_by(|later, earlier| later.0 == earlier.0);
        let (x_data, y_data): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let x_min = x_data.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = x_data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let y_min = y_data.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = y_data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(AnalyzedData {
            x_name: x_name.to_string(),
            y_name: y_name.to_string(),
            x_data,
            y_data,
            x_min,
            x_max,
            y_min,
            y_max,
            preferred_bounds: Bounds::new(x_min, x_max, y_max, y_min),
            left_index_bound: None,
            right_index_bound: None,
            points: Vec::new(),
            x_point_values: Vec::new(),
            trails: Vec::new(),
            features: None,
        })
    }

    pub fn data_size(&self) -> usize {
        self.x_data.len()
    }

    pub fn minimum_x(&self) -> f64 {
        self.x_min
    }

    pub fn maximum_x(&self) -> f64 {
        self.x_max
    }

    pub fn minimum_y(&self) -> f64 {
        self.y_min
    }

    pub fn maximum_y(&self) -> f64 {
        self.y_max
    }

    pub fn x_name(&self) -> &str {
        &self.x_name
    }

    pub fn y_name(&self) -> &str {
        &self.y_name
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_data
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_data
    }

    /// index range of the raw data used by the last `compute_points`
    pub fn index_bounds(&self) -> Option<(usize, usize)> {
        self.left_index_bound.zip(self.right_index_bound)
    }

    /// smallest box holding every sample
    pub fn data_bounds(&self) -> Bounds {
        Bounds::new(self.x_min, self.x_max, self.y_max, self.y_min)
    }

    /// Index of the resampled point nearest to `x`, None outside the sampled range.
    pub fn point_index_near(&self, x: f64) -> Option<usize> {
        let xs = &self.x_point_values;
        let (first, last) = (*xs.first()?, *xs.last()?);
        if x < first || x > last {
            return None;
        }
        match xs.binary_search_by(|v| v.total_cmp(&x)) {
            Ok(i) => Some(i),
            Err(i) => {
                let i = i.min(xs.len() - 1);
                if i > 0 && (xs[i - 1] - x).abs() < (xs[i] - x).abs() {
                    Some(i - 1)
                } else {
                    Some(i)
                }
            }
        }
    }

    /// the raw sample at exactly `x`
    pub fn real_data_point(&self, x: f64) -> Option<PointXY> {
        self.x_data
            .binary_search_by(|v| v.total_cmp(&x))
            .ok()
            .map(|i| PointXY::new(self.x_data[i], self.y_data[i]))
    }

    /// first index whose x is not below `v`
    fn lower_index(&self, v: f64) -> usize {
        self.x_data.partition_point(|x| *x < v)
    }
}

impl AnalyzedItem for AnalyzedData {
    fn name(&self) -> String {
        self.y_name.clone()
    }

    fn compute_points(&mut self, b: &Bounds) -> Result<(), DataError> {
        let last = self.x_data.len() - 1;
        let mut left = self.lower_index(b.left).min(last);
        while left > 0 && self.x_data[left] > b.left {
            left -= 1;
        }
        let mut right = self.lower_index(b.right).min(last);
        while right < last && self.x_data[right] < b.right {
            right += 1;
        }
        if left > right {
            return Err(DataError::InvertedRange(left, right));
        }
        self.left_index_bound = Some(left);
        self.right_index_bound = Some(right);
        let max_jump = (b.top - b.bottom).abs();
        let total = right - left + 1;
        self.points = match total.cmp(&NUM_POINTS) {
            std::cmp::Ordering::Less => {
                interpolate_points(left, right, NUM_POINTS, &self.x_data, &self.y_data)
            }
            std::cmp::Ordering::Greater => {
                decimate_points(left, right, NUM_POINTS, &self.x_data, &self.y_data)
            }
            std::cmp::Ordering::Equal => copy_points(left, right, &self.x_data, &self.y_data),
        };
        debug!(
            "data {}: {} raw samples in [{}, {}] resampled to {}",
            self.y_name,
            total,
            b.left,
            b.right,
            self.points.len()
        );
        self.x_point_values = self.points.iter().map(|p| p.x).collect();
        self.trails = graph_trails(&self.points, max_jump);
        self.preferred_bounds = *b;
        Ok(())
    }

    fn preferred_bounds(&self) -> Bounds {
        self.preferred_bounds
    }

    fn update_features(&mut self) {
        self.features = Some(Classifier::Default.features_for_data(self));
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
        false
    }
}

impl PartialEq for AnalyzedData {
    fn eq(&self, other: &Self) -> bool {
        self.x_name == other.x_name
            && self.y_name == other.y_name
            && self.x_data == other.x_data
            && self.y_data == other.y_data
    }
}

impl fmt::Display for AnalyzedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalyzedData[xDataName={},yDataName={},length={}",
            self.x_name,
            self.y_name,
            self.x_data.len()
        )?;
        for (x, y) in self.x_data.iter().zip(self.y_data.iter()) {
            write!(f, ",({},{})", x, y)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parabola_data() -> AnalyzedData {
        let x: Vec<f64> = (0..=40).rev().map(|i| -2.0 + 0.1 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        AnalyzedData::new("t", "height", &x, &y).unwrap()
    }

    #[test]
    fn test_data_is_sorted_and_deduplicated() {
        let d = AnalyzedData::new("x", "y", &[3.0, 1.0, 2.0, 1.0], &[30.0, 10.0, 20.0, 11.0]).unwrap();
        assert_eq!(d.x_values(), &[1.0, 2.0, 3.0]);
        assert_eq!(d.y_values(), &[11.0, 20.0, 30.0]);
        assert_eq!(d.data_bounds(), Bounds::new(1.0, 3.0, 30.0, 11.0));
        assert_eq!(d.preferred_bounds(), d.data_bounds());
        assert_eq!(d.real_data_point(2.0), Some(PointXY::new(2.0, 20.0)));
        assert_eq!(d.real_data_point(2.5), None);
    }

    #[test]
    fn test_bad_input() {
        assert_eq!(
            AnalyzedData::new("x", "y", &[1.0], &[1.0, 2.0]).unwrap_err(),
            DataError::LengthMismatch(1, 2)
        );
        assert_eq!(AnalyzedData::new("x", "y", &[], &[]).unwrap_err(), DataError::Empty);
    }

    #[test]
    fn test_compute_points_interpolates_to_fixed_size() {
        let mut d = parabola_data();
        d.compute_points(&Bounds::new(-1.0, 1.0, 5.0, -1.0)).unwrap();
        assert_eq!(d.points().len(), NUM_POINTS);
        let (l, r) = d.index_bounds().unwrap();
        assert!((d.x_values()[l] - (-1.0)).abs() < 1e-9);
        assert!((d.x_values()[r] - 1.0).abs() < 1e-9);
        assert_eq!(d.graph_trails().len(), 1);
        assert_eq!(d.graph_trails()[0].len(), NUM_POINTS);
        assert_eq!(d.name(), "height");
        assert_eq!(d.point_index_near(-5.0), None);
        assert_eq!(d.point_index_near(d.points()[17].x), Some(17));
    }

    #[test]
    fn test_compute_points_decimates_large_series() {
        let x: Vec<f64> = (0..2000).map(|i| i as f64 * 0.01).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let mut d = AnalyzedData::new("x", "y", &x, &y).unwrap();
        d.compute_points(&d.data_bounds()).unwrap();
        assert_eq!(d.points().len(), NUM_POINTS);
        assert_eq!(d.points()[0].x, 0.0);
        assert_eq!(d.points()[NUM_POINTS - 1].x, x[1999]);
    }
}
