use crate::analysis::analyzed_data::DataError;
use crate::math::points::{MultiPointXY, PointXY};
use std::fmt;

/// One continuously drawable polyline of a curve. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphTrail {
    points: Vec<PointXY>,
}

impl GraphTrail {
    pub fn new(points: Vec<PointXY>) -> Result<Self, DataError> {
        if points.is_empty() {
            return Err(DataError::EmptyTrail);
        }
        Ok(GraphTrail { points })
    }

    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self, DataError> {
        GraphTrail::new(pairs.iter().map(|p| PointXY::new(p[0], p[1])).collect())
    }

    pub fn points(&self) -> &[PointXY] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// smallest x on the trail
    pub fn find_left(&self) -> f64 {
        self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
    }

    /// largest x on the trail
    pub fn find_right(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl fmt::Display for GraphTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GraphTrail[Length: {}", self.points.len())?;
        for p in &self.points {
            writeln!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

/// Indices where a new segment starts, bracketed by `0` and `data.len()`.
///
/// A segment ends where the number of solutions changes or where any branch jumps by more than
/// `max_jump` between neighbouring samples.
pub fn segment_boundaries(data: &[MultiPointXY], max_jump: f64) -> Vec<usize> {
    let mut r = vec![0];
    for i in 1..data.len() {
        let (prev, cur) = (&data[i - 1], &data[i]);
        if prev.len() != cur.len() {
            r.push(i);
            continue;
        }
        let jumped = cur
            .y_array
            .iter()
            .zip(prev.y_array.iter())
            .any(|(a, b)| (a - b).abs() > max_jump);
        if jumped {
            r.push(i);
        }
    }
    r.push(data.len());
    r
}

/// Splits samples into branches: within a segment the j-th solution of every sample forms
/// branch j.
pub fn branches(data: &[MultiPointXY], max_jump: f64) -> Vec<Vec<PointXY>> {
    let sb = segment_boundaries(data, max_jump);
    let mut r = Vec::new();
    for w in sb.windows(2) {
        let (low, high) = (w[0], w[1]);
        if low >= high {
            continue;
        }
        let num_branches = data[low].len();
        for j in 0..num_branches {
            r.push(
                data[low..high]
                    .iter()
                    .map(|p| PointXY::new(p.x, p.y_array[j]))
                    .collect(),
            );
        }
    }
    r
}

/// branches with at least two points
pub fn graph_trails(data: &[MultiPointXY], max_jump: f64) -> Vec<GraphTrail> {
    branches(data, max_jump)
        .into_iter()
        .filter(|b| b.len() > 1)
        .filter_map(|b| GraphTrail::new(b).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(ys: &[&[f64]]) -> Vec<MultiPointXY> {
        ys.iter()
            .enumerate()
            .map(|(i, y)| MultiPointXY::new(i as f64, y.to_vec()))
            .collect()
    }

    #[test]
    fn test_segments_split_on_count_change_and_jump() {
        let data = samples(&[&[], &[1.0, -1.0], &[2.0, -2.0], &[2.1], &[50.0], &[51.0]]);
        assert_eq!(segment_boundaries(&data, 20.0), vec![0, 1, 3, 4, 6]);
    }

    #[test]
    fn test_short_branches_are_dropped() {
        let data = samples(&[&[], &[1.0, -1.0], &[2.0, -2.0], &[2.1], &[50.0], &[51.0]]);
        let b = branches(&data, 20.0);
        // [1,2] and [-1,-2], then the lone 2.1 and [50, 51]
        assert_eq!(b.len(), 4);
        let trails = graph_trails(&data, 20.0);
        assert_eq!(trails.len(), 3);
        assert!(trails.iter().all(|t| t.len() >= 2));
        assert_eq!(trails[1].points()[1], PointXY::new(2.0, -2.0));
        assert_eq!(trails[2].find_left(), 4.0);
        assert_eq!(trails[2].find_right(), 5.0);
    }

    #[test]
    fn test_empty_trail_is_an_error() {
        assert!(GraphTrail::new(Vec::new()).is_err());
        let t = GraphTrail::from_pairs(&[[0.0, 1.0], [1.0, 2.0]]).unwrap();
        assert!(t.to_string().starts_with("GraphTrail[Length: 2"));
    }
}
