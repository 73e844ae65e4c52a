use crate::math::math_util::trim_double;
use crate::solver::feature_node::MdeFeatureNode;
use std::fmt;

const DISPLAY_DIGITS: i32 = 3;

/// Cartesian point, displayed as `(x, y)` with 3 fraction digits
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointXY {
    pub x: f64,
    pub y: f64,
}

impl PointXY {
    pub fn new(x: f64, y: f64) -> Self {
        PointXY { x, y }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> PointXY {
        PointXY::new(self.x + dx, self.y + dy)
    }

    pub fn sum(&self, p: &PointXY) -> PointXY {
        self.translated(p.x, p.y)
    }

    pub fn difference(&self, p: &PointXY) -> PointXY {
        self.translated(-p.x, -p.y)
    }

    pub fn to_polar(&self) -> PointRT {
        PointRT::new(self.x.hypot(self.y), self.y.atan2(self.x))
    }

    pub fn x_string(&self) -> String {
        trim_double(self.x, DISPLAY_DIGITS)
    }

    pub fn y_string(&self) -> String {
        trim_double(self.y, DISPLAY_DIGITS)
    }

    /// `X`/`Y` feature node
    pub fn to_feature_node(&self) -> MdeFeatureNode {
        let mut node = MdeFeatureNode::new();
        node.put("X", self.x_string());
        node.put("Y", self.y_string());
        node
    }
}

impl fmt::Display for PointXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x_string(), self.y_string())
    }
}

/// polar point, theta in radians
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointRT {
    pub r: f64,
    pub theta: f64,
}

impl PointRT {
    pub fn new(r: f64, theta: f64) -> Self {
        PointRT { r, theta }
    }

    pub fn to_cartesian(&self) -> PointXY {
        PointXY::new(self.r * self.theta.cos(), self.r * self.theta.sin())
    }
}

impl fmt::Display for PointRT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            trim_double(self.r, DISPLAY_DIGITS),
            trim_double(self.theta, DISPLAY_DIGITS)
        )
    }
}

/// One abscissa with every ordinate found there (vertical slice of an implicit curve).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MultiPointXY {
    pub x: f64,
    pub y_array: Vec<f64>,
}

impl MultiPointXY {
    pub fn new(x: f64, y_array: Vec<f64>) -> Self {
        MultiPointXY { x, y_array }
    }

    pub fn empty(x: f64) -> Self {
        MultiPointXY { x, y_array: Vec::new() }
    }

    pub fn single(x: f64, y: f64) -> Self {
        MultiPointXY { x, y_array: vec![y] }
    }

    pub fn len(&self) -> usize {
        self.y_array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_array.is_empty()
    }
}

impl fmt::Display for MultiPointXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x = {}\ny values:", trim_double(self.x, DISPLAY_DIGITS))?;
        if self.y_array.is_empty() {
            return write!(f, "  (none)");
        }
        let ys: Vec<String> = self
            .y_array
            .iter()
            .map(|y| trim_double(*y, DISPLAY_DIGITS))
            .collect();
        write!(f, "\n{}", ys.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_display_trims_digits() {
        assert_eq!(PointXY::new(1.0, -2.34567).to_string(), "(1, -2.346)");
        assert_eq!(PointXY::new(0.5, 0.0).to_string(), "(0.5, 0)");
    }

    #[test]
    fn test_polar_round_trip() {
        let p = PointRT::new(2.0, PI / 2.0).to_cartesian();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        let back = p.to_polar();
        assert_relative_eq!(back.r, 2.0, epsilon = 1e-12);
        assert_relative_eq!(back.theta, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_multipoint_display() {
        assert_eq!(MultiPointXY::empty(1.0).to_string(), "x = 1\ny values:  (none)");
        assert_eq!(
            MultiPointXY::new(1.0, vec![-2.0, 2.5]).to_string(),
            "x = 1\ny values:\n-2, 2.5"
        );
    }
}
