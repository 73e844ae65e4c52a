use crate::math::math_util::trim_double;
use crate::math::points::PointXY;
use crate::solver::feature_node::MdeFeatureNode;
use std::cmp::Ordering;
use strum_macros::Display;

/// slopes smaller than this count as flat
pub const DEAD_BAND: f64 = 1.0e-3;
/// shortest interval kept between two endpoints
pub const MIN_INTERVAL_LENGTH: f64 = 0.177_827_941_003_892_3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EndpointType {
    #[strum(serialize = "undefined")]
    Undefined,
    #[strum(serialize = "local minimum")]
    LocalMin,
    #[strum(serialize = "local maximum")]
    LocalMax,
    #[strum(serialize = "inflection point")]
    InflectionPoint,
    #[strum(serialize = "vertical asymptote")]
    VerticalAsymptote,
    #[strum(serialize = "horizontal asymptote")]
    HorizontalAsymptote,
    #[strum(serialize = "boundary point")]
    BoundaryPoint,
}

/// End of an interval of monotonic behaviour. Left and right values differ at a
/// discontinuity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalEndpoint {
    pub x: f64,
    pub left_y: f64,
    pub right_y: f64,
    pub kind: EndpointType,
}

impl IntervalEndpoint {
    /// An endpoint on the curve. Finite points are boundary points, points at infinite x are
    /// horizontal asymptotes and infinite values leave the type undefined.
    pub fn at(p: PointXY) -> Self {
        let kind = if p.y.is_infinite() || p.y.is_nan() {
            EndpointType::Undefined
        } else if p.x.is_infinite() {
            EndpointType::HorizontalAsymptote
        } else {
            EndpointType::BoundaryPoint
        };
        IntervalEndpoint {
            x: p.x,
            left_y: p.y,
            right_y: p.y,
            kind,
        }
    }

    pub fn with_type(p: PointXY, kind: EndpointType) -> Self {
        IntervalEndpoint {
            kind,
            ..IntervalEndpoint::at(p)
        }
    }

    /// an endpoint whose one-sided values differ
    pub fn discontinuity(x: f64, left_y: f64, right_y: f64, kind: EndpointType) -> Self {
        IntervalEndpoint {
            x,
            left_y,
            right_y,
            kind,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(
            self.kind,
            EndpointType::LocalMin | EndpointType::LocalMax | EndpointType::InflectionPoint
        )
    }

    pub fn is_singular(&self) -> bool {
        self.kind == EndpointType::VerticalAsymptote
    }

    pub fn to_feature_node(&self) -> MdeFeatureNode {
        let mut node = MdeFeatureNode::new();
        node.put("X", trim_double(self.x, 3));
        if self.left_y != self.right_y {
            node.put("discontinuity", "true");
            node.put("leftY", trim_double(self.left_y, 3));
            node.put("rightY", trim_double(self.right_y, 3));
        } else {
            node.put("Y", trim_double(self.left_y, 3));
        }
        if self.kind != EndpointType::Undefined {
            node.put("Type", self.kind.to_string());
        }
        node
    }
}

impl PartialOrd for IntervalEndpoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.x.partial_cmp(&other.x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    #[strum(serialize = "decreases")]
    Decreases,
    #[strum(serialize = "remains constant")]
    RemainsConstant,
    #[strum(serialize = "increases")]
    Increases,
    #[strum(serialize = "undefined")]
    Undefined,
}

/// Behaviour of the curve between two consecutive endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalDescription {
    pub left: IntervalEndpoint,
    pub right: IntervalEndpoint,
    pub direction: Direction,
}

impl IntervalDescription {
    pub fn new(left: IntervalEndpoint, right: IntervalEndpoint) -> Self {
        IntervalDescription {
            left,
            right,
            direction: IntervalDescription::direction_between(&left, &right),
        }
    }

    /// Sign of the mean slope from `l` to `r`, using the one-sided values facing the
    /// interval. Without a finite slope only the order of the values counts.
    pub fn direction_between(l: &IntervalEndpoint, r: &IntervalEndpoint) -> Direction {
        let dydx = (r.left_y - l.right_y) / (r.x - l.x);
        if dydx.is_nan() {
            return if r.left_y > l.right_y {
                Direction::Increases
            } else if r.left_y < l.right_y {
                Direction::Decreases
            } else {
                Direction::Undefined
            };
        }
        if dydx > DEAD_BAND {
            Direction::Increases
        } else if dydx < -DEAD_BAND {
            Direction::Decreases
        } else {
            Direction::RemainsConstant
        }
    }

    pub fn to_feature_node(&self) -> MdeFeatureNode {
        let mut node = MdeFeatureNode::new();
        node.put("left", self.left.to_feature_node());
        node.put("right", self.right.to_feature_node());
        node.add_key("direction");
        if self.direction != Direction::Undefined {
            node.put("direction", self.direction.to_string());
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_types() {
        assert_eq!(
            IntervalEndpoint::at(PointXY::new(1.0, 2.0)).kind,
            EndpointType::BoundaryPoint
        );
        assert_eq!(
            IntervalEndpoint::at(PointXY::new(f64::INFINITY, 0.0)).kind,
            EndpointType::HorizontalAsymptote
        );
        assert_eq!(
            IntervalEndpoint::at(PointXY::new(0.0, f64::INFINITY)).kind,
            EndpointType::Undefined
        );
        let e = IntervalEndpoint::discontinuity(1.0, f64::NEG_INFINITY, f64::INFINITY, EndpointType::VerticalAsymptote);
        assert!(e.is_singular());
        let node = e.to_feature_node();
        assert_eq!(node.first_string("discontinuity").unwrap(), "true");
        assert_eq!(node.first_string("leftY").unwrap(), "-infinity");
        assert_eq!(node.first_string("Type").unwrap(), "vertical asymptote");
    }

    #[test]
    fn test_directions() {
        let a = IntervalEndpoint::at(PointXY::new(0.0, 0.0));
        let b = IntervalEndpoint::at(PointXY::new(1.0, 2.0));
        let c = IntervalEndpoint::at(PointXY::new(2.0, 2.0));
        assert_eq!(IntervalDescription::new(a, b).direction, Direction::Increases);
        assert_eq!(IntervalDescription::new(b, a).direction, Direction::Increases);
        assert_eq!(IntervalDescription::new(b, c).direction, Direction::RemainsConstant);
        let l = IntervalEndpoint::discontinuity(0.0, 1.0, f64::INFINITY, EndpointType::Undefined);
        let r = IntervalEndpoint::discontinuity(1.0, f64::INFINITY, 1.0, EndpointType::Undefined);
        assert_eq!(IntervalDescription::new(l, r).direction, Direction::Undefined);
        assert!(IntervalDescription::new(l, r).to_feature_node().values("direction").unwrap().is_empty());
        let node = IntervalDescription::new(a, b).to_feature_node();
        assert_eq!(node.first_string("direction").unwrap(), "increases");
    }

    #[test]
    fn test_min_interval_length() {
        assert!((DEAD_BAND.powf(0.25) - MIN_INTERVAL_LENGTH).abs() < 1e-12);
    }
}
