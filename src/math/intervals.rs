use crate::math::math_util::trim_double;
use crate::math::points::PointXY;
use std::fmt;

pub const EXCLUDE_LOW_X: u8 = 1;
pub const EXCLUDE_HIGH_X: u8 = 2;
pub const EXCLUDE_LOW_Y: u8 = 4;
pub const EXCLUDE_HIGH_Y: u8 = 8;

const USES_X: u8 = 1;
const USES_Y: u8 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum IntervalError {
    /// low limit above the high limit for the named variable
    Inverted(String),
    /// excluding an endpoint of a zero-width interval leaves nothing
    Empty(String),
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalError::Inverted(v) => write!(
                f,
                "Low limit for variable {} is greater than its upper limit",
                v
            ),
            IntervalError::Empty(v) => {
                write!(f, "Operation results in empty interval for variable {}", v)
            }
        }
    }
}

impl std::error::Error for IntervalError {}

/// Interval in one or two variables, e.g. `{x such that -2 <= x < 3}`.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalXY {
    var_x: String,
    var_y: String,
    low: PointXY,
    high: PointXY,
    used: u8,
    exclusions: u8,
}

impl IntervalXY {
    /// one-variable interval `[low, high]`
    pub fn new(var: &str, low: f64, high: f64) -> Result<Self, IntervalError> {
        if low > high {
            return Err(IntervalError::Inverted(var.to_string()));
        }
        Ok(IntervalXY {
            var_x: var.to_string(),
            var_y: "y".to_string(),
            low: PointXY::new(low, 0.0),
            high: PointXY::new(high, 0.0),
            used: USES_X,
            exclusions: 0,
        })
    }

    /// the whole real line in `var`
    pub fn all_reals(var: &str) -> Self {
        IntervalXY {
            var_x: var.to_string(),
            var_y: "y".to_string(),
            low: PointXY::new(f64::NEG_INFINITY, 0.0),
            high: PointXY::new(f64::INFINITY, 0.0),
            used: USES_X,
            exclusions: EXCLUDE_LOW_X | EXCLUDE_HIGH_X,
        }
    }

    /// two-variable box between corner points
    pub fn new_box(vars: [&str; 2], p1: PointXY, p2: PointXY) -> Result<Self, IntervalError> {
        if p1.x > p2.x {
            return Err(IntervalError::Inverted(vars[0].to_string()));
        }
        if p1.y > p2.y {
            return Err(IntervalError::Inverted(vars[1].to_string()));
        }
        Ok(IntervalXY {
            var_x: vars[0].to_string(),
            var_y: vars[1].to_string(),
            low: p1,
            high: p2,
            used: USES_X | USES_Y,
            exclusions: 0,
        })
    }

    pub fn with_exclusions(mut self, e: u8) -> Result<Self, IntervalError> {
        self.set_end_point_exclusions(e)?;
        Ok(self)
    }

    pub fn set_end_point_exclusions(&mut self, e: u8) -> Result<(), IntervalError> {
        if self.low.x == self.high.x && e & (EXCLUDE_LOW_X | EXCLUDE_HIGH_X) != 0 {
            return Err(IntervalError::Empty(self.var_x.clone()));
        }
        if self.used & USES_Y != 0
            && self.low.y == self.high.y
            && e & (EXCLUDE_LOW_Y | EXCLUDE_HIGH_Y) != 0
        {
            return Err(IntervalError::Empty(self.var_y.clone()));
        }
        self.exclusions = e;
        Ok(())
    }

    pub fn low_x(&self) -> f64 {
        self.low.x
    }
    pub fn high_x(&self) -> f64 {
        self.high.x
    }
    pub fn low_y(&self) -> f64 {
        self.low.y
    }
    pub fn high_y(&self) -> f64 {
        self.high.y
    }

    fn sign(&self, mask: u8) -> &'static str {
        if self.exclusions & mask != 0 { " < " } else { " <= " }
    }
}

impl fmt::Display for IntervalXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.used & USES_X != 0 {
            parts.push(format!(
                "{{{} such that {}{}{}{}{}}}",
                self.var_x,
                trim_double(self.low.x, 3),
                self.sign(EXCLUDE_LOW_X),
                self.var_x,
                self.sign(EXCLUDE_HIGH_X),
                trim_double(self.high.x, 3)
            ));
        }
        if self.used & USES_Y != 0 {
            parts.push(format!(
                "{{{} such that {}{}{}{}{}}}",
                self.var_y,
                trim_double(self.low.y, 3),
                self.sign(EXCLUDE_LOW_Y),
                self.var_y,
                self.sign(EXCLUDE_HIGH_Y),
                trim_double(self.high.y, 3)
            ));
        }
        write!(f, "{}", parts.join(" and\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_variable_display() {
        let i = IntervalXY::new("x", -2.0, 3.0)
            .unwrap()
            .with_exclusions(EXCLUDE_HIGH_X)
            .unwrap();
        assert_eq!(i.to_string(), "{x such that -2 <= x < 3}");
    }

    #[test]
    fn test_infinite_ends() {
        let i = IntervalXY::all_reals("x");
        assert_eq!(i.to_string(), "{x such that -infinity < x < infinity}");
    }

    #[test]
    fn test_box_display() {
        let i = IntervalXY::new_box(
            ["x", "y"],
            PointXY::new(-1.0, -2.0),
            PointXY::new(3.0, 4.0),
        )
        .unwrap();
        assert_eq!(
            i.to_string(),
            "{x such that -1 <= x <= 3} and\n{y such that -2 <= y <= 4}"
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            IntervalXY::new("t", 1.0, -2.0),
            Err(IntervalError::Inverted("t".to_string()))
        );
        let point = IntervalXY::new("x", 1.0, 1.0).unwrap();
        assert_eq!(
            point.with_exclusions(EXCLUDE_LOW_X),
            Err(IntervalError::Empty("x".to_string()))
        );
    }
}
