use crate::math::math_util::{
    equivalent_rational_string, quadratic_representation_string, trim_double,
};
use crate::solver::feature_node::MdeFeatureNode;
use std::f64::consts::PI;
use std::fmt;

const EPSILON: f64 = 1.0e-10;
const DEFAULT_FRACTION_DIGITS: i32 = 3;
const DEFAULT_SEARCH_LIMIT: i64 = 100;

/// A feature value with its decimal, rational and quadratic-irrational representations.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberModel {
    decimal_value: f64,
    approximate_decimal_value: Option<String>,
    rational_value: Option<String>,
    quadratic_value: Option<String>,
    is_an_approximation: bool,
}

impl NumberModel {
    pub fn new(decimal: f64) -> Self {
        NumberModel::with_search_limit(decimal, DEFAULT_SEARCH_LIMIT)
    }

    pub fn with_search_limit(decimal: f64, search_limit: i64) -> Self {
        let mut model = NumberModel {
            decimal_value: decimal,
            approximate_decimal_value: None,
            rational_value: None,
            quadratic_value: None,
            is_an_approximation: false,
        };
        if !decimal.is_finite() {
            return model;
        }
        let approx = trim_double(decimal, DEFAULT_FRACTION_DIGITS);
        model.is_an_approximation = approx
            .parse::<f64>()
            .map(|d| (d - decimal).abs() > EPSILON)
            .unwrap_or(true);
        model.approximate_decimal_value = Some(approx);
        model.rational_value = equivalent_rational_string(decimal, search_limit);
        model.quadratic_value = quadratic_representation_string(decimal, search_limit);
        model
    }

    pub fn decimal_value(&self) -> f64 {
        self.decimal_value
    }

    pub fn approximate_decimal_value(&self) -> Option<&str> {
        self.approximate_decimal_value.as_deref()
    }

    pub fn rational_value(&self) -> Option<&str> {
        self.rational_value.as_deref()
    }

    pub fn quadratic_value(&self) -> Option<&str> {
        self.quadratic_value.as_deref()
    }

    pub fn is_an_approximation(&self) -> bool {
        self.is_an_approximation
    }

    fn decimal_string(&self) -> String {
        let d = self.decimal_value;
        if d.is_infinite() {
            if d > 0.0 { "infinity" } else { "-infinity" }.to_string()
        } else if d.is_nan() {
            "undefined".to_string()
        } else {
            format!("{:?}", d)
        }
    }

    pub fn to_feature_node(&self) -> MdeFeatureNode {
        let mut node = MdeFeatureNode::new();
        node.put("decimalValue", self.decimal_string());
        if let Some(a) = &self.approximate_decimal_value {
            node.put("approximateDecimalValue", a.clone());
            node.put("isApproximation", self.is_an_approximation.to_string());
        }
        if let Some(r) = &self.rational_value {
            node.put("rationalValue", r.clone());
        }
        if let Some(q) = &self.quadratic_value {
            node.put("quadraticValue", q.clone());
        }
        node
    }
}

impl fmt::Display for NumberModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumberModel:\ndecimalValue: {}", self.decimal_string())?;
        match &self.rational_value {
            Some(r) => write!(f, "\nrationalValue: {}", r)?,
            None => write!(f, "\nNo rational representation was found.")?,
        }
        match &self.quadratic_value {
            Some(q) => write!(f, "\nquadraticValue: {}", q),
            None => write!(f, "\nNo quadratic representation was found."),
        }
    }
}

/// An angle in degrees and radians; radians are shown as a fraction of pi when one exists.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleModel {
    degrees: f64,
    radians: f64,
    degree_representation: String,
    pi_fraction: NumberModel,
}

impl AngleModel {
    pub fn from_degrees(deg: f64) -> Self {
        AngleModel {
            degrees: deg,
            radians: PI * deg / 180.0,
            degree_representation: trim_double(deg, 3),
            pi_fraction: NumberModel::new(deg / 180.0),
        }
    }

    pub fn from_radians(rads: f64) -> Self {
        let deg = 180.0 * rads / PI;
        AngleModel {
            degrees: deg,
            radians: rads,
            degree_representation: trim_double(deg, 3),
            pi_fraction: NumberModel::new(rads / PI),
        }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn radians(&self) -> f64 {
        self.radians
    }

    pub fn representation_in_degrees(&self) -> &str {
        &self.degree_representation
    }

    fn radian_fraction(&self) -> Option<&str> {
        self.pi_fraction
            .rational_value()
            .or_else(|| self.pi_fraction.quadratic_value())
    }

    /// `(1/2)PI` style when possible, otherwise a 3-digit decimal
    pub fn representation_in_radians(&self) -> String {
        match self.radian_fraction() {
            Some(s) => format!("({})PI", s),
            None => trim_double(PI * self.pi_fraction.decimal_value(), 3),
        }
    }

    pub fn to_feature_node(&self) -> MdeFeatureNode {
        let mut node = MdeFeatureNode::new();
        node.put("degreeValue", self.degree_representation.clone());
        let radians = self.representation_in_radians();
        node.put("radianValue", radians.clone());
        if self.radian_fraction().is_some() {
            node.put("fractionalRadians", radians);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_model_of_a_half() {
        let m = NumberModel::new(0.5);
        assert_eq!(m.approximate_decimal_value(), Some("0.5"));
        assert!(!m.is_an_approximation());
        assert_eq!(m.rational_value(), Some("1/2"));
        let node = m.to_feature_node();
        assert_eq!(node.first_string("decimalValue").unwrap(), "0.5");
        assert_eq!(node.first_string("rationalValue").unwrap(), "1/2");
    }

    #[test]
    fn test_number_model_of_an_irrational() {
        let m = NumberModel::new(std::f64::consts::SQRT_2);
        assert!(m.is_an_approximation());
        assert_eq!(m.approximate_decimal_value(), Some("1.414"));
        assert_eq!(m.rational_value(), None);
        assert_eq!(m.quadratic_value(), Some("sqrt(2)"));
    }

    #[test]
    fn test_infinite_values_have_no_representations() {
        let m = NumberModel::new(f64::INFINITY);
        let node = m.to_feature_node();
        assert_eq!(node.first_string("decimalValue").unwrap(), "infinity");
        assert!(!node.has_key("rationalValue"));
    }

    #[test]
    fn test_angle_model_fractions_of_pi() {
        let a = AngleModel::from_degrees(90.0);
        assert_eq!(a.representation_in_degrees(), "90");
        assert_eq!(a.representation_in_radians(), "(1/2)PI");
        let node = a.to_feature_node();
        assert!(node.has_key("fractionalRadians"));
        let b = AngleModel::from_radians(1.0);
        assert_eq!(b.representation_in_degrees(), "57.296");
    }
}
