#[cfg(test)]
mod tests {
    use crate::symbolic::expression::{Expression, split_implied_multiplication};
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::f64::consts::PI;

    #[test]
    fn test_implied_multiplication() {
        let e = Expression::new("2x^2y");
        assert!(e.is_valid());
        assert_eq!(e.to_string(), "2*x^2*y");
        assert_eq!(e.var_strings, vec!["x".to_string(), "y".to_string()]);
        let mut inputs = HashMap::new();
        inputs.insert("x".to_string(), 2.0);
        inputs.insert("y".to_string(), 3.0);
        assert_relative_eq!(e.evaluate(&inputs).unwrap(), 24.0);
        assert_eq!(split_implied_multiplication("3xy"), vec!["3", "x", "y"]);
        assert_eq!(split_implied_multiplication("2theta"), vec!["2", "theta"]);
    }

    #[test]
    fn test_constants_are_condensed() {
        let e = Expression::new("3pi");
        assert!(e.var_strings.is_empty());
        assert_relative_eq!(e.value.unwrap(), 3.0 * PI);
        let six = Expression::new("2*3").condensed();
        assert_eq!(six.to_string(), "6");
        assert_eq!(Expression::from_value(0.5).value, Some(0.5));
        assert_eq!(Expression::from_value(f64::INFINITY).value, Some(f64::INFINITY));
    }

    #[test]
    fn test_parameters_are_printed_and_removed() {
        let mut e = Expression::new("a*x + b*y");
        let mut h = HashMap::new();
        h.insert("a".to_string(), 2.0);
        e.set_parameter_hash(&h);
        assert_eq!(e.to_string(), "2*x +b*y");
        assert_eq!(e.var_strings, vec!["b", "x", "y"]);
        let mut inputs = HashMap::new();
        for v in ["b", "x", "y"] {
            inputs.insert(v.to_string(), 1.0);
        }
        assert_relative_eq!(e.evaluate(&inputs).unwrap(), 3.0);
        assert!(e.evaluate(&HashMap::new()).is_none());
    }

    #[test]
    fn test_composition_and_printing() {
        assert_eq!(Expression::new("x - y").to_string(), "x -y");
        let q = Expression::new("x").quotient(&Expression::new("y+1"));
        assert_eq!(q.to_string(), "x/(y +1)");
        let minus_x = Expression::new("x").negate();
        assert_eq!(minus_x.to_string(), "-x");
        assert_eq!(minus_x.negate().to_string(), "x");
        let s = Expression::new("x").sum(&Expression::new("2"));
        assert_relative_eq!(s.evaluate_at("x", 1.0).unwrap(), 3.0);
    }

    #[test]
    fn test_functions_evaluate() {
        let e = Expression::new("sin(x)");
        assert_relative_eq!(e.evaluate_at("x", PI / 2.0).unwrap(), 1.0);
        let e = Expression::new("2sin(x) + abs(x)");
        assert_relative_eq!(e.evaluate_at("x", -PI / 2.0).unwrap(), PI / 2.0 - 2.0);
        let e = Expression::new("sqrt(x)");
        assert!(e.evaluate_at("x", -1.0).unwrap().is_nan());
    }

    #[test]
    fn test_invalid_strings() {
        for s in ["2*-3", "x + $", "", "(x"] {
            assert!(!Expression::new(s).is_valid(), "{} should be invalid", s);
        }
    }
}
