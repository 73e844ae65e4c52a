#[cfg(test)]
mod tests {
    use crate::analysis::NUM_POINTS;
    use crate::analysis::analyzed_equation::{AnalyzedEquation, EquationType, ParameterError};
    use crate::analysis::analyzed_item::AnalyzedItem;
    use crate::classifier::classifier::Classifier;
    use crate::math::bounds::Bounds;
    use approx::assert_relative_eq;

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(|a, b| a.total_cmp(b));
        v
    }

    #[test]
    fn test_line_is_a_polynomial_function() {
        let ae = AnalyzedEquation::new("y = 2*x + 3");
        assert!(!ae.is_bad());
        assert_eq!(ae.equation_type(), EquationType::Cartesian);
        assert!(ae.is_function());
        assert!(ae.is_polynomial());
        assert!(ae.is_quadratic());
        assert!(!ae.is_constant());
        assert_eq!(ae.degree(), 1);
        assert_eq!(ae.independent_variable(), "x");
        assert_eq!(ae.dependent_variable(), "y");
        let xi = ae.x_intercepts();
        assert_eq!(xi.len(), 1);
        assert_relative_eq!(xi[0], -1.5);
        assert_relative_eq!(ae.y_intercepts()[0], 3.0);
        let f = ae.function().unwrap();
        assert_relative_eq!(f.evaluate_at("x", 1.0).unwrap(), 5.0);
        assert!(matches!(ae.classifier(), Classifier::Quadratic(_)));
    }

    #[test]
    fn test_parabola_intercepts_and_sampling() {
        let mut ae = AnalyzedEquation::new("y = x^2 - 4");
        let xi = sorted(ae.x_intercepts());
        assert_relative_eq!(xi[0], -2.0);
        assert_relative_eq!(xi[1], 2.0);
        assert_relative_eq!(ae.y_intercepts()[0], -4.0);
        let b = Bounds::square(10.0);
        ae.compute_points(&b).unwrap();
        assert_eq!(ae.points().len(), NUM_POINTS);
        assert!(ae.points().iter().all(|p| p.x >= b.left && p.x <= b.right));
        assert_eq!(ae.graph_trails().len(), 1);
        assert!(ae.is_function_over_interval());
        assert_eq!(ae.preferred_bounds(), b);
    }

    #[test]
    fn test_circle_has_two_branches() {
        let mut ae = AnalyzedEquation::new("x^2 + y^2 = 4");
        assert!(ae.is_quadratic());
        assert!(!ae.is_function());
        ae.compute_points(&Bounds::square(10.0)).unwrap();
        assert_eq!(ae.graph_trails().len(), 2);
        assert!(!ae.is_function_over_interval());
        // samples next to the edge of the circle were moved onto it
        let left_edge = ae
            .points()
            .iter()
            .filter(|p| p.len() == 2)
            .map(|p| p.x)
            .fold(f64::INFINITY, f64::min);
        assert!((left_edge + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_line_is_undefined() {
        let mut ae = AnalyzedEquation::new("x = 3");
        assert!(ae.is_undefined());
        assert_eq!(ae.x_intercepts(), vec![3.0]);
        assert!(ae.find_real_solutions(3.0).is_empty());
        ae.compute_points(&Bounds::square(10.0)).unwrap();
        assert_eq!(ae.graph_trails().len(), 1);
        assert!(ae.graph_trails()[0].points().iter().all(|p| p.x == 3.0));
    }

    #[test]
    fn test_constant_solution_is_cached() {
        let ae = AnalyzedEquation::new("y = 5");
        assert!(ae.is_constant());
        assert_eq!(ae.find_real_solutions(7.0).y_array, vec![5.0]);
        assert_eq!(ae.find_real_solutions(-1.0).x, -1.0);
    }

    #[test]
    fn test_hyperbola_branches_split_at_the_jump() {
        let mut ae = AnalyzedEquation::new("y = 1/x");
        assert!(ae.is_function());
        assert!(ae.is_quadratic());
        ae.compute_points(&Bounds::square(10.0)).unwrap();
        assert_eq!(ae.graph_trails().len(), 2);
    }

    #[test]
    fn test_polar_circle() {
        let mut ae = AnalyzedEquation::new("r = 2");
        assert!(ae.is_polar());
        assert_eq!(ae.independent_variable(), "theta");
        ae.compute_points(&Bounds::square(10.0)).unwrap();
        assert_eq!(ae.graph_trails().len(), 1);
        let b = ae.preferred_bounds();
        assert_relative_eq!(b.right, 2.0, epsilon = 1e-9);
        assert_relative_eq!(b.bottom, -2.0, epsilon = 1e-9);
        for p in ae.points() {
            assert_relative_eq!(p.x.hypot(p.y_array[0]), 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_parameters() {
        let mut ae = AnalyzedEquation::new("y = a*x + b");
        assert_eq!(ae.parameters(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ae.parameter_value("a"), Ok(1.0));
        assert!(ae.is_function());
        ae.set_parameter_value("a", 2.0).unwrap();
        assert_relative_eq!(ae.find_real_solutions(1.0).y_array[0], 3.0);
        assert_eq!(ae.print_equation(), "y = 2*x +1");
        assert_eq!(ae.print_original_equation(), "y = a*x +b");
        assert_eq!(
            ae.set_parameter_value("z", 1.0),
            Err(ParameterError::Unknown("z".to_string()))
        );
    }

    #[test]
    fn test_too_many_variables_and_bad_input() {
        let ae = AnalyzedEquation::new("y = x*z + w");
        assert!(ae.has_more_than_two_variables());
        assert!(ae.is_unknown());
        let bad = AnalyzedEquation::new("y = (x");
        assert!(bad.is_bad());
        assert!(bad.x_intercepts().is_empty());
    }

    #[test]
    fn test_trig_equations_use_the_trig_classifier() {
        let ae = AnalyzedEquation::new("y = sin(x)");
        assert!(ae.is_solvable_function());
        assert!(!ae.is_polynomial());
        assert!(matches!(ae.classifier(), Classifier::Trig(_)));
    }

    #[test]
    fn test_actually_solve_degrees() {
        assert!(AnalyzedEquation::actually_solve(&[0.0, 0.0], 1.0).is_empty());
        assert_eq!(AnalyzedEquation::actually_solve(&[2.0, -4.0], 1.0).y_array, vec![2.0]);
        assert_eq!(AnalyzedEquation::actually_solve(&[1.0, -2.0, 1.0], 0.0).y_array, vec![1.0, 1.0]);
        assert!(AnalyzedEquation::actually_solve(&[1.0, 0.0, 1.0], 0.0).is_empty());
        assert!(AnalyzedEquation::actually_solve(&[1.0, f64::NAN], 0.0).is_empty());
        let cubic = AnalyzedEquation::actually_solve(&[1.0, 0.0, -1.0, 0.0], 0.0);
        let r = sorted(cubic.y_array);
        assert_eq!(r.len(), 3);
        assert_relative_eq!(r[0], -1.0, epsilon = 1e-9);
        assert_relative_eq!(r[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(r[2], 1.0, epsilon = 1e-9);
        // vanishing leading coefficient drops the degree
        assert_eq!(AnalyzedEquation::actually_solve(&[0.0, 1.0, -3.0], 0.0).y_array, vec![3.0]);
    }

    #[test]
    fn test_quartics_are_sampled() {
        let mut ae = AnalyzedEquation::new("y = x^4 - 10");
        let xi = sorted(ae.x_intercepts());
        let q = 10f64.powf(0.25);
        assert_eq!(xi.len(), 2);
        assert_relative_eq!(xi[0], -q, epsilon = 1e-9);
        assert_relative_eq!(xi[1], q, epsilon = 1e-9);
        assert_relative_eq!(ae.y_intercepts()[0], -10.0);
        ae.compute_points(&Bounds::square(10.0)).unwrap();
        assert_eq!(ae.points().len(), NUM_POINTS);

        // y^4 = x has two real y for every positive x
        let ys = sorted(AnalyzedEquation::actually_solve(&[1.0, 0.0, 0.0, 0.0, -16.0], 16.0).y_array);
        assert_eq!(ys.len(), 2);
        assert_relative_eq!(ys[0], -2.0, epsilon = 1e-9);
        assert_relative_eq!(ys[1], 2.0, epsilon = 1e-9);
        assert!(AnalyzedEquation::actually_solve(&[1.0, 0.0, 0.0, 0.0, 1.0], -1.0).is_empty());
    }
}
