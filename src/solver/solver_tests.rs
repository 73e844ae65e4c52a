#[cfg(test)]
mod tests {
    use crate::analysis::analyzed_data::AnalyzedData;
    use crate::analysis::analyzed_equation::AnalyzedEquation;
    use crate::analysis::analyzed_item::{AnalyzedItem, AnalyzedItemEnum};
    use crate::solved::solved_graph::GraphFeature;
    use crate::solver::solution::{FlagsChange, SolutionError};
    use crate::solver::solver::{ShowSonifyCounts, Solver, SolverEvent};
    use approx::assert_relative_eq;

    #[test]
    fn test_parabola_end_to_end() {
        let mut solver = Solver::new();
        let i = solver.add_equation("y = x^2 - 4").unwrap();
        assert!(!solver.any_describable());
        solver.solve(-10.0, 10.0, 10.0, -10.0);
        let s = solver.get(i).unwrap();
        assert!(s.is_describable() && s.is_graphable() && s.is_sonifiable());
        let g = s.features().unwrap();
        assert_eq!(g.graph_name().unwrap(), "parabola");
        let mut xi = g.x_intercepts();
        xi.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(xi.len(), 2);
        assert_relative_eq!(xi[0], -2.0, epsilon = 1e-9);
        assert_relative_eq!(xi[1], 2.0, epsilon = 1e-9);
        assert!(
            g.get_value(GraphFeature::GraphBoundaries)
                .unwrap()
                .starts_with("x = -10.0 to 10.0")
        );
        let xml = solver.feature_xml(i).unwrap();
        assert!(xml.contains("<graphName>parabola</graphName>"));
        assert_eq!(
            solver.counts(),
            ShowSonifyCounts {
                show_polar: 0,
                show_cartesian: 1,
                sonify_polar: 0,
                sonify_cartesian: 1
            }
        );
    }

    #[test]
    fn test_bad_equations_are_rejected() {
        let mut solver = Solver::new();
        assert!(solver.any_bad_equations());
        let e = solver.add_equation("y = (x").unwrap_err();
        assert!(matches!(e, SolutionError::BadEquation(_)));
        assert!(solver.add_equation("y = x*z + w").is_err());
        assert!(solver.is_empty());
        let events = solver.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SolverEvent::Rejected(_)));
        assert_eq!(solver.events().count(), 0);
    }

    #[test]
    fn test_polar_is_silenced_by_cartesian() {
        let mut solver = Solver::new();
        let p = solver.add_equation("r = 2").unwrap();
        assert!(solver.get(p).unwrap().is_sonify_graph());
        solver.add_equation("y = x").unwrap();
        assert!(!solver.get(p).unwrap().is_sonify_graph());
        assert!(solver.get(p).unwrap().is_show_graph());
        assert_eq!(solver.counts().sonify_polar, 0);
        assert_eq!(solver.counts().show_polar, 1);
        assert!(solver.drain_events().contains(&SolverEvent::FlagsChanged {
            index: p,
            change: FlagsChange {
                show_changed: false,
                sonify_changed: true
            }
        }));
    }

    #[test]
    fn test_only_the_oldest_polar_keeps_sound() {
        let mut solver = Solver::new();
        solver.add_equation("r = 1").unwrap();
        solver.add_equation("r = 2").unwrap();
        assert!(solver.get(0).unwrap().is_sonify_graph());
        assert!(!solver.get(1).unwrap().is_sonify_graph());
        assert_eq!(solver.counts().sonify_polar, 1);
        // turning the second one on silences it again
        solver.set_sonify_graph(1, true).unwrap();
        assert!(!solver.get(1).unwrap().is_sonify_graph());
        assert_eq!(solver.counts().sonify_polar, 1);
    }

    #[test]
    fn test_flags_and_counts() {
        let mut solver = Solver::new();
        solver.add_equation("y = x").unwrap();
        let c = solver.set_show_graph(0, false).unwrap();
        assert!(c.show_changed && c.sonify_changed);
        assert_eq!(solver.counts(), ShowSonifyCounts::default());
        assert_eq!(
            solver.set_sonify_graph(0, true),
            Err(SolutionError::SonifyHidden)
        );
        assert_eq!(
            solver.set_show_graph(3, true),
            Err(SolutionError::IndexOutOfRange(3))
        );
        let hidden = AnalyzedItemEnum::Equation(AnalyzedEquation::new("y = 2*x"));
        assert_eq!(
            solver.add_item_with(hidden, false, true),
            Err(SolutionError::SonifyHidden)
        );
        let quiet = AnalyzedItemEnum::Equation(AnalyzedEquation::new("y = 3*x"));
        solver.add_item_with(quiet, true, false).unwrap();
        assert_eq!(solver.counts().show_cartesian, 1);
        assert_eq!(solver.counts().sonify_cartesian, 0);
    }

    #[test]
    fn test_hidden_items_are_not_solved() {
        let mut solver = Solver::new();
        solver.add_equation("y = x").unwrap();
        solver.add_equation("y = -x").unwrap();
        solver.set_show_graph(1, false).unwrap();
        solver.solve(-10.0, 10.0, 10.0, -10.0);
        assert!(solver.get(0).unwrap().is_graphable());
        assert!(!solver.get(1).unwrap().is_graphable());
        assert!(solver.any_graphable() && solver.any_sonifiable());
    }

    #[test]
    fn test_bounds_grow_to_cover_polar_items() {
        let mut solver = Solver::new();
        solver.add_equation("y = x").unwrap();
        solver.add_equation("r = 8").unwrap();
        solver.drain_events();
        solver.solve(-5.0, 5.0, 5.0, -5.0);
        let b = solver.bounds();
        assert_relative_eq!(b.right, 8.0, epsilon = 1e-6);
        assert_relative_eq!(b.bottom, -8.0, epsilon = 1e-6);
        for s in solver.solutions() {
            let p = s.item().preferred_bounds();
            assert!(b.left <= p.left && b.right >= p.right);
            assert!(b.bottom <= p.bottom && b.top >= p.top);
        }
        let events = solver.drain_events();
        assert_eq!(events.len(), 1);
        let SolverEvent::Solved { iterations, .. } = events[0] else {
            panic!("expected a solved event");
        };
        assert_eq!(iterations, 2);
    }

    #[test]
    fn test_lookup_and_removal() {
        let mut solver = Solver::new();
        solver.add_equation("y = x").unwrap();
        solver.add_equation("r = 2").unwrap();
        solver.add_equation("y = x").unwrap();
        assert_eq!(solver.get_by_name("y = x").len(), 2);
        assert!(solver.get_by_name("y = x^3").is_empty());
        let item = AnalyzedItemEnum::Equation(AnalyzedEquation::new("r = 2"));
        assert_eq!(solver.position(&item), Some(1));
        let removed = solver.remove(1).unwrap();
        assert!(removed.is_polar());
        assert!(!solver.contains(&item));
        assert_eq!(solver.counts().show_polar, 0);
        assert_eq!(solver.remove(7).unwrap_err(), SolutionError::IndexOutOfRange(7));
        solver.remove_all();
        assert!(solver.is_empty());
        assert_eq!(solver.counts(), ShowSonifyCounts::default());
        assert_eq!(solver.events().last(), Some(&SolverEvent::Cleared));
    }

    #[test]
    fn test_data_items() {
        let x: Vec<f64> = (0..=20).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| (v - 10.0).abs()).collect();
        let data = AnalyzedData::new("t", "distance", &x, &y).unwrap();
        let mut solver = Solver::new();
        let i = solver.add_item(AnalyzedItemEnum::Data(data)).unwrap();
        assert!(solver.any_analyzed_data());
        solver.solve(0.0, 20.0, 10.0, 0.0);
        let g = solver.get(i).unwrap().features().unwrap();
        assert_eq!(g.graph_name().unwrap(), "FunctionOverInterval");
        assert_eq!(g.get_value("DataID").unwrap(), "distance");
        let p = solver.point_near(i, 10.0).unwrap();
        assert_relative_eq!(p.y_array[0], 0.0, epsilon = 0.05);
        assert!(solver.get(i).unwrap().input_equation().is_none());
    }
}
