use crate::solved::solved_graph::SolvedGraph;
use crate::solver::solver::Solver;
use tabled::{builder::Builder, settings::Style};

/// One row per solution: name, coordinate system, graph name, samples, trails and flags.
pub fn solutions_table(solver: &Solver) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "#", "name", "system", "graph", "samples", "trails", "show", "sonify",
    ]);
    for (i, s) in solver.solutions().enumerate() {
        let system = if s.is_polar() { "Polar" } else { "Cartesian" };
        let graph = s
            .features()
            .and_then(|g| g.graph_name())
            .unwrap_or_else(|| "-".to_string());
        builder.push_record([
            i.to_string(),
            s.name(),
            system.to_string(),
            graph,
            s.points().len().to_string(),
            s.graph_trails().len().to_string(),
            s.is_show_graph().to_string(),
            s.is_sonify_graph().to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Top level features as key, value rows; nested nodes are shown flattened.
pub fn features_table(g: &SolvedGraph) -> String {
    let mut builder = Builder::default();
    builder.push_record(["feature", "value"]);
    for (key, value) in g.feature_pairs() {
        builder.push_record([key, value.split_whitespace().collect::<Vec<_>>().join(" ")]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables() {
        let mut solver = Solver::new();
        solver.add_equation("y = 2*x + 3").unwrap();
        solver.add_equation("r = 2").unwrap();
        let before = solutions_table(&solver);
        assert!(before.contains("Polar"));
        assert!(before.contains(" - "));
        solver.solve(-10.0, 10.0, 10.0, -10.0);
        let after = solutions_table(&solver);
        assert!(after.contains("600"));
        assert!(after.contains("Cartesian"));

        let g = solver.get(0).unwrap().features().unwrap();
        let t = features_table(g);
        assert!(t.contains("graphName"));
        assert!(t.contains("slope"));
        assert!(t.starts_with('╭'));
    }
}
