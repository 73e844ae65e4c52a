//! Feature trees and the solver that keeps the items of one graph.
//!
//!# Example
//! ```
//! use RustedMDE::solver::solver::Solver;
//! let mut solver = Solver::new();
//! let i = solver.add_equation("y = 2*x + 3").unwrap();
//! solver.solve(-10.0, 10.0, 10.0, -10.0);
//! let features = solver.get(i).unwrap().features().unwrap();
//! assert!((features.get_number("slope").unwrap() - 2.0).abs() < 1e-9);
//! ```
/// ordered key to multivalue tree with XML output
pub mod feature_node;
/// path addressed access to a feature tree
pub mod feature_node_manager;
/// one analyzed item with its show/sonify flags
pub mod solution;
/// the set of solutions of one graph, bounds auto-scaling and the change event queue
pub mod solver;
mod solver_tests;
