// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! # RustedMDE
//! Math description engine: turns a textual 2-variable equation (Cartesian or polar) or a sampled
//! data series into a classified curve with a structured feature tree and drawable point trails.
//!
//! Pipeline: string -> parse tree -> polynomial -> numeric sampling -> root finding / classification
//! -> feature tree (`MdeFeatureNode`) + `GraphTrail`s.
//!
//!# Example
//! ```
//! use RustedMDE::solver::solver::Solver;
//! let mut solver = Solver::new();
//! solver.add_equation("y = x^2 - 4").unwrap();
//! solver.solve(-10.0, 10.0, 10.0, -10.0);
//! let xml = solver.feature_xml(0).unwrap();
//! assert!(xml.contains("<graphName>parabola</graphName>"));
//! ```
/// parsing strings into expression trees and reducing them to polynomials
pub mod symbolic;
/// numeric primitives: points, bounds, intervals, number models, one-variable polynomials and root finding
pub mod math;
/// analyzed equations and data series: sampling, trails, intercepts
pub mod analysis;
/// curve-family recognition from symbolic coefficients or sampled data
pub mod classifier;
/// per-family feature extraction into the feature tree
pub mod solved;
/// feature tree, solutions and the top level solver
pub mod solver;
/// logging, settings, tables and plots
pub mod Utils;
