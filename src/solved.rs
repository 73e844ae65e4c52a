//! Feature extraction for recognised curves. Every builder returns a
//! [`solved_graph::SolvedGraph`]: the `/MDE/GraphData` feature tree plus a typed
//! [`curve_features::CurveFeatures`] payload.
/// the feature tree of one solved item and its common keys
pub mod solved_graph;
/// typed numeric payloads, one per curve family
pub mod curve_features;
/// endpoints and monotonic intervals of functions
pub mod intervals;
/// lines, parabolas, ellipses, hyperbolas and line pairs
pub mod conics;
/// sine, cosine, tangent, square root and absolute value forms
pub mod transcendental;
/// polar lines, conics, roses, lemniscates and trochoids
pub mod polar;
/// rational functions and cubic polynomials
pub mod rational_function;
/// sampled description of anything else
pub mod equation_data;
