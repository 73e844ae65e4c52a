//! Sampling and state of a single item on the graph: a parsed equation or a data series.
//!
//! Both kinds implement [`analyzed_item::AnalyzedItem`] and are stored in the solver as
//! [`analyzed_item::AnalyzedItemEnum`].
/// common contract of equations and data series
pub mod analyzed_item;
/// equation in two variables: variables, solvability, root finding, sampling
pub mod analyzed_equation;
mod analyzed_equation_tests;
/// sorted data series resampled to a fixed number of points
pub mod analyzed_data;
/// continuous runs of points and the splitting of samples into runs
pub mod graph_trail;
/// polar to cartesian conversion and resampling of raw data
pub mod points_util;

/// number of samples produced for every item
pub const NUM_POINTS: usize = 600;
/// half width of the default view
pub const DEFAULT_BOUND_VALUE: f64 = 10.0;
