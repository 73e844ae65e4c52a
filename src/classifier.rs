//! Classification of analyzed items into curve families.
//!
//! [`classifier::Classifier`] picks the feature builder of the `solved` module that
//! matches an equation; the model builders fit sampled points when the symbolic form
//! alone is not enough.
/// dispatch from an analyzed item to its feature builder
pub mod classifier;
/// SVD based fitting of generator models to sampled points
pub mod data_model;
/// rotation and translation of general quadratics into a normal form
pub mod quadratic_classifier;
/// quadratic and rational models fitted to cartesian samples
pub mod polynomial_classifier;
/// conic, rose, trochoid and lemniscate models fitted to polar samples
pub mod polar_classifier;
/// routing of sine, cosine and tangent equations
pub mod trig_classifier;
