//! numeric primitives shared by the analysis and the feature extractors
/// bounds of a view: left, right, top, bottom
pub mod bounds;
/// trimming doubles, rational and quadratic representations, GCD, small logarithm helpers
pub mod math_util;
/// decimal/rational/quadratic models of a value and of an angle
pub mod number_model;
/// Cartesian, polar and multi-valued points
pub mod points;
/// one-variable intervals with endpoint exclusion
pub mod intervals;
/// polynomials in one variable with double coefficients, their real zeros and sign signatures
pub mod pnom;
/// real roots of polynomials with multiplicities
pub mod roots;
