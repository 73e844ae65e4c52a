//! String -> expression tree -> polynomial
//!
//!# Example
//! ```
//! use RustedMDE::symbolic::equation::Equation;
//! let eq = Equation::new("y = x^2 - 4");
//! assert!(!eq.is_bad());
//! let p = eq.polynomial().unwrap();
//! assert_eq!(p.get_degree(), 2);
//! ```
/// operator codes and their evaluators
pub mod action;
/// balanced parenthesis decomposition of a string
pub mod quantity;
/// expression tree nodes
pub mod parse_node;
/// parsed expression with constants, free variables and parameters
pub mod expression;
mod expression_tests;
/// monomials
pub mod poly_term;
/// sums of monomials over a chosen set of variables
pub mod polynomial;
/// numerator/denominator pairs and continued fractions
pub mod rational_expression;
/// `left = right` reduced to one polynomial
pub mod equation;
