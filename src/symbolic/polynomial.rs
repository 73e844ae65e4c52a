use crate::symbolic::action::Action;
use crate::symbolic::expression::{Expression, collect_variables};
use crate::symbolic::parse_node::ParseNode;
use crate::symbolic::poly_term::{CONSTANT, PolyTerm, make_signature};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// powers above this are kept symbolic instead of being expanded
const MAX_EXPANDED_POWER: usize = 64;

/// Sum of monomials keyed by their signatures.
///
/// Built from an [`Expression`] by walking its tree: sums and products are expanded, integer
/// powers are multiplied out, and anything that is not a polynomial in the required variables
/// is either folded into a coefficient or, with `use_generalized_variables`, kept as an opaque
/// variable named by its printed form.
#[derive(Debug, Clone, Default)]
pub struct Polynomial {
    term_hash: BTreeMap<String, PolyTerm>,
    degree: BTreeMap<String, i32>,
    variables: Vec<String>,
    required_variables: Option<Vec<String>>,
    use_generalized_variables: bool,
    parameter_hash: HashMap<String, f64>,
}

impl Polynomial {
    pub fn new(e: &Expression) -> Polynomial {
        Polynomial::from_expression(e, None, false)
    }

    pub fn with_generalized_variables(e: &Expression) -> Polynomial {
        Polynomial::from_expression(e, None, true)
    }

    pub fn in_variables(e: &Expression, vars: &[String]) -> Polynomial {
        Polynomial::from_expression(e, Some(vars), false)
    }

    pub fn from_expression(e: &Expression, required: Option<&[String]>, ugv: bool) -> Polynomial {
        let builder = Polynomial {
            required_variables: required.map(|r| r.to_vec()),
            use_generalized_variables: ugv,
            ..Default::default()
        };
        let mut p = builder.make_poly(&e.root);
        p.required_variables = builder.required_variables;
        p.use_generalized_variables = ugv;
        p.finish();
        p
    }

    pub fn make_constant(c: Expression) -> Polynomial {
        let mut p = Polynomial::default();
        p.add_term(PolyTerm::constant(c));
        p.finish();
        p
    }

    pub fn make_variable(v: &Expression) -> Polynomial {
        let mut p = Polynomial::default();
        p.add_term(PolyTerm::variable(v));
        p.finish();
        p
    }

    /// `c[0]*var^d + ... + c[d]`
    pub fn doubles_to_poly(c: &[f64], var: &str) -> Polynomial {
        let mut p = Polynomial::default();
        let d = c.len() as i32 - 1;
        for (i, v) in c.iter().enumerate() {
            let mut exponents = BTreeMap::new();
            let e = d - i as i32;
            if e > 0 {
                exponents.insert(var.to_string(), e);
            }
            p.add_term(PolyTerm::with_exponents(Expression::from_value(*v), exponents));
        }
        p.finish();
        p
    }

    fn add_term(&mut self, t: PolyTerm) {
        let sig = t.signature();
        let t = match self.term_hash.get(&sig) {
            Some(existing) => existing.sum(&t),
            None => t,
        };
        self.term_hash.insert(sig, t);
    }

    fn punt(&self, e: Expression) -> Polynomial {
        if self.use_generalized_variables {
            Polynomial::make_variable(&e)
        } else {
            Polynomial::make_constant(e)
        }
    }

    fn make_poly(&self, r: &ParseNode) -> Polynomial {
        if r.value.is_some() {
            return Polynomial::make_constant(Expression::from_node(r.clone()));
        }
        if let Some(required) = &self.required_variables {
            let mut vars = BTreeSet::new();
            collect_variables(r, &mut vars);
            if !required.iter().any(|v| vars.contains(v)) {
                return Polynomial::make_constant(Expression::from_node(r.clone()));
            }
        }
        match r.operator {
            Action::UMinus => match r.children.first() {
                Some(c) => self.make_poly(c).negative(),
                None => self.punt(Expression::from_node(r.clone())),
            },
            Action::Sum => r
                .children
                .iter()
                .fold(Polynomial::default(), |p, c| p.sum(&self.make_poly(c))),
            Action::Product => r
                .children
                .iter()
                .fold(Polynomial::make_constant(Expression::new("1")), |p, c| {
                    p.product(&self.make_poly(c))
                }),
            Action::Power if r.children.len() == 2 => {
                let pow = Expression::from_node(r.children[1].clone());
                let Some(pf) = pow.value else {
                    return self.punt(Expression::from_node(r.clone()));
                };
                if pf.floor() != pf || pf < 0.0 || pf > MAX_EXPANDED_POWER as f64 {
                    return self.punt(Expression::from_node(r.clone()));
                }
                let f = self.make_poly(&r.children[0]);
                (0..pf as usize).fold(Polynomial::make_constant(Expression::new("1")), |p, _| {
                    p.product(&f)
                })
            }
            Action::NoOp => Polynomial::make_variable(&Expression::from_node(r.clone())),
            _ => self.punt(Expression::from_node(r.clone())),
        }
    }

    /// drops zero terms and recomputes per-variable degrees and the sorted variable list
    fn finish(&mut self) {
        self.term_hash
            .retain(|_, t| t.coefficient().value != Some(0.0));
        self.degree.clear();
        for t in self.term_hash.values() {
            for v in t.variables() {
                let d = t.degree_of_variable(v);
                let entry = self.degree.entry(v.clone()).or_insert(d);
                if d > *entry {
                    *entry = d;
                }
            }
        }
        self.variables = self.degree.keys().cloned().collect();
    }

    pub fn is_monomial(&self) -> bool {
        self.term_hash.len() < 2
    }

    pub fn is_empty(&self) -> bool {
        self.term_hash.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &PolyTerm> {
        self.term_hash.values()
    }

    pub fn sum(&self, other: &Polynomial) -> Polynomial {
        let mut p = Polynomial::default();
        for (sig, t1) in &self.term_hash {
            match other.term_hash.get(sig) {
                Some(t2) => p.term_hash.insert(sig.clone(), t1.sum(t2)),
                None => p.term_hash.insert(sig.clone(), t1.clone()),
            };
        }
        for (sig, t2) in &other.term_hash {
            if !self.term_hash.contains_key(sig) {
                p.term_hash.insert(sig.clone(), t2.clone());
            }
        }
        p.finish();
        p
    }

    pub fn negative(&self) -> Polynomial {
        let mut p = Polynomial::default();
        for t in self.term_hash.values() {
            p.add_term(t.negative());
        }
        p.finish();
        p
    }

    pub fn difference(&self, other: &Polynomial) -> Polynomial {
        self.sum(&other.negative())
    }

    pub fn product(&self, other: &Polynomial) -> Polynomial {
        let mut r = Polynomial::default();
        for t in self.term_hash.values() {
            let mut partial = Polynomial::default();
            for t2 in other.term_hash.values() {
                partial.add_term(t.product(t2));
            }
            r = r.sum(&partial);
        }
        r
    }

    pub fn derivative(&self, var: &str) -> Polynomial {
        let mut p = Polynomial::default();
        for t in self.term_hash.values() {
            if let Some(d) = t.derivative(var) {
                p.add_term(d);
            }
        }
        p.finish();
        p.set_parameter_hash(&self.parameter_hash);
        p
    }

    /// the same polynomial with only `vars` treated as variables
    pub fn as_a_polynomial_in(&self, vars: &[String]) -> Polynomial {
        let mut p = Polynomial::in_variables(&self.to_expression(), vars);
        p.set_parameter_hash(&self.parameter_hash);
        p
    }

    pub fn one_variable_polynomial(&self, var: &str) -> Polynomial {
        self.as_a_polynomial_in(&[var.to_string()])
    }

    /// Coefficients as a polynomial in `var`, highest power first: index 0 multiplies
    /// `var^d` and index `d` is the constant term.
    pub fn coefficients_as_expressions(&self, var: &str) -> Vec<Expression> {
        Polynomial::coefficients_of(&self.one_variable_polynomial(var), var)
    }

    pub fn coefficients_of(p: &Polynomial, var: &str) -> Vec<Expression> {
        let d = p.get_degree();
        if d < 0 {
            return Vec::new();
        }
        let vars = [var.to_string()];
        let mut r: Vec<Expression> = (0..d).map(|i| p.get_coefficient(&vars, &[d - i])).collect();
        r.push(p.get_constant());
        r
    }

    /// numeric values of constant coefficients; unbound ones are NaN
    pub fn evaluate_coefficients(ce: &[Expression]) -> Vec<f64> {
        ce.iter()
            .map(|e| e.value.or_else(|| e.evaluate(&HashMap::new())).unwrap_or(f64::NAN))
            .collect()
    }

    pub fn evaluate_coefficients_at(ce: &[Expression], var: &str, value: f64) -> Vec<f64> {
        ce.iter()
            .map(|e| e.evaluate_at(var, value).unwrap_or(f64::NAN))
            .collect()
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn degree_of(&self, var: &str) -> i32 {
        self.degree.get(var).copied().unwrap_or(0)
    }

    /// highest total degree over the terms, -1 for the empty polynomial
    pub fn get_degree(&self) -> i32 {
        self.term_hash.values().map(|t| t.degree()).max().unwrap_or(-1)
    }

    pub fn get_constant(&self) -> Expression {
        match self.term_hash.get(CONSTANT) {
            Some(t) => t.coefficient().clone(),
            None => Expression::new("0"),
        }
    }

    pub fn get_coefficient(&self, vars: &[String], exps: &[i32]) -> Expression {
        if vars.len() != exps.len() {
            return Expression::new("0");
        }
        let exponents: BTreeMap<String, i32> = vars.iter().cloned().zip(exps.iter().copied()).collect();
        match self.term_hash.get(&make_signature(&exponents)) {
            Some(t) => t.coefficient().clone(),
            None => Expression::new("0"),
        }
    }

    pub fn has_constant_coefficients(&self) -> bool {
        self.term_hash
            .values()
            .all(|t| t.coefficient().var_strings.is_empty())
    }

    pub fn parameter_hash(&self) -> &HashMap<String, f64> {
        &self.parameter_hash
    }

    /// Binds parameters in every coefficient; variables that turn out to be parameters are
    /// folded into the coefficients.
    pub fn set_parameter_hash(&mut self, ph: &HashMap<String, f64>) {
        for t in self.term_hash.values_mut() {
            t.coefficient_mut().set_parameter_hash(ph);
        }
        self.parameter_hash = ph.clone();
        let remaining: Vec<String> = self
            .variables
            .iter()
            .filter(|v| !ph.contains_key(*v))
            .cloned()
            .collect();
        if remaining.len() < self.variables.len() {
            *self = self.as_a_polynomial_in(&remaining);
        }
    }

    fn compare_terms(&self, t1: &PolyTerm, t2: &PolyTerm) -> Ordering {
        let by_degree = t2.degree().cmp(&t1.degree());
        if by_degree != Ordering::Equal {
            return by_degree;
        }
        for v in &self.variables {
            let o = t2.degree_of_variable(v).cmp(&t1.degree_of_variable(v));
            if o != Ordering::Equal {
                return o;
            }
        }
        Ordering::Equal
    }

    /// terms by descending degree, ties broken by the degree of each variable in order
    pub fn to_expression(&self) -> Expression {
        if self.term_hash.is_empty() {
            return Expression::new("0");
        }
        let mut terms: Vec<&PolyTerm> = self.term_hash.values().collect();
        terms.sort_by(|a, b| self.compare_terms(a, b));
        let mut children = Vec::new();
        for t in terms {
            let r = t.make_expression().root;
            if r.operator == Action::Sum {
                children.extend(r.children);
            } else {
                children.push(r);
            }
        }
        let mut e = Expression::from_node(ParseNode::internal(Action::Sum, children));
        e.set_parameter_hash(&self.parameter_hash);
        e
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expression())
    }
}
