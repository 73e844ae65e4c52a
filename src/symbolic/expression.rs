use crate::math::math_util::trim_double;
use crate::symbolic::action::Action;
use crate::symbolic::parse_node::ParseNode;
use std::collections::{BTreeSet, HashMap};
use std::f64::consts::PI;
use std::fmt;

/// named constants resolved at parse time
const KNOWNS: [(&str, f64); 3] = [("pi", PI), ("Pi", PI), ("PI", PI)];
const GREEK: [&str; 7] = ["alpha", "beta", "gamma", "delta", "phi", "lambda", "theta"];

fn known_value(name: &str) -> Option<f64> {
    KNOWNS.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
}

/// constants, greek letter names and single ASCII letters
pub fn is_legal_variable(name: &str) -> bool {
    if known_value(name).is_some() || GREEK.contains(&name) {
        return true;
    }
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

fn longest_legal_prefix(s: &str) -> Option<&str> {
    KNOWNS
        .iter()
        .map(|(k, _)| *k)
        .chain(GREEK.iter().copied())
        .filter(|name| s.starts_with(name))
        .max_by_key(|name| name.len())
        .or_else(|| {
            let c = s.chars().next()?;
            c.is_ascii_alphabetic().then(|| &s[..1])
        })
}

/// Splits a leaf token with implied multiplication (`2xy`, `3pi`) into factors: the longest
/// legal name at each position, with whatever lies between kept as (trimmed) residual pieces.
pub fn split_implied_multiplication(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut residual = String::new();
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(name) = longest_legal_prefix(rest) {
            if !residual.trim().is_empty() {
                pieces.push(residual.trim().to_string());
            }
            residual.clear();
            pieces.push(name.to_string());
            rest = &rest[name.len()..];
        } else {
            let c = rest.chars().next().unwrap_or(' ');
            residual.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    if !residual.trim().is_empty() {
        pieces.push(residual.trim().to_string());
    }
    pieces
}

fn leaf_pieces(node: &ParseNode) -> Vec<String> {
    if is_legal_variable(&node.text) {
        vec![node.text.clone()]
    } else {
        split_implied_multiplication(&node.text)
    }
}

/// Rewrites implied products into explicit PRODUCT nodes. A power binds only the last factor
/// of its base and the first factor of its exponent: `2x^2y` is `2*x^2*y`. False when a
/// leaf is empty.
fn fix_implied_multiplication(node: &mut ParseNode) -> bool {
    match node.operator {
        Action::NoOp => {
            if node.value.is_some() || is_legal_variable(&node.text) {
                return true;
            }
            let pieces = split_implied_multiplication(&node.text);
            match pieces.len() {
                0 => false,
                1 => {
                    node.text = pieces[0].clone();
                    true
                }
                _ => {
                    *node = ParseNode::internal(
                        Action::Product,
                        pieces.iter().map(|p| ParseNode::leaf(p)).collect(),
                    );
                    true
                }
            }
        }
        Action::Power if node.children.len() == 2 => {
            for c in node.children.iter_mut() {
                if !c.is_leaf() && !fix_implied_multiplication(c) {
                    return false;
                }
            }
            let mut before = Vec::new();
            let mut after = Vec::new();
            let base = if node.children[0].is_leaf() {
                let mut pieces = leaf_pieces(&node.children[0]);
                let Some(last) = pieces.pop() else {
                    return false;
                };
                before = pieces;
                ParseNode::leaf(&last)
            } else {
                node.children[0].clone()
            };
            let exponent = if node.children[1].is_leaf() {
                let mut pieces = leaf_pieces(&node.children[1]).into_iter();
                let Some(first) = pieces.next() else {
                    return false;
                };
                after = pieces.collect();
                ParseNode::leaf(&first)
            } else {
                node.children[1].clone()
            };
            let power = ParseNode::internal(Action::Power, vec![base, exponent]);
            if before.is_empty() && after.is_empty() {
                *node = power;
            } else {
                let mut factors: Vec<ParseNode> = before.iter().map(|p| ParseNode::leaf(p)).collect();
                factors.push(power);
                factors.extend(after.iter().map(|p| ParseNode::leaf(p)));
                *node = ParseNode::internal(Action::Product, factors);
            }
            true
        }
        _ => node.children.iter_mut().all(fix_implied_multiplication),
    }
}

/// Sets values of numeric literals and named constants; false on a leaf that is neither a
/// legal variable nor a number.
fn resolve_leaves(node: &mut ParseNode) -> bool {
    if !node.is_leaf() {
        return node.children.iter_mut().all(resolve_leaves);
    }
    if node.value.is_some() {
        return true;
    }
    if let Some(v) = known_value(&node.text) {
        node.value = Some(v);
        return true;
    }
    if is_legal_variable(&node.text) {
        return true;
    }
    match node.text.parse::<f64>() {
        Ok(v) => {
            node.value = Some(v);
            true
        }
        Err(_) => false,
    }
}

/// names of the unresolved leaves below `node`
pub fn collect_variables(node: &ParseNode, out: &mut BTreeSet<String>) {
    if node.is_leaf() {
        if node.value.is_none() {
            out.insert(node.text.clone());
        }
        return;
    }
    for c in &node.children {
        collect_variables(c, out);
    }
}

pub fn contains_variable(node: &ParseNode) -> bool {
    if node.is_leaf() {
        return node.value.is_none();
    }
    node.children.iter().any(contains_variable)
}

fn condense_constants(node: &mut ParseNode) {
    if node.value.is_some() {
        return;
    }
    if !contains_variable(node) {
        node.value = node.eval();
        return;
    }
    for c in node.children.iter_mut() {
        condense_constants(c);
    }
}

/// A parsed expression with its free variables and, for constant expressions, its value.
/// Variables whose lowercase name is in the parameter table are bound to the table's value
/// when printing or evaluating.
#[derive(Debug, Clone)]
pub struct Expression {
    pub root: ParseNode,
    valid: bool,
    pub var_strings: Vec<String>,
    pub parameters: HashMap<String, f64>,
    pub value: Option<f64>,
    pub value_string: Option<String>,
}

impl Expression {
    pub fn new(s: &str) -> Expression {
        Expression::from_node(ParseNode::new(s))
    }

    pub fn from_value(v: f64) -> Expression {
        if v.is_finite() {
            return Expression::new(&trim_double(v, -1));
        }
        let mut leaf = ParseNode::leaf(&trim_double(v, -1));
        leaf.value = Some(v);
        Expression::from_node(leaf)
    }

    /// A bare negation becomes a one-term sum and a bare reciprocal becomes `1 * (1/r)`.
    pub fn from_node(r: ParseNode) -> Expression {
        let root = match r.operator {
            Action::UMinus => ParseNode::internal(Action::Sum, vec![r]),
            Action::Reciprocal => ParseNode::internal(Action::Product, vec![ParseNode::leaf("1"), r]),
            _ => r,
        };
        Expression::elaborate(root)
    }

    fn elaborate(mut root: ParseNode) -> Expression {
        let mut e = Expression {
            root: ParseNode::leaf(""),
            valid: false,
            var_strings: Vec::new(),
            parameters: HashMap::new(),
            value: None,
            value_string: None,
        };
        if root.is_bad() {
            e.root = root;
            return e;
        }
        if !fix_implied_multiplication(&mut root) || !resolve_leaves(&mut root) {
            root.bad_flag = true;
            e.root = root;
            return e;
        }
        condense_constants(&mut root);
        let mut vars = BTreeSet::new();
        collect_variables(&root, &mut vars);
        e.var_strings = vars.into_iter().collect();
        e.value = root.value;
        e.value_string = root.value.map(|v| trim_double(v, 12));
        e.root = root;
        e.valid = true;
        e
    }

    /// A constant expression re-parsed from its 12-digit value string, which drops the
    /// structure of condensed arithmetic; anything else is returned unchanged.
    pub fn condensed(self) -> Expression {
        match (&self.value, &self.value_string) {
            (Some(v), Some(s)) if v.is_finite() => Expression::new(s),
            _ => self,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid && !self.root.bad_flag
    }

    /// a single variable and nothing else
    pub fn is_simple(&self) -> bool {
        self.root.is_leaf() && self.var_strings.len() == 1
    }

    /// binds parameters and removes them from the free variables
    pub fn set_parameter_hash(&mut self, h: &HashMap<String, f64>) {
        self.parameters = h.clone();
        self.var_strings
            .retain(|v| !h.contains_key(&v.to_lowercase()));
    }

    /// Value with free variables taken from `inputs`; parameters win over inputs.
    /// None when a variable is unbound.
    pub fn evaluate(&self, inputs: &HashMap<String, f64>) -> Option<f64> {
        if !self.is_valid() {
            return None;
        }
        if let Some(v) = self.value {
            return Some(v);
        }
        self.root.eval_with(&|name: &str| {
            self.parameters
                .get(&name.to_lowercase())
                .or_else(|| inputs.get(name))
                .copied()
        })
    }

    pub fn evaluate_at(&self, var: &str, value: f64) -> Option<f64> {
        let mut h = HashMap::new();
        h.insert(var.to_string(), value);
        self.evaluate(&h)
    }

    pub fn product(&self, other: &Expression) -> Expression {
        Expression::from_node(ParseNode::internal(
            Action::Product,
            vec![self.root.clone(), other.root.clone()],
        ))
    }

    pub fn sum(&self, other: &Expression) -> Expression {
        Expression::from_node(ParseNode::internal(
            Action::Sum,
            vec![self.root.clone(), other.root.clone()],
        ))
    }

    /// `-e`; an expression that is already a lone negation loses its minus sign instead
    pub fn negate(&self) -> Expression {
        let r = &self.root;
        if r.operator == Action::Sum
            && r.children.len() == 1
            && r.children[0].operator == Action::UMinus
        {
            return Expression::from_node(ParseNode::internal(
                Action::Sum,
                vec![r.children[0].children[0].clone()],
            ));
        }
        Expression::from_node(ParseNode::internal(
            Action::Sum,
            vec![ParseNode::internal(Action::UMinus, vec![r.clone()])],
        ))
    }

    pub fn reciprocal(&self) -> Expression {
        let r = &self.root;
        if r.operator == Action::Product
            && r.children.len() == 1
            && r.children[0].operator == Action::Reciprocal
        {
            return Expression::from_node(ParseNode::internal(
                Action::Product,
                vec![r.children[0].children[0].clone()],
            ));
        }
        Expression::from_node(ParseNode::internal(
            Action::Product,
            vec![
                ParseNode::leaf("1"),
                ParseNode::internal(Action::Reciprocal, vec![r.clone()]),
            ],
        ))
    }

    pub fn difference(&self, other: &Expression) -> Expression {
        self.sum(&other.negate())
    }

    pub fn quotient(&self, other: &Expression) -> Expression {
        Expression::from_node(ParseNode::internal(
            Action::Product,
            vec![
                self.root.clone(),
                ParseNode::internal(Action::Reciprocal, vec![other.root.clone()]),
            ],
        ))
    }

    fn show_sum(&self, r: &ParseNode) -> String {
        let mut s = String::new();
        for child in &r.children {
            let t = if child.operator == Action::UMinus {
                s.push_str(" -");
                match child.children.first() {
                    Some(t) => t,
                    None => continue,
                }
            } else {
                s.push_str(" +");
                child
            };
            let term = self.show_term(t).unwrap_or_default();
            if t.operator == Action::Sum {
                s.push_str(&format!("({})", term));
            } else {
                s.push_str(&term);
            }
        }
        let s = s.trim();
        match s.strip_prefix('+') {
            Some(rest) => rest.trim().to_string(),
            None => s.to_string(),
        }
    }

    fn show_prod(&self, r: &ParseNode) -> String {
        let mut s = String::new();
        let mut needs_parens = false;
        for child in &r.children {
            let t = if child.operator == Action::Reciprocal {
                s.push('/');
                needs_parens = true;
                match child.children.first() {
                    Some(t) => t,
                    None => continue,
                }
            } else {
                s.push('*');
                child
            };
            let term = self.show_term(t).unwrap_or_default();
            if t.operator == Action::Sum || needs_parens {
                s.push_str(&format!("({})", term));
            } else {
                s.push_str(&term);
            }
        }
        let s = s.trim();
        match s.strip_prefix('*') {
            Some(rest) => rest.trim().to_string(),
            None => s.to_string(),
        }
    }

    fn show_power(&self, r: &ParseNode) -> Option<String> {
        let [base, power] = r.children.as_slice() else {
            return None;
        };
        let wrap = |n: &ParseNode| {
            let t = self.show_term(n).unwrap_or_default();
            if n.is_leaf() { t } else { format!("({})", t) }
        };
        Some(format!("{}^{}", wrap(base), wrap(power)))
    }

    fn show_term(&self, r: &ParseNode) -> Option<String> {
        match r.operator {
            Action::NoOp => {
                let s = r.text.trim();
                if let Some(v) = self.parameters.get(&s.to_lowercase()) {
                    let t = trim_double(*v, -1);
                    return Some(if *v < 0.0 { format!("({})", t) } else { t });
                }
                Some(s.to_string())
            }
            Action::Sum => Some(self.show_sum(r)),
            Action::Product => Some(self.show_prod(r)),
            Action::Power => self.show_power(r),
            op if op.is_function() => {
                let [arg] = r.children.as_slice() else {
                    return None;
                };
                Some(format!("{}({})", op.name()?, self.show_term(arg).unwrap_or_default()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.show_term(&self.root).unwrap_or_default())
    }
}
