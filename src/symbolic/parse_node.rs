use crate::symbolic::action::{Action, FNAMES};
use crate::symbolic::quantity::{Quantity, QuantityPart};
use std::fmt;

/// Node of an expression tree. Leaves (`NoOp`) carry their token text; internal nodes carry an
/// operator and ordered children. `value` caches the numeric value of constant subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub operator: Action,
    pub value: Option<f64>,
    pub text: String,
    pub children: Vec<ParseNode>,
    pub bad_flag: bool,
}

/// splits `s` into alternating operand/operator tokens the way a delimiter-returning
/// tokenizer does: delimiters are single-character tokens, empty runs are dropped
fn tokenize<'a>(s: &'a str, delims: &[char]) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if delims.contains(&c) {
            if start < i {
                tokens.push(&s[start..i]);
            }
            tokens.push(&s[i..i + c.len_utf8()]);
            start = i + c.len_utf8();
        }
    }
    if start < s.len() {
        tokens.push(&s[start..]);
    }
    tokens
}

fn placeholder(i: usize) -> String {
    format!("§{}§", i)
}

impl ParseNode {
    /// Parses `s`. A malformed string gives a `Corrupted` node with `bad_flag` set.
    pub fn new(s: &str) -> ParseNode {
        match Quantity::new(s).and_then(|q| build_tree(&q)) {
            Some(p) => p,
            None => ParseNode {
                operator: Action::Corrupted,
                value: None,
                text: s.to_string(),
                children: Vec::new(),
                bad_flag: true,
            },
        }
    }

    pub fn leaf(s: &str) -> ParseNode {
        ParseNode {
            operator: Action::NoOp,
            value: None,
            text: s.to_string(),
            children: Vec::new(),
            bad_flag: false,
        }
    }

    pub fn internal(operator: Action, children: Vec<ParseNode>) -> ParseNode {
        ParseNode {
            operator,
            value: None,
            text: String::new(),
            children,
            bad_flag: false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.operator == Action::NoOp
    }

    /// true when this node or any descendant failed to parse
    pub fn is_bad(&self) -> bool {
        self.bad_flag || self.children.iter().any(|c| c.is_bad())
    }

    /// Numeric value with unbound leaves looked up through `lookup`; None when a leaf is unbound.
    pub fn eval_with(&self, lookup: &dyn Fn(&str) -> Option<f64>) -> Option<f64> {
        if let Some(v) = self.value {
            return Some(v);
        }
        match self.operator {
            Action::NoOp => lookup(&self.text),
            Action::Corrupted => None,
            op => {
                let args = self
                    .children
                    .iter()
                    .map(|c| c.eval_with(lookup))
                    .collect::<Option<Vec<f64>>>()?;
                op.apply(&args)
            }
        }
    }

    /// value of a tree whose leaves are all resolved
    pub fn eval(&self) -> Option<f64> {
        self.eval_with(&|_| None)
    }
}

fn build_tree(q: &Quantity) -> Option<ParseNode> {
    let n = q.children.len();
    if n % 2 == 0 {
        return None;
    }
    if n == 1 {
        return match &q.children[0] {
            QuantityPart::Text(t) => do_sum(t),
            QuantityPart::Group(g) => build_tree(g),
        };
    }
    let mut s = String::new();
    let mut groups: Vec<&Quantity> = Vec::new();
    for c in &q.children {
        match c {
            QuantityPart::Text(t) => s.push_str(t.trim()),
            QuantityPart::Group(g) => {
                s.push_str(&placeholder(groups.len()));
                groups.push(g);
            }
        }
    }
    replace_sub_expressions(&groups, do_sum(&s)?)
}

/// splits leaf text into pieces around every placeholder, keeping the placeholders
fn split_placeholders(text: &str) -> Vec<(String, Option<usize>)> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('§') {
        let after = &rest[open + '§'.len_utf8()..];
        let Some(close) = after.find('§') else {
            break;
        };
        let Ok(index) = after[..close].parse::<usize>() else {
            break;
        };
        out.push((rest[..open].to_string(), None));
        out.push((placeholder(index), Some(index)));
        rest = &after[close + '§'.len_utf8()..];
    }
    out.push((rest.to_string(), None));
    out
}

fn replace_sub_expressions(groups: &[&Quantity], mut p: ParseNode) -> Option<ParseNode> {
    if !p.is_leaf() {
        p.children = p
            .children
            .into_iter()
            .map(|c| replace_sub_expressions(groups, c))
            .collect::<Option<Vec<_>>>()?;
        return Some(p);
    }
    if groups.is_empty() {
        return Some(p);
    }
    let pieces = split_placeholders(&p.text);
    if pieces.len() == 1 {
        return Some(p);
    }
    let mut factors = Vec::new();
    for (text, index) in pieces {
        match index {
            Some(i) => factors.push(build_tree(groups.get(i)?)?),
            None => {
                let t = text.trim();
                if !t.is_empty() {
                    factors.push(ParseNode::leaf(t));
                }
            }
        }
    }
    if factors.len() == 1 {
        return factors.pop();
    }
    Some(ParseNode::internal(Action::Product, factors))
}

/// (operator, operand) pairs of a sign-prefixed run such as `+a-b`
fn operator_pairs<'a>(s: &'a str, delims: &[char]) -> Option<Vec<(&'a str, &'a str)>> {
    let tokens = tokenize(s, delims);
    if tokens.len() % 2 == 1 {
        return None;
    }
    let mut pairs = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks(2) {
        let (op, operand) = (pair[0].trim(), pair[1].trim());
        if !op.chars().all(|c| delims.contains(&c)) || op.len() != 1 {
            return None;
        }
        if operand.contains(delims) {
            return None;
        }
        pairs.push((op, operand));
    }
    Some(pairs)
}

fn do_sum(s: &str) -> Option<ParseNode> {
    let s = s.trim();
    if !s.contains(['+', '-']) {
        return do_prod(s);
    }
    let prefixed = if s.starts_with('-') || s.starts_with('+') {
        s.to_string()
    } else {
        format!("+{}", s)
    };
    let pairs = operator_pairs(&prefixed, &['+', '-'])?;
    let mut children = Vec::with_capacity(pairs.len());
    for (op, operand) in pairs {
        let term = do_prod(operand)?;
        if op == "-" {
            children.push(ParseNode::internal(Action::UMinus, vec![term]));
        } else {
            children.push(term);
        }
    }
    Some(ParseNode::internal(Action::Sum, children))
}

fn do_prod(s: &str) -> Option<ParseNode> {
    if !s.contains(['*', '/']) {
        return do_powers(s);
    }
    let prefixed = format!("*{}", s.trim());
    let pairs = operator_pairs(&prefixed, &['*', '/'])?;
    let mut children = Vec::with_capacity(pairs.len());
    for (op, operand) in pairs {
        let factor = do_powers(operand)?;
        if op == "/" {
            children.push(ParseNode::internal(Action::Reciprocal, vec![factor]));
        } else {
            children.push(factor);
        }
    }
    Some(ParseNode::internal(Action::Product, children))
}

fn do_powers(s: &str) -> Option<ParseNode> {
    let s = s.trim();
    match s.find('^') {
        Some(c) => {
            let base = do_functions(&s[..c])?;
            let exponent = do_functions(&s[c + 1..])?;
            Some(ParseNode::internal(Action::Power, vec![base, exponent]))
        }
        None => do_functions(s),
    }
}

fn first_function_index(s: &str) -> Option<usize> {
    FNAMES
        .iter()
        .filter(|(_, op)| op.is_function())
        .filter_map(|(name, _)| s.find(name))
        .min()
}

fn do_functions(s: &str) -> Option<ParseNode> {
    let s = s.trim();
    // implied product in front of a function name: `2sin(x)`
    if let Some(at) = first_function_index(s).filter(|at| *at > 0) {
        let factor = ParseNode::leaf(s[..at].trim());
        let function = do_functions(&s[at..])?;
        return Some(ParseNode::internal(Action::Product, vec![factor, function]));
    }
    match Action::find_first(s) {
        None => Some(ParseNode::leaf(s)),
        Some((_, op)) if !op.is_function() => None,
        Some((name, op)) => {
            let argument = do_functions(&s[name.len()..])?;
            Some(ParseNode::internal(op, vec![argument]))
        }
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return write!(f, "{}", self.text);
        }
        write!(f, "<{}", self.operator)?;
        for c in &self.children {
            write!(f, " {}", c)?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_of_operators() {
        let p = ParseNode::new("a+b*c^2");
        assert_eq!(p.to_string(), "<Sum a <Product b <Power c 2>>>");
        let p = ParseNode::new("x-y/z");
        assert_eq!(p.to_string(), "<Sum x <UMinus <Product y <Reciprocal z>>>>");
    }

    #[test]
    fn test_functions_and_groups() {
        let p = ParseNode::new("sin(x+1)");
        assert_eq!(p.to_string(), "<Sin <Sum x 1>>");
        let p = ParseNode::new("2(x+1)(x-1)");
        assert_eq!(p.operator, Action::Product);
        assert_eq!(p.children.len(), 3);
        let p = ParseNode::new("(x+1)^2");
        assert_eq!(p.to_string(), "<Power <Sum x 1> 2>");
        let p = ParseNode::new("2sin(x)");
        assert_eq!(p.to_string(), "<Product 2 <Sin x>>");
    }

    #[test]
    fn test_malformed_strings_are_flagged() {
        for s in ["(x+1", "x+*y", "x^^2", "2*-3", "x)"] {
            let p = ParseNode::new(s);
            assert!(p.is_bad(), "{} should not parse", s);
            assert_eq!(p.operator, Action::Corrupted);
        }
    }

    #[test]
    fn test_numeric_evaluation() {
        let p = ParseNode::new("-(2+3)*4");
        assert_eq!(p.to_string(), "<Sum <UMinus <Product <Sum 2 3> 4>>>");
        let v = p.eval_with(&|t| t.parse::<f64>().ok());
        assert_eq!(v, Some(-20.0));
        let p = ParseNode::new("x^2");
        assert_eq!(p.eval_with(&|t| if t == "x" { Some(3.0) } else { t.parse().ok() }), Some(9.0));
    }
}
