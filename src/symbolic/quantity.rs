/// One piece of a balanced-parenthesis split: raw text or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityPart {
    Text(String),
    Group(Quantity),
}

/// A string split at its top level parentheses into alternating text and groups,
/// always starting and ending with (possibly empty) text.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub children: Vec<QuantityPart>,
}

impl Quantity {
    /// None when the parentheses do not balance
    pub fn new(s: &str) -> Option<Quantity> {
        let mut depth: i32 = 0;
        let mut pieces: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for (i, c) in s.char_indices() {
            match c {
                '(' => {
                    if depth == 0 {
                        pieces.push((start, i));
                        start = i + 1;
                    }
                    depth += 1;
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        pieces.push((start, i));
                        start = i + 1;
                    }
                }
                _ => {}
            }
            if depth < 0 {
                return None;
            }
        }
        if depth != 0 {
            return None;
        }
        pieces.push((start, s.len()));
        let mut children = Vec::with_capacity(pieces.len());
        for (k, (a, b)) in pieces.into_iter().enumerate() {
            let text = &s[a..b];
            if k % 2 == 0 {
                children.push(QuantityPart::Text(text.to_string()));
            } else {
                children.push(QuantityPart::Group(Quantity::new(text)?));
            }
        }
        Some(Quantity { children })
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.children {
            match c {
                QuantityPart::Text(t) => write!(f, "{}", t)?,
                QuantityPart::Group(q) => write!(f, "[{}]", q)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_groups() {
        let q = Quantity::new("2(x+(y))z").unwrap();
        assert_eq!(q.children.len(), 3);
        assert_eq!(q.to_string(), "2[x+[y]]z");
    }

    #[test]
    fn test_unbalanced_input() {
        assert!(Quantity::new("(x").is_none());
        assert!(Quantity::new("x)(").is_none());
        assert!(Quantity::new(")").is_none());
        assert_eq!(Quantity::new("x").unwrap().children.len(), 1);
    }
}
