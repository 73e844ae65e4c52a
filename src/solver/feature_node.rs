use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());

/// Errors raised while reading or writing the feature tree
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    UndeclaredKey(String),
    MissingValue(String),
    NotANode(String),
    PathNotFound(String),
    AmbiguousPath(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureError::UndeclaredKey(k) => write!(f, "Key {} has not been declared", k),
            FeatureError::MissingValue(k) => write!(f, "No value stored under key {}", k),
            FeatureError::NotANode(k) => write!(f, "Value under key {} is not a node", k),
            FeatureError::PathNotFound(p) => write!(f, "Path {} matches no node", p),
            FeatureError::AmbiguousPath(p) => write!(f, "Path {} matches more than one node", p),
        }
    }
}

impl std::error::Error for FeatureError {}

/// A value stored in the feature tree: a plain string or a nested node.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Node(MdeFeatureNode),
}

impl FeatureValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            FeatureValue::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&MdeFeatureNode> {
        match self {
            FeatureValue::Node(n) => Some(n),
            FeatureValue::Text(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut MdeFeatureNode> {
        match self {
            FeatureValue::Node(n) => Some(n),
            FeatureValue::Text(_) => None,
        }
    }
}

impl From<String> for FeatureValue {
    fn from(s: String) -> Self {
        FeatureValue::Text(s)
    }
}

impl From<&str> for FeatureValue {
    fn from(s: &str) -> Self {
        FeatureValue::Text(s.to_string())
    }
}

impl From<MdeFeatureNode> for FeatureValue {
    fn from(n: MdeFeatureNode) -> Self {
        FeatureValue::Node(n)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureValue::Text(s) => write!(f, "{}", s),
            FeatureValue::Node(n) => write!(f, "{}", n),
        }
    }
}

/// Node of the feature tree: an insertion-ordered map from keys to lists of values.
/// Keys must be declared with `add_key` (or implicitly through `put`) before values are added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MdeFeatureNode {
    entries: Vec<(String, Vec<FeatureValue>)>,
}

impl MdeFeatureNode {
    pub fn new() -> Self {
        MdeFeatureNode {
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// declares `key` with an empty value list; an existing key is reset in place
    pub fn add_key(&mut self, key: &str) {
        match self.position(key) {
            Some(i) => self.entries[i].1.clear(),
            None => self.entries.push((key.to_string(), Vec::new())),
        }
    }

    pub fn add_value(
        &mut self,
        key: &str,
        value: impl Into<FeatureValue>,
    ) -> Result<(), FeatureError> {
        let i = self
            .position(key)
            .ok_or_else(|| FeatureError::UndeclaredKey(key.to_string()))?;
        self.entries[i].1.push(value.into());
        Ok(())
    }

    /// declares the key when missing, then appends
    pub fn put(&mut self, key: &str, value: impl Into<FeatureValue>) {
        let i = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        self.entries[i].1.push(value.into());
    }

    pub fn values(&self, key: &str) -> Option<&[FeatureValue]> {
        self.position(key).map(|i| self.entries[i].1.as_slice())
    }

    pub fn values_mut(&mut self, key: &str) -> Option<&mut Vec<FeatureValue>> {
        self.position(key).map(move |i| &mut self.entries[i].1)
    }

    pub fn get_value(&self, key: &str) -> Result<&FeatureValue, FeatureError> {
        self.values(key)
            .ok_or_else(|| FeatureError::UndeclaredKey(key.to_string()))?
            .first()
            .ok_or_else(|| FeatureError::MissingValue(key.to_string()))
    }

    pub fn first_string(&self, key: &str) -> Result<String, FeatureError> {
        Ok(self.get_value(key)?.to_string())
    }

    pub fn child_nodes(&self, key: &str) -> Result<Vec<&MdeFeatureNode>, FeatureError> {
        let values = self
            .values(key)
            .ok_or_else(|| FeatureError::UndeclaredKey(key.to_string()))?;
        Ok(values.iter().filter_map(|v| v.as_node()).collect())
    }

    pub fn child_strings(&self, key: &str) -> Result<Vec<String>, FeatureError> {
        let values = self
            .values(key)
            .ok_or_else(|| FeatureError::UndeclaredKey(key.to_string()))?;
        Ok(values.iter().filter_map(|v| v.as_text()).map(String::from).collect())
    }

    /// XML fragment: one `<key>value</key>` per value, in insertion order. Tag names keep
    /// only ASCII letters and digits; text escapes angle brackets; blank values are skipped.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        for (key, values) in &self.entries {
            let tag = NON_ALPHANUMERIC.replace_all(key, "");
            for v in values {
                let body = match v {
                    FeatureValue::Node(n) => format!("{}\n", n.to_xml()),
                    FeatureValue::Text(s) => {
                        if s.trim().is_empty() {
                            continue;
                        }
                        s.replace('>', "&gt;").replace('<', "&lt;")
                    }
                };
                out.push_str(&format!("\n<{}>{}</{}>", tag, body, tag));
            }
        }
        out
    }
}

impl fmt::Display for MdeFeatureNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, values)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            write!(f, "{}=[{}]", key, joined.join(", "))?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut node = MdeFeatureNode::new();
        node.add_key("b");
        node.add_key("a");
        node.put("b", "1");
        node.add_key("b");
        assert_eq!(node.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(node.values("b").unwrap().is_empty());
    }

    #[test]
    fn test_undeclared_keys_are_rejected() {
        let mut node = MdeFeatureNode::new();
        assert_eq!(
            node.add_value("x", "1"),
            Err(FeatureError::UndeclaredKey("x".to_string()))
        );
        node.add_key("x");
        assert_eq!(
            node.get_value("x"),
            Err(FeatureError::MissingValue("x".to_string()))
        );
        node.add_value("x", "1").unwrap();
        assert_eq!(node.first_string("x").unwrap(), "1");
        assert!(node.child_strings("y").is_err());
    }

    #[test]
    fn test_xml_rendering() {
        let mut point = MdeFeatureNode::new();
        point.put("X", "1");
        point.put("Y", "2");
        let mut node = MdeFeatureNode::new();
        node.put("graph name", "a < b");
        node.put("blank", "  ");
        node.put("point", point);
        assert_eq!(
            node.to_xml(),
            "\n<graphname>a &lt; b</graphname>\n<point>\n<X>1</X>\n<Y>2</Y>\n</point>"
        );
        assert_eq!(node.child_nodes("point").unwrap().len(), 1);
    }
}
