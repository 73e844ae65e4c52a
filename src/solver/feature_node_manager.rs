use crate::solver::feature_node::{FeatureError, FeatureValue, MdeFeatureNode};

pub const ROOT_PATH: &str = "";
pub const MDE_NAME: &str = "MDE";
pub const MDE_PATH: &str = "/MDE/";
pub const GRAPH_DATA_NAME: &str = "GraphData";
pub const GRAPH_DATA_PATH: &str = "/MDE/GraphData/";

/// Which of the nodes matched by a path receives a key or value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WhichNode {
    Last,
    All,
    Index(usize),
}

/// Location of a node below the root: each step is (key, index in that key's value list).
pub type NodeAddress = Vec<(String, usize)>;

/// Path-addressed access to a feature tree. Paths are `/`-separated key sequences; a leading
/// `/` starts at the root, otherwise at the current node. Empty segments are ignored and a
/// segment matches every node stored under that key, so one path can address many nodes.
#[derive(Debug, Clone, Default)]
pub struct MdeFeatureNodeManager {
    root: MdeFeatureNode,
    current: NodeAddress,
}

fn parse_path(path: &str) -> Vec<&str> {
    path.split('/')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

impl MdeFeatureNodeManager {
    pub fn new() -> Self {
        MdeFeatureNodeManager::with_root(MdeFeatureNode::new())
    }

    pub fn with_root(root: MdeFeatureNode) -> Self {
        MdeFeatureNodeManager {
            root,
            current: Vec::new(),
        }
    }

    pub fn root(&self) -> &MdeFeatureNode {
        &self.root
    }

    fn node_at(&self, address: &[(String, usize)]) -> Option<&MdeFeatureNode> {
        let mut node = &self.root;
        for (key, i) in address {
            node = node.values(key)?.get(*i)?.as_node()?;
        }
        Some(node)
    }

    fn node_at_mut(&mut self, address: &[(String, usize)]) -> Option<&mut MdeFeatureNode> {
        let mut node = &mut self.root;
        for (key, i) in address {
            node = node.values_mut(key)?.get_mut(*i)?.as_node_mut()?;
        }
        Some(node)
    }

    pub fn current(&self) -> &MdeFeatureNode {
        self.node_at(&self.current).unwrap_or(&self.root)
    }

    fn current_mut(&mut self) -> Option<&mut MdeFeatureNode> {
        if self.node_at(&self.current).is_none() {
            self.current.clear();
        }
        let address = self.current.clone();
        self.node_at_mut(&address)
    }

    pub fn reset_current(&mut self) {
        self.current.clear();
    }

    fn collect(&self, node: &MdeFeatureNode, base: NodeAddress, segments: &[&str], out: &mut Vec<NodeAddress>) {
        let Some((first, rest)) = segments.split_first() else {
            out.push(base);
            return;
        };
        let Some(values) = node.values(first) else {
            return;
        };
        for (i, v) in values.iter().enumerate() {
            if let FeatureValue::Node(child) = v {
                let mut address = base.clone();
                address.push((first.to_string(), i));
                self.collect(child, address, rest, out);
            }
        }
    }

    fn addresses(&self, path: &str) -> Vec<NodeAddress> {
        let segments = parse_path(path);
        let (start, base) = if path.trim().starts_with('/') {
            (&self.root, Vec::new())
        } else {
            (self.current(), self.current.clone())
        };
        let mut out = Vec::new();
        self.collect(start, base, &segments, &mut out);
        out
    }

    /// every node matched by `path`, possibly none
    pub fn get_nodes(&self, path: &str) -> Vec<&MdeFeatureNode> {
        self.addresses(path)
            .iter()
            .filter_map(|a| self.node_at(a))
            .collect()
    }

    pub fn set_current(&mut self, path: &str) -> Result<(), FeatureError> {
        let mut found = self.addresses(path);
        match found.len() {
            0 => Err(FeatureError::PathNotFound(path.to_string())),
            1 => {
                self.current = found.remove(0);
                Ok(())
            }
            _ => Err(FeatureError::AmbiguousPath(path.to_string())),
        }
    }

    pub fn add_key(&mut self, key: &str) {
        if let Some(n) = self.current_mut() {
            n.add_key(key);
        }
    }

    pub fn add_value(&mut self, key: &str, value: impl Into<FeatureValue>) -> Result<(), FeatureError> {
        self.current_mut()
            .ok_or_else(|| FeatureError::PathNotFound("current node".to_string()))?
            .add_value(key, value)
    }

    fn selected(&self, path: &str, which: WhichNode) -> Result<Vec<NodeAddress>, FeatureError> {
        let mut found = self.addresses(path);
        if found.is_empty() {
            return Err(FeatureError::PathNotFound(path.to_string()));
        }
        match which {
            WhichNode::All => Ok(found),
            WhichNode::Last => Ok(found.split_off(found.len() - 1)),
            WhichNode::Index(i) if i < found.len() => Ok(vec![found.swap_remove(i)]),
            WhichNode::Index(_) => Err(FeatureError::PathNotFound(path.to_string())),
        }
    }

    pub fn add_key_at(&mut self, path: &str, key: &str, which: WhichNode) -> Result<(), FeatureError> {
        for address in self.selected(path, which)? {
            if let Some(n) = self.node_at_mut(&address) {
                n.add_key(key);
            }
        }
        Ok(())
    }

    pub fn add_value_at(
        &mut self,
        path: &str,
        key: &str,
        value: impl Into<FeatureValue>,
        which: WhichNode,
    ) -> Result<(), FeatureError> {
        let value = value.into();
        for address in self.selected(path, which)? {
            if let Some(n) = self.node_at_mut(&address) {
                n.add_value(key, value.clone())?;
            }
        }
        Ok(())
    }

    /// appends a fresh empty node under `key` in every node matched by `path`
    pub fn add_node(&mut self, path: &str, key: &str) {
        for address in self.addresses(path) {
            if let Some(n) = self.node_at_mut(&address) {
                n.put(key, MdeFeatureNode::new());
            }
        }
    }

    pub fn to_xml(&self) -> String {
        self.root.to_xml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_manager() -> MdeFeatureNodeManager {
        let mut m = MdeFeatureNodeManager::new();
        m.add_node(ROOT_PATH, MDE_NAME);
        m.set_current(MDE_NAME).unwrap();
        m.add_node(ROOT_PATH, GRAPH_DATA_NAME);
        m.set_current(GRAPH_DATA_NAME).unwrap();
        m
    }

    #[test]
    fn test_relative_and_absolute_paths() {
        let mut m = graph_manager();
        m.add_key("graphName");
        m.add_value("graphName", "parabola").unwrap();
        assert_eq!(m.get_nodes(GRAPH_DATA_PATH).len(), 1);
        assert_eq!(m.get_nodes("").len(), 1);
        m.reset_current();
        let nodes = m.get_nodes("/MDE/GraphData");
        assert_eq!(nodes[0].first_string("graphName").unwrap(), "parabola");
        assert!(m.get_nodes("/MDE/Nothing").is_empty());
    }

    #[test]
    fn test_ambiguous_paths_are_rejected() {
        let mut m = graph_manager();
        m.add_node("", "focus");
        m.add_node("", "focus");
        assert_eq!(m.get_nodes("focus").len(), 2);
        assert_eq!(
            m.set_current("focus"),
            Err(FeatureError::AmbiguousPath("focus".to_string()))
        );
        assert!(matches!(m.set_current("vertex"), Err(FeatureError::PathNotFound(_))));
        m.add_key_at("focus", "X", WhichNode::All).unwrap();
        m.add_value_at("focus", "X", "3", WhichNode::Index(1)).unwrap();
        let nodes = m.get_nodes("focus");
        assert!(nodes[0].values("X").unwrap().is_empty());
        assert_eq!(nodes[1].first_string("X").unwrap(), "3");
    }

    #[test]
    fn test_xml_of_the_whole_tree() {
        let mut m = graph_manager();
        m.add_key("domain");
        m.add_value("domain", "all reals").unwrap();
        assert_eq!(
            m.to_xml(),
            "\n<MDE>\n<GraphData>\n<domain>all reals</domain>\n</GraphData>\n</MDE>"
        );
    }
}
