//! Shared fixtures for unit tests.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use orgtree_cache::{Node, NodeId, NodeRecord, TreeCache};

use crate::{MemorySource, Renderer};

/// Ten nodes under `root`. Exactly 4, 7 and 9 match "ann".
const SCENARIO: &str = r#"[
    {"id": "root", "name": "Root", "hasChildren": true},
    {"id": "1", "parentId": "root", "name": "Bob Stone", "firstName": "Bob", "hasChildren": true},
    {"id": "2", "parentId": "root", "name": "Carl Rowe", "firstName": "Carl", "hasChildren": true},
    {"id": "3", "parentId": "1", "name": "Dora Kent", "firstName": "Dora"},
    {"id": "4", "parentId": "1", "name": "Ann Vale", "firstName": "Ann"},
    {"id": "5", "parentId": "1", "name": "Eve Marsh", "firstName": "Eve", "hasChildren": true},
    {"id": "6", "parentId": "5", "name": "Zed Price", "firstName": "Zed"},
    {"id": "7", "parentId": "2", "name": "Anna Ford", "firstName": "Anna"},
    {"id": "8", "parentId": "2", "name": "Gus Hale", "firstName": "Gus", "hasChildren": true},
    {"id": "9", "parentId": "8", "name": "Hannah Lowe", "firstName": "Hannah"},
    {"id": "10", "parentId": "8", "name": "Ivy Cole", "firstName": "Ivy"}
]"#;

/// The scenario dataset.
pub fn scenario_source() -> MemorySource {
    MemorySource::from_json_str(SCENARIO, Path::new("scenario.json")).unwrap()
}

/// A cache holding only the scenario root.
pub fn scenario_cache() -> TreeCache {
    TreeCache::new(NodeRecord::root("root", "Root")).unwrap()
}

/// A renderer that records every call.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Container name last set.
    pub container: Option<String>,
    /// Root identifier last set.
    pub root: Option<NodeId>,
    /// Nodes added, in call order.
    pub added: Vec<NodeId>,
    /// Nodes by identifier.
    pub nodes: HashMap<NodeId, Node>,
    /// Nodes marked expanded, in call order.
    pub expanded: Vec<NodeId>,
    /// Last centered node.
    pub centered: Option<NodeId>,
    /// Highlight sets passed to each render call.
    pub renders: Vec<HashSet<NodeId>>,
}

impl Renderer for RecordingRenderer {
    fn set_container(&mut self, container: &str) {
        self.container = Some(container.to_string());
    }

    fn set_root(&mut self, root: &Node) {
        self.root = Some(root.id.clone());
        self.nodes.insert(root.id.clone(), root.clone());
    }

    fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn add_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.added.push(node.id.clone());
            self.nodes.insert(node.id.clone(), node.clone());
        }
    }

    fn set_expanded(&mut self, id: &str) {
        self.expanded.push(NodeId::from(id));
    }

    fn set_centered(&mut self, id: &str) {
        self.centered = Some(NodeId::from(id));
    }

    fn render(&mut self, highlighted: &HashSet<NodeId>) {
        self.renders.push(highlighted.clone());
    }
}
