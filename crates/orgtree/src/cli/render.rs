//! Terminal tree renderer.
//!
//! [`TreeRenderer`] keeps the nodes the session has shown it and draws them as an
//! indented tree. Children appear only below expanded nodes, in sibling order.

use std::{
    collections::{HashMap, HashSet},
    io::{self, Write},
};

use orgtree_cache::{Node, NodeId};
use orgtree_highlight::{branch, dim, matched, rule, subheader};
use orgtree_search::Renderer;

/// Marker after a collapsed node that has children.
const COLLAPSED: &str = " +";

/// Marker after the centered node.
const CENTERED: &str = " <";

/// Draws the visible part of the chart as text.
#[derive(Debug, Default)]
pub struct TreeRenderer {
    /// Display target name, printed above the tree.
    container: String,
    /// Root of the display.
    root: Option<NodeId>,
    /// Every node shown so far.
    nodes: HashMap<NodeId, Node>,
    /// Shown children per parent.
    children: HashMap<NodeId, Vec<NodeId>>,
    /// Nodes whose children are drawn.
    expanded: HashSet<NodeId>,
    /// The node the view is centered on.
    centered: Option<NodeId>,
    /// The most recent drawing.
    frame: String,
    /// Whether each drawing is written to stdout as it happens.
    live: bool,
}

impl TreeRenderer {
    /// A renderer that only keeps its latest frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that also prints every frame to stdout.
    pub fn live() -> Self {
        Self {
            live: true,
            ..Self::default()
        }
    }

    /// The most recent drawing.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Draws the tree with `highlighted` nodes styled as matches.
    fn draw(&self, highlighted: &HashSet<NodeId>) -> String {
        let mut out = String::new();
        let Some(root) = self.root.as_ref().and_then(|id| self.nodes.get(id)) else {
            return out;
        };
        out.push_str(&subheader(&self.container));
        out.push('\n');
        out.push_str(&self.line(root, highlighted));
        out.push('\n');
        self.draw_children(&mut out, &root.id, "", highlighted);
        out
    }

    /// Appends the visible children of `parent` with box-drawing branches.
    fn draw_children(
        &self,
        out: &mut String,
        parent: &NodeId,
        prefix: &str,
        highlighted: &HashSet<NodeId>,
    ) {
        if !self.expanded.contains(parent) {
            return;
        }
        let kids = self.visible_children(parent);
        let count = kids.len();
        for (i, child) in kids.into_iter().enumerate() {
            let (connector, indent) = branch(i + 1 == count);
            out.push_str(prefix);
            out.push_str(&connector);
            out.push_str(&self.line(child, highlighted));
            out.push('\n');
            self.draw_children(out, &child.id, &format!("{prefix}{indent}"), highlighted);
        }
    }

    /// Shown children of `parent` in sibling order.
    fn visible_children(&self, parent: &NodeId) -> Vec<&Node> {
        let mut kids: Vec<&Node> = self
            .children
            .get(parent)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default();
        kids.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        kids
    }

    /// One node's line: its content, identifier and markers.
    fn line(&self, node: &Node, highlighted: &HashSet<NodeId>) -> String {
        let mut line = self.content(node, highlighted.contains(&node.id));
        line.push_str(&dim(&format!(" #{}", node.id)));
        if node.has_children && !self.expanded.contains(&node.id) {
            line.push_str(&dim(COLLAPSED));
        }
        if self.centered.as_ref() == Some(&node.id) {
            line.push_str(CENTERED);
        }
        line
    }

    /// Records `node`, linking it below its parent.
    fn insert(&mut self, node: &Node) {
        if let Some(parent) = node.parent_id.as_ref() {
            let siblings = self.children.entry(parent.clone()).or_default();
            if !siblings.contains(&node.id) {
                siblings.push(node.id.clone());
            }
        }
        self.nodes.insert(node.id.clone(), node.clone());
    }
}

impl Renderer for TreeRenderer {
    fn set_container(&mut self, container: &str) {
        self.container = container.to_string();
    }

    fn set_root(&mut self, root: &Node) {
        self.root = Some(root.id.clone());
        self.insert(root);
    }

    fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn add_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.insert(node);
        }
    }

    fn set_expanded(&mut self, id: &str) {
        self.expanded.insert(NodeId::from(id));
    }

    fn set_centered(&mut self, id: &str) {
        self.centered = Some(NodeId::from(id));
    }

    fn render(&mut self, highlighted: &HashSet<NodeId>) {
        self.frame = self.draw(highlighted);
        if !self.live {
            return;
        }
        let mut stdout = io::stdout().lock();
        let written = writeln!(stdout, "{}", rule(40))
            .and_then(|()| write!(stdout, "{}", self.frame))
            .and_then(|()| stdout.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write frame");
        }
    }

    fn content(&self, node: &Node, highlighted: bool) -> String {
        if highlighted {
            matched(&node.name)
        } else {
            node.name.clone()
        }
    }
}
