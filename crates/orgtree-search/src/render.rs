//! The renderer contract.
//!
//! orgtree does no drawing of its own. A [`Renderer`] receives nodes as they become
//! visible, is told which ones are expanded and which one to center on, and redraws on
//! request. Node identity, parent links and the has-children hint are the public
//! fields of [`Node`]; the children-loader is
//! [`SearchSession::expand`](crate::SearchSession::expand).

use std::collections::HashSet;

use orgtree_cache::{Node, NodeId};

/// Imperative interface to whatever displays the tree.
pub trait Renderer: Send + 'static {
    /// Sets the display target.
    fn set_container(&mut self, container: &str);

    /// Sets the root node the display hangs from.
    fn set_root(&mut self, root: &Node);

    /// Returns true if the renderer already holds `id`.
    fn has_node(&self, id: &str) -> bool;

    /// Adds nodes whose parents are already known to the renderer, in the given order.
    fn add_nodes(&mut self, nodes: &[Node]);

    /// Marks `id` as expanded so its children are shown.
    fn set_expanded(&mut self, id: &str);

    /// Centers the display on `id`.
    fn set_centered(&mut self, id: &str);

    /// Redraws, styling the `highlighted` nodes as matches.
    fn render(&mut self, highlighted: &HashSet<NodeId>);

    /// Text displayed for `node`.
    fn content(&self, node: &Node, highlighted: bool) -> String {
        if highlighted {
            format!("[{}]", node.name)
        } else {
            node.name.clone()
        }
    }
}
