//! Node records and registered nodes.
//!
//! A [`NodeRecord`] is what the data source hands back: identity, parent link, display
//! name and a has-children hint. Once a record is registered with the
//! [`NodeStore`](crate::NodeStore) it becomes a [`Node`], which additionally carries the
//! sibling order assigned at first registration and the two materialization flags.

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// A validated record as returned by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Globally unique identifier.
    pub id: NodeId,
    /// Parent identifier, `None` only for the root.
    pub parent_id: Option<NodeId>,
    /// Display name.
    pub name: String,
    /// Whether the data source reports children below this node.
    pub has_children: bool,
}

impl NodeRecord {
    /// Creates a record with a parent.
    pub fn new(
        id: impl Into<NodeId>,
        parent_id: impl Into<NodeId>,
        name: impl Into<String>,
        has_children: bool,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent_id.into()),
            name: name.into(),
            has_children,
        }
    }

    /// Creates a parentless root record.
    pub fn root(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            name: name.into(),
            has_children: true,
        }
    }
}

/// A node registered in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Globally unique identifier.
    pub id: NodeId,
    /// Parent identifier, `None` only for the root.
    pub parent_id: Option<NodeId>,
    /// Display name.
    pub name: String,
    /// Has-children hint from the data source.
    pub has_children: bool,
    /// Position among siblings, fixed at first registration.
    pub order: usize,
    /// Set once the node has been expanded by materialization.
    pub expanded: bool,
    /// Set once the node's subtree has been handed to the renderer.
    pub loaded: bool,
}

impl Node {
    /// Builds a node from a record and its assigned sibling order.
    pub(crate) fn from_record(record: NodeRecord, order: usize) -> Self {
        Self {
            id: record.id,
            parent_id: record.parent_id,
            name: record.name,
            has_children: record.has_children,
            order,
            expanded: false,
            loaded: false,
        }
    }

    /// Returns true if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
