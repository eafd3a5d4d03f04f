//! Error types for the tree cache.

use thiserror::Error;

use crate::NodeId;

/// Errors raised when the cache is asked to do something its invariants forbid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The requested node has not been registered.
    #[error("unknown node: {id}")]
    UnknownNode {
        /// Identifier that was looked up.
        id: NodeId,
    },

    /// The root record handed to a new cache has a parent.
    #[error("root node {id} must not have a parent (found {parent})")]
    RootHasParent {
        /// Identifier of the offending root record.
        id: NodeId,
        /// Parent identifier it carried.
        parent: NodeId,
    },
}
