//! Incremental cache for a lazily loaded hierarchy.
//!
//! orgtree never holds the whole tree. Nodes arrive from a data source a few at a time,
//! either because a user expanded a branch or because a search needed a path to a match.
//! This crate keeps what has arrived so far:
//!
//! - [`NodeStore`] registers every node once and fixes its position among siblings.
//! - [`ChildCache`] remembers which parents have had their children fetched.
//! - [`DepthIndex`] tracks how deep the fetched part of the tree currently reaches.
//!
//! [`TreeCache`] owns all three for a single session.

#![warn(missing_docs)]

mod children;
mod depth;
mod error;
mod id;
mod node;
mod store;
mod tree;

pub use children::ChildCache;
pub use depth::DepthIndex;
pub use error::CacheError;
pub use id::NodeId;
pub use node::{Node, NodeRecord};
pub use store::NodeStore;
pub use tree::TreeCache;
