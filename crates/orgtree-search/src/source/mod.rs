//! The data-source boundary.
//!
//! Everything orgtree knows about the tree arrives through [`DataSource`]. The three
//! operations are deliberately distinct: listing a parent's children and fetching a
//! single node by identifier answer different questions, and ancestor resolution only
//! ever asks the second one.

mod memory;

use async_trait::async_trait;
pub use memory::{MemorySource, RawRecord};
use orgtree_cache::{NodeId, NodeRecord};

use crate::SourceError;

/// Asynchronous access to the backing hierarchy.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Direct children of `parent`, in backing-store order.
    async fn get_children(&self, parent: &NodeId) -> Result<Vec<NodeRecord>, SourceError>;

    /// A single node by identifier, or `None` if the source does not know it.
    async fn get_node(&self, id: &NodeId) -> Result<Option<NodeRecord>, SourceError>;

    /// Nodes whose search key contains `term`, ignoring case. No ordering guarantee.
    async fn search(&self, term: &str) -> Result<Vec<NodeRecord>, SourceError>;
}
