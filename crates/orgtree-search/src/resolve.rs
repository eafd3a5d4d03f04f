//! Ancestor resolution.
//!
//! A search match can sit anywhere in the tree, far below what has been expanded.
//! [`ensure_ancestor_chain`] registers the match and then walks its parent links
//! upward, fetching each missing parent by identifier, until it reaches a parentless
//! node. This is the only place that fetches in the ancestor direction.

use std::collections::HashSet;

use orgtree_cache::{NodeId, NodeRecord, TreeCache};

use crate::{DataSource, Fetcher, SearchError};

/// How far the upward walk got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncestorChain {
    /// Every link up to a parentless node is registered.
    Complete,
    /// The data source had no record for `missing`; ancestors above it stay unknown.
    Broken {
        /// Parent identifier that could not be fetched.
        missing: NodeId,
    },
    /// Parent links loop back to `at`.
    Cycle {
        /// First node visited twice.
        at: NodeId,
    },
}

impl AncestorChain {
    /// The identifier left unresolved, if the walk stopped early.
    pub fn unresolved(&self) -> Option<&NodeId> {
        match self {
            Self::Complete => None,
            Self::Broken { missing } => Some(missing),
            Self::Cycle { at } => Some(at),
        }
    }
}

/// Registers `record` and every ancestor of it that the cache does not yet know.
///
/// Nodes that are already registered are not fetched again. Data-source failures that
/// survive the retry policy abort the walk with an error; a parent the source simply
/// does not have ends it with [`AncestorChain::Broken`].
pub async fn ensure_ancestor_chain<S>(
    cache: &mut TreeCache,
    fetcher: &Fetcher<'_, S>,
    record: NodeRecord,
) -> Result<AncestorChain, SearchError>
where
    S: DataSource + ?Sized,
{
    let mut current = record.id.clone();
    cache.register(record);
    let mut seen = HashSet::new();

    loop {
        if !seen.insert(current.clone()) {
            tracing::warn!(node = %current, "cycle in parent links");
            return Ok(AncestorChain::Cycle { at: current });
        }
        let Some(parent) = cache.get(current.as_str()).and_then(|n| n.parent_id.clone()) else {
            return Ok(AncestorChain::Complete);
        };
        if !cache.contains(parent.as_str()) {
            match fetcher.node(&parent).await? {
                Some(fetched) if fetched.id == parent => {
                    cache.register(fetched);
                }
                Some(fetched) => {
                    tracing::warn!(
                        requested = %parent,
                        returned = %fetched.id,
                        "data source returned a different node"
                    );
                    return Ok(AncestorChain::Broken { missing: parent });
                }
                None => {
                    tracing::warn!(
                        node = %current,
                        parent = %parent,
                        "ancestor not found in data source"
                    );
                    return Ok(AncestorChain::Broken { missing: parent });
                }
            }
        }
        current = parent;
    }
}
