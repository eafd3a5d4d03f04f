//! Search scope construction.
//!
//! The scope of a search is the smallest set of nodes that shows every match in
//! context: the matches, all of their ancestors, and the siblings of every node on
//! those ancestor paths. It is rebuilt from scratch for each search.

use std::collections::HashSet;

use orgtree_cache::{NodeId, TreeCache};

use crate::{DataSource, Fetcher, SearchError};

/// The set of node identifiers visible for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchScope {
    /// Member identifiers.
    members: HashSet<NodeId>,
}

impl SearchScope {
    /// Returns true if `id` is in scope.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Number of nodes in scope.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if nothing is in scope.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over members in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.members.iter()
    }

    /// Members sorted by identifier.
    pub fn sorted(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.members.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Adds `id` to the scope.
    fn insert(&mut self, id: NodeId) {
        self.members.insert(id);
    }
}

impl FromIterator<NodeId> for SearchScope {
    fn from_iter<T: IntoIterator<Item = NodeId>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// A freshly built scope and the parents whose siblings could not be listed.
#[derive(Debug, Clone, Default)]
pub struct ScopeBuild {
    /// The computed scope.
    pub scope: SearchScope,
    /// Parents whose child list came back empty despite having a known child.
    pub unresolved: Vec<NodeId>,
}

/// Builds the scope for `matches`.
///
/// Ancestor paths are read from the cache only, so [`ensure_ancestor_chain`] must have
/// run for every match first. Sibling lists come from the child cache, fetching any
/// that are missing. A fetched list that comes back empty is left uncached and the
/// parent is reported as unresolved, since the walk already knows one of its children.
///
/// [`ensure_ancestor_chain`]: crate::ensure_ancestor_chain
pub async fn build_scope<S>(
    cache: &mut TreeCache,
    fetcher: &Fetcher<'_, S>,
    matches: &[NodeId],
) -> Result<ScopeBuild, SearchError>
where
    S: DataSource + ?Sized,
{
    let mut build = ScopeBuild::default();
    let mut path_nodes = Vec::new();
    let mut on_path = HashSet::new();

    for id in matches {
        for node in cache.path_to_root(id.as_str()) {
            build.scope.insert(node.clone());
            if on_path.insert(node.clone()) {
                path_nodes.push(node);
            }
        }
    }

    for id in &path_nodes {
        let Some(parent) = cache.get(id.as_str()).and_then(|n| n.parent_id.clone()) else {
            continue;
        };
        if !cache.contains(parent.as_str()) {
            continue;
        }
        if !cache.has_cached_children(parent.as_str()) {
            let records = fetcher.children(&parent).await?;
            if records.is_empty() {
                tracing::warn!(
                    %parent,
                    child = %id,
                    "data source listed no children for a known parent"
                );
                build.unresolved.push(parent);
                continue;
            }
            cache.ingest_children(&parent, records)?;
        }
        for sibling in cache.children(parent.as_str()).unwrap_or_default() {
            build.scope.insert(sibling.clone());
        }
    }

    Ok(build)
}
