//! The search session.
//!
//! A [`SearchSession`] owns the tree cache for one data source and drives a renderer.
//! Expanding a node loads its children on demand. A search runs the full pipeline:
//!
//! 1. Query the data source for matches.
//! 2. Resolve each match's ancestor chain, fetching missing parents by identifier.
//! 3. Build the scope from the cache, fetching missing sibling lists.
//! 4. Compute the clamped LCA and materialize the scoped subtree from it.
//! 5. Highlight the matches and schedule the highlight to clear.
//!
//! The cache is append-only, so a search that fails or is superseded part way leaves
//! it valid for the next one.

use std::{
    collections::HashSet,
    fmt, mem, slice,
    sync::Arc,
    time::Duration,
};

use orgtree_cache::{CacheError, Node, NodeId, NodeRecord, TreeCache};
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;

use crate::{
    CancellationToken, DataSource, Fetcher, HighlightTimer, Renderer, RetryPolicy, ScopeBuild,
    ScopedChildren, SearchCanceller, SearchError, SearchVersionTracker, build_scope, compute_lca,
    ensure_ancestor_chain, materialize, reveal_ancestors,
};

/// Where the session is in the search pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// No search in progress and nothing highlighted.
    #[default]
    Idle,
    /// Waiting for the data source to return matches.
    Querying,
    /// Fetching missing ancestors of the matches.
    ResolvingAncestors,
    /// Computing the scope and fetching sibling lists.
    BuildingScope,
    /// Handing the scoped subtree to the renderer.
    Materializing,
    /// Matches are highlighted until the highlight timer fires.
    Highlighted,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Querying => "querying",
            Self::ResolvingAncestors => "resolving ancestors",
            Self::BuildingScope => "building scope",
            Self::Materializing => "materializing",
            Self::Highlighted => "highlighted",
        };
        f.write_str(name)
    }
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Identifier of the root node in the data source.
    pub root_id: NodeId,
    /// Display target passed to the renderer.
    pub container: String,
    /// How long matches stay highlighted.
    pub highlight_delay: Duration,
    /// Retry policy for every data-source call.
    pub retry: RetryPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            root_id: NodeId::from("root"),
            container: "chart".to_string(),
            highlight_delay: Duration::from_millis(2500),
            retry: RetryPolicy::default(),
        }
    }
}

/// Summary of a completed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    /// The trimmed search term.
    pub term: String,
    /// Matched identifiers, in the order the data source returned them.
    pub matches: Vec<NodeId>,
    /// Scope members, sorted by identifier.
    pub scope: Vec<NodeId>,
    /// Where materialization started.
    pub lca: NodeId,
    /// Nodes materialized below the LCA, in visit order.
    pub materialized: Vec<NodeId>,
    /// Identifiers whose ancestors or siblings could not be resolved.
    pub unresolved: Vec<NodeId>,
    /// Deepest cached fringe depth when the search started.
    pub max_cached_depth: Option<usize>,
}

/// Result of [`SearchSession::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The term was empty or whitespace; nothing happened.
    Ignored,
    /// The data source had no matches; the cache was not touched.
    NotFound,
    /// A newer search cancelled this one before it finished.
    Superseded,
    /// Matches were materialized and highlighted.
    Found(SearchReport),
}

/// State shared with the highlight timer task.
#[derive(Debug, Default)]
struct HighlightState {
    /// Currently highlighted matches.
    highlighted: HashSet<NodeId>,
    /// Current pipeline phase.
    phase: SearchPhase,
}

/// One user's view of a lazily loaded tree.
pub struct SearchSession<S, R> {
    /// Everything fetched so far.
    cache: TreeCache,
    /// Where nodes come from.
    source: S,
    /// Where nodes go. Shared with the highlight timer.
    renderer: Arc<Mutex<R>>,
    /// Highlight set and phase. Shared with the highlight timer.
    state: Arc<Mutex<HighlightState>>,
    /// Pending highlight clear.
    timer: HighlightTimer,
    /// Search versions for cancellation.
    versions: SearchVersionTracker,
    /// Session settings.
    options: SessionOptions,
}

impl<S, R> SearchSession<S, R>
where
    S: DataSource,
    R: Renderer,
{
    /// Fetches the root, hands it to the renderer and performs the initial expansion.
    pub async fn open(
        source: S,
        mut renderer: R,
        options: SessionOptions,
    ) -> Result<Self, SearchError> {
        let root = Fetcher::new(&source, options.retry, CancellationToken::noop())
            .node(&options.root_id)
            .await?;
        let Some(root) = root else {
            return Err(SearchError::MissingRoot {
                id: options.root_id.clone(),
            });
        };
        let cache = TreeCache::new(root)?;

        renderer.set_container(&options.container);
        renderer.set_root(cache.root());

        let root_id = cache.root_id().clone();
        let mut session = Self {
            cache,
            source,
            renderer: Arc::new(Mutex::new(renderer)),
            state: Arc::new(Mutex::new(HighlightState::default())),
            timer: HighlightTimer::new(),
            versions: SearchVersionTracker::new(),
            options,
        };
        session.expand(root_id.as_str()).await?;
        tracing::info!(
            root = %root_id,
            container = %session.options.container,
            "session opened"
        );
        Ok(session)
    }

    /// Children of `id` sorted by sibling order, fetching them on first use.
    pub async fn load_children(&mut self, id: &str) -> Result<Vec<Node>, SearchError> {
        if !self.cache.contains(id) {
            return Err(CacheError::UnknownNode {
                id: NodeId::from(id),
            }
            .into());
        }
        if !self.cache.has_cached_children(id) {
            let parent = NodeId::from(id);
            let fetcher = Fetcher::new(&self.source, self.options.retry, CancellationToken::noop());
            let records = fetcher.children(&parent).await?;
            let ids = self.cache.ingest_children(&parent, records)?;
            tracing::debug!(parent = %parent, children = ids.len(), "children loaded");
        }
        Ok(self
            .cache
            .sorted_children(id)
            .unwrap_or_default()
            .into_iter()
            .cloned()
            .collect())
    }

    /// Loads the children of `id`, shows them and marks `id` expanded.
    pub async fn expand(&mut self, id: &str) -> Result<Vec<Node>, SearchError> {
        let children = self.load_children(id).await?;
        let node = self.cache.mark_materialized(id)?.clone();
        let highlighted = self.state.lock().highlighted.clone();

        let mut renderer = self.renderer.lock();
        if !renderer.has_node(id) {
            renderer.add_nodes(slice::from_ref(&node));
        }
        let fresh: Vec<Node> = children
            .iter()
            .filter(|child| !renderer.has_node(child.id.as_str()))
            .cloned()
            .collect();
        if !fresh.is_empty() {
            renderer.add_nodes(&fresh);
        }
        renderer.set_expanded(id);
        renderer.render(&highlighted);
        Ok(children)
    }

    /// Expands every node on the path from the root down to `id`.
    ///
    /// An uncached node is fetched by identifier and its ancestor chain resolved first.
    /// Returns the path root first, or `None` if the data source does not know `id` or
    /// the chain above it is broken.
    pub async fn reveal(&mut self, id: &str) -> Result<Option<Vec<NodeId>>, SearchError> {
        if !self.cache.contains(id) {
            let target = NodeId::from(id);
            let fetcher = Fetcher::new(&self.source, self.options.retry, CancellationToken::noop());
            let found = fetcher.node(&target).await?;
            let Some(record) = found.filter(|record| record.id == target) else {
                return Ok(None);
            };
            let chain = ensure_ancestor_chain(&mut self.cache, &fetcher, record).await?;
            if let Some(missing) = chain.unresolved() {
                tracing::warn!(id, missing = %missing, "cannot reveal node");
                return Ok(None);
            }
        }
        let path = self.cache.path_to_root(id);
        for node in &path {
            self.expand(node.as_str()).await?;
        }
        Ok(Some(path))
    }

    /// Searches for `term` and reveals the minimal subtree containing every match.
    ///
    /// Data-source failures that survive the retry policy are returned as errors.
    /// Unresolvable ancestors and siblings are not errors; they are listed in the
    /// report and the search carries on with what it has.
    ///
    /// Starting a search cancels the pending highlight clear of the previous one. Its
    /// matches stay highlighted until this search either replaces them with its own or
    /// ends without matches, in which case they are cleared.
    pub async fn search(&mut self, term: &str) -> Result<SearchOutcome, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(SearchOutcome::Ignored);
        }
        let version = self.versions.next_version();
        let token = self.versions.token_for_version(version);
        // The previous matches stay on screen until this search replaces or drops them.
        self.timer.cancel();

        let result = self.run_search(term, token).await;
        if !matches!(result, Ok(SearchOutcome::Found(_))) {
            clear_highlights(&self.state, &self.renderer);
        }
        match result {
            Err(SearchError::Superseded) => {
                tracing::debug!(term, version, "search superseded");
                Ok(SearchOutcome::Superseded)
            }
            other => other,
        }
    }

    /// The search pipeline proper.
    async fn run_search(
        &mut self,
        term: &str,
        token: CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let depth = self.cache.max_cached_depth();
        set_phase(&self.state, SearchPhase::Querying);
        let fetcher = Fetcher::new(&self.source, self.options.retry, token);

        let mut seen = HashSet::new();
        let records: Vec<NodeRecord> = fetcher
            .search(term)
            .await?
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect();
        if records.is_empty() {
            tracing::info!(term, "no matches");
            return Ok(SearchOutcome::NotFound);
        }
        let matches: Vec<NodeId> = records.iter().map(|r| r.id.clone()).collect();

        set_phase(&self.state, SearchPhase::ResolvingAncestors);
        let mut unresolved = Vec::new();
        for record in records {
            let chain = ensure_ancestor_chain(&mut self.cache, &fetcher, record).await?;
            if let Some(id) = chain.unresolved() {
                unresolved.push(id.clone());
            }
        }

        set_phase(&self.state, SearchPhase::BuildingScope);
        let ScopeBuild {
            scope,
            unresolved: unlisted,
        } = build_scope(&mut self.cache, &fetcher, &matches).await?;
        unresolved.extend(unlisted);
        unresolved.sort();
        unresolved.dedup();
        let projection = ScopedChildren::build(&self.cache, &scope);

        let highlighted: HashSet<NodeId> = matches.iter().cloned().collect();
        {
            let mut state = self.state.lock();
            state.highlighted.clone_from(&highlighted);
            state.phase = SearchPhase::Materializing;
        }
        tracing::debug!(phase = %SearchPhase::Materializing, "search phase");

        let lca = compute_lca(&self.cache, &matches);
        let materialized = {
            let mut renderer = self.renderer.lock();
            reveal_ancestors(&mut self.cache, &mut *renderer, &scope, &lca)?;
            let visited = materialize(&mut self.cache, &mut *renderer, &scope, &projection, &lca)?;
            if let Some(first) = matches.iter().find(|id| renderer.has_node(id.as_str())) {
                renderer.set_centered(first.as_str());
            }
            renderer.render(&highlighted);
            visited
        };

        set_phase(&self.state, SearchPhase::Highlighted);
        let state = Arc::clone(&self.state);
        let renderer = Arc::clone(&self.renderer);
        self.timer.schedule(self.options.highlight_delay, move || {
            clear_highlights(&state, &renderer);
        });

        let report = SearchReport {
            term: term.to_string(),
            matches,
            scope: scope.sorted(),
            lca,
            materialized,
            unresolved,
            max_cached_depth: depth,
        };
        tracing::info!(
            term,
            matches = report.matches.len(),
            scope = report.scope.len(),
            lca = %report.lca,
            "search complete"
        );
        Ok(SearchOutcome::Found(report))
    }

    /// Current pipeline phase.
    pub fn phase(&self) -> SearchPhase {
        self.state.lock().phase
    }

    /// Currently highlighted matches, sorted.
    pub fn highlighted(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.state.lock().highlighted.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns true while a highlight clear is scheduled.
    pub fn highlight_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// The tree cache.
    pub fn cache(&self) -> &TreeCache {
        &self.cache
    }

    /// Deepest cached fringe depth.
    pub fn max_cached_depth(&mut self) -> Option<usize> {
        self.cache.max_cached_depth()
    }

    /// Locks and returns the renderer.
    pub fn renderer(&self) -> MutexGuard<'_, R> {
        self.renderer.lock()
    }

    /// A handle that supersedes the search in flight.
    pub fn canceller(&self) -> SearchCanceller {
        self.versions.canceller()
    }

    /// Session settings.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

/// Moves the session to `phase`.
fn set_phase(state: &Mutex<HighlightState>, phase: SearchPhase) {
    state.lock().phase = phase;
    tracing::debug!(%phase, "search phase");
}

/// Returns to `Idle`, clearing and redrawing if anything was highlighted.
fn clear_highlights<R: Renderer>(state: &Mutex<HighlightState>, renderer: &Mutex<R>) {
    let had_highlights = {
        let mut state = state.lock();
        state.phase = SearchPhase::Idle;
        !mem::take(&mut state.highlighted).is_empty()
    };
    if had_highlights {
        renderer.lock().render(&HashSet::new());
        tracing::debug!("highlights cleared");
    }
}
