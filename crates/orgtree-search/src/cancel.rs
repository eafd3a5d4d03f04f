//! Search versions and cancellation tokens.
//!
//! Every search takes a fresh version from the session's [`SearchVersionTracker`].
//! A [`CancellationToken`] remembers the version it was issued for and reports
//! cancelled as soon as the active version moves on, so a superseded search stops at
//! its next data-source boundary.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Tracks the active search version.
#[derive(Debug, Default, Clone)]
pub struct SearchVersionTracker {
    /// Version of the newest search. Shared with every token and canceller.
    active_version: Arc<AtomicU64>,
}

impl SearchVersionTracker {
    /// Creates a tracker at version zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the active version and returns it, cancelling every older token.
    pub fn next_version(&self) -> u64 {
        self.active_version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the active version without incrementing.
    pub fn current_version(&self) -> u64 {
        self.active_version.load(Ordering::SeqCst)
    }

    /// Creates a token bound to `version`.
    pub fn token_for_version(&self, version: u64) -> CancellationToken {
        CancellationToken {
            active_version: Some(Arc::clone(&self.active_version)),
            version,
        }
    }

    /// Creates a handle that can supersede the active search from elsewhere.
    pub fn canceller(&self) -> SearchCanceller {
        SearchCanceller {
            tracker: self.clone(),
        }
    }
}

/// Reports whether the search it was issued for has been superseded.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    /// The tracker's active version, or `None` for a token that never cancels.
    active_version: Option<Arc<AtomicU64>>,
    /// Version this token was issued for.
    version: u64,
}

impl CancellationToken {
    /// A token that is never cancelled, for work outside any search.
    pub fn noop() -> Self {
        Self {
            active_version: None,
            version: 0,
        }
    }

    /// Returns true once a newer version is active.
    pub fn is_cancelled(&self) -> bool {
        self.active_version
            .as_ref()
            .is_some_and(|active| active.load(Ordering::SeqCst) != self.version)
    }

    /// Version this token was issued for.
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// A cloneable handle that supersedes whatever search is in flight.
#[derive(Debug, Clone)]
pub struct SearchCanceller {
    /// Tracker shared with the owning session.
    tracker: SearchVersionTracker,
}

impl SearchCanceller {
    /// Cancels the in-flight search, if any. Returns the new active version.
    pub fn supersede(&self) -> u64 {
        self.tracker.next_version()
    }
}
