//! The fetch boundary.
//!
//! Resolution and scope building reach the data source only through a [`Fetcher`].
//! Each call checks the search's cancellation token before and after the request and
//! retries failures with linear backoff.

use std::{future::Future, time::Duration};

use orgtree_cache::{NodeId, NodeRecord};
use tokio::time::sleep;

use crate::{CancellationToken, DataSource, SearchError, SourceError};

/// Bounded retry for data-source calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per call. Zero is treated as one.
    pub attempts: u32,
    /// Delay step; attempt `n` waits `backoff * n` before the next try.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// A policy that tries once and never waits.
    pub fn none() -> Self {
        Self {
            attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Delay after the given failed attempt.
    fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

/// A data source bound to one search's retry policy and cancellation token.
#[derive(Debug)]
pub struct Fetcher<'a, S: ?Sized> {
    /// The wrapped source.
    source: &'a S,
    /// Retry policy for every call.
    retry: RetryPolicy,
    /// Token of the search this fetcher serves.
    token: CancellationToken,
}

impl<'a, S: DataSource + ?Sized> Fetcher<'a, S> {
    /// Wraps `source`.
    pub fn new(source: &'a S, retry: RetryPolicy, token: CancellationToken) -> Self {
        Self {
            source,
            retry,
            token,
        }
    }

    /// The cancellation token this fetcher checks.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Children of `parent`, in backing-store order.
    pub async fn children(&self, parent: &NodeId) -> Result<Vec<NodeRecord>, SearchError> {
        self.call("get_children", parent.as_str(), || self.source.get_children(parent))
            .await
    }

    /// A single node by identifier.
    pub async fn node(&self, id: &NodeId) -> Result<Option<NodeRecord>, SearchError> {
        self.call("get_node", id.as_str(), || self.source.get_node(id)).await
    }

    /// Nodes matching `term`.
    pub async fn search(&self, term: &str) -> Result<Vec<NodeRecord>, SearchError> {
        self.call("search", term, || self.source.search(term)).await
    }

    /// Returns [`SearchError::Superseded`] if the token has been cancelled.
    fn ensure_active(&self) -> Result<(), SearchError> {
        if self.token.is_cancelled() {
            return Err(SearchError::Superseded);
        }
        Ok(())
    }

    /// Runs `op` under the retry policy.
    async fn call<T, F, Fut>(
        &self,
        operation: &'static str,
        subject: &str,
        mut op: F,
    ) -> Result<T, SearchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;
        loop {
            self.ensure_active()?;
            match op().await {
                Ok(value) => {
                    self.ensure_active()?;
                    return Ok(value);
                }
                Err(source) if attempt >= attempts => {
                    return Err(SearchError::DataSource {
                        operation,
                        subject: subject.to_string(),
                        attempts,
                        source,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        operation,
                        subject,
                        attempt,
                        error = %err,
                        "data source call failed, retrying"
                    );
                    sleep(self.retry.delay(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}
