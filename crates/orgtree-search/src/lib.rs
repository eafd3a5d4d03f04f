//! Search-driven partial materialization for orgtree.
//!
//! A [`SearchSession`] sits between a [`DataSource`] and a [`Renderer`]. Expanding a
//! node fetches its children once and caches them. Searching resolves every match's
//! ancestors, builds the minimal [`SearchScope`] around the matches, picks a starting
//! point with [`compute_lca`], and hands exactly the scoped subtree to the renderer in
//! stable sibling order.
//!
//! Every data-source call goes through a [`Fetcher`], which applies the session's
//! [`RetryPolicy`] and stops a search once a newer one supersedes it.

#![warn(missing_docs)]

mod cancel;
mod error;
mod fetch;
mod lca;
mod materialize;
mod projection;
mod render;
mod resolve;
mod scope;
mod session;
mod source;
#[cfg(test)]
mod test_support;
mod timer;

pub use cancel::{CancellationToken, SearchCanceller, SearchVersionTracker};
pub use error::{SearchError, SourceError};
pub use fetch::{Fetcher, RetryPolicy};
pub use lca::compute_lca;
pub use materialize::{materialize, reveal_ancestors};
pub use projection::ScopedChildren;
pub use render::Renderer;
pub use resolve::{AncestorChain, ensure_ancestor_chain};
pub use scope::{ScopeBuild, SearchScope, build_scope};
pub use session::{SearchOutcome, SearchPhase, SearchReport, SearchSession, SessionOptions};
pub use source::{DataSource, MemorySource, RawRecord};
pub use timer::HighlightTimer;
