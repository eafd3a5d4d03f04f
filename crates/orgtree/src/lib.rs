//! orgtree: an explorer for large, lazily loaded org charts.
//!
//! The chart is fetched one sibling list at a time. Searching reveals only the part of
//! the chart that connects the matches, keeping the view small no matter how large the
//! organisation is.

#![warn(missing_docs)]

pub mod cli;
