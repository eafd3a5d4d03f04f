//! Error types for data-source access and searches.

use std::{io, path::PathBuf};

use orgtree_cache::{CacheError, NodeId};
use thiserror::Error;

/// Failures reported by a [`DataSource`](crate::DataSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend could not answer the request.
    #[error("data source unavailable: {message}")]
    Unavailable {
        /// Backend-specific description.
        message: String,
    },

    /// A raw record is missing a required field.
    #[error("record {index} is missing required field `{field}`")]
    InvalidRecord {
        /// Zero-based position of the record in its input.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Failed to read a dataset file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse a dataset file.
    #[error("failed to parse {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Failures that abort a session operation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A data-source call kept failing after every retry.
    #[error("{operation}({subject}) failed after {attempts} attempt(s): {source}")]
    DataSource {
        /// Name of the data-source operation.
        operation: &'static str,
        /// The identifier or term the operation was called with.
        subject: String,
        /// Number of attempts made.
        attempts: u32,
        /// Error from the final attempt.
        #[source]
        source: SourceError,
    },

    /// The configured root node does not exist in the data source.
    #[error("root node {id} not found in data source")]
    MissingRoot {
        /// Configured root identifier.
        id: NodeId,
    },

    /// The tree cache rejected an update.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A newer search started before this one finished.
    #[error("search superseded by a newer search")]
    Superseded,
}
