//! Error types for the knowledge-store crate.

use thiserror::Error;

/// Errors that can occur while building or querying the knowledge store.
///
/// Build-time errors are fatal: the store must not be constructed over a
/// graph it cannot serve. Query-time errors (a malformed literal where a
/// float is expected) propagate to the caller instead of degrading into
/// silently empty results.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Snapshot file could not be read.
    #[error("failed to read knowledge base file {path}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON for the expected record shape.
    #[error("failed to parse knowledge base file {path}")]
    FileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A movie record arrived without a usable title.
    #[error("movie {movie_id} has an empty title")]
    EmptyTitle { movie_id: String },

    /// The graph holds an emotion-category identifier outside the closed
    /// seven-category set.
    #[error("graph contains unknown emotion category identifier {iri}")]
    UnknownCategory { iri: String },

    /// A query variable was bound to a term of the wrong kind, e.g. a
    /// string literal where a float is required.
    #[error("query variable ?{var} bound to a non-{expected} term")]
    TypeMismatch {
        var: &'static str,
        expected: &'static str,
    },
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, StoreError>;
