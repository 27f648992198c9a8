//! Error types for the classifier crate.

use thiserror::Error;

/// Errors that can occur during classification and aggregation.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Aggregating zero classifications: the averages are undefined.
    /// Callers must guard against movies with no reviews.
    #[error("cannot aggregate an empty set of classifications")]
    EmptyAggregation,
}

/// Convenience type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, ClassifierError>;
