//! # Knowledge Store Crate
//!
//! The read-only movie-emotion knowledge base: an RDF-style triple graph
//! queried through a declarative pattern-matching layer.
//!
//! ## Main Components
//!
//! - **term**: IRIs, literals, and the fixed onyx/dbpedia-flavored
//!   vocabulary written by the construction pipeline
//! - **graph**: indexed triple storage, immutable after the offline build
//! - **query**: `SelectQuery`: triple patterns with variables, optional
//!   patterns, typed filters, ordering, and limits, assembled from typed
//!   parts instead of interpolated strings
//! - **store**: `MovieStore` and the four-query [`EmotionQueries`] trait
//!   the recommendation engine consumes
//! - **builder**: `MovieRecord` JSON snapshot loading and graph
//!   construction, with build-time invariant enforcement
//!
//! ## Example Usage
//!
//! ```
//! use classifier::Emotion;
//! use knowledge_store::{EmotionEntry, EmotionQueries, MovieRecord, MovieStore};
//!
//! let records = vec![MovieRecord {
//!     movie_id: "tt0111161".into(),
//!     title: "The Shawshank Redemption".into(),
//!     director: Some("Frank Darabont".into()),
//!     cast: vec!["Tim Robbins".into(), "Morgan Freeman".into()],
//!     description: None,
//!     emotions: vec![EmotionEntry {
//!         emotion: Emotion::Trust,
//!         intensity: 0.82,
//!         confidence: 0.9,
//!     }],
//! }];
//!
//! let store = MovieStore::from_records(&records).unwrap();
//! let hopeful = store.movies_with_emotion(Emotion::Trust, 0.5, 10).unwrap();
//! assert_eq!(hopeful[0].title, "The Shawshank Redemption");
//! ```

// Public modules
pub mod builder;
pub mod error;
pub mod graph;
pub mod query;
pub mod store;
pub mod term;

// Re-export commonly used types for convenience
pub use builder::{build_graph, EmotionEntry, MovieRecord};
pub use error::{Result, StoreError};
pub use graph::{Graph, Triple};
pub use query::{Pattern, Row, RowFilter, SelectQuery};
pub use store::{
    CatalogEntry, CategoryTable, EmotionMatch, EmotionQueries, EmotionRecord, MovieEmotions,
    MovieStore, MovieSummary, PLACEHOLDER_TITLES,
};
pub use term::{Iri, Literal, Term};
