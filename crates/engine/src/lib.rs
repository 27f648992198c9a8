//! # Engine Crate
//!
//! The recommendation engine: turns a requested emotion into an ordered,
//! deduplicated list of movies, or a multi-step mood journey.
//!
//! ## Architecture
//!
//! Each public operation runs the same staged pipeline over the knowledge
//! store:
//! 1. Query candidates for the requested emotion (over-fetching to leave
//!    room for filtering)
//! 2. Drop placeholder titles left behind by the construction pipeline
//! 3. Deduplicate by movie id, preserving first-seen order
//! 4. Score against a target intensity and stable-sort descending
//! 5. Truncate to the requested count
//!
//! The engine is generic over the [`knowledge_store::EmotionQueries`]
//! trait, so tests drive it with an in-memory fake store.
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::RecommendationEngine;
//! use knowledge_store::MovieStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MovieStore::load_json(Path::new("data/movie-emotions.json"))?);
//! let engine = RecommendationEngine::new(store);
//!
//! for movie in engine.recommend_current_state("sadness", 0.6, 5)? {
//!     println!("{} ({:.2})", movie.title, movie.score.unwrap_or_default());
//! }
//! ```

// Public modules
pub mod recommend;
pub mod scoring;
pub mod types;

// Re-export main types
pub use recommend::RecommendationEngine;
pub use types::Recommendation;
