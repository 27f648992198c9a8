//! # Classifier Crate
//!
//! Lexicon-based emotion classification for review text.
//!
//! ## Main Components
//!
//! - **emotion**: the closed seven-category emotion set shared by the whole
//!   workspace
//! - **lexicon**: immutable cue-word sets with precomputed Laplace-smoothed
//!   likelihoods
//! - **classify**: naive-Bayes-style scoring of a text span into an emotion
//!   probability distribution
//! - **aggregate**: folding many review-level results into one per-movie
//!   record for the offline knowledge-base build
//! - **error**: error types for this crate
//!
//! ## Example Usage
//!
//! ```
//! use classifier::{aggregate_reviews, EmotionClassifier, EmotionLexicon};
//!
//! let classifier = EmotionClassifier::new(EmotionLexicon::new());
//!
//! let reviews = [
//!     classifier.classify("a wonderful, hilarious masterpiece"),
//!     classifier.classify("funny and entertaining throughout"),
//! ];
//!
//! let aggregate = aggregate_reviews(&reviews).unwrap();
//! println!("{} ({:.2})", aggregate.label, aggregate.avg_intensity);
//! ```

// Public modules
pub mod aggregate;
pub mod classify;
pub mod emotion;
pub mod error;
pub mod lexicon;

// Re-export commonly used types for convenience
pub use aggregate::{aggregate_reviews, AggregateLabel, EmotionAggregate};
pub use classify::{Classification, EmotionClassifier};
pub use emotion::{Emotion, EmotionScores, UnknownEmotion};
pub use error::{ClassifierError, Result};
pub use lexicon::EmotionLexicon;
