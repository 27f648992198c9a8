//! # State Parser Crate
//!
//! Turns free-form user utterances into a structured emotion state that the
//! conversational layer feeds to the recommendation engine.
//!
//! ## Components
//!
//! - **keywords**: conversational keyword→category table and query-intent
//!   marker lists (independent of the classifier's review lexicon)
//! - **parser**: `parse(text) -> ParsedState` with intent detection and
//!   frequency-ranked emotion extraction
//! - **message**: acknowledgment strings sharing the intensity-word buckets
//!
//! ## Example Usage
//!
//! ```
//! use state_parser::{acknowledgment, EmotionStateParser, QueryType};
//!
//! let parser = EmotionStateParser::default();
//! let state = parser.parse("I feel sad and lonely");
//!
//! assert_eq!(state.query_type, QueryType::CurrentState);
//! println!("{}", acknowledgment(&state));
//! ```

// Public modules
pub mod keywords;
pub mod message;
pub mod parser;

// Re-export commonly used types
pub use keywords::ParserLexicon;
pub use message::{acknowledgment, intensity_word};
pub use parser::{EmotionStateParser, ParsedState, QueryType};
