//! Parsing free-form utterances into a structured emotion state.

use crate::keywords::ParserLexicon;
use classifier::Emotion;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Intensity saturates once the primary emotion is mentioned this often.
const INTENSITY_SATURATION: f64 = 3.0;
/// Confidence ramp divisor; any match at all starts from the 0.5 floor.
const CONFIDENCE_SATURATION: f64 = 2.0;
const CONFIDENCE_FLOOR: f64 = 0.5;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\b").expect("word-boundary regex is valid"));

/// What kind of recommendation the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// "I feel sad": match the mood they are in.
    CurrentState,
    /// "I want to feel happy": match the mood they are after.
    DesiredState,
    /// "surprise me": no emotional preference.
    Neutral,
}

/// Structured result of parsing one user utterance. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedState {
    /// Most frequent emotion keyword's category, if any keyword matched.
    pub emotion: Option<Emotion>,
    /// How strongly the emotion is expressed, in [0, 1].
    pub intensity: f64,
    pub query_type: QueryType,
    /// Remaining matched categories, ranked by frequency.
    pub secondary_emotions: Vec<Emotion>,
    /// How sure the parser is about the primary emotion, in [0, 1].
    pub confidence: f64,
    /// The utterance as received.
    pub raw_text: String,
}

/// Maps user utterances to [`ParsedState`] via keyword-marker matching.
///
/// Deliberately independent of the review classifier: different keyword
/// sets, different scoring law. Pure over the immutable lexicon.
#[derive(Debug, Clone, Default)]
pub struct EmotionStateParser {
    lexicon: ParserLexicon,
}

impl EmotionStateParser {
    pub fn new(lexicon: ParserLexicon) -> Self {
        Self { lexicon }
    }

    /// Parse one utterance.
    ///
    /// An utterance with no emotion keyword yields `emotion: None` with zero
    /// intensity and confidence, a valid "no signal" result rather than a
    /// failure.
    pub fn parse(&self, text: &str) -> ParsedState {
        let lowered = text.to_lowercase();
        let trimmed = lowered.trim();

        let query_type = self.detect_query_type(trimmed);
        let ranked = self.extract_emotions(trimmed);

        let state = match ranked.first() {
            None => ParsedState {
                emotion: None,
                intensity: 0.0,
                query_type,
                secondary_emotions: Vec::new(),
                confidence: 0.0,
                raw_text: text.to_string(),
            },
            Some(&(primary, count)) => {
                let count = count as f64;
                let intensity = (count / INTENSITY_SATURATION).min(1.0);
                let confidence =
                    ((count / CONFIDENCE_SATURATION).min(1.0) + CONFIDENCE_FLOOR).min(1.0);
                ParsedState {
                    emotion: Some(primary),
                    intensity,
                    query_type,
                    secondary_emotions: ranked[1..].iter().map(|&(e, _)| e).collect(),
                    confidence,
                    raw_text: text.to_string(),
                }
            }
        };

        debug!(
            emotion = state.emotion.map(|e| e.as_str()),
            query_type = ?state.query_type,
            intensity = state.intensity,
            "parsed utterance"
        );
        state
    }

    /// Intent detection by literal substring markers, in a fixed priority
    /// order: neutral first, then desired, then current. An utterance with
    /// no marker falls back to current-state when it mentions any emotion
    /// keyword anywhere, else neutral.
    fn detect_query_type(&self, text: &str) -> QueryType {
        for marker in self.lexicon.neutral_markers() {
            if text.contains(marker) {
                return QueryType::Neutral;
            }
        }
        for marker in self.lexicon.desired_markers() {
            if text.contains(marker) {
                return QueryType::DesiredState;
            }
        }
        for marker in self.lexicon.current_markers() {
            if text.contains(marker) {
                return QueryType::CurrentState;
            }
        }
        if self.lexicon.mentions_any_keyword(text) {
            QueryType::CurrentState
        } else {
            QueryType::Neutral
        }
    }

    /// Tokenize on word boundaries, count keyword matches per category, and
    /// rank categories by count descending. The sort is stable, so equal
    /// counts keep first-occurrence order.
    fn extract_emotions(&self, text: &str) -> Vec<(Emotion, u32)> {
        let mut counts: Vec<(Emotion, u32)> = Vec::new();
        for token in WORD_RE.find_iter(text) {
            let Some(emotion) = self.lexicon.emotion_for(token.as_str()) else {
                continue;
            };
            match counts.iter_mut().find(|(e, _)| *e == emotion) {
                Some((_, count)) => *count += 1,
                None => counts.push((emotion, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
