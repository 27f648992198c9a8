//! Naive-Bayes-style classification of a text span over the cue lexicon.

use crate::emotion::{Emotion, EmotionScores};
use crate::lexicon::EmotionLexicon;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Probabilities closer than this are treated as a near-tie and reported
/// with the lower confidence value.
const CONFIDENCE_GAP: f64 = 0.1;
const HIGH_CONFIDENCE: f64 = 0.9;
const LOW_CONFIDENCE: f64 = 0.7;

/// Result of classifying one text span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Category with the highest posterior probability.
    pub dominant: Emotion,
    /// Full posterior distribution; sums to 1.0 within float tolerance.
    pub probabilities: EmotionScores,
    /// How many input tokens fell into each category's cue set. Sparse:
    /// only categories with at least one match appear.
    pub word_counts: HashMap<Emotion, u32>,
    /// `min(1.0, 2 × p_dominant)`.
    pub intensity: f64,
    /// 0.9 when the top two probabilities are clearly separated, else 0.7.
    pub confidence: f64,
}

/// Classifies text spans against a fixed lexicon.
///
/// Pure: every call is a function of the input text and the immutable
/// lexicon, so a single classifier can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct EmotionClassifier {
    lexicon: EmotionLexicon,
}

impl EmotionClassifier {
    pub fn new(lexicon: EmotionLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &EmotionLexicon {
        &self.lexicon
    }

    /// Classify one text span into an emotion distribution.
    ///
    /// Tokenization is case-folded whitespace splitting. Tokens outside the
    /// global vocabulary contribute nothing and are skipped silently; a text
    /// with zero recognized tokens still yields a full (near-uniform)
    /// distribution driven by the uniform priors, with the first category in
    /// enumeration order reported as dominant.
    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        let mut word_counts: HashMap<Emotion, u32> = HashMap::new();
        let log_scores = EmotionScores::from_fn(|emotion| {
            let mut log_prob = self.lexicon.log_prior();
            for token in &tokens {
                if !self.lexicon.in_vocabulary(token) {
                    continue;
                }
                log_prob += self.lexicon.log_likelihood(emotion, token);
                if self.lexicon.is_cue(emotion, token) {
                    *word_counts.entry(emotion).or_insert(0) += 1;
                }
            }
            log_prob
        });

        let probabilities = softmax(&log_scores);
        let dominant = probabilities.argmax();

        let mut ranked: Vec<f64> = probabilities.iter().map(|(_, p)| p).collect();
        ranked.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let confidence = if ranked[0] - ranked[1] > CONFIDENCE_GAP {
            HIGH_CONFIDENCE
        } else {
            LOW_CONFIDENCE
        };

        let intensity = (probabilities.get(dominant) * 2.0).min(1.0);

        debug!(
            %dominant,
            intensity,
            confidence,
            tokens = tokens.len(),
            "classified text span"
        );

        Classification {
            dominant,
            probabilities,
            word_counts,
            intensity,
            confidence,
        }
    }
}

/// Numerically stable shifted-exponential normalization of log-scores.
fn softmax(log_scores: &EmotionScores) -> EmotionScores {
    let max_log = log_scores
        .iter()
        .map(|(_, v)| v)
        .fold(f64::NEG_INFINITY, f64::max);
    let shifted = EmotionScores::from_fn(|e| (log_scores.get(e) - max_log).exp());
    let total = shifted.total();
    EmotionScores::from_fn(|e| shifted.get(e) / total)
}
