//! Per-movie aggregation of review-level classifications.
//!
//! The offline construction pipeline classifies every review of a movie and
//! folds the results into a single record here. Serving-time code never
//! aggregates; it reads the stored result.

use crate::emotion::{Emotion, UnknownEmotion};
use crate::error::{ClassifierError, Result};
use crate::Classification;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The aggregated label for a movie: the plurality emotion, or the neutral
/// sentinel when no review contributed a single cue word.
///
/// Neutral is not an eighth category. It exists only in offline aggregation
/// output and never enters the knowledge graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AggregateLabel {
    Emotion(Emotion),
    Neutral,
}

impl AggregateLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateLabel::Emotion(emotion) => emotion.as_str(),
            AggregateLabel::Neutral => "neutral",
        }
    }

    /// The underlying category, unless this is the neutral sentinel.
    pub fn emotion(self) -> Option<Emotion> {
        match self {
            AggregateLabel::Emotion(emotion) => Some(emotion),
            AggregateLabel::Neutral => None,
        }
    }
}

impl fmt::Display for AggregateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AggregateLabel> for String {
    fn from(label: AggregateLabel) -> String {
        label.as_str().to_string()
    }
}

impl TryFrom<String> for AggregateLabel {
    type Error = UnknownEmotion;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("neutral") {
            Ok(AggregateLabel::Neutral)
        } else {
            value.parse().map(AggregateLabel::Emotion)
        }
    }
}

/// Aggregated emotion record for one movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionAggregate {
    /// Plurality winner of the cue-word votes, or neutral.
    pub label: AggregateLabel,
    /// Total cue-word votes per category across all reviews. Sparse.
    pub votes: HashMap<Emotion, u32>,
    /// Arithmetic mean of the review-level intensities.
    pub avg_intensity: f64,
    /// Arithmetic mean of the review-level confidences.
    pub avg_confidence: f64,
}

/// Fold a movie's review classifications into one aggregate record.
///
/// Votes are the summed per-category cue-word counts; the label is the
/// category with the most votes (ties resolve to the earlier category in
/// enumeration order), or neutral when there are no votes at all.
///
/// # Errors
/// [`ClassifierError::EmptyAggregation`] when `reviews` is empty; the
/// averages would be a division by zero, and a movie with no reviews is a
/// caller-side precondition violation.
pub fn aggregate_reviews(reviews: &[Classification]) -> Result<EmotionAggregate> {
    if reviews.is_empty() {
        return Err(ClassifierError::EmptyAggregation);
    }

    let mut votes: HashMap<Emotion, u32> = HashMap::new();
    let mut intensity_sum = 0.0;
    let mut confidence_sum = 0.0;
    for review in reviews {
        for (&emotion, &count) in &review.word_counts {
            *votes.entry(emotion).or_insert(0) += count;
        }
        intensity_sum += review.intensity;
        confidence_sum += review.confidence;
    }

    let label = plurality(&votes);
    let count = reviews.len() as f64;

    Ok(EmotionAggregate {
        label,
        votes,
        avg_intensity: intensity_sum / count,
        avg_confidence: confidence_sum / count,
    })
}

fn plurality(votes: &HashMap<Emotion, u32>) -> AggregateLabel {
    let mut best: Option<(Emotion, u32)> = None;
    for emotion in Emotion::ALL {
        let count = votes.get(&emotion).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((emotion, count)),
        }
    }
    match best {
        Some((emotion, _)) => AggregateLabel::Emotion(emotion),
        None => AggregateLabel::Neutral,
    }
}
