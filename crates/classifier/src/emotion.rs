//! The fixed emotion category set shared across the workspace.
//!
//! Every component (classifier, state parser, knowledge store, engine)
//! speaks in terms of these seven categories. The set is closed and defined
//! once; nothing extends it at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The seven NRC-style emotion categories.
///
/// The declaration order is load-bearing: argmax ties in classification and
/// plurality ties in aggregation resolve to the earliest category in this
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Fear,
    Anger,
    Disgust,
    Surprise,
    Trust,
}

impl Emotion {
    /// Number of categories in the closed set.
    pub const COUNT: usize = 7;

    /// All categories in enumeration (tie-break) order.
    pub const ALL: [Emotion; Emotion::COUNT] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Surprise,
        Emotion::Trust,
    ];

    /// Lowercase name used in keyword tables and serialized records.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Fear => "fear",
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Surprise => "surprise",
            Emotion::Trust => "trust",
        }
    }

    /// Position in [`Emotion::ALL`], used to index dense per-category arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no known emotion category.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown emotion category: {0:?}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    /// Case-insensitive parse of a category name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "joy" => Ok(Emotion::Joy),
            "sadness" => Ok(Emotion::Sadness),
            "fear" => Ok(Emotion::Fear),
            "anger" => Ok(Emotion::Anger),
            "disgust" => Ok(Emotion::Disgust),
            "surprise" => Ok(Emotion::Surprise),
            "trust" => Ok(Emotion::Trust),
            _ => Err(UnknownEmotion(s.to_string())),
        }
    }
}

/// A dense per-category table of floats (log-scores or probabilities).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores([f64; Emotion::COUNT]);

impl EmotionScores {
    /// Build a table by evaluating `f` for every category.
    pub fn from_fn(mut f: impl FnMut(Emotion) -> f64) -> Self {
        let mut values = [0.0; Emotion::COUNT];
        for emotion in Emotion::ALL {
            values[emotion.index()] = f(emotion);
        }
        Self(values)
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0[emotion.index()]
    }

    pub fn set(&mut self, emotion: Emotion, value: f64) {
        self.0[emotion.index()] = value;
    }

    /// Iterate `(category, value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    /// Sum over all categories.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// The category with the highest value; ties go to the earliest category
    /// in enumeration order.
    pub fn argmax(&self) -> Emotion {
        let mut best = Emotion::ALL[0];
        for emotion in Emotion::ALL {
            if self.get(emotion) > self.get(best) {
                best = emotion;
            }
        }
        best
    }
}

impl Default for EmotionScores {
    fn default() -> Self {
        Self([0.0; Emotion::COUNT])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Joy".parse::<Emotion>().unwrap(), Emotion::Joy);
        assert_eq!(" SADNESS ".parse::<Emotion>().unwrap(), Emotion::Sadness);
        assert!("euphoria".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for emotion in Emotion::ALL {
            let parsed: Emotion = emotion.to_string().parse().unwrap();
            assert_eq!(parsed, emotion);
        }
    }

    #[test]
    fn test_argmax_ties_go_to_enumeration_order() {
        let scores = EmotionScores::from_fn(|_| 1.0);
        assert_eq!(scores.argmax(), Emotion::Joy);

        let mut scores = EmotionScores::default();
        scores.set(Emotion::Fear, 2.0);
        scores.set(Emotion::Trust, 2.0);
        assert_eq!(scores.argmax(), Emotion::Fear);
    }
}
