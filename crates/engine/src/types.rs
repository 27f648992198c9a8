//! The recommendation record returned to callers.

use classifier::Emotion;
use knowledge_store::{CatalogEntry, EmotionMatch};

/// One recommended movie.
///
/// Ephemeral: produced per call, never persisted. `score` stays `None`
/// until the scoring step assigns it; the neutral fallback path returns
/// recommendations unscored, as do the journey anchors.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub movie_id: String,
    pub title: String,
    pub director: Option<String>,
    pub cast: Vec<String>,
    /// The emotion this movie was retrieved for; `None` on the
    /// emotion-agnostic fallback path.
    pub emotion: Option<Emotion>,
    pub intensity: Option<f64>,
    pub confidence: f64,
    pub description: Option<String>,
    pub score: Option<f64>,
}

impl From<EmotionMatch> for Recommendation {
    fn from(candidate: EmotionMatch) -> Self {
        Self {
            movie_id: candidate.movie_id,
            title: candidate.title,
            director: candidate.director,
            cast: candidate.cast,
            emotion: Some(candidate.emotion),
            intensity: Some(candidate.intensity),
            confidence: candidate.confidence,
            description: candidate.description,
            score: None,
        }
    }
}

impl From<CatalogEntry> for Recommendation {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            movie_id: entry.movie_id,
            title: entry.title,
            director: None,
            cast: Vec::new(),
            emotion: None,
            intensity: None,
            confidence: entry.confidence,
            description: None,
            score: None,
        }
    }
}
