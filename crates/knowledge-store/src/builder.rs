//! Offline graph construction from aggregated emotion records.
//!
//! The construction pipeline classifies review corpora, aggregates per
//! movie, and hands the results here as [`MovieRecord`]s (usually via the
//! JSON snapshot file). Everything below runs before serving starts; the
//! resulting [`MovieStore`] is never written to again.

use crate::error::{Result, StoreError};
use crate::graph::Graph;
use crate::store::MovieStore;
use crate::term::{vocab, Iri, Term};
use classifier::Emotion;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// One aggregated emotion of a movie, as produced by the offline pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub emotion: Emotion,
    pub intensity: f64,
    pub confidence: f64,
}

/// One movie in the knowledge-base snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub emotions: Vec<EmotionEntry>,
}

impl MovieStore {
    /// Build a store from in-memory records.
    pub fn from_records(records: &[MovieRecord]) -> Result<Self> {
        let graph = build_graph(records)?;
        Self::new(graph)
    }

    /// Build a store from a JSON snapshot file (an array of records).
    ///
    /// Any failure here is fatal: the recommendation engine must not be
    /// constructed without a valid store.
    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        let records: Vec<MovieRecord> =
            serde_json::from_str(&raw).map_err(|source| StoreError::FileParse {
                path: path.display().to_string(),
                source,
            })?;
        info!(path = %path.display(), movies = records.len(), "loaded knowledge base snapshot");
        Self::from_records(&records)
    }
}

/// Translate records into triples.
///
/// Enforces the construction invariants the serving layer relies on: every
/// movie has a non-empty title, and a movie carries at most one aggregated
/// emotion per category (later duplicates are dropped with a warning).
pub fn build_graph(records: &[MovieRecord]) -> Result<Graph> {
    let categories = crate::store::CategoryTable::new();
    let mut graph = Graph::new();

    for record in records {
        if record.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle {
                movie_id: record.movie_id.clone(),
            });
        }

        let movie = vocab::movie_iri(&record.movie_id);
        graph.insert(
            movie.clone(),
            Iri::new(vocab::RDF_TYPE),
            Term::iri(vocab::MOVIE_CLASS),
        );
        graph.insert(
            movie.clone(),
            Iri::new(vocab::RDFS_LABEL),
            Term::string(record.title.as_str()),
        );
        if let Some(director) = &record.director {
            graph.insert(
                movie.clone(),
                Iri::new(vocab::DIRECTOR),
                Term::string(director.as_str()),
            );
        }
        for (slot, name) in vocab::CAST_MEMBERS.iter().zip(&record.cast) {
            graph.insert(movie.clone(), Iri::new(*slot), Term::string(name.as_str()));
        }
        if record.cast.len() > vocab::CAST_MEMBERS.len() {
            warn!(
                movie_id = %record.movie_id,
                cast = record.cast.len(),
                "movie has more cast names than the graph carries; keeping the first 3"
            );
        }
        if let Some(description) = &record.description {
            graph.insert(
                movie.clone(),
                Iri::new(vocab::RDFS_COMMENT),
                Term::string(description.as_str()),
            );
        }

        let set = vocab::emotion_set_iri(&record.movie_id);
        graph.insert(
            movie.clone(),
            Iri::new(vocab::HAS_EMOTION_SET),
            Term::Iri(set.clone()),
        );
        graph.insert(
            set.clone(),
            Iri::new(vocab::RDF_TYPE),
            Term::iri(vocab::EMOTION_SET_CLASS),
        );

        let mut stored: HashSet<Emotion> = HashSet::new();
        for entry in &record.emotions {
            if !stored.insert(entry.emotion) {
                warn!(
                    movie_id = %record.movie_id,
                    emotion = %entry.emotion,
                    "duplicate aggregated emotion for category; keeping the first"
                );
                continue;
            }

            let node = vocab::aggregated_emotion_iri(&record.movie_id, entry.emotion.as_str());
            graph.insert(
                set.clone(),
                Iri::new(vocab::HAS_EMOTION),
                Term::Iri(node.clone()),
            );
            // Denormalized direct link for query convenience.
            graph.insert(
                movie.clone(),
                Iri::new(vocab::HAS_EMOTION),
                Term::Iri(node.clone()),
            );
            graph.insert(
                node.clone(),
                Iri::new(vocab::RDF_TYPE),
                Term::iri(vocab::AGGREGATED_EMOTION_CLASS),
            );
            graph.insert(
                node.clone(),
                Iri::new(vocab::HAS_EMOTION_CATEGORY),
                Term::Iri(categories.iri(entry.emotion).clone()),
            );
            graph.insert(
                node.clone(),
                Iri::new(vocab::HAS_EMOTION_INTENSITY),
                Term::float(entry.intensity),
            );
            graph.insert(
                node,
                Iri::new(vocab::ALGORITHM_CONFIDENCE),
                Term::float(entry.confidence),
            );
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EmotionQueries;

    fn record(movie_id: &str, title: &str, emotions: Vec<EmotionEntry>) -> MovieRecord {
        MovieRecord {
            movie_id: movie_id.to_string(),
            title: title.to_string(),
            director: None,
            cast: Vec::new(),
            description: None,
            emotions,
        }
    }

    fn entry(emotion: Emotion, intensity: f64, confidence: f64) -> EmotionEntry {
        EmotionEntry {
            emotion,
            intensity,
            confidence,
        }
    }

    #[test]
    fn test_store_round_trip_through_graph() {
        let records = vec![
            record("m1", "Up", vec![entry(Emotion::Joy, 0.8, 0.9)]),
            record("m2", "Seven", vec![entry(Emotion::Fear, 0.7, 0.7)]),
        ];
        let store = MovieStore::from_records(&records).unwrap();

        let joyful = store.movies_with_emotion(Emotion::Joy, 0.0, 10).unwrap();
        assert_eq!(joyful.len(), 1);
        assert_eq!(joyful[0].title, "Up");
        assert_eq!(joyful[0].movie_id, "m1");
        assert!((joyful[0].intensity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_empty_title_fails_the_build() {
        let records = vec![record("m1", "  ", vec![])];
        assert!(matches!(
            MovieStore::from_records(&records),
            Err(StoreError::EmptyTitle { .. })
        ));
    }

    #[test]
    fn test_duplicate_category_keeps_first_entry() {
        let records = vec![record(
            "m1",
            "Up",
            vec![entry(Emotion::Joy, 0.8, 0.9), entry(Emotion::Joy, 0.2, 0.1)],
        )];
        let store = MovieStore::from_records(&records).unwrap();
        let rows = store.movies_with_emotion(Emotion::Joy, 0.0, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].intensity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_cast_caps_at_three_names() {
        let mut movie = record("m1", "Ensemble", vec![entry(Emotion::Trust, 0.5, 0.9)]);
        movie.cast = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let store = MovieStore::from_records(&[movie]).unwrap();
        let rows = store.movies_with_emotion(Emotion::Trust, 0.0, 10).unwrap();
        assert_eq!(rows[0].cast, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"[
            {
                "movie_id": "tt0245429",
                "title": "Spirited Away",
                "director": "Hayao Miyazaki",
                "cast": ["Rumi Hiiragi"],
                "emotions": [
                    {"emotion": "joy", "intensity": 0.74, "confidence": 0.9}
                ]
            }
        ]"#;
        let records: Vec<MovieRecord> = serde_json::from_str(json).unwrap();
        let store = MovieStore::from_records(&records).unwrap();

        let rows = store.movies_with_emotion(Emotion::Joy, 0.5, 5).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].director.as_deref(), Some("Hayao Miyazaki"));
    }

    #[test]
    fn test_placeholder_titles_excluded_at_query_time() {
        let records = vec![
            record("m1", "User reviews", vec![entry(Emotion::Joy, 0.9, 0.9)]),
            record("m2", "Up", vec![entry(Emotion::Joy, 0.5, 0.7)]),
        ];
        let store = MovieStore::from_records(&records).unwrap();
        let rows = store.movies_with_emotion(Emotion::Joy, 0.0, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Up");
    }

    #[test]
    fn test_ordering_and_catalog_queries() {
        let records = vec![
            record("b", "Mid", vec![entry(Emotion::Fear, 0.5, 0.9)]),
            record("a", "High", vec![entry(Emotion::Fear, 0.9, 0.7)]),
            record("c", "Low", vec![entry(Emotion::Fear, 0.1, 0.8)]),
        ];
        let store = MovieStore::from_records(&records).unwrap();

        let by_intensity: Vec<String> = store
            .movies_with_emotion(Emotion::Fear, 0.0, 10)
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(by_intensity, vec!["High", "Mid", "Low"]);

        let by_confidence: Vec<String> = store
            .top_by_confidence(10)
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(by_confidence, vec!["Mid", "Low", "High"]);

        let catalog: Vec<String> = store
            .all_movies()
            .unwrap()
            .into_iter()
            .map(|m| m.movie_id)
            .collect();
        assert_eq!(catalog, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_emotions_for_movie_lists_all_categories() {
        let records = vec![record(
            "m1",
            "Mixed",
            vec![
                entry(Emotion::Joy, 0.6, 0.9),
                entry(Emotion::Sadness, 0.4, 0.7),
            ],
        )];
        let store = MovieStore::from_records(&records).unwrap();

        let emotions = store.emotions_for_movie("m1").unwrap();
        assert_eq!(emotions.title.as_deref(), Some("Mixed"));
        assert_eq!(emotions.emotions.len(), 2);

        let missing = store.emotions_for_movie("absent").unwrap();
        assert!(missing.title.is_none());
        assert!(missing.emotions.is_empty());
    }
}
