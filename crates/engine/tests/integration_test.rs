//! Integration tests for the engine over a real knowledge store.
//!
//! These build the graph through the offline builder and verify the full
//! query → filter → dedup → score pipeline end to end.

use classifier::Emotion;
use engine::RecommendationEngine;
use knowledge_store::{EmotionEntry, MovieRecord, MovieStore};
use std::sync::Arc;

fn record(
    movie_id: &str,
    title: &str,
    emotions: &[(Emotion, f64, f64)],
) -> MovieRecord {
    MovieRecord {
        movie_id: movie_id.to_string(),
        title: title.to_string(),
        director: Some("Test Director".to_string()),
        cast: vec!["Lead Actor".to_string()],
        description: None,
        emotions: emotions
            .iter()
            .map(|&(emotion, intensity, confidence)| EmotionEntry {
                emotion,
                intensity,
                confidence,
            })
            .collect(),
    }
}

fn build_engine() -> RecommendationEngine<MovieStore> {
    let records = vec![
        record("sad1", "Grave of the Fireflies", &[(Emotion::Sadness, 0.9, 0.9)]),
        record("sad2", "Manchester by the Sea", &[(Emotion::Sadness, 0.7, 0.9)]),
        record("sad3", "Blue Valentine", &[(Emotion::Sadness, 0.5, 0.7)]),
        record("joy1", "Singin' in the Rain", &[(Emotion::Joy, 0.9, 0.9)]),
        record("joy2", "Paddington 2", &[(Emotion::Joy, 0.8, 0.9)]),
        record("joy3", "School of Rock", &[(Emotion::Joy, 0.6, 0.7)]),
        record("joy4", "The Grand Budapest Hotel", &[(Emotion::Joy, 0.5, 0.8)]),
        record(
            "mixed",
            "Up",
            &[(Emotion::Joy, 0.7, 0.9), (Emotion::Sadness, 0.6, 0.8)],
        ),
        record("junk", "User reviews", &[(Emotion::Joy, 0.95, 0.95)]),
        record("fear1", "The Thing", &[(Emotion::Fear, 0.85, 0.9)]),
    ];
    let store = MovieStore::from_records(&records).expect("store builds");
    RecommendationEngine::new(Arc::new(store))
}

#[test]
fn test_current_state_end_to_end() {
    let engine = build_engine();
    let results = engine.recommend_current_state("sadness", 0.7, 3).unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 3);

    // Best intensity match to 0.7 ranks first.
    assert_eq!(results[0].movie_id, "sad2");

    // Every row carries the queried emotion and a score.
    for movie in &results {
        assert_eq!(movie.emotion, Some(Emotion::Sadness));
        assert!(movie.score.is_some());
        assert_eq!(movie.director.as_deref(), Some("Test Director"));
    }

    // Scores are non-increasing.
    for pair in results.windows(2) {
        assert!(pair[0].score.unwrap() >= pair[1].score.unwrap());
    }
}

#[test]
fn test_no_duplicate_ids_and_no_placeholders() {
    let engine = build_engine();
    let results = engine.recommend_current_state("joy", 0.8, 10).unwrap();

    let mut ids: Vec<&str> = results.iter().map(|m| m.movie_id.as_str()).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), before, "duplicate movie ids in results");

    for movie in &results {
        assert!(!movie.title.eq_ignore_ascii_case("user reviews"));
        assert!(!movie.title.to_lowercase().contains("movie reviews"));
    }
}

#[test]
fn test_desired_state_prefers_strong_candidates() {
    let engine = build_engine();
    let results = engine.recommend_desired_state("joy", 3).unwrap();

    // Fixed 0.8 target: Paddington 2 (0.8) beats Singin' in the Rain (0.9)
    // on intensity distance with equal confidence.
    assert_eq!(results[0].movie_id, "joy2");
    assert_eq!(results[1].movie_id, "joy1");
}

#[test]
fn test_invalid_emotion_yields_empty_everywhere() {
    let engine = build_engine();
    assert!(engine.recommend_current_state("euphoria", 0.5, 5).unwrap().is_empty());
    assert!(engine.recommend_desired_state("melancholy", 5).unwrap().is_empty());
    assert!(engine
        .recommend_emotion_journey("sadness", "bliss", 5)
        .unwrap()
        .is_empty());
}

#[test]
fn test_journey_from_sadness_to_joy() {
    let engine = build_engine();
    let journey = engine.recommend_emotion_journey("sadness", "joy", 5).unwrap();

    assert!(journey.len() <= 5);
    assert!(journey.len() >= 3);

    // At most two sadness anchors up front, joy afterwards.
    let anchors = journey
        .iter()
        .take_while(|m| m.emotion == Some(Emotion::Sadness))
        .count();
    assert!(anchors <= 2);
    assert!(journey[anchors..]
        .iter()
        .all(|m| m.emotion == Some(Emotion::Joy)));
}

#[test]
fn test_neutral_is_confidence_ranked_and_unscored() {
    let engine = build_engine();
    let results = engine.recommend_neutral(5).unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 5);
    for pair in results.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
    assert!(results.iter().all(|m| m.score.is_none()));
}

#[test]
fn test_requested_count_is_an_upper_bound() {
    let engine = build_engine();
    assert!(engine.recommend_current_state("fear", 0.5, 10).unwrap().len() <= 10);
    assert_eq!(engine.recommend_current_state("fear", 0.5, 1).unwrap().len(), 1);
    assert!(engine.recommend_current_state("disgust", 0.5, 10).unwrap().is_empty());
}
