//! Intensity-match scoring shared by the current-state and desired-state
//! paths.

use crate::types::Recommendation;
use std::cmp::Ordering;

/// Fixed design constants: closeness to the target intensity outweighs raw
/// confidence. Not tunable per call.
const INTENSITY_WEIGHT: f64 = 0.6;
const CONFIDENCE_WEIGHT: f64 = 0.4;

/// Score every candidate against a target intensity and sort descending.
///
/// `score = 0.6 × (1 − |movie_intensity − target|) + 0.4 × confidence`.
///
/// The sort must be stable: candidates arrive in the store's
/// intensity/confidence order after dedup, and equal scores keep that
/// relative order so results stay reproducible.
pub fn score_by_intensity_match(candidates: &mut [Recommendation], target: f64) {
    for candidate in candidates.iter_mut() {
        let movie_intensity = candidate.intensity.unwrap_or(0.0);
        let closeness = 1.0 - (movie_intensity - target).abs();
        candidate.score =
            Some(INTENSITY_WEIGHT * closeness + CONFIDENCE_WEIGHT * candidate.confidence);
    }

    // Vec::sort_by is stable.
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(movie_id: &str, intensity: f64, confidence: f64) -> Recommendation {
        Recommendation {
            movie_id: movie_id.to_string(),
            title: movie_id.to_string(),
            director: None,
            cast: Vec::new(),
            emotion: None,
            intensity: Some(intensity),
            confidence,
            description: None,
            score: None,
        }
    }

    #[test]
    fn test_exact_intensity_match_with_full_confidence_scores_one() {
        let mut candidates = vec![candidate("a", 0.5, 1.0)];
        score_by_intensity_match(&mut candidates, 0.5);
        assert!((candidates[0].score.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_closer_intensity_ranks_higher() {
        let mut candidates = vec![
            candidate("far", 0.1, 0.8),
            candidate("near", 0.75, 0.8),
        ];
        score_by_intensity_match(&mut candidates, 0.8);
        assert_eq!(candidates[0].movie_id, "near");
    }

    #[test]
    fn test_confidence_breaks_intensity_parity() {
        let mut candidates = vec![
            candidate("low_conf", 0.8, 0.7),
            candidate("high_conf", 0.8, 0.9),
        ];
        score_by_intensity_match(&mut candidates, 0.8);
        assert_eq!(candidates[0].movie_id, "high_conf");
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let mut candidates = vec![
            candidate("first", 0.6, 0.8),
            candidate("second", 0.6, 0.8),
            candidate("third", 0.6, 0.8),
        ];
        score_by_intensity_match(&mut candidates, 0.4);
        let order: Vec<&str> = candidates.iter().map(|c| c.movie_id.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let mut candidates = vec![
            candidate("a", 0.2, 0.9),
            candidate("b", 0.9, 0.7),
            candidate("c", 0.5, 0.8),
            candidate("d", 0.7, 0.9),
        ];
        score_by_intensity_match(&mut candidates, 0.6);
        for pair in candidates.windows(2) {
            assert!(pair[0].score.unwrap() >= pair[1].score.unwrap());
        }
    }
}
