//! The recommendation engine: orchestrates store queries, filtering,
//! deduplication, scoring, and journey assembly.

use crate::scoring::score_by_intensity_match;
use crate::types::Recommendation;
use anyhow::{Context, Result};
use classifier::Emotion;
use knowledge_store::EmotionQueries;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Fetch this many times the requested count so filtering and dedup still
/// leave enough candidates to rank.
const OVER_FETCH_FACTOR: usize = 3;

/// Wanting an emotion means seeking a strong dose of it; the desired-state
/// path scores against this fixed target rather than the user's current
/// intensity.
const DESIRED_TARGET_INTENSITY: f64 = 0.8;

/// A journey opens with at most this many movies matching the start
/// emotion before transitioning to the target emotion.
const JOURNEY_ANCHORS: usize = 2;

/// Emotion-based movie recommendations over a loaded knowledge store.
///
/// Construction requires an already-initialized store, so "engine not
/// ready" can never masquerade as "no matching movies": a store that fails
/// to load never produces an engine at all.
///
/// All operations are synchronous pure reads; one engine can serve any
/// number of independent calls.
pub struct RecommendationEngine<S> {
    store: Arc<S>,
}

impl<S: EmotionQueries> RecommendationEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// "I feel X": movies that evoke the same emotion, ranked by closeness
    /// to the user's stated intensity.
    ///
    /// An unknown emotion name yields an empty list, not an error; an
    /// out-of-range intensity is clamped.
    #[instrument(skip(self))]
    pub fn recommend_current_state(
        &self,
        emotion: &str,
        intensity: f64,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let Some(emotion) = known_emotion(emotion) else {
            return Ok(Vec::new());
        };
        let target = intensity.clamp(0.0, 1.0);

        let mut candidates = self.fetch_candidates(emotion, limit * OVER_FETCH_FACTOR)?;
        score_by_intensity_match(&mut candidates, target);
        candidates.truncate(limit);

        debug!(
            %emotion,
            target,
            returned = candidates.len(),
            "current-state recommendation"
        );
        Ok(candidates)
    }

    /// "I want to feel X": same retrieval pipeline, but ranked against a
    /// fixed high target intensity regardless of input.
    #[instrument(skip(self))]
    pub fn recommend_desired_state(
        &self,
        emotion: &str,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let Some(emotion) = known_emotion(emotion) else {
            return Ok(Vec::new());
        };

        let mut candidates = self.fetch_candidates(emotion, limit * OVER_FETCH_FACTOR)?;
        score_by_intensity_match(&mut candidates, DESIRED_TARGET_INTENSITY);
        candidates.truncate(limit);

        debug!(%emotion, returned = candidates.len(), "desired-state recommendation");
        Ok(candidates)
    }

    /// "Surprise me": the emotion-agnostic, confidence-ranked catalog
    /// fallback. Returned unscored.
    #[instrument(skip(self))]
    pub fn recommend_neutral(&self, limit: usize) -> Result<Vec<Recommendation>> {
        let entries = self
            .store
            .top_by_confidence(limit)
            .context("confidence-ranked catalog query failed")?;
        Ok(entries.into_iter().map(Recommendation::from).collect())
    }

    /// A short transition arc from one mood to another: up to two movies
    /// anchoring the start emotion, then movies evoking the end emotion
    /// until `limit` is reached. No interpolation through intermediate
    /// emotions.
    #[instrument(skip(self))]
    pub fn recommend_emotion_journey(
        &self,
        start_emotion: &str,
        end_emotion: &str,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let (Some(start), Some(end)) = (known_emotion(start_emotion), known_emotion(end_emotion))
        else {
            return Ok(Vec::new());
        };

        let start_candidates = self
            .store
            .movies_with_emotion(start, 0.0, limit * 2)
            .context("journey start-emotion query failed")?;
        let end_candidates = self
            .store
            .movies_with_emotion(end, 0.0, limit * 2)
            .context("journey end-emotion query failed")?;

        let merged = dedup_by_movie(
            start_candidates
                .into_iter()
                .chain(end_candidates)
                .map(Recommendation::from)
                .filter(has_real_title),
        );

        let mut journey: Vec<Recommendation> = Vec::new();
        let mut taken: HashSet<String> = HashSet::new();

        for candidate in &merged {
            if journey.len() >= JOURNEY_ANCHORS {
                break;
            }
            if candidate.emotion == Some(start) {
                taken.insert(candidate.movie_id.clone());
                journey.push(candidate.clone());
            }
        }
        for candidate in &merged {
            if journey.len() >= limit {
                break;
            }
            if candidate.emotion == Some(end) && !taken.contains(&candidate.movie_id) {
                taken.insert(candidate.movie_id.clone());
                journey.push(candidate.clone());
            }
        }

        debug!(
            %start,
            %end,
            returned = journey.len(),
            "emotion journey assembled"
        );
        Ok(journey)
    }

    /// Shared retrieval pipeline: over-fetch at threshold zero, drop
    /// placeholder titles, dedup preserving first-seen order.
    fn fetch_candidates(&self, emotion: Emotion, fetch_limit: usize) -> Result<Vec<Recommendation>> {
        let matches = self
            .store
            .movies_with_emotion(emotion, 0.0, fetch_limit)
            .with_context(|| format!("emotion query for {emotion} failed"))?;

        Ok(dedup_by_movie(
            matches
                .into_iter()
                .map(Recommendation::from)
                .filter(has_real_title),
        ))
    }
}

/// Parse a caller-supplied category string; unknown names are logged and
/// treated as "no recommendation possible".
fn known_emotion(name: &str) -> Option<Emotion> {
    match name.parse::<Emotion>() {
        Ok(emotion) => Some(emotion),
        Err(_) => {
            warn!(name, "ignoring request for unknown emotion category");
            None
        }
    }
}

/// Drop rows whose title is empty or one of the known construction-pipeline
/// placeholders. Case-insensitive, a stricter net than the store's exact
/// literal exclusion.
fn has_real_title(candidate: &Recommendation) -> bool {
    let title = candidate.title.trim();
    if title.is_empty() {
        return false;
    }
    let lowered = title.to_lowercase();
    lowered != "user reviews" && !lowered.contains("movie reviews")
}

/// Deduplicate by movie id, keeping the first occurrence of each.
fn dedup_by_movie(candidates: impl Iterator<Item = Recommendation>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    candidates
        .filter(|candidate| seen.insert(candidate.movie_id.clone()))
        .collect()
}
