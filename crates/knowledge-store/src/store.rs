//! The serving-time store: four read queries over the graph snapshot.

use crate::error::{Result, StoreError};
use crate::graph::Graph;
use crate::query::{Pattern, Row, RowFilter, SelectQuery};
use crate::term::{vocab, Iri, Term};
use classifier::Emotion;
use std::collections::HashSet;
use tracing::info;

/// Titles the construction pipeline is known to emit for scraped review
/// pages instead of real films. Excluded from every candidate query.
pub const PLACEHOLDER_TITLES: [&str; 2] = ["User reviews", "movie reviews"];

/// Descriptions longer than this are cut at read time.
const DESCRIPTION_LIMIT: usize = 150;

/// Explicit mapping between the closed emotion set and the category IRIs
/// stored in the graph. Replaces name-capitalization lookups; validated
/// against the actual graph contents at store construction.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: [(Emotion, Iri); Emotion::COUNT],
}

impl CategoryTable {
    pub fn new() -> Self {
        let entries = Emotion::ALL.map(|emotion| {
            let name = emotion.as_str();
            let mut capitalized = String::with_capacity(name.len());
            let mut chars = name.chars();
            if let Some(first) = chars.next() {
                capitalized.extend(first.to_uppercase());
                capitalized.push_str(chars.as_str());
            }
            (emotion, Iri::new(format!("{}{capitalized}", vocab::ONYX_NS)))
        });
        Self { entries }
    }

    pub fn iri(&self, emotion: Emotion) -> &Iri {
        &self.entries[emotion.index()].1
    }

    pub fn emotion(&self, iri: &Iri) -> Option<Emotion> {
        self.entries
            .iter()
            .find(|(_, known)| known == iri)
            .map(|(emotion, _)| *emotion)
    }

    /// Check that every category identifier stored in the graph is one of
    /// the seven known IRIs. Run once at store construction; an unknown
    /// identifier is a fatal initialization error, not a per-query one.
    pub fn validate(&self, graph: &Graph) -> Result<()> {
        let category_predicate = Iri::new(vocab::HAS_EMOTION_CATEGORY);
        for triple in graph.matching(None, Some(&category_predicate)) {
            let known = triple
                .object
                .as_iri()
                .is_some_and(|iri| self.emotion(iri).is_some());
            if !known {
                return Err(StoreError::UnknownCategory {
                    iri: match &triple.object {
                        Term::Iri(iri) => iri.as_str().to_string(),
                        other => format!("{other:?}"),
                    },
                });
            }
        }
        Ok(())
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// One candidate row from an emotion-filtered query.
#[derive(Debug, Clone)]
pub struct EmotionMatch {
    pub movie_id: String,
    pub title: String,
    pub director: Option<String>,
    pub cast: Vec<String>,
    /// The category the query asked for.
    pub emotion: Emotion,
    pub intensity: f64,
    pub confidence: f64,
    pub description: Option<String>,
}

/// One emotion record of a single movie.
#[derive(Debug, Clone, Copy)]
pub struct EmotionRecord {
    pub emotion: Emotion,
    pub intensity: f64,
    pub confidence: f64,
}

/// All emotion records for one movie.
#[derive(Debug, Clone)]
pub struct MovieEmotions {
    pub movie_id: String,
    pub title: Option<String>,
    pub emotions: Vec<EmotionRecord>,
}

/// One row of the emotion-agnostic confidence ranking.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub movie_id: String,
    pub title: String,
    pub confidence: f64,
}

/// One row of the full catalog listing.
#[derive(Debug, Clone)]
pub struct MovieSummary {
    pub movie_id: String,
    pub title: String,
}

/// The four read queries the recommendation engine consumes.
///
/// Implemented by [`MovieStore`] over the real graph and by in-memory fakes
/// in engine tests. All four are pure reads against one immutable snapshot.
pub trait EmotionQueries {
    /// Candidates carrying `emotion` with at least `min_intensity`, ordered
    /// by intensity then confidence (both descending), deduplicated by
    /// movie id, at most `limit` rows.
    fn movies_with_emotion(
        &self,
        emotion: Emotion,
        min_intensity: f64,
        limit: usize,
    ) -> Result<Vec<EmotionMatch>>;

    /// Every emotion record of one movie. No filter, no limit.
    fn emotions_for_movie(&self, movie_id: &str) -> Result<MovieEmotions>;

    /// Emotion-agnostic fallback: movies ordered by confidence descending.
    fn top_by_confidence(&self, limit: usize) -> Result<Vec<CatalogEntry>>;

    /// The complete catalog, ordered by movie id.
    fn all_movies(&self) -> Result<Vec<MovieSummary>>;
}

/// Read-only knowledge store over the triple graph.
///
/// Construction validates the category table against the graph; a store
/// that fails to construct must never be queried, which is how callers
/// distinguish "engine not ready" from "no matching movies".
#[derive(Debug)]
pub struct MovieStore {
    graph: Graph,
    categories: CategoryTable,
}

impl MovieStore {
    pub fn new(graph: Graph) -> Result<Self> {
        let categories = CategoryTable::new();
        categories.validate(&graph)?;
        info!(triples = graph.len(), "knowledge store ready");
        Ok(Self { graph, categories })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    fn row_to_match(&self, row: &Row, emotion: Emotion) -> Result<EmotionMatch> {
        let movie_iri = row.iri("movie").ok_or(StoreError::TypeMismatch {
            var: "movie",
            expected: "iri",
        })?;
        let cast = ["cast0", "cast1", "cast2"]
            .iter()
            .filter_map(|var| row.str(var))
            .map(str::to_string)
            .collect();
        Ok(EmotionMatch {
            movie_id: vocab::movie_id_from_iri(movie_iri).to_string(),
            title: row.require_str("title")?.to_string(),
            director: row.str("director").map(str::to_string),
            cast,
            emotion,
            intensity: row.require_float("intensity")?,
            confidence: row.require_float("confidence")?,
            description: row.str("description").map(truncate_description),
        })
    }
}

impl EmotionQueries for MovieStore {
    fn movies_with_emotion(
        &self,
        emotion: Emotion,
        min_intensity: f64,
        limit: usize,
    ) -> Result<Vec<EmotionMatch>> {
        let category = self.categories.iri(emotion);
        let query = SelectQuery::new()
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::RDF_TYPE),
                Pattern::iri(vocab::MOVIE_CLASS),
            )
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::RDFS_LABEL),
                Pattern::var("title"),
            )
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::HAS_EMOTION_SET),
                Pattern::var("set"),
            )
            .pattern(
                Pattern::var("set"),
                Pattern::iri(vocab::HAS_EMOTION),
                Pattern::var("emotion"),
            )
            .pattern(
                Pattern::var("emotion"),
                Pattern::iri(vocab::HAS_EMOTION_CATEGORY),
                Pattern::term(Term::Iri(category.clone())),
            )
            .pattern(
                Pattern::var("emotion"),
                Pattern::iri(vocab::HAS_EMOTION_INTENSITY),
                Pattern::var("intensity"),
            )
            .pattern(
                Pattern::var("emotion"),
                Pattern::iri(vocab::ALGORITHM_CONFIDENCE),
                Pattern::var("confidence"),
            )
            .optional(
                Pattern::var("movie"),
                Pattern::iri(vocab::DIRECTOR),
                Pattern::var("director"),
            )
            .optional(
                Pattern::var("movie"),
                Pattern::iri(vocab::CAST_MEMBERS[0]),
                Pattern::var("cast0"),
            )
            .optional(
                Pattern::var("movie"),
                Pattern::iri(vocab::CAST_MEMBERS[1]),
                Pattern::var("cast1"),
            )
            .optional(
                Pattern::var("movie"),
                Pattern::iri(vocab::CAST_MEMBERS[2]),
                Pattern::var("cast2"),
            )
            .optional(
                Pattern::var("movie"),
                Pattern::iri(vocab::RDFS_COMMENT),
                Pattern::var("description"),
            )
            .filter(RowFilter::FloatAtLeast {
                var: "intensity",
                min: min_intensity,
            })
            .filter(RowFilter::StringNotIn {
                var: "title",
                values: PLACEHOLDER_TITLES.iter().map(|s| s.to_string()).collect(),
            })
            .order_by("intensity", true)
            .order_by("confidence", true)
            .limit(limit);

        let rows = query.run(&self.graph)?;

        // The builder enforces one record per category per movie; dedup at
        // read time regardless, tolerating a violated invariant.
        let mut seen = HashSet::new();
        let mut matches = Vec::new();
        for row in &rows {
            let candidate = self.row_to_match(row, emotion)?;
            if seen.insert(candidate.movie_id.clone()) {
                matches.push(candidate);
            }
        }
        Ok(matches)
    }

    fn emotions_for_movie(&self, movie_id: &str) -> Result<MovieEmotions> {
        let movie = vocab::movie_iri(movie_id);
        let query = SelectQuery::new()
            .pattern(
                Pattern::term(Term::Iri(movie.clone())),
                Pattern::iri(vocab::RDFS_LABEL),
                Pattern::var("title"),
            )
            .pattern(
                Pattern::term(Term::Iri(movie.clone())),
                Pattern::iri(vocab::HAS_EMOTION_SET),
                Pattern::var("set"),
            )
            .pattern(
                Pattern::var("set"),
                Pattern::iri(vocab::HAS_EMOTION),
                Pattern::var("emotion"),
            )
            .pattern(
                Pattern::var("emotion"),
                Pattern::iri(vocab::HAS_EMOTION_CATEGORY),
                Pattern::var("category"),
            )
            .pattern(
                Pattern::var("emotion"),
                Pattern::iri(vocab::HAS_EMOTION_INTENSITY),
                Pattern::var("intensity"),
            )
            .pattern(
                Pattern::var("emotion"),
                Pattern::iri(vocab::ALGORITHM_CONFIDENCE),
                Pattern::var("confidence"),
            );

        let rows = query.run(&self.graph)?;

        let mut title = None;
        let mut emotions = Vec::new();
        for row in &rows {
            title = row.str("title").map(str::to_string).or(title);
            let category = row.iri("category").ok_or(StoreError::TypeMismatch {
                var: "category",
                expected: "iri",
            })?;
            let emotion =
                self.categories
                    .emotion(category)
                    .ok_or_else(|| StoreError::UnknownCategory {
                        iri: category.as_str().to_string(),
                    })?;
            emotions.push(EmotionRecord {
                emotion,
                intensity: row.require_float("intensity")?,
                confidence: row.require_float("confidence")?,
            });
        }

        Ok(MovieEmotions {
            movie_id: movie_id.to_string(),
            title,
            emotions,
        })
    }

    fn top_by_confidence(&self, limit: usize) -> Result<Vec<CatalogEntry>> {
        let query = SelectQuery::new()
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::RDF_TYPE),
                Pattern::iri(vocab::MOVIE_CLASS),
            )
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::RDFS_LABEL),
                Pattern::var("title"),
            )
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::HAS_EMOTION_SET),
                Pattern::var("set"),
            )
            .pattern(
                Pattern::var("set"),
                Pattern::iri(vocab::HAS_EMOTION),
                Pattern::var("emotion"),
            )
            .pattern(
                Pattern::var("emotion"),
                Pattern::iri(vocab::ALGORITHM_CONFIDENCE),
                Pattern::var("confidence"),
            )
            .order_by("confidence", true)
            .limit(limit);

        let rows = query.run(&self.graph)?;

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for row in &rows {
            let movie_iri = row.iri("movie").ok_or(StoreError::TypeMismatch {
                var: "movie",
                expected: "iri",
            })?;
            let movie_id = vocab::movie_id_from_iri(movie_iri).to_string();
            if !seen.insert(movie_id.clone()) {
                continue;
            }
            entries.push(CatalogEntry {
                movie_id,
                title: row.require_str("title")?.to_string(),
                confidence: row.require_float("confidence")?,
            });
        }
        Ok(entries)
    }

    fn all_movies(&self) -> Result<Vec<MovieSummary>> {
        let query = SelectQuery::new()
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::RDF_TYPE),
                Pattern::iri(vocab::MOVIE_CLASS),
            )
            .pattern(
                Pattern::var("movie"),
                Pattern::iri(vocab::RDFS_LABEL),
                Pattern::var("title"),
            )
            .order_by("movie", false);

        let rows = query.run(&self.graph)?;

        let mut seen = HashSet::new();
        let mut movies = Vec::new();
        for row in &rows {
            let movie_iri = row.iri("movie").ok_or(StoreError::TypeMismatch {
                var: "movie",
                expected: "iri",
            })?;
            let movie_id = vocab::movie_id_from_iri(movie_iri).to_string();
            if !seen.insert(movie_id.clone()) {
                continue;
            }
            movies.push(MovieSummary {
                movie_id,
                title: row.require_str("title")?.to_string(),
            });
        }
        Ok(movies)
    }
}

/// Cut long descriptions for display; operates on characters, not bytes.
fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_LIMIT {
        description.to_string()
    } else {
        let cut: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_table_round_trip() {
        let table = CategoryTable::new();
        for emotion in Emotion::ALL {
            assert_eq!(table.emotion(table.iri(emotion)), Some(emotion));
        }
        assert_eq!(
            table.iri(Emotion::Joy).as_str(),
            "http://www.gsi.dit.upm.es/ontologies/onyx/ns#Joy"
        );
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let mut graph = Graph::new();
        graph.insert(
            vocab::aggregated_emotion_iri("m1", "joy"),
            Iri::new(vocab::HAS_EMOTION_CATEGORY),
            Term::iri("http://www.gsi.dit.upm.es/ontologies/onyx/ns#Euphoria"),
        );
        let result = MovieStore::new(graph);
        assert!(matches!(result, Err(StoreError::UnknownCategory { .. })));
    }

    #[test]
    fn test_empty_graph_is_a_valid_store() {
        let store = MovieStore::new(Graph::new()).unwrap();
        assert!(store
            .movies_with_emotion(Emotion::Joy, 0.0, 10)
            .unwrap()
            .is_empty());
        assert!(store.all_movies().unwrap().is_empty());
    }

    #[test]
    fn test_truncate_description_limits_length() {
        let short = "a fine film";
        assert_eq!(truncate_description(short), short);

        let long = "x".repeat(400);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(truncated.ends_with("..."));
    }
}
