//! RDF-style terms and the fixed vocabulary of the movie-emotion graph.

use std::fmt;
use std::sync::Arc;

/// A named graph node. Backed by `Arc<str>` so triples, indexes, and result
/// rows can share one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A literal object value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(Arc<str>),
    Float(f64),
}

impl Literal {
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Literal::String(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            Literal::Float(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Literal::Float(f) => Some(*f),
            Literal::String(_) => None,
        }
    }
}

/// A graph term: either a named node or a literal.
///
/// Subjects and predicates are always IRIs; only objects may be literals,
/// so [`crate::graph::Triple`] stores `Term` for the object slot alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    pub fn iri(value: impl Into<Arc<str>>) -> Self {
        Term::Iri(Iri::new(value))
    }

    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Term::Literal(Literal::string(value))
    }

    pub fn float(value: f64) -> Self {
        Term::Literal(Literal::Float(value))
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::Literal(literal) => literal.as_str(),
            Term::Iri(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Term::Literal(literal) => literal.as_float(),
            Term::Iri(_) => None,
        }
    }
}

/// The IRIs the construction pipeline writes and the serving queries read.
pub mod vocab {
    use super::Iri;

    // Namespaces
    pub const ONYX_NS: &str = "http://www.gsi.dit.upm.es/ontologies/onyx/ns#";
    pub const MOVIE_NS: &str = "http://example.org/movie/";
    pub const EMOTION_NS: &str = "http://example.org/emotion/";
    pub const DBPEDIA_NS: &str = "http://dbpedia.org/ontology/";

    // Classes
    pub const MOVIE_CLASS: &str = "http://www.gsi.dit.upm.es/ontologies/onyx/ns#Movie";
    pub const EMOTION_SET_CLASS: &str =
        "http://www.gsi.dit.upm.es/ontologies/onyx/ns#EmotionSet";
    pub const AGGREGATED_EMOTION_CLASS: &str =
        "http://www.gsi.dit.upm.es/ontologies/onyx/ns#AggregatedEmotion";

    // Predicates
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const HAS_EMOTION_SET: &str =
        "http://www.gsi.dit.upm.es/ontologies/onyx/ns#hasEmotionSet";
    pub const HAS_EMOTION: &str = "http://www.gsi.dit.upm.es/ontologies/onyx/ns#hasEmotion";
    pub const HAS_EMOTION_CATEGORY: &str =
        "http://www.gsi.dit.upm.es/ontologies/onyx/ns#hasEmotionCategory";
    pub const HAS_EMOTION_INTENSITY: &str =
        "http://www.gsi.dit.upm.es/ontologies/onyx/ns#hasEmotionIntensity";
    pub const ALGORITHM_CONFIDENCE: &str =
        "http://www.gsi.dit.upm.es/ontologies/onyx/ns#algorithmConfidence";
    pub const DIRECTOR: &str = "http://dbpedia.org/ontology/director";
    pub const CAST_MEMBERS: [&str; 3] = [
        "http://dbpedia.org/ontology/cast_member_0",
        "http://dbpedia.org/ontology/cast_member_1",
        "http://dbpedia.org/ontology/cast_member_2",
    ];

    /// IRI for a movie node.
    pub fn movie_iri(movie_id: &str) -> Iri {
        Iri::new(format!("{MOVIE_NS}{movie_id}"))
    }

    /// IRI for a movie's emotion-set node.
    pub fn emotion_set_iri(movie_id: &str) -> Iri {
        Iri::new(format!("{EMOTION_NS}set_{movie_id}"))
    }

    /// IRI for one aggregated-emotion node of a movie.
    pub fn aggregated_emotion_iri(movie_id: &str, category: &str) -> Iri {
        Iri::new(format!("{EMOTION_NS}agg_{movie_id}_{category}"))
    }

    /// Recover the external movie id from a movie node IRI.
    pub fn movie_id_from_iri(iri: &Iri) -> &str {
        iri.as_str().strip_prefix(MOVIE_NS).unwrap_or(iri.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_iri_round_trip() {
        let iri = vocab::movie_iri("tt0111161");
        assert_eq!(vocab::movie_id_from_iri(&iri), "tt0111161");
    }

    #[test]
    fn test_term_accessors() {
        assert_eq!(Term::float(0.5).as_float(), Some(0.5));
        assert_eq!(Term::string("x").as_str(), Some("x"));
        assert!(Term::iri("http://example.org/a").as_float().is_none());
        assert!(Term::iri("http://example.org/a").as_iri().is_some());
    }
}
