//! Declarative pattern-match queries over the triple graph.
//!
//! Queries are assembled from typed parts (triple patterns with named
//! variables, bound terms, typed row filters, sort keys), never from
//! interpolated query strings. Caller input only ever enters a query as a
//! bound [`Term`], so there is nothing to inject into.

use crate::error::{Result, StoreError};
use crate::graph::{Graph, Triple};
use crate::term::{Iri, Literal, Term};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One slot of a triple pattern: a named variable or a bound term.
#[derive(Debug, Clone)]
pub enum Pattern {
    Var(&'static str),
    Bound(Term),
}

impl Pattern {
    pub fn var(name: &'static str) -> Self {
        Pattern::Var(name)
    }

    pub fn iri(value: &str) -> Self {
        Pattern::Bound(Term::iri(value))
    }

    pub fn term(term: Term) -> Self {
        Pattern::Bound(term)
    }
}

/// A `(subject, predicate, object)` pattern.
#[derive(Debug, Clone)]
pub struct TriplePattern {
    pub subject: Pattern,
    pub predicate: Pattern,
    pub object: Pattern,
}

/// Row-level filters applied after pattern matching.
#[derive(Debug, Clone)]
pub enum RowFilter {
    /// Keep rows whose `var` is a float literal of at least `min`.
    FloatAtLeast { var: &'static str, min: f64 },
    /// Drop rows whose `var` is a string literal equal to one of `values`.
    StringNotIn {
        var: &'static str,
        values: Vec<String>,
    },
}

/// One ORDER BY key.
#[derive(Debug, Clone)]
pub struct SortKey {
    pub var: &'static str,
    pub descending: bool,
}

/// One solution row: variable name → bound term.
#[derive(Debug, Clone, Default)]
pub struct Row(HashMap<&'static str, Term>);

impl Row {
    pub fn term(&self, var: &str) -> Option<&Term> {
        self.0.get(var)
    }

    pub fn iri(&self, var: &str) -> Option<&Iri> {
        self.term(var).and_then(Term::as_iri)
    }

    pub fn str(&self, var: &str) -> Option<&str> {
        self.term(var).and_then(Term::as_str)
    }

    pub fn float(&self, var: &str) -> Option<f64> {
        self.term(var).and_then(Term::as_float)
    }

    /// Float accessor that treats a wrongly-typed binding as a query error
    /// rather than an absent value.
    pub fn require_float(&self, var: &'static str) -> Result<f64> {
        self.float(var).ok_or(StoreError::TypeMismatch {
            var,
            expected: "float",
        })
    }

    /// String accessor with the same strictness.
    pub fn require_str(&self, var: &'static str) -> Result<&str> {
        self.str(var).ok_or(StoreError::TypeMismatch {
            var,
            expected: "string",
        })
    }
}

/// A SELECT-style query: required patterns joined in order, then optional
/// patterns, then filters, ordering, and an optional row limit.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    patterns: Vec<TriplePattern>,
    optionals: Vec<TriplePattern>,
    filters: Vec<RowFilter>,
    order: Vec<SortKey>,
    limit: Option<usize>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required pattern. Patterns join in the order they are added.
    pub fn pattern(mut self, subject: Pattern, predicate: Pattern, object: Pattern) -> Self {
        self.patterns.push(TriplePattern {
            subject,
            predicate,
            object,
        });
        self
    }

    /// Add an optional pattern: rows that cannot match keep their existing
    /// bindings with the pattern's variables unbound.
    pub fn optional(mut self, subject: Pattern, predicate: Pattern, object: Pattern) -> Self {
        self.optionals.push(TriplePattern {
            subject,
            predicate,
            object,
        });
        self
    }

    pub fn filter(mut self, filter: RowFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, var: &'static str, descending: bool) -> Self {
        self.order.push(SortKey { var, descending });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute against a graph snapshot.
    pub fn run(&self, graph: &Graph) -> Result<Vec<Row>> {
        let mut rows = vec![Row::default()];

        for pattern in &self.patterns {
            let mut next = Vec::new();
            for row in &rows {
                extend_matches(graph, row, pattern, &mut next);
            }
            rows = next;
            if rows.is_empty() {
                break;
            }
        }

        for pattern in &self.optionals {
            let mut next = Vec::new();
            for row in rows {
                let before = next.len();
                extend_matches(graph, &row, pattern, &mut next);
                if next.len() == before {
                    next.push(row);
                }
            }
            rows = next;
        }

        for filter in &self.filters {
            rows = apply_filter(rows, filter)?;
        }

        if !self.order.is_empty() {
            rows.sort_by(|a, b| self.compare(a, b));
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }

    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        for key in &self.order {
            let ordering = compare_terms(a.term(key.var), b.term(key.var));
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Push every extension of `row` matching `pattern` onto `out`.
fn extend_matches(graph: &Graph, row: &Row, pattern: &TriplePattern, out: &mut Vec<Row>) {
    // Resolve slots against current bindings so the graph indexes can be
    // used for any slot that is already concrete.
    let subject_probe = resolve_iri(&pattern.subject, row);
    let predicate_probe = resolve_iri(&pattern.predicate, row);

    for triple in graph.matching(subject_probe.as_ref(), predicate_probe.as_ref()) {
        if let Some(extended) = try_bind(row, pattern, triple) {
            out.push(extended);
        }
    }
}

/// A slot's concrete IRI value, if the pattern or current bindings fix one.
fn resolve_iri(pattern: &Pattern, row: &Row) -> Option<Iri> {
    let term = match pattern {
        Pattern::Bound(term) => Some(term),
        Pattern::Var(name) => row.term(name),
    };
    term.and_then(Term::as_iri).cloned()
}

/// Match one triple against one pattern under existing bindings.
fn try_bind(row: &Row, pattern: &TriplePattern, triple: &Triple) -> Option<Row> {
    let mut extended = row.clone();
    bind_slot(
        &mut extended,
        &pattern.subject,
        &Term::Iri(triple.subject.clone()),
    )?;
    bind_slot(
        &mut extended,
        &pattern.predicate,
        &Term::Iri(triple.predicate.clone()),
    )?;
    bind_slot(&mut extended, &pattern.object, &triple.object)?;
    Some(extended)
}

fn bind_slot(row: &mut Row, pattern: &Pattern, value: &Term) -> Option<()> {
    match pattern {
        Pattern::Bound(term) => (term == value).then_some(()),
        Pattern::Var(name) => match row.0.get(name) {
            Some(existing) => (existing == value).then_some(()),
            None => {
                row.0.insert(name, value.clone());
                Some(())
            }
        },
    }
}

fn apply_filter(rows: Vec<Row>, filter: &RowFilter) -> Result<Vec<Row>> {
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        let keep = match filter {
            RowFilter::FloatAtLeast { var, min } => row.require_float(var)? >= *min,
            RowFilter::StringNotIn { var, values } => {
                let value = row.require_str(var)?;
                !values.iter().any(|excluded| excluded == value)
            }
        };
        if keep {
            kept.push(row);
        }
    }
    Ok(kept)
}

/// Total order over optional terms for sorting: unbound rows sort last,
/// floats numerically, strings and IRIs lexically. Mixed kinds compare by
/// kind so the sort stays consistent.
fn compare_terms(a: Option<&Term>, b: Option<&Term>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a, b) {
            (Term::Literal(Literal::Float(x)), Term::Literal(Literal::Float(y))) => {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            }
            (Term::Literal(Literal::String(x)), Term::Literal(Literal::String(y))) => x.cmp(y),
            (Term::Iri(x), Term::Iri(y)) => x.as_str().cmp(y.as_str()),
            (Term::Iri(_), _) => Ordering::Less,
            (_, Term::Iri(_)) => Ordering::Greater,
            (Term::Literal(Literal::Float(_)), _) => Ordering::Less,
            (_, Term::Literal(Literal::Float(_))) => Ordering::Greater,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::vocab;

    fn graph_with_emotions() -> Graph {
        let mut graph = Graph::new();
        for (id, title, intensity) in [
            ("m1", "Up", 0.6),
            ("m2", "Seven", 0.9),
            ("m3", "User reviews", 0.8),
        ] {
            let movie = vocab::movie_iri(id);
            graph.insert(
                movie.clone(),
                Iri::new(vocab::RDF_TYPE),
                Term::iri(vocab::MOVIE_CLASS),
            );
            graph.insert(movie.clone(), Iri::new(vocab::RDFS_LABEL), Term::string(title));
            graph.insert(
                movie.clone(),
                Iri::new(vocab::HAS_EMOTION_INTENSITY),
                Term::float(intensity),
            );
        }
        graph
    }

    fn base_query() -> SelectQuery {
        SelectQuery::new()
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
                Pattern::iri(vocab::HAS_EMOTION_INTENSITY),
                Pattern::var("intensity"),
            )
    }

    #[test]
    fn test_join_binds_all_variables() {
        let rows = base_query().run(&graph_with_emotions()).unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert!(row.iri("movie").is_some());
            assert!(row.str("title").is_some());
            assert!(row.float("intensity").is_some());
        }
    }

    #[test]
    fn test_float_filter_and_ordering() {
        let rows = base_query()
            .filter(RowFilter::FloatAtLeast {
                var: "intensity",
                min: 0.7,
            })
            .order_by("intensity", true)
            .run(&graph_with_emotions())
            .unwrap();

        let titles: Vec<_> = rows.iter().filter_map(|r| r.str("title")).collect();
        assert_eq!(titles, vec!["Seven", "User reviews"]);
    }

    #[test]
    fn test_string_exclusion_filter() {
        let rows = base_query()
            .filter(RowFilter::StringNotIn {
                var: "title",
                values: vec!["User reviews".to_string()],
            })
            .run(&graph_with_emotions())
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.str("title") != Some("User reviews")));
    }

    #[test]
    fn test_limit_truncates_after_ordering() {
        let rows = base_query()
            .order_by("intensity", true)
            .limit(1)
            .run(&graph_with_emotions())
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].str("title"), Some("Seven"));
    }

    #[test]
    fn test_optional_pattern_keeps_unmatched_rows() {
        let mut graph = graph_with_emotions();
        graph.insert(
            vocab::movie_iri("m1"),
            Iri::new(vocab::DIRECTOR),
            Term::string("Pete Docter"),
        );

        let rows = base_query()
            .optional(
                Pattern::var("movie"),
                Pattern::iri(vocab::DIRECTOR),
                Pattern::var("director"),
            )
            .run(&graph)
            .unwrap();

        assert_eq!(rows.len(), 3);
        let with_director = rows.iter().filter(|r| r.str("director").is_some()).count();
        assert_eq!(with_director, 1);
    }

    #[test]
    fn test_type_mismatch_is_an_error_not_empty() {
        let mut graph = Graph::new();
        let movie = vocab::movie_iri("bad");
        graph.insert(
            movie.clone(),
            Iri::new(vocab::RDF_TYPE),
            Term::iri(vocab::MOVIE_CLASS),
        );
        graph.insert(movie.clone(), Iri::new(vocab::RDFS_LABEL), Term::string("Bad"));
        graph.insert(
            movie.clone(),
            Iri::new(vocab::HAS_EMOTION_INTENSITY),
            Term::string("not a number"),
        );

        let result = base_query()
            .filter(RowFilter::FloatAtLeast {
                var: "intensity",
                min: 0.0,
            })
            .run(&graph);

        assert!(matches!(
            result,
            Err(StoreError::TypeMismatch { var: "intensity", .. })
        ));
    }

    #[test]
    fn test_shared_variable_joins_across_patterns() {
        // ?a label ?x . ?b label ?x should only join rows with equal labels.
        let mut graph = Graph::new();
        graph.insert(
            vocab::movie_iri("m1"),
            Iri::new(vocab::RDFS_LABEL),
            Term::string("Same"),
        );
        graph.insert(
            vocab::movie_iri("m2"),
            Iri::new(vocab::RDFS_LABEL),
            Term::string("Same"),
        );
        graph.insert(
            vocab::movie_iri("m3"),
            Iri::new(vocab::RDFS_LABEL),
            Term::string("Other"),
        );

        let rows = SelectQuery::new()
            .pattern(
                Pattern::var("a"),
                Pattern::iri(vocab::RDFS_LABEL),
                Pattern::var("x"),
            )
            .pattern(
                Pattern::var("b"),
                Pattern::iri(vocab::RDFS_LABEL),
                Pattern::var("x"),
            )
            .run(&graph)
            .unwrap();

        // m1/m1, m1/m2, m2/m1, m2/m2, m3/m3.
        assert_eq!(rows.len(), 5);
    }
}
