//! The in-memory triple graph.
//!
//! Populated once by the offline builder, then treated as an immutable
//! shared-read snapshot for the life of the process. Reads need no locking
//! because serving-time code holds no `&mut Graph`.

use crate::term::{Iri, Term};
use std::collections::HashMap;

/// One `(subject, predicate, object)` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

/// Triple storage with subject and predicate indexes.
///
/// Index values are offsets into `triples`, so iteration order is always
/// insertion order; the query layer relies on that for reproducible results
/// before explicit ordering is applied.
#[derive(Debug, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    by_subject: HashMap<Iri, Vec<usize>>,
    by_predicate: HashMap<Iri, Vec<usize>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one triple. Build-time only; the serving path never mutates.
    pub fn insert(&mut self, subject: Iri, predicate: Iri, object: Term) {
        let offset = self.triples.len();
        self.by_subject
            .entry(subject.clone())
            .or_default()
            .push(offset);
        self.by_predicate
            .entry(predicate.clone())
            .or_default()
            .push(offset);
        self.triples.push(Triple {
            subject,
            predicate,
            object,
        });
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate triples matching an optional subject/predicate probe, using
    /// whichever index is available.
    pub fn matching<'a>(
        &'a self,
        subject: Option<&Iri>,
        predicate: Option<&'a Iri>,
    ) -> Box<dyn Iterator<Item = &'a Triple> + 'a> {
        match (subject, predicate) {
            (Some(s), p) => {
                let offsets = self.by_subject.get(s).map(Vec::as_slice).unwrap_or(&[]);
                Box::new(
                    offsets
                        .iter()
                        .map(|&i| &self.triples[i])
                        .filter(move |t| p.is_none_or(|p| &t.predicate == p)),
                )
            }
            (None, Some(p)) => {
                let offsets = self.by_predicate.get(p).map(Vec::as_slice).unwrap_or(&[]);
                Box::new(offsets.iter().map(|&i| &self.triples[i]))
            }
            (None, None) => Box::new(self.triples.iter()),
        }
    }

    /// Objects of all `(subject, predicate, _)` triples.
    pub fn objects<'a>(
        &'a self,
        subject: &Iri,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Term> {
        self.matching(Some(subject), Some(predicate)).map(|t| &t.object)
    }
}
