use std::collections::{BTreeSet, HashMap};

use crate::error::IndexError;
use crate::stemmer::Stem;

pub type DocId = u64;

static EMPTY_POSTINGS: BTreeSet<DocId> = BTreeSet::new();

/// Inverted index for boolean retrieval: a mapping from stem to the set
/// of documents containing it, plus the universe of all registered
/// document ids (needed to evaluate negation).
///
/// Mutable while a build is in flight, then treated as read-only for
/// querying. The caller owns the instance and is responsible for not
/// mutating it while readers hold references; once loaded from disk it
/// is never mutated by this crate.
#[derive(Debug, Default)]
pub struct BooleanIndex {
    universe: BTreeSet<DocId>,
    postings: HashMap<Stem, BTreeSet<DocId>>,
}

impl BooleanIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document and its stems. Each id may be registered at
    /// most once; a second call with the same id fails with
    /// [`IndexError::DuplicateDocument`] and leaves the index untouched.
    ///
    /// Repeated stems within one document collapse to a single posting
    /// entry. An empty stem sequence is legal: the document then counts
    /// toward the universe (and so is matched by `NOT t` queries) but
    /// appears in no posting list.
    pub fn add_document<I>(&mut self, doc_id: DocId, stems: I) -> Result<(), IndexError>
    where
        I: IntoIterator<Item = Stem>,
    {
        if !self.universe.insert(doc_id) {
            return Err(IndexError::DuplicateDocument(doc_id));
        }
        for stem in stems {
            self.postings.entry(stem).or_default().insert(doc_id);
        }
        Ok(())
    }

    /// Documents containing `stem`. An unknown stem yields the empty
    /// set; that is a normal outcome, not an error.
    pub fn postings(&self, stem: &Stem) -> &BTreeSet<DocId> {
        self.postings.get(stem).unwrap_or(&EMPTY_POSTINGS)
    }

    /// All document ids ever registered, including those with no stems.
    pub fn universe(&self) -> &BTreeSet<DocId> {
        &self.universe
    }

    pub fn doc_count(&self) -> usize {
        self.universe.len()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Iterate the vocabulary with each stem's posting list. Order is
    /// unspecified.
    pub fn iter_postings(&self) -> impl Iterator<Item = (&Stem, &BTreeSet<DocId>)> {
        self.postings.iter()
    }

    pub(crate) fn from_parts(
        universe: BTreeSet<DocId>,
        postings: HashMap<Stem, BTreeSet<DocId>>,
    ) -> Self {
        Self { universe, postings }
    }
}
