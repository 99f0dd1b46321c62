use thiserror::Error;

use crate::index::DocId;

/// Failures raised by index mutation and persistence.
#[derive(Debug, Error)]
pub enum IndexError {
    /// `add_document` was called twice with the same id. The second call is
    /// rejected outright; the index still reflects only the first call.
    #[error("document {0} is already indexed")]
    DuplicateDocument(DocId),

    /// The snapshot on disk cannot be trusted: bad magic, unsupported
    /// format version, analyzer fingerprint mismatch, truncation, or an
    /// internal inconsistency such as an empty or unsorted posting list.
    #[error("index file corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A query string that does not match the 1/2/3-token grammar. Raised
/// before any index lookup; callers can therefore tell a rejected query
/// apart from a query that legitimately matched nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryGrammarError {
    #[error("empty query")]
    Empty,

    #[error("expected 1-3 query tokens, got {0}")]
    BadShape(usize),

    #[error("unknown operator {0:?}")]
    UnknownOperator(String),

    /// A term position did not normalize to exactly one index token
    /// (for example pure punctuation, or two words joined by a slash).
    #[error("{0:?} is not a valid query term")]
    BadTerm(String),
}
