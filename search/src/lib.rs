use std::path::Path;

use engine::{BooleanIndex, DocId, IndexError, QueryGrammarError};
use serde::Serialize;

/// Process exit codes for the search surface. Zero hits is still a
/// success: the caller gets a JSON result with `total: 0`, not an error.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_QUERY: i32 = 3;
pub const EXIT_INDEX: i32 = 4;

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub total: usize,
    pub doc_ids: Vec<DocId>,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    Query(#[from] QueryGrammarError),
    #[error("cannot use index: {0}")]
    Index(#[from] IndexError),
}

impl SearchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SearchError::Query(_) => EXIT_QUERY,
            SearchError::Index(_) => EXIT_INDEX,
        }
    }
}

/// Load the index at `index_path` and evaluate one boolean query
/// against it.
pub fn execute(index_path: &Path, query: &str) -> Result<SearchOutput, SearchError> {
    let index = BooleanIndex::load(index_path)?;
    let hits = engine::evaluate(query, &index)?;
    Ok(SearchOutput {
        query: query.to_string(),
        total: hits.len(),
        doc_ids: hits.into_iter().collect(),
    })
}
