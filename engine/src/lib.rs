//! Boolean document-retrieval engine: tokenizer, Porter-style stemmer,
//! inverted index with single-file persistence, and a fixed-grammar
//! boolean query evaluator (term, `NOT t`, `t1 AND t2`, `t1 OR t2`).
//!
//! The index is an explicit owned value: build code constructs one, the
//! query side borrows it. There is no process-wide singleton.

pub mod build;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod stemmer;
pub mod tokenizer;

pub use build::{build, BuildReport};
pub use error::{IndexError, QueryGrammarError};
pub use index::{BooleanIndex, DocId};
pub use query::{evaluate, Query};
pub use stemmer::{stem, Stem};
pub use tokenizer::{tokenize, Token};

/// Identifies the exact tokenizer/stemmer configuration baked into this
/// build. Stored in every saved index and checked on load: an index built
/// with a different analyzer has an incompatible vocabulary.
pub fn analyzer_fingerprint() -> String {
    format!("{}+{}", tokenizer::TOKENIZER_ID, stemmer::STEMMER_ID)
}
