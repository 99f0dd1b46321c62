//! Fixed-grammar boolean queries.
//!
//! Exactly four shapes, whitespace-delimited, operator keywords matched
//! case-insensitively:
//!
//! | shape        | meaning                                  |
//! |--------------|------------------------------------------|
//! | `t`          | postings(stem(t))                        |
//! | `NOT t`      | universe - postings(stem(t))             |
//! | `t1 AND t2`  | postings(stem(t1)) ∩ postings(stem(t2))  |
//! | `t1 OR t2`   | postings(stem(t1)) ∪ postings(stem(t2))  |
//!
//! Anything else is rejected with [`QueryGrammarError`] before any index
//! lookup. Terms are normalized and stemmed with the same analyzer the
//! build phase uses, so query vocabulary lines up with the index.

use std::collections::BTreeSet;

use crate::error::QueryGrammarError;
use crate::index::{BooleanIndex, DocId};
use crate::stemmer::{stem, Stem};
use crate::tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Term(Stem),
    Not(Stem),
    And(Stem, Stem),
    Or(Stem, Stem),
}

impl Query {
    /// Parse a raw query string against the fixed grammar.
    pub fn parse(raw: &str) -> Result<Query, QueryGrammarError> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(QueryGrammarError::Empty),
            [term] => Ok(Query::Term(query_term(term)?)),
            [op, term] => {
                if !op.eq_ignore_ascii_case("not") {
                    return Err(QueryGrammarError::UnknownOperator(op.to_string()));
                }
                Ok(Query::Not(query_term(term)?))
            }
            [left, op, right] => {
                if op.eq_ignore_ascii_case("and") {
                    Ok(Query::And(query_term(left)?, query_term(right)?))
                } else if op.eq_ignore_ascii_case("or") {
                    Ok(Query::Or(query_term(left)?, query_term(right)?))
                } else {
                    Err(QueryGrammarError::UnknownOperator(op.to_string()))
                }
            }
            more => Err(QueryGrammarError::BadShape(more.len())),
        }
    }

    /// Evaluate against a read-only index. An empty result set means
    /// "no match" and is a normal outcome.
    pub fn eval(&self, index: &BooleanIndex) -> BTreeSet<DocId> {
        match self {
            Query::Term(t) => index.postings(t).clone(),
            Query::Not(t) => index.universe() - index.postings(t),
            Query::And(a, b) => index.postings(a) & index.postings(b),
            Query::Or(a, b) => index.postings(a) | index.postings(b),
        }
    }
}

/// Parse and evaluate in one step.
pub fn evaluate(raw: &str, index: &BooleanIndex) -> Result<BTreeSet<DocId>, QueryGrammarError> {
    Ok(Query::parse(raw)?.eval(index))
}

/// A query term must normalize to exactly one token; pure punctuation or
/// terms that split into several tokens have no single posting key.
fn query_term(raw: &str) -> Result<Stem, QueryGrammarError> {
    let mut tokens = tokenize(raw);
    if tokens.len() != 1 {
        return Err(QueryGrammarError::BadTerm(raw.to_string()));
    }
    Ok(stem(&tokens.remove(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(word: &str) -> Stem {
        query_term(word).unwrap()
    }

    #[test]
    fn parses_all_four_shapes() {
        assert_eq!(Query::parse("music").unwrap(), Query::Term(term("music")));
        assert_eq!(Query::parse("NOT music").unwrap(), Query::Not(term("music")));
        assert_eq!(
            Query::parse("music AND review").unwrap(),
            Query::And(term("music"), term("review"))
        );
        assert_eq!(
            Query::parse("music OR review").unwrap(),
            Query::Or(term("music"), term("review"))
        );
    }

    #[test]
    fn operators_are_case_insensitive() {
        assert_eq!(Query::parse("not music").unwrap(), Query::Not(term("music")));
        assert_eq!(
            Query::parse("music and review").unwrap(),
            Query::And(term("music"), term("review"))
        );
        assert_eq!(
            Query::parse("music oR review").unwrap(),
            Query::Or(term("music"), term("review"))
        );
    }

    #[test]
    fn terms_are_stemmed_like_the_build_phase() {
        assert_eq!(Query::parse("Running").unwrap(), Query::Term(term("run")));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(Query::parse("").unwrap_err(), QueryGrammarError::Empty);
        assert_eq!(Query::parse("   ").unwrap_err(), QueryGrammarError::Empty);
        assert_eq!(
            Query::parse("a b c d").unwrap_err(),
            QueryGrammarError::BadShape(4)
        );
    }

    #[test]
    fn rejects_unknown_operators() {
        assert_eq!(
            Query::parse("music XOR review").unwrap_err(),
            QueryGrammarError::UnknownOperator("XOR".to_string())
        );
        assert_eq!(
            Query::parse("and music").unwrap_err(),
            QueryGrammarError::UnknownOperator("and".to_string())
        );
    }

    #[test]
    fn rejects_degenerate_terms() {
        assert!(matches!(
            Query::parse("NOT !!!").unwrap_err(),
            QueryGrammarError::BadTerm(_)
        ));
        assert!(matches!(
            Query::parse("rock/jazz").unwrap_err(),
            QueryGrammarError::BadTerm(_)
        ));
    }
}
