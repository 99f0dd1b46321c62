use engine::{build, stem, tokenize, BooleanIndex};
use proptest::prelude::*;

proptest! {
    /// Stemming is a fixpoint: feeding a stem back through the stemmer
    /// changes nothing.
    #[test]
    fn stemming_is_idempotent(word in "[a-z]{1,16}") {
        let token = tokenize(&word).pop().unwrap();
        let once = stem(&token);
        let again = stem(&tokenize(once.as_str()).pop().unwrap());
        prop_assert_eq!(once, again);
    }

    /// Tokenization is pure: the same input always yields the same
    /// sequence, and every token re-tokenizes to itself.
    #[test]
    fn tokenization_is_deterministic(text in "\\PC{0,64}") {
        let first = tokenize(&text);
        prop_assert_eq!(&first, &tokenize(&text));
        for token in first {
            prop_assert_eq!(tokenize(token.as_str()), vec![token]);
        }
    }

    /// Saving and reloading preserves the universe and every posting
    /// list.
    #[test]
    fn snapshot_round_trip(texts in proptest::collection::vec("[a-z ]{0,40}", 0..12)) {
        let docs: Vec<(u64, String)> = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| (i as u64, t))
            .collect();
        let (index, _) = build(docs);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prop.idx");
        index.save(&path).unwrap();
        let loaded = BooleanIndex::load(&path).unwrap();

        prop_assert_eq!(loaded.universe(), index.universe());
        prop_assert_eq!(loaded.term_count(), index.term_count());
        for (stem, ids) in index.iter_postings() {
            prop_assert_eq!(loaded.postings(stem), ids);
        }
    }
}
