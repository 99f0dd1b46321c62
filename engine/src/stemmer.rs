//! Porter-style suffix stripping for English.
//!
//! A reduced Porter pipeline: plural step, `eed`/`ed`/`ing` step with
//! `at`/`bl`/`iz` restoration, double-consonant trim and CVC
//! `e`-restoration, `y` -> `i`, a fixed table of derivational suffix
//! rules, and a final-`e` drop. Rules are guarded by the classic
//! vowel-consonant "measure" of the candidate stem.
//!
//! The public [`stem`] iterates the pipeline to a fixpoint, so stemming
//! is idempotent: `stem(stem(w)) == stem(w)` for every token. The index
//! vocabulary is defined by this function; build and query must use the
//! same build of it.

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Version tag for the rule table and thresholds below. Bump on any
/// change: stems produced by a different table do not line up with an
/// existing index vocabulary.
pub const STEMMER_ID: &str = "stem-porter-en-v1";

/// Tokens shorter than this are returned unchanged.
const MIN_STEM_LEN: usize = 3;

/// A canonical stem, the vocabulary key of the index. Distinct from
/// [`Token`] so an un-stemmed query term can never be compared against a
/// stemmed posting-list key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stem(String);

impl Stem {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduce a token to its canonical stem. Pure and deterministic; tokens
/// shorter than [`MIN_STEM_LEN`] or containing non-ASCII characters pass
/// through unchanged.
pub fn stem(token: &Token) -> Stem {
    Stem(stem_word(token.as_str()))
}

fn stem_word(word: &str) -> String {
    if !word.is_ascii() || word.len() < MIN_STEM_LEN {
        return word.to_string();
    }
    let mut w = word.to_string();
    // A single pass is not idempotent (pass("agreed") == "agre",
    // pass("agre") == "agr"); iterate until stable. Each pass never
    // lengthens the word, so this terminates.
    loop {
        let next = porter_pass(&w);
        if next == w {
            return w;
        }
        w = next;
    }
}

fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-to-consonant transitions, the `m` of Porter's
/// `[C](VC)^m[V]` decomposition.
fn measure(w: &str) -> usize {
    let bytes = w.as_bytes();
    let mut m = 0;
    let mut in_vowel = false;
    for i in 0..bytes.len() {
        if !is_consonant(bytes, i) {
            in_vowel = true;
        } else if in_vowel {
            m += 1;
            in_vowel = false;
        }
    }
    m
}

fn contains_vowel(w: &str) -> bool {
    let bytes = w.as_bytes();
    (0..bytes.len()).any(|i| !is_consonant(bytes, i))
}

fn ends_double_consonant(w: &str) -> bool {
    let bytes = w.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && is_consonant(bytes, n - 1)
}

/// consonant-vowel-consonant ending where the final consonant is not
/// `w`, `x` or `y`; such stems get their silent `e` restored.
fn ends_cvc(w: &str) -> bool {
    let bytes = w.as_bytes();
    let n = bytes.len();
    n >= 3
        && is_consonant(bytes, n - 1)
        && !is_consonant(bytes, n - 2)
        && is_consonant(bytes, n - 3)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}

/// Derivational suffixes, most specific first. At most one rule fires.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

fn porter_pass(input: &str) -> String {
    let mut w = input.to_string();
    if w.len() < MIN_STEM_LEN {
        return w;
    }

    // plurals
    if w.ends_with("sses") || w.ends_with("ies") {
        w.truncate(w.len() - 2);
    } else if w.ends_with("ss") {
        // keep
    } else if w.ends_with('s') {
        w.truncate(w.len() - 1);
    }

    // past tense and gerunds
    if w.ends_with("eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.truncate(w.len() - 1);
        }
    } else if (w.ends_with("ed") && contains_vowel(&w[..w.len() - 2]))
        || (w.ends_with("ing") && contains_vowel(&w[..w.len() - 3]))
    {
        let cut = if w.ends_with("ed") { 2 } else { 3 };
        w.truncate(w.len() - cut);
        if w.ends_with("at") || w.ends_with("bl") || w.ends_with("iz") {
            w.push('e');
        } else if ends_double_consonant(&w) && !matches!(w.as_bytes()[w.len() - 1], b'l' | b's' | b'z')
        {
            w.pop();
        } else if measure(&w) == 1 && ends_cvc(&w) {
            w.push('e');
        }
    }

    // terminal y -> i
    if w.ends_with('y') && contains_vowel(&w[..w.len() - 1]) {
        w.pop();
        w.push('i');
    }

    // derivational suffixes
    for (suffix, replacement) in SUFFIX_RULES {
        if let Some(prefix) = w.strip_suffix(suffix) {
            if measure(prefix) > 0 {
                w = format!("{prefix}{replacement}");
            }
            break;
        }
    }

    // final e
    if w.ends_with('e') {
        let prefix = &w[..w.len() - 1];
        let m = measure(prefix);
        if m > 1 || (m == 1 && !ends_cvc(prefix)) {
            w.truncate(w.len() - 1);
        }
    }

    w
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn s(word: &str) -> String {
        stem_word(word)
    }

    #[test]
    fn classic_reductions() {
        assert_eq!(s("caresses"), "caress");
        assert_eq!(s("ponies"), "poni");
        assert_eq!(s("running"), "run");
        assert_eq!(s("hoping"), "hope");
        assert_eq!(s("happy"), "happi");
        assert_eq!(s("relational"), "relat");
        assert_eq!(s("conditional"), "condition");
        assert_eq!(s("itemization"), "itemiz");
    }

    #[test]
    fn measure_guards_hold() {
        // measure("f") == 0, so the eed rule must not fire
        assert_eq!(s("feed"), "feed");
        assert_eq!(measure("tr"), 0);
        assert_eq!(measure("trouble"), 1);
        assert_eq!(measure("oaten"), 2);
        assert_eq!(measure("private"), 2);
    }

    #[test]
    fn short_tokens_unchanged() {
        assert_eq!(s("go"), "go");
        assert_eq!(s("ab"), "ab");
    }

    #[test]
    fn non_ascii_unchanged() {
        assert_eq!(s("café"), "café");
        assert_eq!(s("москва"), "москва");
    }

    #[test]
    fn idempotent_on_multi_pass_words() {
        // one Porter pass over "agreed" yields "agre"; the fixpoint
        // carries it to "agr" and stays there
        assert_eq!(s("agreed"), "agr");
        for w in ["agreed", "generalization", "oscillators", "possibly"] {
            let once = s(w);
            assert_eq!(s(&once), once, "stem not idempotent for {w}");
        }
    }

    #[test]
    fn stems_tokens_from_tokenizer() {
        let toks = tokenize("Running runners ran");
        let stems: Vec<String> = toks.iter().map(|t| stem(t).as_str().to_string()).collect();
        assert_eq!(stems, vec!["run", "runner", "ran"]);
    }
}
