use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Version tag for the word-character policy below. Bump on any change:
/// indexes built under a different policy are not query-compatible.
pub const TOKENIZER_ID: &str = "tok-ascii-cyr-lat1-v1";

lazy_static! {
    // Word characters: ASCII letters/digits, apostrophe, hyphen, dollar
    // sign, the Cyrillic block, and the Latin-1 supplement. The input is
    // lowercased first, so uppercase ranges are not needed.
    static ref WORD: Regex =
        Regex::new(r"[0-9a-z$'\x{00C0}-\x{00FF}\x{0400}-\x{04FF}-]+").expect("valid regex");
}

/// A single normalized token: NFKC-folded, lowercase, non-empty, made up
/// entirely of word characters. Only [`tokenize`] constructs these, so a
/// `Token` is always safe to hand to the stemmer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split text into normalized tokens: NFKC normalization, lowercasing,
/// then maximal runs of word characters. Pure and total: the same input
/// always yields the same sequence, and non-linguistic input yields an
/// empty one. Build and query phases must both go through here.
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    WORD.find_iter(&normalized)
        .map(|m| Token(m.as_str().to_string()))
        .collect()
}
