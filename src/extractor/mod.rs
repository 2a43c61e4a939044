pub mod reserved;
mod script;
mod urlpath;

use std::collections::hash_set;
use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

pub use reserved::ReservedWords;
pub use urlpath::{percent_decode, split_camel_case, DecodeError, PATH_DELIMITERS, QUERY_DELIMITERS};

/// Identifier-like runs in script text.
pub const WORD_PATTERN: &str = r"[a-zA-Z0-9_\-.]+";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse URL {url}: {reason}")]
    UrlParse { url: String, reason: String },
}

/// Unique tokens produced by a single extraction call. Iteration order is
/// unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSet {
    words: HashSet<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str) -> bool {
        if self.words.contains(word) {
            return false;
        }
        self.words.insert(word.to_string())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.words.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.words.into_iter().collect()
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        let mut words = self.into_vec();
        words.sort();
        words
    }
}

impl IntoIterator for TokenSet {
    type Item = String;
    type IntoIter = hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

/// Owns the reserved-word table and the compiled word pattern so both can be
/// shared read-only across every input of a run.
#[derive(Clone, Debug)]
pub struct Extractor {
    reserved: ReservedWords,
    word_pattern: Regex,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::with_reserved(ReservedWords::default())
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reserved(reserved: ReservedWords) -> Self {
        let word_pattern = Regex::new(WORD_PATTERN).expect("word pattern is a valid regex");
        Self {
            reserved,
            word_pattern,
        }
    }

    pub fn reserved(&self) -> &ReservedWords {
        &self.reserved
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.is_reserved(word)
    }

    /// Tokenizes fetched script content.
    pub fn extract_script_words(&self, content: &str) -> TokenSet {
        script::extract_words(content, &self.word_pattern, &self.reserved)
    }

    /// Tokenizes the path and query of `url`.
    pub fn extract_url_words(&self, url: &str) -> Result<TokenSet, ExtractError> {
        urlpath::extract_words(url, &self.reserved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_set_deduplicates() {
        let mut set = TokenSet::new();
        assert!(set.insert("api"));
        assert!(!set.insert("api"));
        assert!(set.insert("Api"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn sorted_vec_is_lexicographic() {
        let mut set = TokenSet::new();
        for w in ["b", "C", "a"] {
            set.insert(w);
        }
        assert_eq!(set.into_sorted_vec(), vec!["C", "a", "b"]);
    }

    #[test]
    fn custom_table_changes_filtering() {
        let extractor = Extractor::with_reserved(ReservedWords::from_words(["secret"]));
        let words = extractor.extract_script_words("secret window");
        assert!(!words.contains("secret"));
        assert!(words.contains("window"));
    }
}
