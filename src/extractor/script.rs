use regex::Regex;

use super::reserved::ReservedWords;
use super::TokenSet;

pub(super) fn extract_words(content: &str, pattern: &Regex, reserved: &ReservedWords) -> TokenSet {
    let mut words = TokenSet::new();
    for m in pattern.find_iter(content) {
        let Some(candidate) = candidate_word(m.as_str()) else {
            continue;
        };
        if reserved.is_reserved(candidate) {
            continue;
        }
        words.insert(candidate);
    }
    words
}

// Dotted runs keep only their final member, so `a.b.c` yields `c`.
fn candidate_word(raw: &str) -> Option<&str> {
    if raw.contains('.') {
        return raw.rsplit('.').next().filter(|last| !last.is_empty());
    }
    if raw.len() == 1 {
        return raw
            .as_bytes()
            .first()
            .filter(|b| b.is_ascii_alphabetic())
            .map(|_| raw);
    }
    Some(raw)
}
