use reqwest::Url;
use thiserror::Error;

use super::reserved::ReservedWords;
use super::{ExtractError, TokenSet};

pub const PATH_DELIMITERS: &[char] = &['/', '-', '_', '.', '='];
pub const QUERY_DELIMITERS: &[char] = &['&', '=', ';'];

// Scheme-less inputs are checked against this base.
const RELATIVE_BASE: &str = "http://relative.invalid/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed percent escape at byte {index}")]
    MalformedEscape { index: usize },
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Strict percent-decoding. Any `%` not followed by two hex digits is an
/// error, as is a result that is not UTF-8. With `plus_as_space`, `+`
/// decodes to a space (query-string rules).
pub fn percent_decode(input: &str, plus_as_space: bool) -> Result<String, DecodeError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let high = bytes.get(i + 1).copied().and_then(hex_digit);
                let low = bytes.get(i + 2).copied().and_then(hex_digit);
                match (high, low) {
                    (Some(high), Some(low)) => out.push(high << 4 | low),
                    _ => return Err(DecodeError::MalformedEscape { index: i }),
                }
                i += 3;
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Splits at every uppercase char past index 0. The uppercase char opens the
/// next part; nothing else does.
pub fn split_camel_case(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    for (i, ch) in input.char_indices() {
        if i > 0 && ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Path and raw query sliced straight out of the input, without any
/// dot-segment removal or separator rewriting.
#[derive(Debug, PartialEq, Eq)]
struct RawParts<'a> {
    path: &'a str,
    query: &'a str,
}

/// Splits a leading `scheme:` off `input`. A string that does not open with a
/// letter followed by scheme characters and a colon has no scheme.
fn split_scheme(input: &str) -> Result<(Option<&str>, &str), &'static str> {
    for (i, c) in input.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if i > 0 => {}
            ':' if i == 0 => return Err("missing protocol scheme"),
            ':' => return Ok((Some(&input[..i]), &input[i + 1..])),
            _ => return Ok((None, input)),
        }
    }
    Ok((None, input))
}

/// Returns `None` for opaque URLs (`mailto:a@b`, `localhost:8080/api`),
/// which carry no path words.
fn split_parts(input: &str) -> Result<Option<RawParts<'_>>, &'static str> {
    if input.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err("invalid control character in URL");
    }
    let rest = input.split_once('#').map_or(input, |(before, _)| before);
    let (scheme, rest) = split_scheme(rest)?;
    let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

    if !rest.starts_with('/') {
        if scheme.is_some() {
            return Ok(None);
        }
        let first = rest.split_once('/').map_or(rest, |(first, _)| first);
        if first.contains(':') {
            return Err("first path segment in URL cannot contain colon");
        }
    }

    let path = match rest.strip_prefix("//") {
        Some(after) if scheme.is_some() || !rest.starts_with("///") => {
            after.find('/').map_or("", |i| &after[i..])
        }
        _ => rest,
    };
    Ok(Some(RawParts { path, query }))
}

// Host, port and bracket syntax are checked by the WHATWG parser. Its
// normalized path is never used.
fn check_authority(input: &str) -> Result<(), String> {
    let parsed = match split_scheme(input) {
        Ok((Some(_), _)) => Url::parse(input),
        _ => Url::parse(RELATIVE_BASE).and_then(|base| base.join(input)),
    };
    parsed.map(drop).map_err(|e| e.to_string())
}

fn parse_parts(input: &str) -> Result<Option<RawParts<'_>>, ExtractError> {
    let fail = |reason: String| ExtractError::UrlParse {
        url: input.to_string(),
        reason,
    };
    let parts = split_parts(input).map_err(|reason| fail(reason.to_string()))?;
    if parts.is_some() {
        check_authority(input).map_err(fail)?;
    }
    Ok(parts)
}

fn add_segment(words: &mut TokenSet, segment: &str, reserved: &ReservedWords) {
    if reserved.is_reserved(segment) {
        return;
    }
    words.insert(segment);
    for part in split_camel_case(segment) {
        if !part.is_empty() && !reserved.is_reserved(&part) {
            words.insert(&part);
        }
    }
}

pub(super) fn extract_words(input: &str, reserved: &ReservedWords) -> Result<TokenSet, ExtractError> {
    let mut words = TokenSet::new();
    let Some(RawParts {
        path: raw_path,
        query: raw_query,
    }) = parse_parts(input)?
    else {
        return Ok(words);
    };

    let path = percent_decode(raw_path, false).unwrap_or_else(|_| raw_path.to_string());
    let query = percent_decode(raw_query, true).unwrap_or_else(|_| raw_query.to_string());

    let segments = path
        .split(PATH_DELIMITERS)
        .chain(query.split(QUERY_DELIMITERS))
        .filter(|s| !s.is_empty());
    for segment in segments {
        add_segment(&mut words, segment, reserved);
    }
    Ok(words)
}
