use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::extractor::{Extractor, ReservedWords};

/// In-memory writer that stays readable after being boxed into a `Sink`.
#[derive(Clone, Default)]
pub(crate) struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const SAMPLE_SCRIPT: &str = r#"
(function (window, document) {
  "use strict";
  var API_BASE = window.config.apiBaseUrl || "/api/v2";
  const userProfile = { name: "x", length: 3, isAdmin: false };
  function fetchUserToken(id) {
    return fetch(API_BASE + "/users/" + id + "/token", { method: "POST" })
      .then(r => r.json());
  }
  if (typeof module !== "undefined") module.exports = fetchUserToken;
})(this, this.document);
"#;

#[test]
fn script_tokens_are_never_reserved_or_empty() {
    let reserved = ReservedWords::default();
    let words = Extractor::new().extract_script_words(SAMPLE_SCRIPT);
    assert!(!words.is_empty());
    for word in words.iter() {
        assert!(!word.is_empty());
        assert!(!reserved.is_reserved(word), "{word} leaked through");
    }
}

#[test]
fn script_sample_yields_expected_identifiers() {
    let words = Extractor::new().extract_script_words(SAMPLE_SCRIPT);
    for expected in [
        "API_BASE",
        "apiBaseUrl",
        "userProfile",
        "isAdmin",
        "fetchUserToken",
        "json",
        "exports",
        "v2",
        "users",
        "token",
        "method",
        "POST",
        "x",
        "r",
        "id",
    ] {
        assert!(words.contains(expected), "missing {expected}");
    }
    for absent in ["config", "window", "length", "name", "3", "use strict"] {
        assert!(!words.contains(absent), "unexpected {absent}");
    }
}

#[test]
fn url_tokens_are_never_reserved_or_empty() {
    let reserved = ReservedWords::default();
    let extractor = Extractor::new();
    for url in [
        "https://example.com/api/user-profile?sortBy=name",
        "https://example.com/Window/getStatusText?open=1&close=2",
        "https://example.com/a//b--c__d..e==f?&&;;==",
        "/relative/pathOnly",
    ] {
        for word in extractor.extract_url_words(url).unwrap().iter() {
            assert!(!word.is_empty());
            assert!(!reserved.is_reserved(word), "{word} leaked from {url}");
        }
    }
}

#[test]
fn url_camel_parts_appear_alongside_whole_segment() {
    let words = Extractor::new()
        .extract_url_words("https://example.com/getStatusText")
        .unwrap();
    assert!(words.contains("getStatusText"));
    assert!(words.contains("get"));
    assert!(!words.contains("Status"));
    assert!(!words.contains("Text"));
    assert_eq!(words.len(), 2);
}

#[test]
fn extraction_shares_one_table_across_inputs() {
    let extractor = Extractor::with_reserved(ReservedWords::default().with_extra(["cdn"]));
    let a = extractor.extract_script_words("cdn.assets");
    let b = extractor.extract_url_words("https://x.test/cdn/assets").unwrap();
    assert_eq!(a.into_sorted_vec(), vec!["assets"]);
    assert_eq!(b.into_sorted_vec(), vec!["assets"]);
}
