use std::collections::HashSet;

/// Language keywords followed by browser/DOM globals. Stored lowercase.
#[rustfmt::skip]
const DEFAULT_RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class",
    "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends",
    "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface",
    "let", "new", "null", "package", "private",
    "protected", "public", "return", "super", "switch",
    "static", "this", "throw", "try", "true",
    "typeof", "var", "void", "while", "with",
    "abstract", "boolean", "byte", "char", "double",
    "final", "float", "goto", "int", "long",
    "native", "short", "synchronized", "throws", "transient",
    "volatile",
    "alert", "frames", "outerheight", "all", "framerate",
    "outerwidth", "anchor", "packages",
    "anchors", "getclass", "pagexoffset", "area",
    "hasownproperty", "pageyoffset", "array", "hidden",
    "parent", "assign", "history", "parsefloat", "blur",
    "image", "parseint", "button", "images", "password",
    "checkbox", "infinity", "pkcs11", "clearinterval",
    "isfinite", "plugin", "cleartimeout", "isnan",
    "prompt", "clientinformation", "isprototypeof",
    "propertyisenum", "close", "java", "prototype",
    "closed", "javaarray", "radio", "confirm", "javaclass",
    "reset", "constructor", "javaobject", "screenx",
    "crypto", "javapackage", "screeny", "date",
    "innerheight", "scroll", "decodeuri", "innerwidth",
    "secure", "decodeuricomponent", "layer", "select",
    "defaultstatus", "layers", "self", "document",
    "length", "setinterval", "element", "link",
    "settimeout", "elements", "location", "status",
    "embed", "math", "string", "embeds", "mimetypes",
    "submit", "encodeuri", "name", "taint",
    "encodeuricomponent", "nan", "text", "escape",
    "navigate", "textarea", "eval", "navigator", "top",
    "event", "number", "tostring", "fileupload", "object",
    "undefined", "focus", "offscreenbuffering", "unescape",
    "form", "open", "untaint", "forms", "opener",
    "valueof", "frame", "option", "window", "yield",
];

/// Case-insensitive set of words that are never emitted as tokens.
#[derive(Clone, Debug)]
pub struct ReservedWords {
    words: HashSet<String>,
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::from_words(DEFAULT_RESERVED.iter().copied())
    }
}

impl ReservedWords {
    /// Builds a table from arbitrary words. Entries are trimmed and
    /// lowercased; blank entries are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                set.insert(word.to_lowercase());
            }
        }
        Self { words: set }
    }

    /// Layers additional words on top of this table.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in extra {
            let word = word.as_ref().trim();
            if !word.is_empty() {
                self.words.insert(word.to_lowercase());
            }
        }
        self
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
