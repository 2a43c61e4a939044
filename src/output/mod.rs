use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::extractor::TokenSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" | "jsonl" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") || lower.ends_with(".jsonl") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Js,
    Url,
}

/// Words harvested from one input.
#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub input: String,
    pub mode: Mode,
    pub words: Vec<String>,
}

impl OutputRecord {
    pub fn new(input: &str, mode: Mode, words: TokenSet, sort: bool) -> Self {
        let words = if sort {
            words.into_sorted_vec()
        } else {
            words.into_vec()
        };
        Self {
            input: input.to_string(),
            mode,
            words,
        }
    }
}

pub fn render_text(record: &OutputRecord) -> Vec<u8> {
    let mut out = String::new();
    for word in &record.words {
        out.push_str(word);
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(record: &OutputRecord) -> io::Result<Vec<u8>> {
    let mut out = serde_json::to_vec(record)?;
    out.push(b'\n');
    Ok(out)
}

/// Single writer for every record in a run, so lines never interleave.
pub struct Sink {
    format: OutputFormat,
    writer: Box<dyn Write>,
}

impl Sink {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::from_writer(format, Box::new(io::stdout()))
    }

    pub fn file(format: OutputFormat, path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(format, Box::new(BufWriter::new(file))))
    }

    pub fn from_writer(format: OutputFormat, writer: Box<dyn Write>) -> Self {
        Self { format, writer }
    }

    pub fn emit(&mut self, record: &OutputRecord) -> io::Result<()> {
        let rendered = match self.format {
            OutputFormat::Text => render_text(record),
            OutputFormat::Json => render_json(record)?,
        };
        self.writer.write_all(&rendered)?;
        self.writer.flush()
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::SharedBuf;

    fn record(words: &[&str]) -> OutputRecord {
        let mut set = TokenSet::new();
        for w in words {
            set.insert(w);
        }
        OutputRecord::new("https://x.test/app.js", Mode::Js, set, true)
    }

    #[test]
    fn parses_formats() {
        assert_eq!(OutputFormat::parse(" JSON "), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(infer_format_from_path("out.jsonl"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("words"), None);
    }

    #[test]
    fn text_is_one_word_per_line() {
        let out = render_text(&record(&["beta", "alpha"]));
        assert_eq!(String::from_utf8(out).unwrap(), "alpha\nbeta\n");
    }

    #[test]
    fn empty_record_renders_nothing_as_text() {
        assert!(render_text(&record(&[])).is_empty());
    }

    #[test]
    fn json_is_one_object_per_line() {
        let out = String::from_utf8(render_json(&record(&["b", "a"])).unwrap()).unwrap();
        assert_eq!(
            out,
            "{\"input\":\"https://x.test/app.js\",\"mode\":\"js\",\"words\":[\"a\",\"b\"]}\n"
        );
    }

    #[test]
    fn sink_writes_records_in_order() {
        let buf = SharedBuf::default();
        let mut sink = Sink::from_writer(OutputFormat::Text, Box::new(buf.clone()));
        sink.emit(&record(&["one"])).unwrap();
        sink.emit(&record(&["two"])).unwrap();
        sink.finish().unwrap();
        assert_eq!(buf.contents(), "one\ntwo\n");
    }

    #[test]
    fn json_sink_writes_one_line_per_record() {
        let buf = SharedBuf::default();
        let mut sink = Sink::from_writer(OutputFormat::Json, Box::new(buf.clone()));
        sink.emit(&record(&["one"])).unwrap();
        sink.emit(&record(&[])).unwrap();
        sink.finish().unwrap();
        let lines: Vec<String> = buf.contents().lines().map(str::to_string).collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["words"], serde_json::json!(["one"]));
        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["words"], serde_json::json!([]));
    }
}
