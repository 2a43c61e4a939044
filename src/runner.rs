use std::io::{self, BufRead};

use thiserror::Error;

use crate::extractor::{Extractor, ReservedWords};
use crate::fetcher::{self, FetchError, FetchOptions, Fetcher};
use crate::logging::Logger;
use crate::output::{Mode, OutputRecord, Sink};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Error reading from {origin}: {source}")]
    ReadInput {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {source}")]
    WriteOutput {
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Fetcher(#[from] FetchError),
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    /// `None` means no mode flag was given; every input is then skipped.
    pub mode: Option<Mode>,
    pub fetch: FetchOptions,
    pub sort: bool,
    pub extra_reserved: Vec<String>,
}

/// Counters reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub inputs: usize,
    pub skipped: usize,
    pub failed: usize,
    pub words: usize,
}

/// Processes inputs one at a time and streams each result to the sink.
pub struct Harvester {
    extractor: Extractor,
    fetcher: Fetcher,
    mode: Option<Mode>,
    sort: bool,
    logger: Logger,
    sink: Sink,
    stats: Stats,
}

impl Harvester {
    pub fn new(opts: &Options, logger: Logger, sink: Sink) -> Result<Self, RunnerError> {
        let reserved = ReservedWords::default().with_extra(&opts.extra_reserved);
        if !opts.extra_reserved.is_empty() {
            logger.debug(&format!(
                "reserved table has {} words ({} extra)",
                reserved.len(),
                opts.extra_reserved.len()
            ));
        }

        let fetcher = Fetcher::new(&opts.fetch)?;

        Ok(Self {
            extractor: Extractor::with_reserved(reserved),
            fetcher,
            mode: opts.mode,
            sort: opts.sort,
            logger,
            sink,
            stats: Stats::default(),
        })
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Handles a single input. Per-input failures are logged and swallowed;
    /// only output errors are returned.
    pub fn process(&mut self, input: &str) -> Result<(), RunnerError> {
        self.stats.inputs += 1;
        let words = match self.mode {
            Some(Mode::Url) => match self.extractor.extract_url_words(input) {
                Ok(words) => words,
                Err(e) => {
                    self.stats.failed += 1;
                    self.logger.error(&e.to_string());
                    return Ok(());
                }
            },
            Some(Mode::Js) => {
                if !fetcher::looks_like_script_url(input) {
                    self.stats.skipped += 1;
                    self.logger
                        .warn(&format!("Bad URL: {input}, please check your url, skipping"));
                    return Ok(());
                }
                let content = match self.fetcher.fetch_text(input) {
                    Ok(content) => content,
                    Err(e) => {
                        self.stats.failed += 1;
                        self.logger.error(&format!("Error fetching {input}: {e}"));
                        return Ok(());
                    }
                };
                self.logger
                    .debug(&format!("fetched {} bytes from {input}", content.len()));
                self.extractor.extract_script_words(&content)
            }
            None => {
                self.stats.skipped += 1;
                self.logger
                    .warn("No processing mode specified. Use --js or --url flag.");
                return Ok(());
            }
        };

        self.logger
            .info(&format!("{input}: {} words", words.len()));
        self.stats.words += words.len();

        let mode = self.mode.unwrap_or(Mode::Url);
        let record = OutputRecord::new(input, mode, words, self.sort);
        self.sink
            .emit(&record)
            .map_err(|source| RunnerError::WriteOutput { source })
    }

    pub fn process_all<I, S>(&mut self, inputs: I) -> Result<(), RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for input in inputs {
            let input = input.as_ref().trim();
            if input.is_empty() {
                continue;
            }
            self.process(input)?;
        }
        Ok(())
    }

    /// Reads one input per line from `reader`. Blank lines are skipped and
    /// surrounding whitespace trimmed. A read failure aborts the run.
    pub fn process_lines<R: BufRead>(&mut self, reader: R, origin: &str) -> Result<(), RunnerError> {
        for line in reader.split(b'\n') {
            let line = line.map_err(|source| RunnerError::ReadInput {
                origin: origin.to_string(),
                source,
            })?;
            let line = String::from_utf8_lossy(&line);
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            self.process(input)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Stats, RunnerError> {
        self.sink
            .finish()
            .map_err(|source| RunnerError::WriteOutput { source })?;
        Ok(self.stats)
    }
}
