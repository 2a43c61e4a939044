use colored::Colorize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// Maps `-v` occurrences to the most verbose level that is printed.
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Level::Warn,
            1 => Level::Info,
            _ => Level::Debug,
        }
    }

    fn tag(self) -> colored::ColoredString {
        match self {
            Level::Error => "ERR".bold().red(),
            Level::Warn => "WRN".bold().yellow(),
            Level::Info => "INF".bold().cyan(),
            Level::Debug => "DBG".dimmed(),
        }
    }
}

/// Tagged diagnostics on stderr, e.g. `[WRN] Bad URL: ...`.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    max_level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            max_level: Level::Warn,
        }
    }
}

impl Logger {
    pub fn new(verbose: u8, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self {
            max_level: Level::from_verbosity(verbose),
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    pub fn format_line(level: Level, msg: &str) -> String {
        format!("{}{}{} {}", "[".bold().white(), level.tag(), "]".bold().white(), msg)
    }

    pub fn log(&self, level: Level, msg: &str) {
        if self.enabled(level) {
            eprintln!("{}", Self::format_line(level, msg));
        }
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert!(!Logger::new(0, true).enabled(Level::Info));
        assert!(Logger::new(0, true).enabled(Level::Warn));
        assert!(Logger::new(1, true).enabled(Level::Info));
        assert!(!Logger::new(1, true).enabled(Level::Debug));
        assert!(Logger::new(5, true).enabled(Level::Debug));
    }

    #[test]
    fn errors_always_print() {
        assert!(Logger::default().enabled(Level::Error));
    }

    #[test]
    fn plain_line_has_bracketed_tag() {
        colored::control::set_override(false);
        assert_eq!(
            Logger::format_line(Level::Warn, "Bad URL: x"),
            "[WRN] Bad URL: x"
        );
    }
}
