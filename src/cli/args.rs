use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordharvest",
    version,
    about = "wordlist harvesting tool for JavaScript files and URL paths",
    long_about = "Wordharvest builds wordlists from JavaScript identifiers or from URL path and query components.\n\nExamples:\n  wordharvest --js https://example.com/js/main.js\n  wordharvest --url 'https://example.com/path/resource?param=value'\n  cat jsfiles.txt | wordharvest --js\n  cat urls.txt | wordharvest --url\n\nTip: URLs are read from stdin (one per line) when none are given on the command line."
)]
pub struct CliArgs {
    #[arg(value_name = "URL", help = "Inputs to process (reads stdin when omitted).")]
    pub urls: Vec<String>,

    #[arg(
        short = 'j',
        long = "js",
        help_heading = "Mode",
        help = "Fetch each URL as a JavaScript file and extract identifiers."
    )]
    pub js: bool,

    #[arg(
        short = 'u',
        long = "url",
        help_heading = "Mode",
        help = "Extract words from each URL's path and query (no network)."
    )]
    pub url: bool,

    #[arg(
        short = 'i',
        long = "if",
        visible_alias = "input-file",
        value_name = "FILE",
        help_heading = "Input",
        help = "Load inputs from a file (one per line) instead of stdin."
    )]
    pub input_file: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to a YAML config file."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'R',
        long = "xr",
        visible_alias = "extra-reserved",
        value_name = "FILE",
        help_heading = "Input",
        help = "Additional reserved words to filter out (one per line)."
    )]
    pub extra_reserved: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds (default 10)."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'A',
        long = "ua",
        visible_alias = "user-agent",
        value_name = "UA",
        help_heading = "HTTP",
        help = "User-Agent header sent with fetches."
    )]
    pub user_agent: Option<String>,

    #[arg(
        short = 'k',
        long = "ins",
        visible_alias = "insecure",
        help_heading = "HTTP",
        help = "Accept invalid TLS certificates and hostnames."
    )]
    pub insecure: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write words to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'f',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text or json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 's',
        long = "sort",
        help_heading = "Output",
        help = "Sort each input's words before printing."
    )]
    pub sort: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored diagnostics."
    )]
    pub no_color: bool,

    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,
}
