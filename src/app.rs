use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{error::ErrorKind, Arg, CommandFactory, Parser};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::fetcher::{FetchOptions, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::logging::Logger;
use crate::output::{self, Mode, OutputFormat, Sink};
use crate::runner::{Harvester, Options};

fn flag_names(arg: &Arg) -> String {
    let value = arg
        .get_value_names()
        .and_then(|v| v.first())
        .map_or("VALUE", |v| v.as_str());
    if arg.is_positional() {
        return format!("[{value}]...");
    }
    let mut names: Vec<String> = arg.get_short().map(|c| format!("-{c}")).into_iter().collect();
    names.extend(arg.get_long().map(|l| format!("--{l}")));
    for alias in arg.get_visible_aliases().unwrap_or_default() {
        let alias = format!("--{alias}");
        if !names.contains(&alias) {
            names.push(alias);
        }
    }
    let mut rendered = names.join(", ");
    if arg.get_action().takes_values() {
        rendered.push_str(&format!(" <{value}>"));
    }
    rendered
}

/// Help grouped by `help_heading`, in declaration order.
fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let name = cmd.get_name();
    let mut out = format!("{name} {}\n", cmd.get_version().unwrap_or_default());
    if let Some(about) = cmd.get_long_about().or(cmd.get_about()) {
        out.push_str(&format!("{about}\n"));
    }
    out.push_str(&format!("\nUsage: {name} [OPTIONS] [URL]...\n"));

    let mut groups: Vec<(&str, Vec<&Arg>)> = Vec::new();
    for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
        let heading = match arg.get_help_heading() {
            _ if arg.is_positional() => "Arguments",
            Some(h) => h,
            None => "Options",
        };
        match groups.iter_mut().find(|(h, _)| *h == heading) {
            Some((_, args)) => args.push(arg),
            None => groups.push((heading, vec![arg])),
        }
    }

    for (heading, args) in groups {
        out.push_str(&format!("\n{heading}:\n"));
        for arg in args {
            out.push_str(&format!("  {}\n", flag_names(arg)));
            if let Some(help) = arg.get_help() {
                out.push_str(&format!("        {}\n", help.to_string().trim()));
            }
        }
    }
    out
}

#[derive(Clone, Debug)]
struct RunConfig {
    inputs: Vec<String>,
    input_file_path: Option<PathBuf>,
    mode: Option<Mode>,
    fetch: FetchOptions,
    output: Option<PathBuf>,
    output_format: OutputFormat,
    sort: bool,
    no_color: bool,
    verbose: u8,
    extra_reserved: Vec<String>,
}

fn resolve_mode(js: bool, url: bool) -> Option<Mode> {
    if url {
        Some(Mode::Url)
    } else if js {
        Some(Mode::Js)
    } else {
        None
    }
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let sort = args.sort || cfg.sort.unwrap_or(false);
    let mode = resolve_mode(
        args.js || cfg.js.unwrap_or(false),
        args.url || cfg.url.unwrap_or(false),
    );

    let timeout_secs = args.timeout.or(cfg.timeout).unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let fetch = FetchOptions {
        timeout_secs,
        user_agent: args
            .user_agent
            .or(cfg.user_agent)
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        proxy: args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty()),
        insecure: args.insecure || cfg.insecure.unwrap_or(false),
    };

    let output = args.output.or(cfg.output).map(|p| config::resolve_path(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text or json"))?,
        None => output
            .as_deref()
            .and_then(|p| p.to_str())
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    let mut extra_reserved = cfg.extra_reserved.unwrap_or_default();
    if let Some(path) = args.extra_reserved.as_deref() {
        extra_reserved.extend(config::load_word_file(&config::resolve_path(path))?);
    }

    let mut inputs: Vec<String> = Vec::new();
    for u in args.urls.into_iter().chain(cfg.urls.unwrap_or_default()) {
        let u = u.trim();
        if !u.is_empty() {
            inputs.push(u.to_string());
        }
    }
    let input_file_path = args
        .input_file
        .or(cfg.input_file)
        .map(|p| config::resolve_path(&p));

    Ok(RunConfig {
        inputs,
        input_file_path,
        mode,
        fetch,
        output,
        output_format,
        sort,
        no_color,
        verbose: args.verbose,
        extra_reserved,
    })
}

fn run_harvest(run: RunConfig) -> Result<(), String> {
    let logger = Logger::new(run.verbose, run.no_color);

    let sink = match run.output.as_deref() {
        Some(path) => Sink::file(run.output_format, path)
            .map_err(|e| format!("failed to open output file: {e}"))?,
        None => Sink::stdout(run.output_format),
    };

    let opts = Options {
        mode: run.mode,
        fetch: run.fetch,
        sort: run.sort,
        extra_reserved: run.extra_reserved,
    };
    let mut harvester = Harvester::new(&opts, logger, sink).map_err(|e| e.to_string())?;

    harvester
        .process_all(&run.inputs)
        .map_err(|e| e.to_string())?;

    if let Some(path) = run.input_file_path.as_deref() {
        let file = File::open(path).map_err(|e| format!("failed to open input file: {e}"))?;
        harvester
            .process_lines(BufReader::new(file), &path.display().to_string())
            .map_err(|e| e.to_string())?;
    } else if run.inputs.is_empty() {
        let stdin = io::stdin();
        harvester
            .process_lines(stdin.lock(), "stdin")
            .map_err(|e| e.to_string())?;
    }

    let stats = harvester.finish().map_err(|e| e.to_string())?;
    logger.info(&format!(
        ":: Completed :: {} inputs, {} words, {} skipped, {} failed ::",
        stats.inputs, stats.words, stats.skipped, stats.failed
    ));
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::resolve_path(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path)?,
        None => ConfigFile::default(),
    };

    let run_config = build_run_config(args, cfg)?;
    run_harvest(run_config)
}
