//! # exmetrics
//!
//! A CLI tool for measuring Elixir projects: lines of code, comment lines and
//! how much of the public API is documented.
//!
//! ## Usage
//!
//! ```bash
//! # Measure the current directory
//! exmetrics .
//!
//! # Per-file breakdown, largest files first
//! exmetrics lib --by-file --order-by ncloc
//!
//! # Skip tests, output JSON
//! exmetrics . --exclude "**/test/**" --output json
//!
//! # Treat .eex templates as sources too
//! exmetrics . -s ex -s exs -s eex
//! ```

mod render;

use std::path::Path;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use exmetricslib::{count_directory, Aggregation, CountOptions, FilterConfig, OrderBy, Ordering};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("exmetrics")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Elixir source metrics: lines of code, comments and documented API density")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("suffix")
                .short('s')
                .long("suffix")
                .action(ArgAction::Append)
                .help("File suffix treated as Elixir (default: ex, exs; can be repeated)"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show breakdown by file"),
        )
        .arg(
            Arg::new("order-by")
                .long("order-by")
                .value_parser(["path", "lines", "ncloc", "comments", "functions", "undocumented"])
                .default_value("path")
                .help("Order files by field"),
        )
        .arg(
            Arg::new("desc")
                .long("desc")
                .action(ArgAction::SetTrue)
                .conflicts_with("asc")
                .help("Sort in descending order (default for numeric fields)"),
        )
        .arg(
            Arg::new("asc")
                .long("asc")
                .action(ArgAction::SetTrue)
                .help("Sort in ascending order (default for path)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(suffixes) = matches.get_many::<String>("suffix") {
        filter = filter.with_suffixes(suffixes);
    }

    let includes: Vec<&str> = matches
        .get_many::<String>("include")
        .map(|values| values.map(|s| s.as_str()).collect())
        .unwrap_or_default();
    let excludes: Vec<&str> = matches
        .get_many::<String>("exclude")
        .map(|values| values.map(|s| s.as_str()).collect())
        .unwrap_or_default();

    filter = filter.include_many(&includes)?.exclude_many(&excludes)?;

    Ok(filter)
}

/// Build ordering from matches
fn build_ordering(matches: &ArgMatches) -> Result<Ordering, anyhow::Error> {
    let field = matches
        .get_one::<String>("order-by")
        .map(|s| s.as_str())
        .unwrap_or("path");
    let by: OrderBy = field.parse().map_err(anyhow::Error::msg)?;

    let ordering = Ordering::by(by);
    Ok(if matches.get_flag("desc") {
        ordering.descending()
    } else if matches.get_flag("asc") {
        ordering.ascending()
    } else {
        ordering
    })
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .format_timestamp(None)
        .init();
}

fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let by_file = matches.get_flag("by-file");
    let aggregation = if by_file {
        Aggregation::ByFile
    } else {
        Aggregation::Total
    };

    let options = CountOptions::new()
        .filter(build_filter(matches)?)
        .aggregation(aggregation)
        .ordering(build_ordering(matches)?);

    let result = count_directory(path, options)?;

    let root = Path::new(path);
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };

    let mode = render::output_mode(
        matches
            .get_one::<String>("output")
            .map(|s| s.as_str())
            .unwrap_or("table"),
    );

    render::render_count(&result, base, by_file, mode)
        .map_err(|e| anyhow::anyhow!("rendering report: {e}"))
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
