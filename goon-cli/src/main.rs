//! Command-line interface for goon
//! This binary parses goon source, prints the resulting tree, or evaluates it.
//!
//! Usage:
//!   goon `[<path>]` [--format `<format>`] [--eval]   - Parse a file (or stdin) and print it
//!   goon --repl                                      - Evaluate stdin line by line
//!
//! Exit status: 0 on success, 1 on syntax/evaluation/IO errors, 2 when the grammar
//! engine breaks the build protocol.

mod repl;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use goon_config::{GoonConfig, Loader};
use goon_parser::goon::eval::{EvalError, Runtime};
use goon_parser::goon::formats::{render, OutputFormat};
use goon_parser::{ParseError, ParseSession};
use std::io::Read;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;
const EXIT_CONTRACT_VIOLATION: i32 = 2;

fn cli() -> Command {
    Command::new("goon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and evaluate goon expressions")
        .arg(
            Arg::new("path")
                .help("Path to a goon source file ('-' or absent reads stdin)")
                .index(1)
                .conflicts_with("repl"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: treeviz, tag, json or yaml (default from config)")
                .value_parser(OutputFormat::NAMES),
        )
        .arg(
            Arg::new("eval")
                .long("eval")
                .short('e')
                .help("Evaluate the statement and print its value instead of the tree")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("repl")
                .long("repl")
                .help("Read statements from stdin line by line and evaluate them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("max-stack")
                .long("max-stack")
                .help("Build stack cap (0 = unbounded)")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("max-symbols")
                .long("max-symbols")
                .help("Symbol table cap (0 = unbounded)")
                .value_parser(value_parser!(i64).range(0..)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parse activity to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let outcome = load_config(&matches).and_then(|config| {
        if matches.get_flag("repl") {
            repl::run(&config)
        } else {
            handle_parse_command(&matches, &config)
        }
    });

    if let Err(err) = outcome {
        std::process::exit(report(&err));
    }
}

/// Logs go to stderr. `GOON_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GOON_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<GoonConfig> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(depth) = matches.get_one::<i64>("max-stack") {
        loader = loader.set_override("session.max_stack_depth", *depth)?;
    }
    if let Some(symbols) = matches.get_one::<i64>("max-symbols") {
        loader = loader.set_override("session.max_symbols", *symbols)?;
    }
    let config = loader.build().context("failed to load configuration")?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Session configured from `config`.
pub(crate) fn new_session(config: &GoonConfig) -> ParseSession {
    ParseSession::with_engine_and_limits(config.session.grammar(), config.session.limits())
}

fn handle_parse_command(matches: &ArgMatches, config: &GoonConfig) -> Result<()> {
    let source = read_source(matches.get_one::<String>("path").map(String::as_str))?;
    let mut session = new_session(config);

    if matches.get_flag("eval") {
        let value = Runtime::new().interpret(&mut session, &source)?;
        println!("{}", value);
        return Ok(());
    }

    let tree = session.parse_str(&source)?;
    let format = OutputFormat::from(config.output.format);
    print!("{}", render(&tree, format, config.output.show_values)?);
    Ok(())
}

fn read_source(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
        }
    }
}

/// The parse error behind `err`, if there is one.
pub(crate) fn parse_error(err: &anyhow::Error) -> Option<&ParseError> {
    err.downcast_ref::<ParseError>().or_else(|| match err.downcast_ref::<EvalError>() {
        Some(EvalError::Parse(parse)) => Some(parse),
        _ => None,
    })
}

/// Prints `err` and returns the exit status for it.
fn report(err: &anyhow::Error) -> i32 {
    match parse_error(err) {
        Some(parse) if parse.is_fatal() => {
            error!(error = %parse, "aborting");
            eprintln!("fatal: {}", parse);
            EXIT_CONTRACT_VIOLATION
        }
        _ => {
            eprintln!("error: {:#}", err);
            EXIT_FAILURE
        }
    }
}
