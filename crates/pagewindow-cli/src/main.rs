//! `pagewindow` command line pager
//!
//! Pages through the lines of a text file with `pagewindow-core`, either
//! printing one page, dumping the pager state as JSON, or reading navigation
//! commands from stdin.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

mod browse;

use clap::{Parser, Subcommand};
use pagewindow_core::{
    PagePolicy, PageSize, PagedList, PagerConfig,
    context_error::{ContextError, Result, ResultExt},
    init_logging,
};
use std::{
    io::{self, BufRead, BufReader, Read, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Command line interface for the pager
#[derive(Parser)]
#[command(
    name = "pagewindow",
    version = env!("CARGO_PKG_VERSION"),
    about = "Page through the lines of a text file",
    long_about = "Splits the lines of a text file (or stdin) into fixed-size pages and shows one page at a time."
)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lines per page
    #[arg(short = 's', long, value_name = "N", allow_negative_numbers = true)]
    page_size: Option<i64>,

    /// Page to open on (1-based)
    #[arg(short, long, value_name = "N")]
    page: Option<String>,

    /// Out-of-range page handling (clamp, reject)
    #[arg(long, value_name = "POLICY")]
    policy: Option<PagePolicy>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Input file; stdin when omitted or `-`
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Print one page (default)
    Show,

    /// Print the pager state as JSON
    Pages {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Navigate interactively with commands read from stdin
    Browse,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        page_size = config.pagination.page_size,
        policy = %config.pagination.policy,
        "pagewindow starting"
    );

    let from_stdin = is_stdin(cli.input.as_deref());
    let lines = read_lines(cli.input.as_deref())?;
    debug!(lines = lines.len(), "Input loaded");

    let mut list = PagedList::from_config(lines, &config.pagination)?;
    if let Some(page) = &cli.page {
        list.set_page_from_input(page)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => browse::render(&mut list, &mut out)?,
        Commands::Pages { pretty } => {
            let snapshot = list.snapshot();
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            writeln!(out, "{json}")?;
        }
        Commands::Browse => {
            if from_stdin {
                return Err(ContextError::new(
                    "browse reads commands from stdin, so INPUT must be a file",
                ));
            }
            browse::run(&mut list, io::stdin().lock(), &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Load configuration and apply command line overrides
///
/// # Errors
///
/// Returns error if the configuration cannot be loaded or does not validate
fn load_config(cli: &Cli) -> Result<PagerConfig> {
    let mut config = match &cli.config {
        Some(path) => PagerConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => PagerConfig::load().with_context(|| "Failed to load configuration")?,
    };

    if let Some(page_size) = cli.page_size {
        config.pagination.page_size = PageSize::try_from(page_size)
            .with_context(|| "Invalid --page-size")?
            .get();
    }
    if let Some(policy) = cli.policy {
        config.pagination.policy = policy;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }

    config
        .validated()
        .with_context(|| "Invalid command line options")
}

fn is_stdin(input: Option<&Path>) -> bool {
    input.is_none_or(|path| path == Path::new("-"))
}

/// Read all lines of the input file or stdin
///
/// # Errors
///
/// Returns error if the input cannot be read
fn read_lines(input: Option<&Path>) -> Result<Vec<String>> {
    let reader: Box<dyn Read> = match input {
        Some(path) if !is_stdin(Some(path)) => Box::new(
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        _ => Box::new(io::stdin()),
    };

    BufReader::new(reader)
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| "Failed to read input")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "pagewindow",
            "--page-size",
            "20",
            "--page",
            "3",
            "--policy",
            "reject",
            "notes.txt",
            "pages",
            "--pretty",
        ])
        .unwrap();

        assert_eq!(cli.page_size, Some(20));
        assert_eq!(cli.page.as_deref(), Some("3"));
        assert_eq!(cli.policy, Some(PagePolicy::Reject));
        assert_eq!(cli.input, Some(PathBuf::from("notes.txt")));
        assert!(matches!(cli.command, Some(Commands::Pages { pretty: true })));
    }

    #[test]
    fn test_negative_page_size_is_rejected_by_config() {
        let cli = Cli::try_parse_from(["pagewindow", "-s", "-3", "notes.txt"]).unwrap();
        assert_eq!(cli.page_size, Some(-3));

        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("page size must be positive"), "{err}");
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["pagewindow", "--policy", "wrap"]).is_err());
    }

    #[test]
    fn test_stdin_detection() {
        assert!(is_stdin(None));
        assert!(is_stdin(Some(Path::new("-"))));
        assert!(!is_stdin(Some(Path::new("notes.txt"))));
    }
}
