//! docgen — generate academy documentation pages.
//!
//! - `docgen` / `docgen all`: run both generators from `docgen.yaml`
//! - `docgen openapi -o content/docs/ui 'openapi/*.yaml'`
//! - `docgen type-table 'content/docs/**/*.model.mdx'`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docgen::logging::{self, LogFormat};
use docgen::{Config, Mode, Outcome, YamlFrontmatter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "docgen",
    about = "Generate MDX pages from OpenAPI documents and type-table templates"
)]
struct Cli {
    /// Configuration file (default: docgen.yaml if present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Report outputs that are missing or out of date instead of writing
    #[arg(long, global = true)]
    check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run both generators (default)
    All,
    /// Expand OpenAPI documents into one page per tag
    Openapi {
        /// Input documents (files, directories, or glob patterns).
        /// Overrides the configured inputPatterns.
        patterns: Vec<String>,

        /// Output directory; overrides the configured outputDirectory
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Rewrite type-table demo blocks into sibling pages
    TypeTable {
        /// Template files (files, directories, or glob patterns).
        /// Overrides the configured inputPatterns.
        patterns: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format, cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let mode = if cli.check { Mode::Check } else { Mode::Write };

    let mut outcomes = Vec::new();
    match cli.command.unwrap_or(Command::All) {
        Command::All => {
            outcomes.push(run_openapi(&config, mode)?);
            outcomes.push(run_type_table(&config, mode)?);
        }
        Command::Openapi { patterns, output } => {
            if !patterns.is_empty() {
                config.openapi.input_patterns = patterns;
            }
            if let Some(output) = output {
                config.openapi.output_directory = output;
            }
            outcomes.push(run_openapi(&config, mode)?);
        }
        Command::TypeTable { patterns } => {
            if !patterns.is_empty() {
                config.type_table.input_patterns = patterns;
            }
            outcomes.push(run_type_table(&config, mode)?);
        }
    }

    let stale: Vec<&PathBuf> = outcomes.iter().flat_map(|o| &o.stale).collect();
    if stale.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    for path in &stale {
        eprintln!("stale: {}", path.display());
    }
    eprintln!("{} generated file(s) out of date; run docgen to regenerate", stale.len());
    Ok(ExitCode::FAILURE)
}

fn run_openapi(config: &Config, mode: Mode) -> Result<Outcome> {
    let outcome = docgen::generate_openapi(&config.openapi, &YamlFrontmatter, mode)
        .context("OpenAPI expansion failed")?;
    info!(pages = outcome.planned, "OpenAPI expansion finished");
    Ok(outcome)
}

fn run_type_table(config: &Config, mode: Mode) -> Result<Outcome> {
    let outcome = docgen::generate_type_tables(&config.type_table, mode)
        .context("type-table rewriting failed")?;
    info!(files = outcome.planned, "type-table rewriting finished");
    Ok(outcome)
}
