//! topdiff: Salt top-file change detection
//!
//! Computes which Salt targets are affected by the latest commit to a
//! states repository.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use topdiff::{
    cli,
    config::{AffectedConfig, OutputConfig, RunConfig, DEFAULT_ENVIRONMENT, DEFAULT_TOP_FILE},
    reports::ReportFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "topdiff")]
#[command(version)]
#[command(about = "Salt top-file change detection", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (no affected targets, or --fail-on-affected not set)
    1  Affected targets found (with --fail-on-affected)
    3  Error occurred

EXAMPLES:
    # Which targets does the last commit affect?
    topdiff affected

    # Shell-friendly list with wildcards made literal
    topdiff affected -o text --replace-asterisks pct

    # Record-level diff of the top file against the parent commit
    topdiff diff -o json

    # State modules touched by the last commit
    topdiff states -o text")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `affected` subcommand
#[derive(Parser)]
struct AffectedArgs {
    /// Top document file name, relative to the repository root
    #[arg(long, env = "TOP_FILE_NAME", default_value = DEFAULT_TOP_FILE)]
    top_file: String,

    /// Environment selector within the top document
    #[arg(short, long, env = "SALT_ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    environment: String,

    /// Repository directory (current directory if not specified)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Replace every '*' in output identifiers with this literal
    #[arg(long, value_name = "LITERAL")]
    replace_asterisks: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "yaml")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if any target is affected (CI gate)
    #[arg(long)]
    fail_on_affected: bool,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Top document file name, relative to the repository root
    #[arg(long, env = "TOP_FILE_NAME", default_value = DEFAULT_TOP_FILE)]
    top_file: String,

    /// Environment selector within the top document
    #[arg(short, long, env = "SALT_ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    environment: String,

    /// Repository directory (current directory if not specified)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "yaml")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `states` subcommand
#[derive(Parser)]
struct StatesArgs {
    /// Repository directory (current directory if not specified)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the targets affected by the latest commit
    Affected(AffectedArgs),

    /// Diff the top document against the parent of the latest commit
    Diff(DiffArgs),

    /// List the state modules touched by the latest commit
    States(StatesArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Affected(args) => {
            let config = AffectedConfig {
                run: RunConfig {
                    top_file: args.top_file,
                    environment: args.environment,
                    repo: args.repo,
                    replace_asterisks: args.replace_asterisks,
                },
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                },
                fail_on_affected: args.fail_on_affected,
                quiet: cli.quiet,
            };

            let exit_code = cli::run_affected(&config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Diff(args) => {
            let run = RunConfig {
                top_file: args.top_file,
                environment: args.environment,
                repo: args.repo,
                replace_asterisks: None,
            };
            let output = OutputConfig {
                format: args.output,
                file: args.output_file,
            };
            cli::run_diff(&run, &output, cli.quiet)
        }

        Commands::States(args) => {
            let output = OutputConfig {
                format: args.output,
                file: args.output_file,
            };
            cli::run_states(args.repo, &output, cli.quiet)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "topdiff", &mut io::stdout());
            Ok(())
        }
    }
}
