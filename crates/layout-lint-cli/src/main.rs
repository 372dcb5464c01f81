//! layout-lint CLI tool.
//!
//! Usage:
//! ```bash
//! layout-lint check [OPTIONS] [PATH]
//! layout-lint list-rules
//! layout-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Layout linter for tokenized source documents
#[derive(Parser)]
#[command(name = "layout-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run layout checks
    Check {
        /// Directory holding `*.tokens.json` documents (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only report specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Override the maximum line length from the configuration
        #[arg(long)]
        max_line_length: Option<usize>,

        /// Also check generated tokens and documents
        #[arg(long)]
        include_generated: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            max_line_length,
            include_generated,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let overrides = commands::check::LayoutOverrides {
                max_line_length,
                include_generated,
            };
            commands::check::run(&path, format, rules, exclude, overrides, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
