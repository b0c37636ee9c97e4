//! CLI argument parsing for skillgrade
//!
//! Global flags: --root, --config, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod args;
pub mod output;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{EvaluateArgs, ShowArgs};
pub use output::OutputFormat;

/// Skillgrade - grade generated code against skill acceptance criteria
#[derive(Parser, Debug)]
#[command(name = "skillgrade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving skills and config
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit config file (default: <root>/skillgrade.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (a level like `debug`, or full directives)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List skills that have acceptance criteria
    List,

    /// Summarize the parsed criteria of a skill
    Show(ShowArgs),

    /// Grade a code file against a skill's criteria
    Evaluate(EvaluateArgs),
}
