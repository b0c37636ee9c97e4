//! Argument structs for subcommands

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Skill name (directory under a skills root)
    pub skill: String,

    /// Number of rules to summarize
    #[arg(long, default_value_t = 5)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Skill name (directory under a skills root)
    pub skill: String,

    /// File containing the generated code, or `-` for stdin
    pub code_file: PathBuf,

    /// Scenario label carried into the report
    #[arg(long, default_value = "")]
    pub scenario: String,

    /// Also report per-rule coverage of correct examples and imports
    #[arg(long)]
    pub coverage: bool,
}
