//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::paths::resolve_against;
use crate::cli::Cli;
use skillgrade_core::config::HarnessConfig;
use skillgrade_core::criteria::CriteriaLoader;
use skillgrade_core::error::Result;

/// Read the harness config selected by the CLI flags.
///
/// `--config` must point at an existing file; without it the optional
/// `skillgrade.toml` in the root is used.
pub fn load_config(cli: &Cli, root: &Path) -> Result<HarnessConfig> {
    match &cli.config {
        Some(path) => HarnessConfig::load(&resolve_against(root, path)),
        None => HarnessConfig::load_or_default(root),
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    pub fn criteria_loader(&self) -> Result<CriteriaLoader> {
        let config = load_config(self.cli, self.root)?;
        Ok(CriteriaLoader::new(self.root, &config))
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("skillgrade {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Grades generated code against skill acceptance criteria.");
        println!();
        println!("Run `skillgrade --help` for usage information.");
        Ok(())
    }
}
