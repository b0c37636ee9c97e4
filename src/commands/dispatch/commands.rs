//! Command implementations for all skillgrade commands

use crate::cli::{Commands, EvaluateArgs, ShowArgs};
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::dispatch::trace_command;
use skillgrade_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::List => execute_list(ctx),
            Commands::Show(args) => execute_show(ctx, args),
            Commands::Evaluate(args) => execute_evaluate(ctx, args),
        }
    }
}

fn execute_list(ctx: &CommandContext) -> Result<()> {
    let loader = ctx.criteria_loader()?;
    trace_command!(ctx.cli, ctx.start, "load_config");
    commands::list::execute(ctx.cli, &loader)?;
    trace_command!(ctx.cli, ctx.start, "execute_command");
    Ok(())
}

fn execute_show(ctx: &CommandContext, args: &ShowArgs) -> Result<()> {
    let loader = ctx.criteria_loader()?;
    trace_command!(ctx.cli, ctx.start, "load_config");
    commands::show::execute(ctx.cli, &loader, &args.skill, args.limit)?;
    trace_command!(ctx.cli, ctx.start, "execute_command");
    Ok(())
}

fn execute_evaluate(ctx: &CommandContext, args: &EvaluateArgs) -> Result<()> {
    let loader = ctx.criteria_loader()?;
    trace_command!(ctx.cli, ctx.start, "load_config");
    commands::evaluate::execute(ctx.cli, &loader, args)?;
    trace_command!(ctx.cli, ctx.start, "execute_command");
    Ok(())
}
