//! `skillgrade list` command - skills that have acceptance criteria

use crate::cli::{Cli, OutputFormat};
use skillgrade_core::criteria::CriteriaLoader;
use skillgrade_core::error::Result;

/// Execute the list command
pub fn execute(cli: &Cli, loader: &CriteriaLoader) -> Result<()> {
    let skills = loader.list_skills_with_criteria();

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "count": skills.len(),
                "skills": skills,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if skills.is_empty() {
                if !cli.quiet {
                    println!("No skills with acceptance criteria found");
                }
                return Ok(());
            }

            if !cli.quiet {
                println!("Skills with acceptance criteria: {}", skills.len());
            }
            for skill in &skills {
                println!("  {}", skill);
            }
        }
    }

    Ok(())
}
