//! `skillgrade show` command - summarize a skill's parsed criteria

use crate::cli::{Cli, OutputFormat};
use skillgrade_core::criteria::{AcceptanceCriteria, CriteriaLoader, ValidationRule};
use skillgrade_core::error::Result;

/// Execute the show command
pub fn execute(cli: &Cli, loader: &CriteriaLoader, skill: &str, limit: usize) -> Result<()> {
    let criteria = loader.load(skill)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary_json(&criteria, limit))?);
        }
        OutputFormat::Human => print_human(&criteria, limit),
    }

    Ok(())
}

fn summary_json(criteria: &AcceptanceCriteria, limit: usize) -> serde_json::Value {
    let rules: Vec<_> = criteria
        .rules
        .iter()
        .take(limit)
        .map(|rule| {
            serde_json::json!({
                "name": rule.name,
                "description": rule.description,
                "correct_patterns": rule.correct_patterns.len(),
                "incorrect_patterns": rule.incorrect_patterns.len(),
                "required_imports": rule.required_imports,
            })
        })
        .collect();

    serde_json::json!({
        "skill_name": criteria.skill_name,
        "source_path": criteria.source_path().display().to_string(),
        "language": criteria.language(),
        "rule_count": criteria.rules.len(),
        "correct_patterns": criteria.correct_patterns.len(),
        "incorrect_patterns": criteria.incorrect_patterns.len(),
        "rules": rules,
    })
}

fn print_human(criteria: &AcceptanceCriteria, limit: usize) {
    println!("Loaded criteria for: {}", criteria.skill_name);
    println!("  Source: {}", criteria.source_path().display());
    println!("  Language: {}", criteria.language());
    println!("  Rules: {}", criteria.rules.len());
    println!("  Correct patterns: {}", criteria.correct_patterns.len());
    println!("  Incorrect patterns: {}", criteria.incorrect_patterns.len());

    if criteria.rules.is_empty() {
        return;
    }

    println!();
    println!("Rules:");
    for rule in criteria.rules.iter().take(limit) {
        println!("  - {}", rule_line(rule));
    }

    let hidden = criteria.rules.len().saturating_sub(limit);
    if hidden > 0 {
        println!("  ... and {} more", hidden);
    }
}

fn rule_line(rule: &ValidationRule) -> String {
    format!(
        "{}: {} correct, {} incorrect",
        rule.name,
        rule.correct_patterns.len(),
        rule.incorrect_patterns.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
## Client
✅ Correct:
```python
client = Client(credential=DefaultCredential())
```

## Cleanup
❌ Incorrect:
```python
client = None
```
";

    #[test]
    fn test_summary_json_respects_limit() {
        let criteria = AcceptanceCriteria::parse("demo-py", "criteria.md", DOC);
        let json = summary_json(&criteria, 1);

        assert_eq!(json["rule_count"], 2);
        assert_eq!(json["language"], "python");
        assert_eq!(json["rules"].as_array().unwrap().len(), 1);
        assert_eq!(json["rules"][0]["name"], "Client");
        assert_eq!(json["rules"][0]["correct_patterns"], 1);
    }

    #[test]
    fn test_rule_line() {
        let criteria = AcceptanceCriteria::parse("demo-py", "criteria.md", DOC);
        assert_eq!(rule_line(&criteria.rules[1]), "Cleanup: 0 correct, 1 incorrect");
    }
}
