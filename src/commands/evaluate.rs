//! `skillgrade evaluate` command - grade a code file against a skill
//!
//! The verdict is data: a failing evaluation still exits 0.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, EvaluateArgs, OutputFormat};
use skillgrade_core::criteria::CriteriaLoader;
use skillgrade_core::error::{Result, SkillgradeError};
use skillgrade_core::evaluator::{CodeEvaluator, EvaluationResult, Finding, RuleCoverage};

/// Execute the evaluate command
pub fn execute(cli: &Cli, loader: &CriteriaLoader, args: &EvaluateArgs) -> Result<()> {
    let start = Instant::now();
    let criteria = loader.load(&args.skill)?;
    let code = read_code(&args.code_file)?;
    debug!(elapsed = ?start.elapsed(), bytes = code.len(), "read_inputs");

    let evaluator = CodeEvaluator::new(criteria);
    let result = evaluator.evaluate(&code, &args.scenario);
    let coverage = args.coverage.then(|| evaluator.coverage(&code));

    match cli.format {
        OutputFormat::Json => {
            let mut output = result.to_json();
            if let (Some(coverage), Some(object)) = (&coverage, output.as_object_mut()) {
                object.insert("coverage".to_string(), serde_json::to_value(coverage)?);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if cli.quiet {
                println!("{}", summary_line(&result));
            } else {
                print!("{}", render_report(&result, coverage.as_deref()));
            }
        }
    }

    Ok(())
}

/// Read the code under test; `-` means stdin
fn read_code(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut code = String::new();
        io::stdin()
            .read_to_string(&mut code)
            .map_err(|e| SkillgradeError::io_operation("read", "stdin", e))?;
        return Ok(code);
    }

    if !path.is_file() {
        return Err(SkillgradeError::CodeFileNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path)
        .map_err(|e| SkillgradeError::io_operation("read code file", path.display(), e))
}

fn summary_line(result: &EvaluationResult) -> String {
    format!(
        "{} score={:.1} errors={} warnings={}",
        if result.passed() { "PASS" } else { "FAIL" },
        result.score,
        result.error_count(),
        result.warning_count()
    )
}

fn render_report(result: &EvaluationResult, coverage: Option<&[RuleCoverage]>) -> String {
    let mut out = String::new();

    out.push_str(&format!("Skill: {}\n", result.skill_name));
    if !result.scenario.is_empty() {
        out.push_str(&format!("Scenario: {}\n", result.scenario));
    }
    out.push_str(&format!("Passed: {}\n", result.passed()));
    out.push_str(&format!("Score: {:.1}\n", result.score));
    out.push_str(&format!("Errors: {}\n", result.error_count()));
    out.push_str(&format!("Warnings: {}\n", result.warning_count()));

    if !result.findings.is_empty() {
        out.push_str("\nFindings:\n");
        for finding in &result.findings {
            out.push_str(&finding_lines(finding));
        }
    }

    if !result.matched_correct.is_empty() {
        out.push_str(&format!(
            "\nMatched correct: {}\n",
            result.matched_correct.join(", ")
        ));
    }
    if !result.matched_incorrect.is_empty() {
        out.push_str(&format!(
            "Matched incorrect: {}\n",
            result.matched_incorrect.join(", ")
        ));
    }

    if let Some(coverage) = coverage {
        out.push_str("\nCoverage:\n");
        for rule in coverage {
            out.push_str(&coverage_line(rule));
        }
    }

    out
}

fn finding_lines(finding: &Finding) -> String {
    let mut out = format!(
        "  [{}] {}: {}\n",
        finding.severity, finding.rule, finding.message
    );
    if let Some(line) = finding.line {
        match finding.column {
            Some(column) => out.push_str(&format!("      at line {line}, column {column}\n")),
            None => out.push_str(&format!("      at line {line}\n")),
        }
    }
    if !finding.suggestion.is_empty() {
        out.push_str(&format!("      suggestion: {}\n", finding.suggestion));
    }
    out
}

fn coverage_line(rule: &RuleCoverage) -> String {
    let mut line = format!(
        "  - {}: {}/{} correct examples followed",
        rule.rule, rule.reproduced_correct, rule.correct_patterns
    );
    if rule.imports_checked && !rule.missing_imports.is_empty() {
        line.push_str(&format!("; missing imports: {}", rule.missing_imports.join(", ")));
    }
    line.push('\n');
    line
}
