//! Integration tests for grading code against parsed criteria

use std::sync::Arc;
use std::thread;

use skillgrade_core::criteria::AcceptanceCriteria;
use skillgrade_core::evaluator::{CodeEvaluator, Severity};

const AUTH_DOC: &str = r#"# Widgets

## Authentication

✅ Correct:
```python
client = Client(credential=DefaultCredential())
```

❌ Incorrect:
```python
client = Client(key="hardcoded")
```
"#;

const LEGACY_DOC: &str = r#"## Legacy Client

❌ Do not use the legacy client:
```python
from azure.widgets import LegacyClient
client = LegacyClient()
```
"#;

fn evaluator(skill: &str, doc: &str) -> CodeEvaluator {
    CodeEvaluator::new(AcceptanceCriteria::parse(skill, "criteria.md", doc))
}

#[test]
fn test_authentication_scenario() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    let code = "client = Client(credential=DefaultCredential())\nclient = Client(key=\"hardcoded\")\n";

    let result = evaluator.evaluate(code, "auth");

    assert_eq!(result.error_count(), 1);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].rule, "pattern:Authentication");
    assert_eq!(
        result.findings[0].message,
        "Incorrect pattern found from section: Authentication"
    );
    assert_eq!(result.matched_correct, vec!["Authentication"]);
    assert_eq!(result.matched_incorrect, vec!["Authentication"]);
    assert_eq!(result.score, 70.0);
    assert!(!result.passed());
    assert_eq!(result.scenario, "auth");
    assert_eq!(result.generated_code, code);
}

#[test]
fn test_quote_style_is_interchangeable() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    let result = evaluator.evaluate("client   =  Client(key='hardcoded')\n", "");

    assert_eq!(result.matched_incorrect, vec!["Authentication"]);
    assert!(!result.passed());
}

#[test]
fn test_correct_usage_only() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    let result = evaluator.evaluate("client = Client(credential=DefaultCredential())\n", "");

    assert!(result.findings.is_empty());
    assert!(result.passed());
    assert_eq!(result.score, 100.0);
}

#[test]
fn test_syntax_error_short_circuits() {
    let evaluator = evaluator("azure-widgets-py", LEGACY_DOC);
    let result = evaluator.evaluate("from azure.widgets import LegacyClient\ndef f(:\n", "");

    assert_eq!(result.findings.len(), 1);
    let finding = &result.findings[0];
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.rule, "syntax");
    assert!(finding.message.starts_with("Syntax error: "));
    assert!(finding.line.is_some());
    assert_eq!(result.score, 0.0);
    assert!(result.matched_correct.is_empty());
    assert!(result.matched_incorrect.is_empty());
}

#[test]
fn test_python2_code_short_circuits() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    for code in [
        "print \"hello\"\n",
        "exec \"x = 1\"\n",
        "x = 0777\n",
        "try:\n    pass\nexcept Exception, e:\n    pass\n",
        "import sys\nprint >>sys.stderr, \"x\"\n",
    ] {
        let result = evaluator.evaluate(code, "");
        let rules: Vec<_> = result.findings.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["syntax"], "{code:?}");
        assert_eq!(result.score, 0.0, "{code:?}");
    }
}

#[test]
fn test_empty_code_scores_neutral() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    let result = evaluator.evaluate("", "");

    assert_eq!(result.score, 50.0);
    assert!(result.passed());
}

#[test]
fn test_reproduced_import_is_reported() {
    let evaluator = evaluator("azure-widgets-py", LEGACY_DOC);
    let result = evaluator.evaluate("from azure.widgets import LegacyClient\n", "");

    let rules: Vec<_> = result.findings.iter().map(|f| f.rule.as_str()).collect();
    assert_eq!(rules, vec!["imports", "Legacy Client"]);
    assert_eq!(
        result.findings[0].message,
        "Incorrect import: from azure.widgets import LegacyClient"
    );
    assert_eq!(
        result.findings[0].suggestion,
        "Check acceptance criteria section: Legacy Client"
    );
    assert_eq!(result.score, 60.0);
}

#[test]
fn test_partial_anti_pattern_uses_quorum() {
    let doc = r#"## Retries

❌ Incorrect:
```python
policy = RetryPolicy(total_retries=0)
client = WidgetClient(endpoint, retry_policy=policy)
client.configure(logging_enable=False)
```
"#;
    let evaluator = evaluator("azure-widgets-py", doc);
    let code = "policy = RetryPolicy(total_retries=0)\nclient = WidgetClient(endpoint, retry_policy=policy)\nclient.run()\n";

    let result = evaluator.evaluate(code, "");

    // The flat regex needs the whole block; the rule-scoped quorum does not
    assert!(result.matched_incorrect.is_empty());
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.findings[0].rule, "Retries");
    assert_eq!(result.findings[0].message, "Incorrect usage in Retries");
    assert_eq!(result.score, 80.0);
}

#[test]
fn test_score_is_clamped_at_zero() {
    let mut doc = String::new();
    for i in 0..6 {
        doc.push_str(&format!(
            "## Section {i}\n\n❌ Incorrect:\n```python\nvalue_{i} = compute_widget_value({i})\n```\n\n"
        ));
    }
    let code: String = (0..6)
        .map(|i| format!("value_{i} = compute_widget_value({i})\n"))
        .collect();

    let result = evaluator("azure-widgets-py", &doc).evaluate(&code, "");

    assert_eq!(result.error_count(), 6);
    assert_eq!(result.score, 0.0);
    assert!(!result.passed());
}

#[test]
fn test_non_python_skills_skip_syntax_check() {
    let evaluator = evaluator("azure-widgets-dotnet", AUTH_DOC);
    let result = evaluator.evaluate("def f(:\n", "");

    assert!(result.findings.is_empty());
    assert_eq!(result.score, 50.0);
}

#[test]
fn test_evaluate_is_idempotent() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    let code = "import os\nclient = Client(key=\"hardcoded\")\n";

    assert_eq!(evaluator.evaluate(code, "s"), evaluator.evaluate(code, "s"));
}

#[test]
fn test_results_respect_invariants() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    let inputs = [
        "",
        "def f(:",
        "client = Client(key=\"hardcoded\")",
        "client = Client(credential=DefaultCredential())",
        "import os\nprint(os.getcwd())\n",
    ];

    for code in inputs {
        let result = evaluator.evaluate(code, "");
        assert!((0.0..=100.0).contains(&result.score), "{code:?}");
        assert_eq!(result.passed(), result.error_count() == 0, "{code:?}");
    }
}

#[test]
fn test_shared_evaluator_across_threads() {
    let evaluator = Arc::new(evaluator("azure-widgets-py", AUTH_DOC));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let evaluator = Arc::clone(&evaluator);
            thread::spawn(move || {
                evaluator
                    .evaluate("client = Client(key=\"hardcoded\")\n", &format!("s{i}"))
                    .score
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 65.0);
    }
}

#[test]
fn test_coverage_reports_imports_and_examples() {
    let doc = r#"## Client

Use `from azure.widgets import WidgetClient, WidgetOptions`.

✅ Correct:
```python
client = WidgetClient(endpoint, credential=credential)
```
"#;
    let evaluator = evaluator("azure-widgets-py", doc);
    let code = "from azure.widgets import WidgetClient\n\nclient = WidgetClient(endpoint, credential=credential)  # shared\n";

    let coverage = evaluator.coverage(code);

    assert_eq!(coverage.len(), 1);
    assert_eq!(coverage[0].rule, "Client");
    assert_eq!(coverage[0].correct_patterns, 1);
    assert_eq!(coverage[0].reproduced_correct, 1);
    assert_eq!(
        coverage[0].present_imports,
        vec!["from azure.widgets import WidgetClient"]
    );
    assert_eq!(
        coverage[0].missing_imports,
        vec!["from azure.widgets import WidgetOptions"]
    );
    assert!(coverage[0].imports_checked);

    // Coverage is diagnostic; the evaluation itself is unaffected
    assert!(evaluator.evaluate(code, "").findings.is_empty());
}

#[test]
fn test_result_json_contract() {
    let evaluator = evaluator("azure-widgets-py", AUTH_DOC);
    let json = evaluator
        .evaluate("client = Client(key=\"hardcoded\")\n", "auth")
        .to_json();

    assert_eq!(json["skill_name"], "azure-widgets-py");
    assert_eq!(json["scenario"], "auth");
    assert_eq!(json["passed"], false);
    assert_eq!(json["score"], 65.0);
    assert_eq!(json["error_count"], 1);
    assert_eq!(json["warning_count"], 0);
    assert_eq!(json["findings"][0]["severity"], "error");
    assert!(json["findings"][0]["line"].is_null());
    assert_eq!(json["matched_incorrect"][0], "Authentication");
    assert!(json.get("generated_code").is_none());
}
