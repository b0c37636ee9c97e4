//! Integration tests for criteria parsing and loading

use std::fs;
use std::path::Path;

use skillgrade_core::config::HarnessConfig;
use skillgrade_core::criteria::{AcceptanceCriteria, CriteriaLoader};
use skillgrade_core::error::{ExitCode, SkillgradeError};
use skillgrade_core::language::Language;
use tempfile::TempDir;

const WIDGETS_DOC: &str = r#"# Widgets acceptance criteria

Preamble text with a ✅ that belongs to no section.

## Overview

```python
from azure.widgets import WidgetClient
```

## Client Creation

Create the client with a credential, e.g. `from azure.widgets import WidgetClient, WidgetOptions`.

✅ Correct:
```python
client = WidgetClient(endpoint, credential=DefaultAzureCredential())
```

✅ Correct with options:
```python
options = WidgetOptions(retries=3)
client = WidgetClient(endpoint, credential=credential, options=options)
```

✅ Correct as a context manager:
```python
with WidgetClient(endpoint, credential=credential) as client:
    client.ping()
```

Some filler text so the next block is far away from the green markers above,
long enough to push them out of the preceding window of the final block here.

❌ Never embed keys:
```python
client = WidgetClient(endpoint, key="hardcoded-secret-value")
```

## Notes

Plain prose without any code.
"#;

fn write_criteria(root: &Path, skills_dir: &str, skill: &str, content: &str) {
    let dir = root.join(skills_dir).join(skill).join("references");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("acceptance-criteria.md"), content).unwrap();
}

#[test]
fn test_local_marker_overrides_section_majority() {
    let criteria = AcceptanceCriteria::parse("azure-widgets-py", "criteria.md", WIDGETS_DOC);
    let rule = criteria.get_rule("Client Creation").unwrap();

    assert_eq!(rule.correct_patterns.len(), 3);
    assert_eq!(rule.incorrect_patterns.len(), 1);
    assert!(rule.incorrect_patterns[0].code.contains("hardcoded-secret-value"));
    assert!(!rule.incorrect_patterns[0].is_correct);
}

#[test]
fn test_overview_and_codeless_sections_are_not_rules() {
    let criteria = AcceptanceCriteria::parse("azure-widgets-py", "criteria.md", WIDGETS_DOC);
    let names: Vec<_> = criteria.rules.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["Client Creation"]);
    // Overview blocks still count as flat patterns
    assert_eq!(criteria.correct_patterns.len(), 4);
    assert_eq!(criteria.incorrect_patterns.len(), 1);
    assert!(criteria
        .rules
        .iter()
        .all(|r| !r.correct_patterns.is_empty() || !r.incorrect_patterns.is_empty()));
}

#[test]
fn test_rule_metadata() {
    let criteria = AcceptanceCriteria::parse("azure-widgets-py", "criteria.md", WIDGETS_DOC);
    let rule = criteria.get_rule("client creation").unwrap();

    assert!(rule.description.starts_with("Create the client with a credential"));
    assert_eq!(
        rule.required_imports,
        vec![
            "from azure.widgets import WidgetClient",
            "from azure.widgets import WidgetOptions",
        ]
    );
    assert!(rule.forbidden_imports.is_empty());
    assert!(rule.required_patterns.is_empty());
    assert_eq!(rule.correct_patterns[0].language, "python");
    assert_eq!(rule.correct_patterns[0].section, "Client Creation");
}

#[test]
fn test_load_is_deterministic() {
    let root = TempDir::new().unwrap();
    write_criteria(root.path(), ".github/skills", "azure-widgets-py", WIDGETS_DOC);
    let loader = CriteriaLoader::with_defaults(root.path());

    let first = loader.load("azure-widgets-py").unwrap();
    let second = loader.load("azure-widgets-py").unwrap();

    assert_eq!(first, second);
    assert_eq!(first.language(), Language::Python);
    assert!(first.source_path().ends_with("references/acceptance-criteria.md"));
}

#[test]
fn test_missing_criteria_is_a_data_error() {
    let root = TempDir::new().unwrap();
    let loader = CriteriaLoader::with_defaults(root.path());

    let err = loader.load("azure-missing-py").unwrap_err();
    match &err {
        SkillgradeError::CriteriaNotFound { skill, path } => {
            assert_eq!(skill, "azure-missing-py");
            assert!(path.ends_with(
                ".github/skills/azure-missing-py/references/acceptance-criteria.md"
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), ExitCode::Data);
}

#[test]
fn test_path_like_skill_names_are_rejected() {
    let root = TempDir::new().unwrap();
    let loader = CriteriaLoader::with_defaults(root.path());

    for name in ["", "..", "../etc", "a/b", "a\\b"] {
        let err = loader.load(name).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Usage, "{name:?}");
    }
}

#[test]
fn test_configured_skills_dirs_are_searched_in_order() {
    let root = TempDir::new().unwrap();
    write_criteria(root.path(), "skills", "shared-py", "## First\n```python\nx = 1\n```\n");
    write_criteria(root.path(), "plugins/skills", "shared-py", "## Second\n```python\ny = 2\n```\n");
    write_criteria(root.path(), "plugins/skills", "plugin-ts", "## Only\n```ts\nlet z = 3;\n```\n");
    fs::write(
        root.path().join("skillgrade.toml"),
        "[skills]\ndirs = [\"skills\", \"plugins/skills\"]\n",
    )
    .unwrap();

    let config = HarnessConfig::load_or_default(root.path()).unwrap();
    let loader = CriteriaLoader::new(root.path(), &config);

    assert_eq!(
        loader.list_skills_with_criteria(),
        vec!["plugin-ts", "shared-py"]
    );
    assert_eq!(loader.load("shared-py").unwrap().rules[0].name, "First");

    let plugin = loader.load("plugin-ts").unwrap();
    assert_eq!(plugin.language(), Language::TypeScript);
    assert_eq!(plugin.correct_patterns[0].language, "ts");
}

#[test]
fn test_malformed_config_is_rejected() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("skillgrade.toml"), "[skills\ndirs = 3").unwrap();

    let err = HarnessConfig::load_or_default(root.path()).unwrap_err();
    assert!(matches!(err, SkillgradeError::InvalidConfig { .. }));
    assert_eq!(err.exit_code(), ExitCode::Data);
}
