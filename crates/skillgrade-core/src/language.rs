//! Target languages of generated code and the analyses available for each
//!
//! The language is resolved once, from the skill name suffix, when criteria
//! are built. Checks that need a parser are only part of the evaluation
//! pipeline for languages whose [`Capabilities`] enable them.

pub mod python;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language of the code a skill teaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    CSharp,
    TypeScript,
    Java,
}

/// Which parser-backed checks can run for a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Code is parsed and rejected with a syntax finding when invalid
    pub syntax_check: bool,
    /// Import statements can be extracted from the syntax tree
    pub import_analysis: bool,
}

impl Language {
    /// Derive the language from a skill name suffix.
    ///
    /// `-py` → Python, `-dotnet` → C#, `-ts` → TypeScript, `-java` → Java.
    /// Anything else is treated as Python.
    pub fn from_skill_name(skill_name: &str) -> Self {
        let name = skill_name.to_lowercase();
        if name.ends_with("-py") {
            Language::Python
        } else if name.ends_with("-dotnet") {
            Language::CSharp
        } else if name.ends_with("-ts") {
            Language::TypeScript
        } else if name.ends_with("-java") {
            Language::Java
        } else {
            Language::Python
        }
    }

    /// Tag used for code fences that do not name a language
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::CSharp => "csharp",
            Language::TypeScript => "typescript",
            Language::Java => "java",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Language::Python => Capabilities {
                syntax_check: true,
                import_analysis: true,
            },
            Language::CSharp | Language::TypeScript | Language::Java => Capabilities {
                syntax_check: false,
                import_analysis: false,
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_skill_name_suffixes() {
        assert_eq!(Language::from_skill_name("azure-cosmos-py"), Language::Python);
        assert_eq!(
            Language::from_skill_name("azure-identity-dotnet"),
            Language::CSharp
        );
        assert_eq!(
            Language::from_skill_name("foundry-nextgen-frontend-ts"),
            Language::TypeScript
        );
        assert_eq!(Language::from_skill_name("azure-storage-java"), Language::Java);
    }

    #[test]
    fn test_from_skill_name_is_case_insensitive() {
        assert_eq!(Language::from_skill_name("Azure-Blob-TS"), Language::TypeScript);
    }

    #[test]
    fn test_unknown_suffix_defaults_to_python() {
        assert_eq!(Language::from_skill_name("podcast-generation"), Language::Python);
        assert_eq!(Language::from_skill_name("typescript"), Language::Python);
    }

    #[test]
    fn test_only_python_has_parser_checks() {
        assert!(Language::Python.capabilities().syntax_check);
        assert!(Language::Python.capabilities().import_analysis);
        for lang in [Language::CSharp, Language::TypeScript, Language::Java] {
            assert!(!lang.capabilities().syntax_check);
            assert!(!lang.capabilities().import_analysis);
        }
    }
}
