//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory holding one subdirectory per skill
pub const DEFAULT_SKILLS_DIR: &str = ".github/skills";

/// Conventional criteria document path inside a skill directory
pub const DEFAULT_CRITERIA_FILE: &str = "references/acceptance-criteria.md";

/// Top-level `skillgrade.toml` configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Skill discovery settings
    #[serde(default)]
    pub skills: SkillsConfig,
}

/// Where skills and their criteria documents live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillsConfig {
    /// Skills roots, relative to the base directory unless absolute.
    /// Searched in order when loading a skill.
    #[serde(default = "default_skills_dirs")]
    pub dirs: Vec<PathBuf>,

    /// Criteria document path relative to a skill directory
    #[serde(default = "default_criteria_file")]
    pub criteria_file: PathBuf,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            dirs: default_skills_dirs(),
            criteria_file: default_criteria_file(),
        }
    }
}

fn default_skills_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_SKILLS_DIR)]
}

fn default_criteria_file() -> PathBuf {
    PathBuf::from(DEFAULT_CRITERIA_FILE)
}
