//! Harness configuration for skillgrade
//!
//! Configuration is read from an optional `skillgrade.toml` in the base
//! directory. Every field has a default, so an absent file is not an error.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SkillgradeError};

pub use types::{HarnessConfig, SkillsConfig, DEFAULT_CRITERIA_FILE, DEFAULT_SKILLS_DIR};

/// Config file name looked up in the base directory
pub const CONFIG_FILENAME: &str = "skillgrade.toml";

impl HarnessConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SkillgradeError::invalid_config(path, "file does not exist"));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| SkillgradeError::io_operation("read config", path.display(), e))?;
        toml::from_str(&content).map_err(|e| SkillgradeError::invalid_config(path, e))
    }

    /// Load `skillgrade.toml` from `base` if present, defaults otherwise
    pub fn load_or_default(base: &Path) -> Result<Self> {
        let path = base.join(CONFIG_FILENAME);
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Skills roots resolved against `base`
    pub fn skills_dirs(&self, base: &Path) -> Vec<PathBuf> {
        self.skills
            .dirs
            .iter()
            .map(|dir| {
                if dir.is_absolute() {
                    dir.clone()
                } else {
                    base.join(dir)
                }
            })
            .collect()
    }
}
