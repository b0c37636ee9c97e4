//! Locating and reading criteria documents from skill directories

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::AcceptanceCriteria;
use crate::bail_usage;
use crate::config::HarnessConfig;
use crate::error::{Result, SkillgradeError};

/// Loads acceptance criteria from `<skills-dir>/<skill>/<criteria-file>`
#[derive(Debug, Clone)]
pub struct CriteriaLoader {
    skills_dirs: Vec<PathBuf>,
    criteria_file: PathBuf,
}

impl CriteriaLoader {
    /// Loader rooted at `base` using the configured skills layout
    pub fn new(base: &Path, config: &HarnessConfig) -> Self {
        let mut skills_dirs = config.skills_dirs(base);
        if skills_dirs.is_empty() {
            skills_dirs = HarnessConfig::default().skills_dirs(base);
        }
        Self {
            skills_dirs,
            criteria_file: config.skills.criteria_file.clone(),
        }
    }

    /// Loader rooted at `base` with the default `.github/skills` layout
    pub fn with_defaults(base: &Path) -> Self {
        Self::new(base, &HarnessConfig::default())
    }

    pub fn skills_dirs(&self) -> &[PathBuf] {
        &self.skills_dirs
    }

    /// Where the criteria for `skill_name` are expected in the primary
    /// skills directory
    pub fn criteria_path(&self, skill_name: &str) -> PathBuf {
        self.skills_dirs[0].join(skill_name).join(&self.criteria_file)
    }

    /// Skills with a criteria document, sorted and de-duplicated across all
    /// skills directories. Missing directories contribute nothing.
    pub fn list_skills_with_criteria(&self) -> Vec<String> {
        let mut skills = BTreeSet::new();

        for dir in &self.skills_dirs {
            if !dir.is_dir() {
                continue;
            }

            for entry in WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_dir())
            {
                if entry.path().join(&self.criteria_file).is_file() {
                    skills.insert(entry.file_name().to_string_lossy().into_owned());
                }
            }
        }

        skills.into_iter().collect()
    }

    /// Load and parse the criteria for `skill_name`.
    ///
    /// Skills directories are searched in order. Fails with
    /// [`SkillgradeError::CriteriaNotFound`] carrying the path expected in the
    /// primary directory when no document exists.
    #[tracing::instrument(skip(self))]
    pub fn load(&self, skill_name: &str) -> Result<AcceptanceCriteria> {
        if skill_name.is_empty()
            || skill_name == "."
            || skill_name == ".."
            || skill_name.contains(&['/', '\\'][..])
        {
            bail_usage!(format!("invalid skill name: {skill_name:?}"));
        }

        let Some(path) = self
            .skills_dirs
            .iter()
            .map(|dir| dir.join(skill_name).join(&self.criteria_file))
            .find(|path| path.is_file())
        else {
            return Err(SkillgradeError::CriteriaNotFound {
                skill: skill_name.to_string(),
                path: self.criteria_path(skill_name),
            });
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| SkillgradeError::io_operation("read criteria", path.display(), e))?;
        let criteria = AcceptanceCriteria::parse(skill_name, &path, &content);

        debug!(
            path = %path.display(),
            rules = criteria.rules.len(),
            correct = criteria.correct_patterns.len(),
            incorrect = criteria.incorrect_patterns.len(),
            "criteria_loaded"
        );

        Ok(criteria)
    }
}
