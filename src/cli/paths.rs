//! Path resolution for CLI commands

use std::env;
use std::path::{Path, PathBuf};

/// Base directory for skills and config discovery.
///
/// An explicit `--root` wins; otherwise the current working directory, or
/// "." if that cannot be determined.
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve a user-supplied path against the base directory
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
