//! Path utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File that marks the root of a CMake project
pub const PROJECT_MARKER: &str = "CMakeLists.txt";

/// Find the project root starting from the current directory
pub fn find_project_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_project_root_from(&current_dir))
}

/// Resolve a user-supplied project root to an absolute, canonical path
///
/// Every child process runs with its own working directory, so derived paths
/// must not depend on the directory the orchestrator was started from.
pub fn resolve_project_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(dir)
        .with_context(|| format!("Failed to resolve project directory: {}", dir.display()))
}

/// Find the project root starting from a specific directory
///
/// Returns the nearest ancestor holding a `CMakeLists.txt`, or `start` itself
/// when there is none so that a missing project is reported by CMake.
pub fn find_project_root_from(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
