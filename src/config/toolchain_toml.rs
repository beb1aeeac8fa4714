//! toolchain.toml configuration parsing
//!
//! The file is optional and every key has a default, so a bare CMake project
//! works without one.
//!
//! ```toml
//! [project]
//! name = "bfc"
//!
//! [layout]
//! cmake_dir = ".cmake"
//! build_dir = "build"
//!
//! [build]
//! jobs = 8
//! cmake_flags = ["-G", "Ninja"]
//! ```

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::error::{hints, ToolchainError};

/// File name looked up in the project root
pub const TOOLCHAIN_TOML: &str = "toolchain.toml";

/// Project name used when neither the config file nor CMakeLists.txt name one
pub const DEFAULT_PROJECT_NAME: &str = "bfc";

/// Root configuration from toolchain.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainToml {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub build: BuildSection,
}

/// `[project]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    /// Executable name produced by the build
    pub name: Option<String>,
}

/// `[layout]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// Root of the per-profile CMake configuration directories
    #[serde(default = "default_cmake_dir")]
    pub cmake_dir: String,

    /// Root of the per-profile build output directories
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            cmake_dir: default_cmake_dir(),
            build_dir: default_build_dir(),
        }
    }
}

fn default_cmake_dir() -> String {
    ".cmake".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}

/// `[build]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Parallelism override for the build step
    pub jobs: Option<usize>,

    /// Extra flags appended to every configure step
    #[serde(default)]
    pub cmake_flags: Vec<String>,
}

impl ToolchainToml {
    /// Load `toolchain.toml` from a project root, falling back to defaults
    pub fn load_or_default(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(TOOLCHAIN_TOML);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            ToolchainError::config_error_with_hint(
                format!("Failed to parse {}: {}", TOOLCHAIN_TOML, e.message()),
                hints::invalid_toolchain_toml(),
            )
        })?;

        if config.build.jobs == Some(0) {
            return Err(ToolchainError::config_error_with_hint(
                "build.jobs must be at least 1",
                hints::invalid_toolchain_toml(),
            )
            .into());
        }

        Ok(config)
    }
}

fn project_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^\s*project\s*\(\s*([A-Za-z0-9_.+\-]+)").expect("valid regex")
    })
}

/// Extract the name of the first `project()` call in a CMakeLists.txt
pub fn cmake_project_name(cmake_lists: &str) -> Option<String> {
    project_regex()
        .captures(cmake_lists)
        .map(|caps| caps[1].to_string())
}

/// Resolve the project name: config file, then CMakeLists.txt, then the default
pub fn resolve_project_name(config: &ToolchainToml, project_dir: &Path) -> String {
    if let Some(name) = &config.project.name {
        return name.clone();
    }

    std::fs::read_to_string(project_dir.join("CMakeLists.txt"))
        .ok()
        .and_then(|content| cmake_project_name(&content))
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
}
