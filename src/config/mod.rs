//! Runtime configuration
//!
//! [`ToolchainConfig`] is assembled once in `main` from the command line and
//! the optional `toolchain.toml`, then passed by reference to every step.
//! All per-profile paths are derived from it on demand.

pub mod toolchain_toml;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::build::cmake::COMPILE_COMMANDS;
use crate::build::{num_cpus, BuildTarget};

pub use toolchain_toml::ToolchainToml;

/// Everything the orchestrator needs to know about the project and host
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    /// Project root (holds CMakeLists.txt)
    pub project_dir: PathBuf,
    /// Root of the per-profile CMake configuration directories
    pub cmake_dir: PathBuf,
    /// Root of the per-profile build output directories
    pub build_dir: PathBuf,
    /// Name of the executable produced by the build
    pub project_name: String,
    /// CMake executable, resolved once at startup
    pub cmake: Option<PathBuf>,
    /// Parallel jobs for the build step
    pub jobs: usize,
    /// Extra flags appended to every configure step
    pub extra_cmake_flags: Vec<String>,
    /// Echo external commands before running them
    pub echo_commands: bool,
    /// Capture CMake output and show it only on failure
    pub capture_output: bool,
}

impl ToolchainConfig {
    /// Build the configuration for a project root
    ///
    /// `jobs` overrides both `toolchain.toml` and the host CPU count.
    pub fn load(project_dir: PathBuf, jobs: Option<usize>) -> Result<Self> {
        let file = ToolchainToml::load_or_default(&project_dir)?;
        let project_name = toolchain_toml::resolve_project_name(&file, &project_dir);
        let mut config = Self::with_defaults(project_dir, project_name);
        config.cmake_dir = config.project_dir.join(&file.layout.cmake_dir);
        config.build_dir = config.project_dir.join(&file.layout.build_dir);
        config.cmake = crate::build::cmake::find_cmake();
        if let Some(jobs) = jobs.or(file.build.jobs) {
            config.jobs = jobs.max(1);
        }
        config.extra_cmake_flags = file.build.cmake_flags;

        debug!(
            project_dir = %config.project_dir.display(),
            project_name = %config.project_name,
            cmake = ?config.cmake,
            jobs = config.jobs,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Configuration with default layout and no file lookup
    pub fn with_defaults(project_dir: PathBuf, project_name: impl Into<String>) -> Self {
        Self {
            cmake_dir: project_dir.join(".cmake"),
            build_dir: project_dir.join("build"),
            project_name: project_name.into(),
            cmake: None,
            jobs: num_cpus(),
            extra_cmake_flags: Vec::new(),
            echo_commands: false,
            capture_output: false,
            project_dir,
        }
    }

    /// CMake configuration directory of a profile
    pub fn cmake_dir_for(&self, target: BuildTarget) -> PathBuf {
        self.cmake_dir.join(target.description().folder)
    }

    /// Build output directory of a profile
    pub fn build_dir_for(&self, target: BuildTarget) -> PathBuf {
        self.build_dir.join(target.description().folder)
    }

    /// Directory the produced executable lives and runs in
    pub fn exe_dir_for(&self, target: BuildTarget) -> PathBuf {
        self.build_dir_for(target)
    }

    /// Path of the produced executable of a profile
    pub fn exe_file_for(&self, target: BuildTarget) -> PathBuf {
        self.exe_dir_for(target).join(self.exe_name())
    }

    /// Executable file name, with the host suffix
    pub fn exe_name(&self) -> String {
        format!("{}{}", self.project_name, std::env::consts::EXE_SUFFIX)
    }

    /// Where the compile database is copied for editor tooling
    pub fn compile_commands_path(&self) -> PathBuf {
        self.project_dir.join(COMPILE_COMMANDS)
    }

    /// CMake executable, if one was found
    pub fn cmake_path(&self) -> Option<&Path> {
        self.cmake.as_deref()
    }
}
