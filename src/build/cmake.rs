//! CMake invocation
//!
//! Builds the argument lists for the configure and build steps and hands
//! them to the subprocess helper. Locating CMake happens once, at startup.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::{hints, ToolchainError};
use crate::exec::subprocess::{run_command, CommandResult, CommandSpec};

/// Name of the compile database CMake writes into the configuration directory
pub const COMPILE_COMMANDS: &str = "compile_commands.json";

/// A CMake invocation builder
#[derive(Debug)]
pub struct CMakeInvocation<'a> {
    /// CMake executable
    cmake: &'a Path,
    /// Configuration directory (`-B`)
    cmake_dir: PathBuf,
    /// Working directory for the invocation
    cwd: PathBuf,
    /// Flags appended to the configure step
    flags: Vec<String>,
    /// Number of parallel jobs for the build step
    jobs: usize,
    /// Echo the command line before running
    status: bool,
    /// Inherit stdout/stderr instead of capturing them
    output: bool,
}

impl<'a> CMakeInvocation<'a> {
    /// Create a new invocation against a configuration directory
    pub fn new(cmake: &'a Path, cmake_dir: PathBuf, cwd: PathBuf) -> Self {
        Self {
            cmake,
            cmake_dir,
            cwd,
            flags: Vec::new(),
            jobs: 1,
            status: false,
            output: true,
        }
    }

    /// Append configure flags
    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Set number of parallel jobs
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Echo commands before running them
    pub fn status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Capture tool output instead of streaming it
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.output = !capture;
        self
    }

    /// Arguments of the configure step for a given source directory
    pub fn configure_args(&self, source_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "-B".to_string(),
            self.cmake_dir.display().to_string(),
            "-S".to_string(),
            source_dir.display().to_string(),
        ];
        args.extend(self.flags.iter().cloned());
        args
    }

    /// Arguments of the build step
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "--build".to_string(),
            self.cmake_dir.display().to_string(),
            format!("-j{}", self.jobs),
        ]
    }

    /// Run CMake configure step
    pub fn configure(&self, source_dir: &Path) -> Result<CommandResult> {
        self.invoke(self.configure_args(source_dir))
    }

    /// Run CMake build step
    pub fn build(&self) -> Result<CommandResult> {
        self.invoke(self.build_args())
    }

    fn invoke(&self, args: Vec<String>) -> Result<CommandResult> {
        let spec = CommandSpec::new(self.cmake, &self.cwd)
            .args(args)
            .status(self.status)
            .output(self.output)
            .exit_on_failure(true);
        run_command(&spec)
    }

    /// Path of the compile database inside the configuration directory
    pub fn compile_commands(&self) -> PathBuf {
        self.cmake_dir.join(COMPILE_COMMANDS)
    }
}

/// Fail with a missing-tool error when CMake was not found at startup
pub fn require_cmake<'a>(cmake: Option<&'a Path>, required_for: &str) -> Result<&'a Path> {
    cmake.ok_or_else(|| {
        ToolchainError::missing_tool("CMake", required_for, hints::cmake()).into()
    })
}

/// Locate CMake on the search path
pub fn find_cmake() -> Option<PathBuf> {
    which::which("cmake").ok()
}
