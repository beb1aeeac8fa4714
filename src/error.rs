//! Error types and helpers for user-friendly error messages
//!
//! Every fatal condition of the orchestrator ends up here so that `main` can
//! pick the process exit code and print actionable hints.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code used when a required tool is missing from the search path
pub const MISSING_TOOL_EXIT_CODE: i32 = 255;

/// Exit code used for errors that carry no child exit code
pub const GENERIC_EXIT_CODE: i32 = 1;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// Tool/executable not found on the search path
    #[error("Could not find {tool} executable.")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// An external command exited unsuccessfully during a fatal step
    #[error("{program} failed with exit code {}", display_code(.exit_code))]
    CommandFailed {
        program: String,
        exit_code: Option<i32>,
    },

    /// The executable of a profile has not been built
    #[error("Executable not found: {}", .path.display())]
    NotBuilt { path: PathBuf },

    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        hint: Option<String>,
    },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl ToolchainError {
    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a command failure error
    pub fn command_failed(program: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::CommandFailed {
            program: program.into(),
            exit_code,
        }
    }

    /// Create a configuration error with a hint
    pub fn config_error_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Process exit code this error maps to
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolchainError::MissingTool { .. } => MISSING_TOOL_EXIT_CODE,
            ToolchainError::CommandFailed { exit_code, .. } => {
                exit_code.unwrap_or(GENERIC_EXIT_CODE)
            }
            ToolchainError::NotBuilt { .. } | ToolchainError::Config { .. } => GENERIC_EXIT_CODE,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        match self {
            // The child already reported its own diagnostics.
            ToolchainError::CommandFailed { .. } => {
                eprintln!("{} {}", style("ERROR:").red().bold(), self);
            }
            ToolchainError::MissingTool {
                hint, required_for, ..
            } => {
                eprintln!("{}", self);
                eprintln!("Required for: {}", required_for);
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            ToolchainError::NotBuilt { .. } => {
                eprintln!("\n{} {}", style("ERROR:").red().bold(), self);
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hints::not_built());
            }
            ToolchainError::Config { hint, .. } => {
                eprintln!("\n{} {}", style("ERROR:").red().bold(), self);
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
        }
    }
}

/// Exit code for an arbitrary error returned from the orchestrator
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ToolchainError>()
        .map(ToolchainError::exit_code)
        .unwrap_or(GENERIC_EXIT_CODE)
}

/// Common error hints for missing tools
pub mod hints {
    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Windows: winget install Kitware.CMake"
    }

    /// Get hint for missing Git
    pub fn git() -> &'static str {
        "Install Git from https://git-scm.com/ or use your package manager:\n\
         • macOS: brew install git\n\
         • Ubuntu: sudo apt install git\n\
         • Windows: winget install Git.Git"
    }

    /// Get hint for an executable that has not been built yet
    pub fn not_built() -> &'static str {
        "The executable does not exist yet. Configure and build first:\n\
         • Run: toolchain -c -b -r"
    }

    /// Get hint for invalid toolchain.toml
    pub fn invalid_toolchain_toml() -> &'static str {
        "toolchain.toml is invalid. Recognized sections:\n\
         • [project] name\n\
         • [layout] cmake_dir, build_dir\n\
         • [build] jobs, cmake_flags"
    }
}
