//! Subprocess execution
//!
//! Every external invocation (git, cmake, the built executable) goes through
//! [`run_command`], which decides whether the child's streams are inherited
//! or captured and whether a non-zero exit is fatal.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::ToolchainError;

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `-1` when the child was killed by a signal
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(
        status: ExitStatus,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        let exit_code = status.code().unwrap_or(-1);
        Self {
            success: status.success(),
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }
}

/// Description of a command to run
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: PathBuf,
    status: bool,
    output: bool,
    exit_on_failure: bool,
}

impl CommandSpec {
    /// New command in a working directory; streams inherited, failures fatal
    pub fn new(program: impl Into<PathBuf>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            status: true,
            output: true,
            exit_on_failure: true,
        }
    }

    /// Append arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Print `> command line` before running
    pub fn status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Inherit stdout/stderr (`true`) or capture them (`false`)
    pub fn output(mut self, output: bool) -> Self {
        self.output = output;
        self
    }

    /// Turn a non-zero exit into a [`ToolchainError::CommandFailed`]
    pub fn exit_on_failure(mut self, exit_on_failure: bool) -> Self {
        self.exit_on_failure = exit_on_failure;
        self
    }

    /// The command line as it would be typed in a shell
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|s| s.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

/// Run a command according to its spec
pub fn run_command(spec: &CommandSpec) -> Result<CommandResult> {
    if spec.status {
        println!("> {}", spec.command_line());
    }
    debug!(cwd = %spec.cwd.display(), command = %spec.command_line(), "spawning");

    let start = Instant::now();

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args).current_dir(&spec.cwd);

    let result = if spec.output {
        // Inherit stdin/stdout/stderr for interactive commands
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute {}", spec.program.display()))?;

        CommandResult::from_status(status, String::new(), String::new(), start.elapsed())
    } else {
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute {}", spec.program.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        CommandResult::from_status(output.status, stdout, stderr, start.elapsed())
    };

    debug!(
        exit_code = result.exit_code,
        elapsed_ms = result.duration.as_millis() as u64,
        "finished"
    );

    if !result.success {
        if !spec.output {
            println!("{}", result.stdout);
            println!("{}", result.stderr);
        }
        if spec.exit_on_failure {
            let code = (result.exit_code >= 0).then_some(result.exit_code);
            return Err(ToolchainError::command_failed(spec.program_name(), code).into());
        }
    }

    Ok(result)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("/bin/sh", std::env::temp_dir())
            .args(["-c", script])
            .status(false)
    }

    #[test]
    #[serial]
    fn test_success_returns_zero() {
        let result = run_command(&sh("exit 0")).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    #[serial]
    fn test_failure_is_fatal_by_default() {
        let err = run_command(&sh("exit 7")).unwrap_err();
        match err.downcast_ref::<ToolchainError>() {
            Some(ToolchainError::CommandFailed { program, exit_code }) => {
                assert_eq!(program, "sh");
                assert_eq!(*exit_code, Some(7));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_failure_returned_when_not_fatal() {
        let result = run_command(&sh("exit 7").exit_on_failure(false)).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 7);
    }

    #[test]
    #[serial]
    fn test_captured_output() {
        let spec = sh("echo out; echo err >&2; exit 3")
            .output(false)
            .exit_on_failure(false);
        let result = run_command(&spec).unwrap();
        assert_eq!(result.stdout.trim(), "out");
        assert_eq!(result.stderr.trim(), "err");
        assert_eq!(result.exit_code, 3);
    }

    #[test]
    #[serial]
    fn test_runs_in_working_directory() {
        let dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("/bin/sh", dir.path())
            .args(["-c", "pwd"])
            .status(false)
            .output(false);
        let result = run_command(&spec).unwrap();
        let reported = PathBuf::from(result.stdout.trim()).canonicalize().unwrap();
        assert_eq!(reported, dir.path().canonicalize().unwrap());
    }

    #[test]
    #[serial]
    fn test_missing_program_is_an_error() {
        let spec = CommandSpec::new("/nonexistent/program", std::env::temp_dir());
        let err = run_command(&spec).unwrap_err();
        assert!(err.to_string().contains("Failed to execute"));
    }

    #[test]
    #[serial]
    fn test_command_line_rendering() {
        let spec = CommandSpec::new("cmake", ".").args(["--build", "dir", "-j4"]);
        assert_eq!(spec.command_line(), "cmake --build dir -j4");
    }
}
