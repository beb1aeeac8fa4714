//! Clean step
//!
//! Removes ignored files (CMake and build output, the copied compile
//! database) with `git clean -Xdf`. Best-effort: nothing here aborts the
//! remaining steps.

use std::path::Path;

use tracing::warn;

use crate::config::ToolchainConfig;
use crate::error::hints;
use crate::exec::subprocess::{run_command, CommandSpec};
use crate::utils::terminal::{print_stage_title, print_warning};

/// Arguments passed to git
pub const GIT_CLEAN_ARGS: [&str; 2] = ["clean", "-Xdf"];

/// Delete build artifacts using the git found on the search path
pub fn clean(config: &ToolchainConfig) {
    let git = which::which("git").ok();
    clean_with(config, git.as_deref());
}

/// Delete build artifacts using a specific git executable
pub fn clean_with(config: &ToolchainConfig, git: Option<&Path>) {
    print_stage_title("Cleaning up");

    let Some(git) = git else {
        print_warning("Could not find git executable, nothing was cleaned.");
        eprintln!("{}", hints::git());
        return;
    };

    let spec = CommandSpec::new(git, &config.project_dir)
        .args(GIT_CLEAN_ARGS)
        .status(config.echo_commands)
        .exit_on_failure(false);

    match run_command(&spec) {
        Ok(result) if !result.success => {
            warn!(exit_code = result.exit_code, "git clean failed");
            print_warning(&format!(
                "git clean exited with code {}, continuing",
                result.exit_code
            ));
        }
        Ok(_) => {}
        Err(e) => {
            warn!(error = %e, "git clean could not be started");
            print_warning(&format!("{:#}, continuing", e));
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use crate::test_support::write_script;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_clean_without_git_completes() {
        let dir = TempDir::new().unwrap();
        let config = ToolchainConfig::with_defaults(dir.path().to_path_buf(), "bfc");
        clean_with(&config, None);
    }

    #[test]
    #[serial]
    fn test_clean_ignores_failing_git() {
        let dir = TempDir::new().unwrap();
        let git = write_script(dir.path(), "git", "exit 128");
        let config = ToolchainConfig::with_defaults(dir.path().to_path_buf(), "bfc");
        clean_with(&config, Some(&git));
    }

    #[test]
    #[serial]
    fn test_clean_passes_ignored_file_flags() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("git.log");
        let git = write_script(
            dir.path(),
            "git",
            &format!("echo \"$@\" > '{}'", log.display()),
        );
        let config = ToolchainConfig::with_defaults(dir.path().to_path_buf(), "bfc");
        clean_with(&config, Some(&git));

        let logged = std::fs::read_to_string(&log).unwrap();
        assert_eq!(logged.trim(), "clean -Xdf");
    }
}
