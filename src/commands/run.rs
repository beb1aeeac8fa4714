//! Run step
//!
//! Runs the produced executable from its output directory. A non-zero exit
//! is an ordinary outcome here: it is reported, never fatal.

use anyhow::{Context, Result};

use crate::build::BuildTarget;
use crate::config::ToolchainConfig;
use crate::error::ToolchainError;
use crate::exec::subprocess::{run_command, CommandSpec};
use crate::utils::terminal::print_stage_title;

/// Run the executable of a profile with forwarded arguments
///
/// Returns the child's exit code.
pub fn run(config: &ToolchainConfig, target: BuildTarget, args: &[String]) -> Result<i32> {
    print_stage_title("Running");

    let exe = config.exe_file_for(target);
    if !exe.is_file() {
        return Err(ToolchainError::NotBuilt { path: exe }.into());
    }

    let spec = CommandSpec::new(&exe, config.exe_dir_for(target))
        .args(args)
        .status(config.echo_commands)
        .exit_on_failure(false);

    let result =
        run_command(&spec).with_context(|| format!("Failed to run {}", exe.display()))?;

    print_stage_title(&format!("Exit code {}", result.exit_code));
    Ok(result.exit_code)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use crate::test_support::write_script;
    use std::fs;
    use tempfile::TempDir;

    fn project_with_exe(dir: &TempDir, body: &str) -> ToolchainConfig {
        let config = ToolchainConfig::with_defaults(dir.path().to_path_buf(), "bfc");
        write_script(
            &config.exe_dir_for(BuildTarget::Debug),
            &config.exe_name(),
            body,
        );
        config
    }

    #[test]
    #[serial]
    fn test_non_zero_exit_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let config = project_with_exe(&dir, "exit 7");

        let code = run(&config, BuildTarget::Debug, &[]).unwrap();
        assert_eq!(code, 7);
    }

    #[test]
    #[serial]
    fn test_forwards_arguments_in_order() {
        let dir = TempDir::new().unwrap();
        let config = project_with_exe(&dir, "for a in \"$@\"; do echo \"$a\"; done > args.txt");

        let args = vec!["--flag".to_string(), "value".to_string()];
        let code = run(&config, BuildTarget::Debug, &args).unwrap();
        assert_eq!(code, 0);

        // Written relative to the working directory, the exe directory.
        let out = config.exe_dir_for(BuildTarget::Debug).join("args.txt");
        let forwarded: Vec<String> = fs::read_to_string(out)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(forwarded, args);
    }

    #[test]
    #[serial]
    fn test_missing_executable_is_not_built() {
        let dir = TempDir::new().unwrap();
        let config = ToolchainConfig::with_defaults(dir.path().to_path_buf(), "bfc");
        fs::create_dir_all(config.exe_dir_for(BuildTarget::Release)).unwrap();

        let err = run(&config, BuildTarget::Release, &[]).unwrap_err();
        match err.downcast_ref::<ToolchainError>() {
            Some(ToolchainError::NotBuilt { path }) => {
                assert_eq!(path, &config.exe_file_for(BuildTarget::Release));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_unexecutable_file_is_a_spawn_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let config = ToolchainConfig::with_defaults(dir.path().to_path_buf(), "bfc");
        let exe = config.exe_file_for(BuildTarget::Debug);
        fs::create_dir_all(config.exe_dir_for(BuildTarget::Debug)).unwrap();
        fs::write(&exe, "not a program").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o644)).unwrap();

        let err = run(&config, BuildTarget::Debug, &[]).unwrap_err();
        assert!(err.downcast_ref::<ToolchainError>().is_none());
        assert_eq!(err.to_string(), format!("Failed to run {}", exe.display()));
    }
}
