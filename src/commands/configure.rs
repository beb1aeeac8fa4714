//! Configure step

use anyhow::{Context, Result};
use tracing::debug;

use crate::build::cmake::{require_cmake, CMakeInvocation};
use crate::build::BuildTarget;
use crate::config::ToolchainConfig;
use crate::utils::terminal::print_stage_title;

/// Configure CMake for a profile and publish the compile database
pub fn configure(config: &ToolchainConfig, target: BuildTarget) -> Result<()> {
    let cmake = require_cmake(config.cmake_path(), "configuring the project")?;

    let invocation = CMakeInvocation::new(
        cmake,
        config.cmake_dir_for(target),
        config.project_dir.clone(),
    )
    .flags(target.description().cmake_flags.iter().copied())
    .flags(config.extra_cmake_flags.iter().cloned())
    .status(config.echo_commands)
    .capture_output(config.capture_output);

    print_stage_title("Configuring");
    invocation.configure(&config.project_dir)?;

    let generated = invocation.compile_commands();
    if generated.is_file() {
        let published = config.compile_commands_path();
        std::fs::copy(&generated, &published).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                generated.display(),
                published.display()
            )
        })?;
        debug!(path = %published.display(), "compile database updated");
    }

    Ok(())
}
