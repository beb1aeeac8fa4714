//! Build step

use anyhow::Result;

use crate::build::cmake::{require_cmake, CMakeInvocation};
use crate::build::BuildTarget;
use crate::config::ToolchainConfig;
use crate::utils::terminal::print_stage_title;

/// Build a configured profile with one job per processing unit
pub fn build(config: &ToolchainConfig, target: BuildTarget) -> Result<()> {
    let cmake = require_cmake(config.cmake_path(), "building the project")?;

    let invocation = CMakeInvocation::new(
        cmake,
        config.cmake_dir_for(target),
        config.project_dir.clone(),
    )
    .jobs(config.jobs)
    .status(config.echo_commands)
    .capture_output(config.capture_output);

    print_stage_title("Building");
    invocation.build()?;

    Ok(())
}
