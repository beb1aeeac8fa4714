//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::build::BuildTarget;
use crate::commands::{build, clean, configure, run};
use crate::config::ToolchainConfig;
use crate::utils::{paths, terminal};

/// Configure, build and run this project using CMake.
///
/// Steps given together always run in the order clean, configure, build, run.
#[derive(Parser, Debug)]
#[command(name = "toolchain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configure CMake.
    #[arg(short, long)]
    pub configure: bool,

    /// Build the project.
    #[arg(short, long)]
    pub build: bool,

    /// Run the compiled executable.
    #[arg(short, long)]
    pub run: bool,

    /// Delete CMake and build directories.
    #[arg(long)]
    pub clean: bool,

    /// Specify build target.
    #[arg(long, value_enum, ignore_case = true, default_value_t = BuildTarget::Debug)]
    pub target: BuildTarget,

    /// Specify command line arguments for the built project to be run with.
    ///
    /// Every token after this flag is forwarded verbatim.
    #[arg(short, long, num_args = 0.., allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,

    /// Number of parallel build jobs (defaults to the number of processing units)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,

    /// Project root (defaults to the nearest directory with a CMakeLists.txt)
    #[arg(long, env = "TOOLCHAIN_PROJECT_DIR", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Echo external commands and enable debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Capture CMake output and show it only when a step fails
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Resolve the runtime configuration for this invocation
    pub fn config(&self) -> Result<ToolchainConfig> {
        let project_dir = match &self.project_dir {
            Some(dir) => paths::resolve_project_dir(dir)?,
            None => paths::find_project_root()?,
        };

        let mut config =
            ToolchainConfig::load(project_dir, self.jobs.map(|jobs| jobs as usize))?;
        config.echo_commands = self.verbose;
        config.capture_output = self.quiet;
        Ok(config)
    }

    /// Execute the requested steps
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            terminal::disable_colors();
        }

        let config = self.config()?;
        let target = self.target;
        debug!(%target, "selected build target");

        if self.clean {
            clean::clean(&config);
        }

        if self.configure {
            configure::configure(&config, target)?;
        }

        if self.build {
            build::build(&config, target)?;
        }

        if self.run {
            run::run(&config, target, &self.args)?;
        }

        Ok(())
    }
}
