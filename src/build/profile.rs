//! Build profiles
//!
//! A profile is selected once per invocation and maps to an immutable
//! description of where its artifacts live and how CMake is configured.

use clap::ValueEnum;

/// Build profile selectable with `--target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuildTarget {
    #[default]
    #[value(name = "Debug")]
    Debug,
    #[value(name = "Release")]
    Release,
}

/// Immutable parameters of a build profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTargetDescription {
    /// Output folder name under the configuration and build roots
    pub folder: &'static str,
    /// Flags passed to the CMake configure step
    pub cmake_flags: &'static [&'static str],
}

const DEBUG: BuildTargetDescription = BuildTargetDescription {
    folder: "debug",
    cmake_flags: &[
        "-DCMAKE_BUILD_TYPE=Debug",
        "-DCMAKE_EXPORT_COMPILE_COMMANDS=1",
        "-DCMAKE_C_FLAGS=-pg",
        "-DCMAKE_EXE_LINKER_FLAGS=-pg",
        "-DCMAKE_SHARED_LINKER_FLAGS=-pg",
    ],
};

const RELEASE: BuildTargetDescription = BuildTargetDescription {
    folder: "release",
    cmake_flags: &["-DCMAKE_BUILD_TYPE=Release"],
};

impl BuildTarget {
    /// Look up the immutable description of this profile
    pub fn description(self) -> &'static BuildTargetDescription {
        match self {
            BuildTarget::Debug => &DEBUG,
            BuildTarget::Release => &RELEASE,
        }
    }

    /// Profile name as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            BuildTarget::Debug => "Debug",
            BuildTarget::Release => "Release",
        }
    }
}

impl std::fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
