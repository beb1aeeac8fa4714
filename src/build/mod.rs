//! Build orchestration primitives
//!
//! ## Modules
//!
//! - `profile` - Build profiles (Debug, Release) and their immutable descriptions
//! - `cmake` - CMake configure and build invocations

pub mod cmake;
pub mod profile;

pub use profile::BuildTarget;

/// Get number of CPUs for parallel builds
pub fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
