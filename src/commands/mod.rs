//! The four orchestrator steps, in the order they run

pub mod build;
pub mod clean;
pub mod configure;
pub mod run;
