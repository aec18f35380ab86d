//! Binary-side plumbing: CLI, logging, setup and diagnostics.

pub mod cli;
pub mod logging;
pub mod setup;
pub mod status;
