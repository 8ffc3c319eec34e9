//! Tooling & Integration Layer
//!
//! Command-line surface over discovery, the run coordinator and report rendering.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
