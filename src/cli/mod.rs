//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by
//! main.rs. Each handler implements the business logic for a specific CLI
//! subcommand and returns the desired process exit code.

mod affected;
mod diff;
mod states;

pub use affected::run_affected;
pub use diff::run_diff;
pub use states::run_states;

// Re-export config types used by handlers
pub use crate::config::{AffectedConfig, OutputConfig, RunConfig};
