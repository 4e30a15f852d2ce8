//! States command handler.
//!
//! Prints the candidate state names derived from the paths touched by the
//! most recent commit.

use crate::config::OutputConfig;
use crate::git::GitCli;
use crate::pipeline::{compute_changed_states, write_output, OutputTarget};
use crate::reports;
use anyhow::Result;
use std::path::PathBuf;

/// Run the states command.
pub fn run_states(repo: Option<PathBuf>, output: &OutputConfig, quiet: bool) -> Result<()> {
    let reader = GitCli::from_option(repo);
    let states = compute_changed_states(&reader)?;

    let rendered = reports::render_states(&states, output.format)?;
    let target = OutputTarget::from_option(output.file.clone());
    write_output(&rendered, &target, quiet)
}
