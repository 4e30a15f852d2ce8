//! Diff command handler.
//!
//! Renders the record-level top-document diff between the working tree and
//! the parent of the last commit, including unchanged keys for diagnostics.
//! Unlike `affected`, the parent revision is always fetched.

use crate::config::{OutputConfig, RunConfig};
use crate::git::GitCli;
use crate::pipeline::{compute_top_diff, write_output, OutputTarget};
use crate::reports;
use anyhow::Result;

/// Run the diff command.
pub fn run_diff(run: &RunConfig, output: &OutputConfig, quiet: bool) -> Result<()> {
    let reader = GitCli::from_option(run.repo.clone());
    let diff = compute_top_diff(&reader, run)?;

    if !quiet {
        tracing::info!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            changed = diff.changed.len(),
            unchanged = diff.unchanged.len(),
            "top document diff computed"
        );
    }

    let rendered = reports::render_diff(&diff, output.format)?;
    let target = OutputTarget::from_option(output.file.clone());
    write_output(&rendered, &target, quiet)
}
