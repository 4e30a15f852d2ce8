//! Affected command handler.
//!
//! Runs the full pipeline and renders the affected-target report.

use crate::config::AffectedConfig;
use crate::git::GitCli;
use crate::pipeline::{compute_affected, exit_codes, write_output, OutputTarget};
use crate::reports;
use anyhow::Result;

/// Run the affected command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_affected(config: &AffectedConfig) -> Result<i32> {
    let reader = GitCli::from_option(config.run.repo.clone());
    let result = compute_affected(&reader, &config.run)?;

    if !config.quiet {
        tracing::info!(
            targets = result.targets.len(),
            states = result.states.len(),
            top_file_changed = result.top_file_changed,
            "computed affected targets"
        );
    }

    let rendered = reports::render_affected(&result, &config.run, config.output.format)?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&rendered, &target, config.quiet)?;

    if config.fail_on_affected && !result.targets.is_empty() {
        return Ok(exit_codes::AFFECTED_FOUND);
    }
    Ok(exit_codes::SUCCESS)
}
