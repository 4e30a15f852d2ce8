//! Pipeline orchestration.
//!
//! Composes the stages into one batch computation: extract candidate state
//! names from the last commit's changed paths, load the working-tree top
//! document, optionally fetch and diff the parent revision, match candidate
//! states against target assignments, and assemble the final affected set.
//!
//! The previous-revision fetch is gated: when the top file's path is not
//! among the last commit's changed paths, the parent version is never
//! requested and the added/changed sets stay empty.

use crate::assemble::assemble;
use crate::config::RunConfig;
use crate::diff::{diff_target_maps, TopDiff};
use crate::error::Result;
use crate::extract::extract_state_names;
use crate::git::RevisionReader;
use crate::matcher::match_states;
use crate::parsers::{load_top_file, parse_top_document, select_environment};
use crate::target::expand_target_keys;
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Outcome of one affected-target computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffectedResult {
    /// Final deduplicated set of affected target identifiers.
    pub targets: BTreeSet<String>,
    /// Record-level diff of the top document (empty when the top file was
    /// untouched by the last commit).
    pub diff: TopDiff,
    /// Candidate state names derived from the changed paths.
    pub states: BTreeSet<String>,
    /// Whether the top document itself was touched by the last commit.
    pub top_file_changed: bool,
}

/// Run the full affected-target pipeline.
pub fn compute_affected(
    reader: &dyn RevisionReader,
    config: &RunConfig,
) -> Result<AffectedResult> {
    let changed_paths = reader.changed_files()?;
    let states = extract_state_names(&changed_paths);
    tracing::debug!(candidates = states.len(), "extracted candidate state names");

    let top_path = config.top_file_path();
    let current_doc = load_top_file(&top_path)?;
    let current = select_environment(&current_doc, &config.environment, &config.top_file)?;

    let top_file_changed = changed_paths
        .lines()
        .any(|line| line.trim() == config.top_file);
    let diff = if top_file_changed {
        let previous_spec = format!("HEAD^:{}", config.top_file);
        let previous_bytes = reader.read_at_parent(&config.top_file)?;
        let previous_doc = parse_top_document(&previous_bytes)?;
        let previous = select_environment(&previous_doc, &config.environment, &previous_spec)?;
        diff_target_maps(current, previous)
    } else {
        tracing::debug!("top file untouched by last commit; skipping historical diff");
        TopDiff::default()
    };

    let matched = match_states(current, &states);
    let added = expand_target_keys(&diff.added);
    let changed = expand_target_keys(&diff.changed);
    let targets = assemble(
        &added,
        &changed,
        &matched,
        config.replace_asterisks.as_deref(),
    );

    tracing::info!(
        affected = targets.len(),
        added = diff.added.len(),
        changed = diff.changed.len(),
        matched = matched.len(),
        "affected-target computation complete"
    );

    Ok(AffectedResult {
        targets,
        diff,
        states,
        top_file_changed,
    })
}

/// Diff the working-tree top document against the parent revision,
/// unconditionally. Used by the diagnostic `diff` command.
pub fn compute_top_diff(reader: &dyn RevisionReader, config: &RunConfig) -> Result<TopDiff> {
    let top_path = config.top_file_path();
    let current_doc = load_top_file(&top_path)?;
    let current = select_environment(&current_doc, &config.environment, &config.top_file)?;

    let previous_spec = format!("HEAD^:{}", config.top_file);
    let previous_bytes = reader.read_at_parent(&config.top_file)?;
    let previous_doc = parse_top_document(&previous_bytes)?;
    let previous = select_environment(&previous_doc, &config.environment, &previous_spec)?;

    Ok(diff_target_maps(current, previous))
}

/// Extract candidate state names from the last commit. Used by the
/// diagnostic `states` command.
pub fn compute_changed_states(reader: &dyn RevisionReader) -> Result<BTreeSet<String>> {
    let changed_paths = reader.changed_files()?;
    Ok(extract_state_names(&changed_paths))
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no affected targets (or `--fail-on-affected` not set)
    pub const SUCCESS: i32 = 0;
    /// Affected targets were found and `--fail-on-affected` was set
    pub const AFFECTED_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Target for rendered output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }
}

/// Write rendered output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> anyhow::Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("report written to {}", path.display());
            }
            Ok(())
        }
    }
}
