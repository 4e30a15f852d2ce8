//! State-name extraction from changed file paths.
//!
//! The version-control collaborator reports the paths touched by the last
//! commit as a newline-separated block. Each path contributes at most one
//! candidate state name: its top-level directory, or for a root-level
//! `.sls` file, the filename stem. The match is anchored to the start of
//! each line so a path appearing mid-token never produces a spurious name.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Anchored at line start: the shortest non-whitespace prefix terminated
/// by a path separator or a final `.sls` suffix. The stem rule applies to
/// root-level files only; directory-prefixed paths always yield the top
/// directory name.
static STATE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([^/\s]+?)(?:/|\.sls$)").expect("static regex"));

/// Extract the set of candidate state names from a changed-path block.
///
/// Lines with neither a separator nor a `.sls` suffix (e.g. `README.md`)
/// yield nothing. Duplicates collapse into the set.
#[must_use]
pub fn extract_state_names(changed_paths: &str) -> BTreeSet<String> {
    STATE_NAME
        .captures_iter(changed_paths)
        .map(|caps| caps[1].to_string())
        .collect()
}
