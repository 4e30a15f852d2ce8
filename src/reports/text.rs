//! Plain-text rendering for shell pipelines.

use crate::diff::TopDiff;
use crate::pipeline::AffectedResult;

/// Affected identifiers, one per line, nothing else.
pub(super) fn render_affected(result: &AffectedResult) -> String {
    result
        .targets
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Diff summary with one prefixed line per key:
/// `+` added, `-` removed, `~` changed, `=` unchanged.
///
/// Changed keys are followed by indented `+`/`-` lines for the state
/// entries added to and removed from that record's list.
pub(super) fn render_diff(diff: &TopDiff) -> String {
    let mut lines = Vec::new();
    for key in &diff.added {
        lines.push(format!("+ {key}"));
    }
    for key in &diff.removed {
        lines.push(format!("- {key}"));
    }
    for key in &diff.changed {
        lines.push(format!("~ {key}"));
        if let Some(delta) = diff.changed_records.get(key) {
            for entry in &delta.added {
                lines.push(format!("  + {entry}"));
            }
            for entry in &delta.removed {
                lines.push(format!("  - {entry}"));
            }
        }
    }
    for key in &diff.unchanged {
        lines.push(format!("= {key}"));
    }
    lines.join("\n")
}

pub(super) fn render_states(states: &[&String]) -> String {
    states
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
