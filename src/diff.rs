//! Top-document diffing.
//!
//! Compares two versions of one environment's target map and partitions
//! the key union into added, removed, changed, and unchanged sets. State
//! lists compare by structural deep equality: entry order is significant,
//! and a reference never equals a directive.

use crate::model::{StateList, TargetMap};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// State-level breakdown for one changed record: which entries were added
/// to and removed from its state list between the two versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordDelta {
    /// Entries present in the current list but not the previous one.
    pub added: StateList,
    /// Entries present in the previous list but not the current one.
    pub removed: StateList,
}

impl RecordDelta {
    /// Compute the entry-level difference between two state lists.
    ///
    /// Membership, not position: an entry counts as added or removed only
    /// when it is absent from the other list entirely, so a pure reorder
    /// yields an empty delta even though the record itself is changed.
    /// Duplicates collapse; list order is preserved.
    #[must_use]
    pub fn between(current: &StateList, previous: &StateList) -> Self {
        Self {
            added: one_sided(current, previous),
            removed: one_sided(previous, current),
        }
    }

    /// Whether no entry was added or removed (e.g. a pure reorder).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Entries of `from` absent from `other`, deduplicated, in `from` order.
fn one_sided(from: &StateList, other: &StateList) -> StateList {
    let mut result = StateList::new();
    for entry in from {
        if !other.contains(entry) && !result.contains(entry) {
            result.push(entry.clone());
        }
    }
    result
}

/// Four-way partition of the key union of two target maps.
///
/// `unchanged` is reported for diagnostics only; the affected-target
/// computation consumes `added` and `changed`. Every changed key also
/// carries a [`RecordDelta`] describing what moved inside its state list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopDiff {
    /// Keys present in current but not previous.
    pub added: BTreeSet<String>,
    /// Keys present in previous but not current.
    pub removed: BTreeSet<String>,
    /// Keys present in both whose state lists differ.
    pub changed: BTreeSet<String>,
    /// Keys present in both with equal state lists.
    pub unchanged: BTreeSet<String>,
    /// Per-changed-key state-list breakdown, keyed like `changed`.
    pub changed_records: BTreeMap<String, RecordDelta>,
}

impl TopDiff {
    /// Whether any record was added, removed, or changed.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty())
    }
}

/// Diff two versions of a target map for the same environment.
pub fn diff_target_maps(current: &TargetMap, previous: &TargetMap) -> TopDiff {
    let mut diff = TopDiff::default();

    for (key, states) in current {
        match previous.get(key) {
            None => {
                diff.added.insert(key.clone());
            }
            Some(previous_states) if previous_states == states => {
                diff.unchanged.insert(key.clone());
            }
            Some(previous_states) => {
                diff.changed.insert(key.clone());
                diff.changed_records
                    .insert(key.clone(), RecordDelta::between(states, previous_states));
            }
        }
    }

    for key in previous.keys() {
        if !current.contains_key(key) {
            diff.removed.insert(key.clone());
        }
    }

    diff
}
