//! State-to-target matching.
//!
//! Finds every target whose assigned state list references at least one
//! candidate state name, matching on the first dot-segment of each
//! reference. Grain-match keys select by attribute, not by addressable
//! host, and are skipped entirely.

use crate::model::TargetMap;
use crate::target::{classify_target_key, expand_target_key, TargetKeyKind};
use std::collections::BTreeSet;

/// Collect the atomic target identifiers whose state list references any
/// candidate state name.
///
/// A key with zero matching entries contributes nothing; directives never
/// match. The result is a set, so map iteration order is irrelevant.
#[must_use]
pub fn match_states(targets: &TargetMap, candidates: &BTreeSet<String>) -> BTreeSet<String> {
    let mut matched = BTreeSet::new();
    if candidates.is_empty() {
        return matched;
    }

    for (key, states) in targets {
        if matches!(classify_target_key(key), TargetKeyKind::Grain { .. }) {
            continue;
        }
        let references_candidate = states.iter().any(|entry| {
            entry
                .module_name()
                .is_some_and(|module| candidates.contains(module))
        });
        if references_candidate {
            matched.extend(expand_target_key(key).into_iter().map(str::to_string));
        }
    }

    matched
}
