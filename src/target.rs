//! Target-key classification and normalization.
//!
//! Top-document keys select hosts in two syntactically distinct ways:
//! directly by name or pattern (possibly comma-separated), or indirectly by
//! grain attribute (`os:CentOS`). Classification is kept separate from the
//! matching logic so it can be tested on its own.

use std::collections::BTreeSet;

/// Classification of a raw target key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKeyKind<'a> {
    /// Addressable host names or patterns, comma-expanded.
    Nodes(Vec<&'a str>),
    /// Attribute selector: matches by grain value, not by host name.
    /// Never contributes addressable target identifiers.
    Grain { grain: &'a str, value: &'a str },
}

/// Classify a raw target key by its syntax.
///
/// Any key containing `:` is a grain-match expression; everything else is
/// one or more addressable node patterns.
#[must_use]
pub fn classify_target_key(key: &str) -> TargetKeyKind<'_> {
    match key.split_once(':') {
        Some((grain, value)) => TargetKeyKind::Grain { grain, value },
        None => TargetKeyKind::Nodes(expand_target_key(key)),
    }
}

/// Split a comma-separated target key into atomic identifiers.
///
/// Wildcards are preserved, not expanded. Surrounding whitespace is
/// trimmed and empty fragments are dropped.
#[must_use]
pub fn expand_target_key(key: &str) -> Vec<&str> {
    key.split(',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Comma-expand every key in a set, collapsing duplicates.
///
/// Applied to the differ's added/changed key sets before they are merged
/// into the final result.
#[must_use]
pub fn expand_target_keys(keys: &BTreeSet<String>) -> BTreeSet<String> {
    keys.iter()
        .flat_map(|key| expand_target_key(key))
        .map(str::to_string)
        .collect()
}
