//! Final change-set assembly.
//!
//! Combines the normalized differ output with the matcher output into one
//! deduplicated set of affected target identifiers. A defensive re-filter
//! drops anything still containing `:` so grain-match artifacts can never
//! leak through, and an optional literal substitution replaces wildcard
//! characters for callers whose downstream tooling cannot handle globs.

use std::collections::BTreeSet;

/// Assemble the final affected-target set.
///
/// Takes the comma-expanded added and changed key sets plus the matcher
/// result, unions them, filters grain-match leakage, and applies the
/// optional `*` substitution to every identifier. The result carries no
/// duplicates; ordering comes from the set, callers sort for display.
#[must_use]
pub fn assemble(
    added: &BTreeSet<String>,
    changed: &BTreeSet<String>,
    matched: &BTreeSet<String>,
    replace_asterisks: Option<&str>,
) -> BTreeSet<String> {
    added
        .iter()
        .chain(changed)
        .chain(matched)
        .filter(|identifier| !identifier.contains(':'))
        .map(|identifier| match replace_asterisks {
            Some(literal) => identifier.replace('*', literal),
            None => identifier.clone(),
        })
        .collect()
}
