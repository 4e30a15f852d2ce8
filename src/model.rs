//! Data model for Salt top documents.
//!
//! A top document is a two-level structure: environment name → target map,
//! where each target key (a hostname, wildcard pattern, comma-separated
//! host list, or `grain:value` expression) is assigned an ordered list of
//! state entries. Documents are read-only snapshots loaded once per run;
//! nothing here mutates after deserialization.
//!
//! Insertion order matters for diffing semantics only insofar as state
//! lists compare element-by-element, so both map levels use [`IndexMap`]
//! to preserve the document layout as written.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered list of state entries assigned to one target key.
pub type StateList = Vec<StateEntry>;

/// Mapping from target key to its assigned state list, for one environment.
pub type TargetMap = IndexMap<String, StateList>;

/// One entry in a target's state list.
///
/// Entries come in two structural shapes: a bare string referencing a state
/// by dot-separated path (`app.server`), or a single-entry mapping carrying
/// a directive such as a match-type override (`- match: grain`). The two
/// are distinguished by shape, never by content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateEntry {
    /// Dot-separated state reference, e.g. `app.server`.
    Reference(String),
    /// Non-reference entry, e.g. `{match: grain}`.
    Directive(IndexMap<String, serde_yaml::Value>),
}

impl StateEntry {
    /// First dot-segment of a state reference, which names the owning
    /// state module (`app.server` → `app`). Directives have no module.
    #[must_use]
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Self::Reference(name) => name.split('.').next(),
            Self::Directive(_) => None,
        }
    }

    /// Whether this entry is a directive rather than a state reference.
    #[must_use]
    pub fn is_directive(&self) -> bool {
        matches!(self, Self::Directive(_))
    }
}

impl std::fmt::Display for StateEntry {
    /// References display as their path; directives as a compact
    /// `{key: value}` mapping for diagnostic output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference(name) => f.write_str(name),
            Self::Directive(map) => {
                write!(f, "{{")?;
                for (position, (key, value)) in map.iter().enumerate() {
                    if position > 0 {
                        write!(f, ", ")?;
                    }
                    let rendered = serde_yaml::to_string(value)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_else(|_| "?".to_string());
                    write!(f, "{key}: {rendered}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A parsed top document: environment name → target map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopDocument(pub IndexMap<String, TargetMap>);

impl TopDocument {
    /// Look up the target map for an environment.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&TargetMap> {
        self.0.get(name)
    }

    /// Iterate over the environment names present in the document.
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
