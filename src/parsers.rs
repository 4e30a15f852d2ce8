//! Top-document loading.
//!
//! Deserializes the YAML top file into the [`TopDocument`] shape, either
//! from a local file (current working tree) or from a byte buffer produced
//! by the version-control collaborator (previous revision). Input that does
//! not parse into the mapping-of-lists shape is fatal; there is no partial
//! recovery.

use crate::error::{Result, TopDiffError};
use crate::model::{TargetMap, TopDocument};
use std::path::Path;

/// Load and parse the top document from a local file.
pub fn load_top_file(path: &Path) -> Result<TopDocument> {
    let bytes = std::fs::read(path).map_err(|err| TopDiffError::io(path, err))?;
    serde_yaml::from_slice(&bytes)
        .map_err(|err| TopDiffError::malformed(format!("failed to parse {}", path.display()), err))
}

/// Parse a top document from raw bytes (e.g. `git show` output).
pub fn parse_top_document(bytes: &[u8]) -> Result<TopDocument> {
    serde_yaml::from_slice(bytes).map_err(|err| {
        TopDiffError::malformed("expected a mapping of environments to target records", err)
    })
}

/// Select one environment's target map, failing if it is absent.
///
/// `document` names the source (file path or revision spec) for the error
/// message only.
pub fn select_environment<'doc>(
    doc: &'doc TopDocument,
    environment: &str,
    document: &str,
) -> Result<&'doc TargetMap> {
    doc.environment(environment)
        .ok_or_else(|| TopDiffError::missing_environment(environment, document))
}
