//! **Change detection for Salt top files.**
//!
//! `topdiff` computes which deployment targets (host and group records in a
//! Salt `top.sls` mapping) are affected by the most recent commit to a
//! states repository, so a configuration-management pipeline can
//! re-converge only those hosts instead of the whole fleet.
//!
//! Two independent signals feed the result:
//!
//! 1. **Record diffing** — the working-tree top document is compared with
//!    the version at the parent of the last commit; added and changed
//!    target records are affected directly. The historical version is only
//!    fetched when the top file itself appears among the changed paths.
//! 2. **State matching** — state module names derived from the commit's
//!    changed file paths are cross-referenced against every target's
//!    assigned state list; a target referencing a changed module is
//!    affected indirectly.
//!
//! ## Core modules
//!
//! - [`extract`]: changed file paths → candidate state names
//! - [`diff`]: record-level top-document diffing
//! - [`target`]: target-key classification and comma expansion
//! - [`matcher`]: candidate states → referencing targets
//! - [`assemble`]: union, grain-match filtering, wildcard substitution
//! - [`pipeline`]: orchestration of the above plus the collaborators in
//!   [`git`] and [`parsers`]
//!
//! ## Example
//!
//! ```no_run
//! use topdiff::config::RunConfig;
//! use topdiff::git::GitCli;
//! use topdiff::pipeline::compute_affected;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RunConfig::default();
//!     let reader = GitCli::new();
//!     let result = compute_affected(&reader, &config)?;
//!
//!     for target in &result.targets {
//!         println!("{target}");
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod assemble;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod git;
pub mod matcher;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod target;

// Re-export main types for convenience
pub use assemble::assemble;
pub use config::{AffectedConfig, OutputConfig, RunConfig};
pub use diff::{diff_target_maps, RecordDelta, TopDiff};
pub use error::{Result, RevisionErrorKind, TopDiffError};
pub use extract::extract_state_names;
pub use git::{GitCli, RevisionReader};
pub use matcher::match_states;
pub use model::{StateEntry, StateList, TargetMap, TopDocument};
pub use pipeline::{compute_affected, AffectedResult};
pub use reports::{AffectedReport, ReportFormat};
pub use target::{classify_target_key, expand_target_key, TargetKeyKind};
