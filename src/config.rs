//! Run configuration.
//!
//! Defaults mirror the `TOP_FILE_NAME` and `SALT_ENVIRONMENT` environment
//! variables honored by the CLI. The core performs no validation beyond
//! these defaults; callers override them as plain values.

use crate::reports::ReportFormat;
use std::path::PathBuf;

/// Default top document file name.
pub const DEFAULT_TOP_FILE: &str = "top.sls";

/// Default Salt environment selector.
pub const DEFAULT_ENVIRONMENT: &str = "base";

/// Core inputs for one affected-target computation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Top document file name, relative to the repository root.
    pub top_file: String,
    /// Environment selector within the top document.
    pub environment: String,
    /// Repository directory; current working directory when absent.
    pub repo: Option<PathBuf>,
    /// Literal substituted for every `*` in the final identifiers.
    pub replace_asterisks: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            top_file: DEFAULT_TOP_FILE.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            repo: None,
            replace_asterisks: None,
        }
    }
}

impl RunConfig {
    /// Filesystem path of the working-tree top document.
    #[must_use]
    pub fn top_file_path(&self) -> PathBuf {
        match &self.repo {
            Some(dir) => dir.join(&self.top_file),
            None => PathBuf::from(&self.top_file),
        }
    }
}

/// Where and how rendered output is written.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Rendering format.
    pub format: ReportFormat,
    /// Output file path; stdout when absent.
    pub file: Option<PathBuf>,
}

/// Full configuration for the `affected` command.
#[derive(Debug, Clone)]
pub struct AffectedConfig {
    pub run: RunConfig,
    pub output: OutputConfig,
    /// Exit non-zero when any target is affected (CI gate).
    pub fail_on_affected: bool,
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RunConfig::default();
        assert_eq!(config.top_file, "top.sls");
        assert_eq!(config.environment, "base");
    }

    #[test]
    fn top_file_path_joins_repo_dir() {
        let config = RunConfig {
            repo: Some(PathBuf::from("/srv/salt")),
            ..RunConfig::default()
        };
        assert_eq!(config.top_file_path(), PathBuf::from("/srv/salt/top.sls"));
    }
}
