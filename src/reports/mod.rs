//! Report rendering for affected-target results.
//!
//! Three output formats:
//! - YAML: block-list structured text (default, mirrors the top file style)
//! - JSON: compact record format for programmatic consumers
//! - Text: plain newline-separated identifiers for shell pipelines
//!
//! Format selection and the asterisk-substitution option are caller
//! configuration; nothing here feeds back into the core computation.

mod json;
mod text;
mod yaml;

use crate::config::RunConfig;
use crate::diff::TopDiff;
use crate::pipeline::AffectedResult;
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during report rendering
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum ReportFormat {
    /// Block-list structured text
    #[default]
    Yaml,
    /// Structured JSON output
    Json,
    /// Plain newline-separated identifiers
    Text,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Yaml => write!(f, "yaml"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Text => write!(f, "text"),
        }
    }
}

/// Report metadata shared by the structured formats
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub tool: String,
    pub version: String,
    pub generated_at: String,
    pub top_file: String,
    pub environment: String,
    pub top_file_changed: bool,
}

impl ReportMetadata {
    fn new(config: &RunConfig, top_file_changed: bool) -> Self {
        Self {
            tool: "topdiff".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            top_file: config.top_file.clone(),
            environment: config.environment.clone(),
            top_file_changed,
        }
    }
}

/// Full affected-target report for the structured formats
#[derive(Debug, Clone, Serialize)]
pub struct AffectedReport {
    pub metadata: ReportMetadata,
    /// Affected target identifiers, sorted for stable output
    pub affected: Vec<String>,
    /// Candidate state names derived from the changed paths
    pub states: Vec<String>,
    /// Record-level diff diagnostics
    pub diff: TopDiff,
}

impl AffectedReport {
    /// Build a report from a pipeline result.
    #[must_use]
    pub fn new(result: &AffectedResult, config: &RunConfig) -> Self {
        Self {
            metadata: ReportMetadata::new(config, result.top_file_changed),
            affected: result.targets.iter().cloned().collect(),
            states: result.states.iter().cloned().collect(),
            diff: result.diff.clone(),
        }
    }
}

/// Render an affected-target result in the requested format.
pub fn render_affected(
    result: &AffectedResult,
    config: &RunConfig,
    format: ReportFormat,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Yaml => yaml::render_affected(&AffectedReport::new(result, config)),
        ReportFormat::Json => json::render_affected(&AffectedReport::new(result, config)),
        ReportFormat::Text => Ok(text::render_affected(result)),
    }
}

/// Render a top-document diff in the requested format.
pub fn render_diff(diff: &TopDiff, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Yaml => yaml::render_diff(diff),
        ReportFormat::Json => json::render_diff(diff),
        ReportFormat::Text => Ok(text::render_diff(diff)),
    }
}

/// Render a candidate state-name set in the requested format.
pub fn render_states(
    states: &BTreeSet<String>,
    format: ReportFormat,
) -> Result<String, ReportError> {
    let sorted: Vec<&String> = states.iter().collect();
    match format {
        ReportFormat::Yaml => yaml::render_states(&sorted),
        ReportFormat::Json => json::render_states(&sorted),
        ReportFormat::Text => Ok(text::render_states(&sorted)),
    }
}
