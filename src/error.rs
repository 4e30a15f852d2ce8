//! Unified error types for topdiff.
//!
//! Every failure aborts the run: collaborator calls are one-shot synchronous
//! reads, so transient and permanent failures are not distinguished and no
//! partial output is produced.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for topdiff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TopDiffError {
    /// The requested environment is absent from a loaded top document.
    /// No default environment is synthesized.
    #[error("environment '{environment}' not found in {document}")]
    MissingEnvironment {
        environment: String,
        document: String,
    },

    /// Structured-text input did not parse into the expected
    /// mapping-of-lists shape. No best-effort recovery is attempted.
    #[error("malformed top document: {context}")]
    Malformed {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The version-control collaborator could not produce a revision.
    #[error("revision lookup failed: {context}")]
    Revision {
        context: String,
        #[source]
        source: RevisionErrorKind,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Specific revision-lookup error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RevisionErrorKind {
    #[error("failed to launch git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    /// The parent of the most recent commit does not exist (root commit
    /// or shallow clone). There is no single-commit fallback.
    #[error("no parent revision available (root commit or shallow clone)")]
    NoParent,

    #[error("command output was not valid UTF-8")]
    NonUtf8Output,
}

/// Convenient Result type for topdiff operations
pub type Result<T> = std::result::Result<T, TopDiffError>;

impl TopDiffError {
    /// Create a missing-environment error
    pub fn missing_environment(
        environment: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        Self::MissingEnvironment {
            environment: environment.into(),
            document: document.into(),
        }
    }

    /// Create a malformed-document error with context
    pub fn malformed(context: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::Malformed {
            context: context.into(),
            source,
        }
    }

    /// Create a revision error with the failing command as context
    pub fn revision(context: impl Into<String>, source: RevisionErrorKind) -> Self {
        Self::Revision {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for TopDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
