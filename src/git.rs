//! Version-control collaborator.
//!
//! The pipeline needs two reads from the repository: the list of paths
//! touched by the most recent commit, and the top file's contents as of
//! that commit's parent. Both go through the [`RevisionReader`] trait so
//! tests can substitute an in-memory fake for the `git` subprocess.

use crate::error::{Result, RevisionErrorKind, TopDiffError};
use std::path::PathBuf;
use std::process::Command;

/// Reads change information and historical file contents from version
/// control. Called at most a small fixed number of times per run.
pub trait RevisionReader {
    /// Newline-separated, repository-relative paths touched by the most
    /// recent commit.
    fn changed_files(&self) -> Result<String>;

    /// File contents as of the parent of the most recent commit.
    fn read_at_parent(&self, path: &str) -> Result<Vec<u8>>;
}

/// `RevisionReader` backed by the `git` command-line tool.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    repo_dir: Option<PathBuf>,
}

impl GitCli {
    /// Reader operating in the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self { repo_dir: None }
    }

    /// Reader operating in an explicit repository directory.
    #[must_use]
    pub fn with_repo_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: Some(dir.into()),
        }
    }

    /// Build a reader from an optional repository directory.
    #[must_use]
    pub fn from_option(dir: Option<PathBuf>) -> Self {
        Self { repo_dir: dir }
    }

    fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        let command_line = format!("git {}", args.join(" "));

        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.repo_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|err| {
            TopDiffError::revision(command_line.clone(), RevisionErrorKind::Spawn(err))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // git reports a missing parent as an unknown/bad revision.
            let kind = if stderr.contains("unknown revision") || stderr.contains("bad revision") {
                RevisionErrorKind::NoParent
            } else {
                RevisionErrorKind::CommandFailed {
                    status: output.status.to_string(),
                    stderr,
                }
            };
            return Err(TopDiffError::revision(command_line, kind));
        }

        Ok(output.stdout)
    }
}

impl RevisionReader for GitCli {
    fn changed_files(&self) -> Result<String> {
        let stdout = self.run(&["diff", "--name-only", "HEAD^", "HEAD"])?;
        String::from_utf8(stdout).map_err(|_| {
            TopDiffError::revision(
                "git diff --name-only HEAD^ HEAD",
                RevisionErrorKind::NonUtf8Output,
            )
        })
    }

    fn read_at_parent(&self, path: &str) -> Result<Vec<u8>> {
        let spec = format!("HEAD^:{path}");
        self.run(&["show", &spec])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failure_surfaces_command_context() {
        // Point the subprocess at a directory that does not exist.
        let reader = GitCli::with_repo_dir("/nonexistent/topdiff-test-dir");
        let err = reader.changed_files().expect_err("must fail");
        let display = err.to_string();
        assert!(
            display.contains("git diff --name-only"),
            "should carry the failing command: {display}"
        );
    }
}
