//! Pipeline integration tests.
//!
//! These tests exercise the full extract → load → diff → match → assemble
//! pipeline against an in-memory revision reader and tempfile-backed top
//! documents, including the error paths.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::path::PathBuf;

use topdiff::config::RunConfig;
use topdiff::error::{RevisionErrorKind, TopDiffError};
use topdiff::git::RevisionReader;
use topdiff::model::StateEntry;
use topdiff::pipeline::compute_affected;

// ============================================================================
// Test fixtures
// ============================================================================

/// In-memory stand-in for the git collaborator.
struct FakeRepo {
    changed: String,
    parent_files: HashMap<String, Vec<u8>>,
    parent_reads: RefCell<usize>,
}

impl FakeRepo {
    fn new(changed: &str) -> Self {
        Self {
            changed: changed.to_string(),
            parent_files: HashMap::new(),
            parent_reads: RefCell::new(0),
        }
    }

    fn with_parent_file(mut self, path: &str, contents: &str) -> Self {
        self.parent_files
            .insert(path.to_string(), contents.as_bytes().to_vec());
        self
    }

    fn parent_reads(&self) -> usize {
        *self.parent_reads.borrow()
    }
}

impl RevisionReader for FakeRepo {
    fn changed_files(&self) -> topdiff::Result<String> {
        Ok(self.changed.clone())
    }

    fn read_at_parent(&self, path: &str) -> topdiff::Result<Vec<u8>> {
        *self.parent_reads.borrow_mut() += 1;
        self.parent_files.get(path).cloned().ok_or_else(|| {
            TopDiffError::revision(format!("git show HEAD^:{path}"), RevisionErrorKind::NoParent)
        })
    }
}

/// Write a working-tree top file into a temp repo dir and return the config.
fn repo_with_top_file(contents: &str) -> (tempfile::TempDir, RunConfig) {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("top.sls"), contents).expect("write top.sls");
    let config = RunConfig {
        repo: Some(dir.path().to_path_buf()),
        ..RunConfig::default()
    };
    (dir, config)
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ============================================================================
// Happy-path pipeline behavior
// ============================================================================

mod affected {
    use super::*;

    #[test]
    fn added_record_is_affected() {
        let (_dir, config) = repo_with_top_file("base:\n  'web*':\n    - app.server\n");
        let repo = FakeRepo::new("top.sls\n").with_parent_file("top.sls", "base: {}\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert!(result.top_file_changed);
        assert_eq!(result.diff.added, set(&["web*"]));
        assert_eq!(result.targets, set(&["web*"]));
    }

    #[test]
    fn changed_record_expands_comma_separated_key() {
        let (_dir, config) = repo_with_top_file(
            "base:\n  web1,web2:\n    - app.server\n    - monitoring.agent\n",
        );
        let repo = FakeRepo::new("top.sls\n")
            .with_parent_file("top.sls", "base:\n  web1,web2:\n    - app.server\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert_eq!(result.diff.changed, set(&["web1,web2"]));
        assert_eq!(result.targets, set(&["web1", "web2"]));

        let delta = &result.diff.changed_records["web1,web2"];
        assert_eq!(
            delta.added,
            vec![StateEntry::Reference("monitoring.agent".to_string())]
        );
        assert!(delta.removed.is_empty());
    }

    #[test]
    fn state_match_contributes_without_top_change() {
        let (_dir, config) = repo_with_top_file("base:\n  db1,db2:\n    - data.mysql\n");
        let repo = FakeRepo::new("data/mysql.sls\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert!(!result.top_file_changed);
        assert!(!result.diff.has_changes());
        assert_eq!(result.states, set(&["data"]));
        assert_eq!(result.targets, set(&["db1", "db2"]));
    }

    #[test]
    fn grain_targets_are_excluded_everywhere() {
        let (_dir, config) = repo_with_top_file("base:\n  'os:CentOS':\n    - app.server\n");
        let repo = FakeRepo::new("app/init.sls\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert_eq!(result.states, set(&["app"]));
        assert!(result.targets.is_empty());
    }

    #[test]
    fn asterisk_substitution_applies_to_final_identifiers() {
        let (_dir, mut config) = repo_with_top_file("base:\n  'web*':\n    - app.server\n");
        config.replace_asterisks = Some("X".to_string());
        let repo = FakeRepo::new("app/init.sls\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert_eq!(result.targets, set(&["webX"]));
    }

    #[test]
    fn removed_records_are_diagnostic_only() {
        let (_dir, config) = repo_with_top_file("base: {}\n");
        let repo = FakeRepo::new("top.sls\n")
            .with_parent_file("top.sls", "base:\n  gone1:\n    - app.server\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert_eq!(result.diff.removed, set(&["gone1"]));
        assert!(result.targets.is_empty());
    }

    #[test]
    fn empty_change_set_is_a_valid_empty_result() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        let repo = FakeRepo::new("");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert!(result.states.is_empty());
        assert!(result.targets.is_empty());
    }

    #[test]
    fn unrelated_root_files_affect_nothing() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        let repo = FakeRepo::new("README.md\nMakefile\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert!(result.states.is_empty());
        assert!(result.targets.is_empty());
    }
}

// ============================================================================
// Previous-revision gate
// ============================================================================

mod gate {
    use super::*;

    #[test]
    fn parent_revision_not_fetched_when_top_file_untouched() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        // No parent file registered: a fetch attempt would fail the run.
        let repo = FakeRepo::new("app/init.sls\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert_eq!(repo.parent_reads(), 0);
        assert!(!result.diff.has_changes());
        assert_eq!(result.targets, set(&["web1"]));
    }

    #[test]
    fn parent_revision_fetched_exactly_once_when_top_file_changed() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        let repo = FakeRepo::new("top.sls\n").with_parent_file("top.sls", "base: {}\n");

        compute_affected(&repo, &config).expect("pipeline succeeds");
        assert_eq!(repo.parent_reads(), 1);
    }

    #[test]
    fn custom_top_file_name_triggers_the_parent_fetch() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("overview.sls"), "base: {}\n").expect("write top file");
        let config = RunConfig {
            top_file: "overview.sls".to_string(),
            repo: Some(dir.path().to_path_buf()),
            ..RunConfig::default()
        };

        let repo = FakeRepo::new("overview.sls\n").with_parent_file("overview.sls", "base: {}\n");
        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert!(result.top_file_changed);
        assert_eq!(repo.parent_reads(), 1);
    }

    #[test]
    fn nested_top_file_path_gates_on_the_raw_changed_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("states")).expect("create states dir");
        std::fs::write(dir.path().join("states/overview.sls"), "base: {}\n")
            .expect("write top file");
        let config = RunConfig {
            top_file: "states/overview.sls".to_string(),
            repo: Some(dir.path().to_path_buf()),
            ..RunConfig::default()
        };

        let repo = FakeRepo::new("states/overview.sls\n")
            .with_parent_file("states/overview.sls", "base: {}\n");
        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert!(result.top_file_changed);
        assert_eq!(repo.parent_reads(), 1);
    }

    #[test]
    fn state_sharing_the_top_stem_does_not_trigger_the_parent_fetch() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        // A state directory named `top` is not the top file itself.
        let repo = FakeRepo::new("top/init.sls\n");

        let result = compute_affected(&repo, &config).expect("pipeline succeeds");
        assert!(!result.top_file_changed);
        assert_eq!(repo.parent_reads(), 0);
    }
}

// ============================================================================
// Error paths
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn missing_environment_in_current_document_is_fatal() {
        let (_dir, config) = repo_with_top_file("prod:\n  web1:\n    - app.server\n");
        let repo = FakeRepo::new("app/init.sls\n");

        let err = compute_affected(&repo, &config).expect_err("base absent");
        assert!(matches!(err, TopDiffError::MissingEnvironment { .. }));
    }

    #[test]
    fn missing_environment_in_previous_document_is_fatal() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        let repo = FakeRepo::new("top.sls\n")
            .with_parent_file("top.sls", "prod:\n  web1:\n    - app.server\n");

        let err = compute_affected(&repo, &config).expect_err("base absent in parent");
        assert!(matches!(err, TopDiffError::MissingEnvironment { .. }));
    }

    #[test]
    fn malformed_current_document_is_fatal() {
        let (_dir, config) = repo_with_top_file("base:\n  web1: not-a-list\n");
        let repo = FakeRepo::new("app/init.sls\n");

        let err = compute_affected(&repo, &config).expect_err("bad shape");
        assert!(matches!(err, TopDiffError::Malformed { .. }));
    }

    #[test]
    fn malformed_previous_document_is_fatal() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        let repo = FakeRepo::new("top.sls\n").with_parent_file("top.sls", "- just\n- a\n- list\n");

        let err = compute_affected(&repo, &config).expect_err("bad parent shape");
        assert!(matches!(err, TopDiffError::Malformed { .. }));
    }

    #[test]
    fn unavailable_parent_revision_is_fatal_when_needed() {
        let (_dir, config) = repo_with_top_file("base:\n  web1:\n    - app.server\n");
        // Top file changed but the fake has no parent content: NoParent.
        let repo = FakeRepo::new("top.sls\n");

        let err = compute_affected(&repo, &config).expect_err("no parent");
        assert!(matches!(
            err,
            TopDiffError::Revision {
                source: RevisionErrorKind::NoParent,
                ..
            }
        ));
    }

    #[test]
    fn missing_top_file_is_an_io_error() {
        let config = RunConfig {
            repo: Some(PathBuf::from("/nonexistent/topdiff-tests")),
            ..RunConfig::default()
        };
        let repo = FakeRepo::new("app/init.sls\n");

        let err = compute_affected(&repo, &config).expect_err("missing file");
        assert!(matches!(err, TopDiffError::Io { .. }));
    }
}
