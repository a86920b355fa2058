// tests/release_workflow_test.rs
//
// End-to-end runs against real git repositories in scratch directories.

use git2::{Repository, Signature};
use semantic_versioner::boundary::BoundaryWarning;
use semantic_versioner::cli::{ReleaseMode, ReleaseOrchestrator, ReleaseOutcome, ReleaseRequest};
use semantic_versioner::domain::BranchPolicyTable;
use semantic_versioner::git::Git2Repository;
use semantic_versioner::store::{FsReleaseStore, ReleaseStore};
use tempfile::TempDir;

fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    (dir, repo)
}

fn commit(repo: &Repository, message: &str) -> git2::Oid {
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

fn store_in(dir: &TempDir) -> FsReleaseStore {
    FsReleaseStore::new(dir.path().join("VERSION"), dir.path().join("CHANGELOG.md"))
}

#[test]
fn test_release_then_rerun_is_noop() {
    let (dir, repo) = init_repo();
    commit(&repo, "feat(auth)!: add SSO");
    commit(&repo, "fix: handle empty token");
    commit(&repo, "not a conventional message");

    let git = Git2Repository::open(dir.path()).unwrap();
    let store = store_in(&dir);
    let policies = BranchPolicyTable::default();
    let orchestrator = ReleaseOrchestrator::new(&git, &store, &git, &policies);
    let request = ReleaseRequest::new("main", ReleaseMode::Release { publish: false });

    let outcome = orchestrator.run(&request).unwrap();
    match &outcome {
        ReleaseOutcome::Tagged { plan, tag, .. } => {
            assert_eq!(tag, "v1.0.0");
            assert_eq!(plan.commits.len(), 3);
            assert!(plan.changelog_section.contains("### ⚠ BREAKING CHANGES\n- add SSO"));
        }
        other => panic!("expected tagged release, got {:?}", other),
    }

    assert_eq!(store.read_version().unwrap().as_deref(), Some("1.0.0"));
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("chore(release): v1.0.0"));
    let tag = repo
        .find_reference("refs/tags/v1.0.0")
        .unwrap()
        .peel_to_tag()
        .unwrap();
    assert_eq!(tag.message(), Some("Version 1.0.0"));
    assert_eq!(tag.target_id(), head.id());

    let changelog = store.read_changelog().unwrap();
    let second = orchestrator.run(&request).unwrap();
    assert_eq!(
        second,
        ReleaseOutcome::NoOp(BoundaryWarning::NoNewCommits {
            since_tag: "v1.0.0".to_string()
        })
    );
    assert_eq!(store.read_changelog().unwrap(), changelog);
}

#[test]
fn test_followup_release_prepends_section() {
    let (dir, repo) = init_repo();
    commit(&repo, "feat: first feature");

    let git = Git2Repository::open(dir.path()).unwrap();
    let store = store_in(&dir);
    let policies = BranchPolicyTable::default();
    let orchestrator = ReleaseOrchestrator::new(&git, &store, &git, &policies);
    let request = ReleaseRequest::new("main", ReleaseMode::Release { publish: false });

    orchestrator.run(&request).unwrap();
    commit(&repo, "fix(parser): trailing comma");
    let outcome = orchestrator.run(&request).unwrap();

    assert!(matches!(outcome, ReleaseOutcome::Tagged { ref tag, .. } if tag == "v0.2.1"));
    let changelog = store.read_changelog().unwrap().unwrap();
    let newer = changelog.find("## [0.2.1]").unwrap();
    let older = changelog.find("## [0.2.0]").unwrap();
    assert!(changelog.starts_with("# Changelog\n\n## [0.2.1]"));
    assert!(newer < older);
    assert!(changelog.contains("- **parser:** trailing comma ("));
    assert_eq!(changelog.matches("# Changelog").count(), 1);
}

#[test]
fn test_prerelease_branch_uses_head_sha() {
    let (dir, repo) = init_repo();
    let head = commit(&repo, "fix: typo");

    let git = Git2Repository::open(dir.path()).unwrap();
    let store = store_in(&dir);
    store.write_version("1.3.0-dev.4").unwrap();
    let policies = BranchPolicyTable::default();

    let outcome = ReleaseOrchestrator::new(&git, &store, &git, &policies)
        .run(&ReleaseRequest::new("develop", ReleaseMode::DryRun))
        .unwrap();

    match outcome {
        ReleaseOutcome::DryRun(plan) => {
            let text = plan.new_version.to_string();
            assert!(text.starts_with("1.3.1-dev.5+sha."));
            let sha = text.trim_start_matches("1.3.1-dev.5+sha.");
            assert!(head.to_string().starts_with(sha));
            assert!(plan.changelog_section.contains("(Pre-release)"));
        }
        other => panic!("expected dry run, got {:?}", other),
    }
    assert_eq!(store.read_version().unwrap().as_deref(), Some("1.3.0-dev.4"));
}

#[test]
fn test_malformed_version_file_is_fatal() {
    let (dir, repo) = init_repo();
    commit(&repo, "feat: anything");

    let git = Git2Repository::open(dir.path()).unwrap();
    let store = store_in(&dir);
    store.write_version("version one").unwrap();
    let policies = BranchPolicyTable::default();

    let err = ReleaseOrchestrator::new(&git, &store, &git, &policies)
        .run(&ReleaseRequest::new("main", ReleaseMode::Update))
        .unwrap_err();

    assert!(err.is_malformed_version());
    assert_eq!(store.read_changelog().unwrap(), None);
}
