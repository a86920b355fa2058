use crate::domain::Commit;
use crate::error::{Result, VersionerError};
use crate::git::{CommitHistoryProvider, TagWriter};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Mock repository for testing without actual git operations
///
/// History is a linear list of commits. A tag remembers how many commits
/// existed when it was created, so `commits_since` returns everything after
/// that point. Release commits made through [`TagWriter::commit_paths`] are
/// appended to the history like real commits.
pub struct MockRepository {
    commits: RefCell<Vec<Commit>>,
    tags: RefCell<HashMap<String, usize>>,
    release_commits: RefCell<Vec<(Vec<PathBuf>, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: RefCell::new(Vec::new()),
            tags: RefCell::new(HashMap::new()),
            release_commits: RefCell::new(Vec::new()),
        }
    }

    /// Append a commit with the given message; the hash is derived from its position
    pub fn add_commit(&self, message: impl Into<String>) {
        let mut commits = self.commits.borrow_mut();
        let hash = format!("{:040x}", commits.len() + 1);
        commits.push(Commit::new(hash, message, "2025-01-01"));
    }

    /// Tag the current end of history
    pub fn add_tag(&self, name: impl Into<String>) {
        let len = self.commits.borrow().len();
        self.tags.borrow_mut().insert(name.into(), len);
    }

    /// Names of all tags, sorted
    pub fn tags(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tags.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Paths and messages of every release commit made so far
    pub fn release_commits(&self) -> Vec<(Vec<PathBuf>, String)> {
        self.release_commits.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitHistoryProvider for MockRepository {
    fn commits_since(&self, since: Option<&str>) -> Result<Vec<Commit>> {
        let start = since
            .and_then(|tag| self.tags.borrow().get(tag).copied())
            .unwrap_or(0);
        Ok(self.commits.borrow()[start..].to_vec())
    }

    fn head_short_sha(&self) -> Result<String> {
        self.commits
            .borrow()
            .last()
            .map(|c| c.short_hash().to_string())
            .ok_or_else(|| git2::Error::from_str("reference 'refs/heads/main' not found").into())
    }
}

impl TagWriter for MockRepository {
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<()> {
        self.release_commits
            .borrow_mut()
            .push((paths.to_vec(), message.to_string()));
        self.add_commit(message);
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, _message: &str) -> Result<()> {
        if self.tags.borrow().contains_key(name) {
            return Err(VersionerError::tag(format!("Tag '{}' already exists", name)));
        }
        self.add_tag(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_history() {
        let repo = MockRepository::new();
        repo.add_commit("feat: first");
        repo.add_commit("fix: second");

        let commits = repo.commits_since(None).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "feat: first");
        assert_eq!(repo.head_short_sha().unwrap(), "0000000");
    }

    #[test]
    fn test_mock_repository_tags() {
        let repo = MockRepository::new();
        repo.add_commit("feat: first");
        repo.add_tag("v1.0.0");
        repo.add_commit("fix: second");

        let commits = repo.commits_since(Some("v1.0.0")).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "fix: second");

        assert_eq!(repo.commits_since(Some("v2.0.0")).unwrap().len(), 2);
    }

    #[test]
    fn test_mock_repository_release_commit_and_tag() {
        let repo = MockRepository::new();
        repo.add_commit("feat: first");

        repo.commit_paths(&[PathBuf::from("VERSION")], "chore(release): v0.2.0")
            .unwrap();
        repo.create_annotated_tag("v0.2.0", "Version 0.2.0").unwrap();

        assert_eq!(repo.tags(), vec!["v0.2.0".to_string()]);
        assert_eq!(repo.release_commits().len(), 1);
        assert!(repo.commits_since(Some("v0.2.0")).unwrap().is_empty());
        assert!(repo.create_annotated_tag("v0.2.0", "again").is_err());
    }

    #[test]
    fn test_mock_repository_empty_head() {
        let repo = MockRepository::new();
        assert!(repo.head_short_sha().is_err());
    }
}
