//! Git operations abstraction layer
//!
//! The release engine never talks to git directly. It reads history through
//! [`CommitHistoryProvider`] and records releases through [`TagWriter`].
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! ```rust
//! # use semantic_versioner::git::CommitHistoryProvider;
//! # fn example<H: CommitHistoryProvider>(history: &H) -> semantic_versioner::Result<()> {
//! let commits = history.commits_since(Some("v1.2.3"))?;
//! for commit in commits {
//!     println!("{} {}", commit.short_hash(), commit.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Commit;
use crate::error::Result;
use std::path::PathBuf;

/// Source of the commits that make up a release
pub trait CommitHistoryProvider {
    /// Commits reachable from HEAD but not from `since`, oldest first
    ///
    /// Merge commits are excluded. When `since` is `None`, or names a tag
    /// that does not exist, the whole history is returned.
    ///
    /// # Arguments
    /// * `since` - Tag name marking the previous release (e.g. `v1.2.3`)
    fn commits_since(&self, since: Option<&str>) -> Result<Vec<Commit>>;

    /// Abbreviated hash of the HEAD commit
    fn head_short_sha(&self) -> Result<String>;
}

/// Records a release in version control
pub trait TagWriter {
    /// Stage `paths` and commit them on the current branch
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD
    ///
    /// Fails if a tag with the same name already exists.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;
}
