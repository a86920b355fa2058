use crate::domain::Commit;
use crate::error::{Result, VersionerError};
use crate::git::{CommitHistoryProvider, TagWriter};
use chrono::{DateTime, FixedOffset};
use git2::{ErrorCode, Repository as Git2Repo, Sort};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository implementing the release collaborator traits
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Short name of the branch HEAD points at
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| VersionerError::config("HEAD does not point at a named branch"))
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("repository has no working directory").into())
    }

    /// Path of `path` relative to the working directory, as the index expects
    fn index_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = std::fs::canonicalize(self.workdir()?)?;
        let absolute = std::fs::canonicalize(path)?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                git2::Error::from_str(&format!(
                    "{} is outside the repository at {}",
                    path.display(),
                    workdir.display()
                ))
                .into()
            })
    }
}

impl CommitHistoryProvider for Git2Repository {
    fn commits_since(&self, since: Option<&str>) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push_head()?;

        if let Some(tag_name) = since {
            match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                Ok(reference) => {
                    let tagged = reference.peel_to_commit().map_err(|e| {
                        VersionerError::tag(format!("Cannot peel tag '{}': {}", tag_name, e))
                    })?;
                    revwalk.hide(tagged.id())?;
                }
                Err(e) if e.code() == ErrorCode::NotFound => {
                    debug!(tag = tag_name, "tag not found, reading full history");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;

            if commit.parent_count() > 1 {
                continue;
            }

            commits.push(Commit {
                hash: commit.id().to_string(),
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                date: commit_date(&commit.time()),
            });
        }

        debug!(count = commits.len(), since = ?since, "collected commits");
        Ok(commits)
    }

    fn head_short_sha(&self) -> Result<String> {
        let head = self.repo.head()?.peel_to_commit()?;
        let short = head.as_object().short_id()?;
        Ok(short.as_str().unwrap_or_default().to_string())
    }
}

impl TagWriter for Git2Repository {
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(&self.index_path(path)?)?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!(%oid, "committed release files");
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| VersionerError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }
}

/// Commit date as `YYYY-MM-DD` in the committer's own offset
fn commit_date(time: &git2::Time) -> String {
    let Some(utc) = DateTime::from_timestamp(time.seconds(), 0) else {
        return String::new();
    };
    match FixedOffset::east_opt(time.offset_minutes() * 60) {
        Some(offset) => utc.with_timezone(&offset).format("%Y-%m-%d").to_string(),
        None => utc.format("%Y-%m-%d").to_string(),
    }
}
