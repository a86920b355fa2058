//! Release workflow orchestration
//!
//! Drives one run from the stored version to an updated, and optionally
//! tagged, release. CLI parsing stays in `main.rs`; everything here works
//! against the collaborator traits so it can run on a mock repository.

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::analyzer::BumpPolicy;
use crate::boundary::BoundaryWarning;
use crate::changelog::{merge, ChangelogRenderer};
use crate::domain::{BranchPolicyTable, BuildInputs, BumpLevel, ClassifiedCommit, Commit};
use crate::domain::{Version, INITIAL_VERSION};
use crate::error::Result;
use crate::git::{CommitHistoryProvider, TagWriter};
use crate::hooks::{HookContext, ReleasePublisher};
use crate::store::ReleaseStore;

/// How far a run goes once the next version is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Compute and report, write nothing
    DryRun,
    /// Write the version file and the changelog
    Update,
    /// Update, then commit the files and tag the release
    Release { publish: bool },
}

/// Inputs of a single run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    /// Branch whose policy applies
    pub branch: String,
    pub mode: ReleaseMode,
    /// CI build counter for `{build_number}`
    pub build_number: Option<String>,
    /// Wall-clock time of the run; its date goes in the changelog header
    pub timestamp: NaiveDateTime,
}

impl ReleaseRequest {
    /// Request stamped with the local clock and no build number
    pub fn new(branch: impl Into<String>, mode: ReleaseMode) -> Self {
        ReleaseRequest {
            branch: branch.into(),
            mode,
            build_number: None,
            timestamp: chrono::Local::now().naive_local(),
        }
    }

    /// Read the build number from the environment variable `name`, if set
    pub fn with_build_number_from_env(mut self, name: &str) -> Self {
        self.build_number = std::env::var(name).ok();
        self
    }
}

/// Everything computed for a release that is going ahead
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub branch: String,
    /// Stored version text, trimmed
    pub current_version: String,
    pub new_version: Version,
    pub bump: BumpLevel,
    pub is_prerelease: bool,
    pub commits: Vec<Commit>,
    /// Markdown section prepended to the changelog
    pub changelog_section: String,
}

impl ReleasePlan {
    pub fn tag_name(&self) -> String {
        self.new_version.tag_name()
    }

    /// Message of the commit that records the release files
    pub fn commit_message(&self) -> String {
        let mut message = format!("chore(release): {}", self.tag_name());
        if let Some(pre) = self.new_version.prerelease.as_ref().filter(|_| self.is_prerelease) {
            message.push_str(&format!(" [Pre-release: {}]", pre.label));
        }
        message
    }

    /// Message of the annotated release tag
    pub fn tag_message(&self) -> String {
        let mut message = format!("Version {}", self.new_version);
        if self.is_prerelease {
            message.push_str(" (Pre-release)");
        }
        message
    }

    fn hook_context(&self) -> HookContext {
        HookContext {
            version: self.new_version.to_string(),
            tag: self.tag_name(),
            branch: self.branch.clone(),
            prerelease: self
                .new_version
                .prerelease
                .as_ref()
                .map(|pre| pre.label.clone()),
            bump: self.bump,
            notes: self.changelog_section.clone(),
        }
    }
}

/// Result of a run
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// Nothing to release
    NoOp(BoundaryWarning),
    /// Computed but not written
    DryRun(ReleasePlan),
    /// Version file and changelog written
    Persisted(ReleasePlan),
    /// Files committed and tag created
    Tagged {
        plan: ReleasePlan,
        tag: String,
        /// Set when publishing was requested but could not happen
        warning: Option<BoundaryWarning>,
    },
}

/// Runs the release workflow against its collaborators
pub struct ReleaseOrchestrator<'a, H, S, T> {
    history: &'a H,
    store: &'a S,
    tags: &'a T,
    policies: &'a BranchPolicyTable,
    publisher: Option<&'a dyn ReleasePublisher>,
    bump_policy: BumpPolicy,
}

impl<'a, H, S, T> ReleaseOrchestrator<'a, H, S, T>
where
    H: CommitHistoryProvider,
    S: ReleaseStore,
    T: TagWriter,
{
    pub fn new(history: &'a H, store: &'a S, tags: &'a T, policies: &'a BranchPolicyTable) -> Self {
        ReleaseOrchestrator {
            history,
            store,
            tags,
            policies,
            publisher: None,
            bump_policy: BumpPolicy::new(),
        }
    }

    /// Hand tagged releases to `publisher` when the request asks for it
    pub fn with_publisher(mut self, publisher: &'a dyn ReleasePublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Execute one run.
    ///
    /// A malformed stored version fails before anything is read from git or
    /// written. Collaborator errors are returned as they are.
    pub fn run(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        let current_text = self
            .store
            .read_version()?
            .map(|text| text.trim().to_string())
            .unwrap_or_else(|| INITIAL_VERSION.to_string());
        let current = Version::parse(&current_text)?;
        let since_tag = format!("v{}", current_text);

        let commits = self.history.commits_since(Some(&since_tag))?;
        info!(count = commits.len(), since = %since_tag, "commits fetched");
        if commits.is_empty() {
            return Ok(ReleaseOutcome::NoOp(BoundaryWarning::NoNewCommits {
                since_tag,
            }));
        }

        let classified: Vec<ClassifiedCommit> =
            commits.iter().filter_map(Commit::classify).collect();
        debug!(
            conventional = classified.len(),
            skipped = commits.len() - classified.len(),
            "commits classified"
        );

        let bump = self.bump_policy.decide(&classified);
        debug!(%bump, "bump decided");

        let branch_config = self.policies.lookup(&request.branch);
        let inputs = BuildInputs::new(
            self.history.head_short_sha()?,
            request.build_number.clone(),
            request.timestamp,
        );
        let new_version = current.increment(bump, &branch_config, &inputs)?;
        info!(
            current = %current_text,
            new = %new_version,
            branch = %request.branch,
            "version computed"
        );

        if new_version.to_string() == current_text {
            return Ok(ReleaseOutcome::NoOp(BoundaryWarning::VersionUnchanged {
                version: current_text,
            }));
        }

        let is_prerelease = branch_config.is_prerelease();
        let section = ChangelogRenderer::new(request.timestamp.date()).render(
            &commits,
            &new_version,
            Some(&current),
            is_prerelease,
        );
        debug!(categories = section.categories.len(), "changelog rendered");

        let plan = ReleasePlan {
            branch: request.branch.clone(),
            current_version: current_text,
            new_version,
            bump,
            is_prerelease,
            commits,
            changelog_section: section.to_string(),
        };

        if request.mode == ReleaseMode::DryRun {
            return Ok(ReleaseOutcome::DryRun(plan));
        }

        self.persist(&plan)?;
        info!(version = %plan.new_version, "release files written");

        match request.mode {
            ReleaseMode::Release { publish } => self.tag(plan, publish),
            _ => Ok(ReleaseOutcome::Persisted(plan)),
        }
    }

    fn persist(&self, plan: &ReleasePlan) -> Result<()> {
        let existing = self.store.read_changelog()?;
        let document = merge(&plan.changelog_section, existing.as_deref());

        self.store.write_version(&plan.new_version.to_string())?;
        self.store.write_changelog(&document)
    }

    fn tag(&self, plan: ReleasePlan, publish: bool) -> Result<ReleaseOutcome> {
        let tag = plan.tag_name();

        self.tags
            .commit_paths(&self.store.tracked_paths(), &plan.commit_message())?;
        self.tags.create_annotated_tag(&tag, &plan.tag_message())?;
        info!(%tag, "release tagged");

        let mut warning = None;
        if publish {
            match self.publisher {
                Some(publisher) => {
                    publisher.publish(&plan.hook_context())?;
                    info!(%tag, "release published");
                }
                None => {
                    warn!(%tag, "publish requested without a publisher");
                    warning = Some(BoundaryWarning::PublisherNotConfigured { tag: tag.clone() });
                }
            }
        }

        Ok(ReleaseOutcome::Tagged { plan, tag, warning })
    }
}
