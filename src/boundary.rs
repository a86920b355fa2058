use std::fmt;

/// Non-fatal conditions met while preparing a release.
/// These are reported to the user and the run still exits successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Nothing was committed after the previous release tag
    NoNewCommits { since_tag: String },
    /// The computed version is identical to the stored one
    VersionUnchanged { version: String },
    /// Publishing was requested but no release hook is configured
    PublisherNotConfigured { tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { since_tag } => {
                write!(f, "No new commits since tag '{}', nothing to release", since_tag)
            }
            BoundaryWarning::VersionUnchanged { version } => {
                write!(f, "Version unchanged ({}), nothing to release", version)
            }
            BoundaryWarning::PublisherNotConfigured { tag } => {
                write!(
                    f,
                    "Tag '{}' created but not published: no post_release hook configured",
                    tag
                )
            }
        }
    }
}
