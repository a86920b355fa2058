use crate::domain::{BumpLevel, ClassifiedCommit};

/// Decides how far a batch of commits moves the version
///
/// The outcome is `Patch` unless a `feat` commit raises it to `Minor` or a
/// breaking commit raises it to `Major`. `BumpLevel::None` is never returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct BumpPolicy;

impl BumpPolicy {
    pub fn new() -> Self {
        BumpPolicy
    }

    /// Decide the bump level for already-classified commits
    pub fn decide<'a, I>(&self, commits: I) -> BumpLevel
    where
        I: IntoIterator<Item = &'a ClassifiedCommit>,
    {
        let mut level = BumpLevel::Patch;

        for commit in commits {
            // The first breaking commit settles it
            if commit.breaking {
                return BumpLevel::Major;
            }

            if commit.r#type == "feat" {
                level = level.max(BumpLevel::Minor);
            }
        }

        level
    }
}
