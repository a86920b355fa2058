use crate::domain::branch::BranchConfig;
use crate::domain::build::BuildInputs;
use crate::domain::prerelease::PreRelease;
use crate::error::{Result, VersionerError};
use std::fmt;

/// Version used when no version has been stored yet
pub const INITIAL_VERSION: &str = "0.1.0";

/// Granularity of a version increase
///
/// Ordered `None < Patch < Minor < Major` so the strongest level wins under `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpLevel {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpLevel::None => "none",
            BumpLevel::Patch => "patch",
            BumpLevel::Minor => "minor",
            BumpLevel::Major => "major",
        };
        f.write_str(name)
    }
}

/// Semantic version with an optional prerelease suffix and build metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<PreRelease>,
    pub build_metadata: Option<String>,
}

impl Version {
    /// Create a plain `major.minor.patch` version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
        }
    }

    /// Parse `MAJOR.MINOR.PATCH[-label[.counter]][+metadata]`
    ///
    /// Surrounding whitespace is ignored. The base must be exactly three
    /// dot-separated non-negative integers, otherwise
    /// [`VersionerError::MalformedVersion`] is returned. The prerelease
    /// segment never fails to parse; see [`PreRelease::parse`].
    ///
    /// # Example
    /// ```
    /// # use semantic_versioner::domain::Version;
    /// let v = Version::parse("1.3.0-dev.4+sha.abc1234").unwrap();
    /// assert_eq!((v.major, v.minor, v.patch), (1, 3, 0));
    /// assert_eq!(v.prerelease.unwrap().counter_value(), Some(4));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        let (rest, build_metadata) = match text.split_once('+') {
            Some((rest, meta)) => (rest, Some(meta.to_string())),
            None => (text, None),
        };
        let (base, prerelease) = match rest.split_once('-') {
            Some((base, pre)) => (base, Some(PreRelease::parse(pre))),
            None => (rest, None),
        };

        let parts: Vec<&str> = base.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionerError::malformed_version(format!(
                "'{}' - expected MAJOR.MINOR.PATCH",
                text
            )));
        }

        let component = |name: &str, raw: &str| -> Result<u64> {
            if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
                return Err(VersionerError::malformed_version(format!(
                    "'{}' - invalid {} component '{}'",
                    text, name, raw
                )));
            }
            raw.parse::<u64>().map_err(|e| {
                VersionerError::malformed_version(format!(
                    "'{}' - invalid {} component '{}': {}",
                    text, name, raw, e
                ))
            })
        };

        Ok(Version {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
            prerelease,
            build_metadata,
        })
    }

    /// Apply a bump level to the numeric base, dropping any suffixes
    ///
    /// Fails with [`VersionerError::MalformedVersion`] when the bumped
    /// component would overflow.
    pub fn bump_base(&self, level: BumpLevel) -> Result<Version> {
        let overflow = || {
            VersionerError::malformed_version(format!("'{}' - cannot apply a {} bump", self, level))
        };

        Ok(match level {
            BumpLevel::Major => Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            BumpLevel::Minor => {
                Version::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            BumpLevel::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            BumpLevel::None => Version::new(self.major, self.minor, self.patch),
        })
    }

    /// Compute the next version under a branch policy.
    ///
    /// The base always moves by `level`, regardless of the current prerelease.
    /// On a prerelease branch the counter continues only when `auto_increment`
    /// is on and the current label matches the branch label; otherwise the
    /// series restarts at `label.1`. Build metadata is rendered fresh from the
    /// branch template and never carried over from `self`.
    ///
    /// # Example
    /// ```
    /// # use semantic_versioner::domain::{BranchConfig, BuildInputs, BumpLevel, Version};
    /// # let inputs = BuildInputs::new("abc1234", None, chrono::NaiveDateTime::default());
    /// let dev = BranchConfig::prerelease("dev", None, true);
    /// let current = Version::parse("1.3.0-dev.4").unwrap();
    /// let next = current.increment(BumpLevel::Patch, &dev, &inputs).unwrap();
    /// assert_eq!(next.to_string(), "1.3.1-dev.5");
    /// ```
    pub fn increment(
        &self,
        level: BumpLevel,
        branch: &BranchConfig,
        inputs: &BuildInputs,
    ) -> Result<Version> {
        let base = self.bump_base(level)?;

        let prerelease = branch.label().map(|label| {
            let counter = match &self.prerelease {
                Some(current)
                    if branch.auto_increment && current.label == label && current.has_counter() =>
                {
                    current.next_counter()
                }
                _ => 1,
            };
            PreRelease::numbered(label, counter)
        });

        Ok(Version {
            prerelease,
            build_metadata: branch.build_metadata(inputs),
            ..base
        })
    }

    /// Name of the annotated tag marking this version
    pub fn tag_name(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(meta) = &self.build_metadata {
            write!(f, "+{}", meta)?;
        }
        Ok(())
    }
}
