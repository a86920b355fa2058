use crate::domain::build::BuildInputs;
use crate::error::{Result, VersionerError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Release policy applied to versions computed on a branch
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct BranchConfig {
    /// Prerelease label (e.g. `dev`); `None` means final releases
    #[serde(default, rename = "prerelease")]
    pub prerelease_label: Option<String>,

    /// Build-metadata template, may contain `{commit_sha}`, `{build_number}`, `{timestamp}`
    #[serde(default, rename = "build_metadata")]
    pub build_metadata_template: Option<String>,

    /// Continue the existing prerelease counter instead of restarting at 1
    #[serde(default)]
    pub auto_increment: bool,
}

impl BranchConfig {
    /// Policy for branches that cut final releases
    pub fn final_release() -> Self {
        BranchConfig::default()
    }

    pub fn prerelease(
        label: impl Into<String>,
        build_metadata_template: Option<&str>,
        auto_increment: bool,
    ) -> Self {
        BranchConfig {
            prerelease_label: Some(label.into()),
            build_metadata_template: build_metadata_template.map(str::to_string),
            auto_increment,
        }
    }

    /// Configured prerelease label, ignoring an empty string
    pub fn label(&self) -> Option<&str> {
        self.prerelease_label.as_deref().filter(|l| !l.is_empty())
    }

    pub fn is_prerelease(&self) -> bool {
        self.label().is_some()
    }

    /// Resolve the build-metadata segment (without the leading `+`)
    pub fn build_metadata(&self, inputs: &BuildInputs) -> Option<String> {
        self.build_metadata_template
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| inputs.render(t))
    }

    fn validate(&self, branch: &str) -> Result<()> {
        if let Some(label) = &self.prerelease_label {
            if label.is_empty() {
                return Err(VersionerError::config(format!(
                    "Branch '{}' has an empty prerelease label",
                    branch
                )));
            }
            semver::Prerelease::new(&format!("{}.1", label)).map_err(|e| {
                VersionerError::config(format!(
                    "Branch '{}' has invalid prerelease label '{}': {}",
                    branch, label, e
                ))
            })?;
        }

        let sample = BuildInputs::new(
            "0000000",
            None,
            NaiveDate::from_ymd_opt(2000, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
        );
        if let Some(metadata) = self.build_metadata(&sample) {
            semver::BuildMetadata::new(&metadata).map_err(|e| {
                VersionerError::config(format!(
                    "Branch '{}' has invalid build metadata template: {}",
                    branch, e
                ))
            })?;
        }

        Ok(())
    }
}

/// Immutable mapping from branch name to its release policy
///
/// Branches missing from the table are treated as final-release branches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BranchPolicyTable {
    branches: HashMap<String, BranchConfig>,
}

impl BranchPolicyTable {
    pub fn new(branches: HashMap<String, BranchConfig>) -> Self {
        BranchPolicyTable { branches }
    }

    /// Policy for `branch`, falling back to the final-release policy
    pub fn lookup(&self, branch: &str) -> BranchConfig {
        self.branches
            .get(branch)
            .cloned()
            .unwrap_or_else(BranchConfig::final_release)
    }

    /// Configured branch names, sorted
    pub fn branch_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.branches.keys().cloned().collect();
        names.sort();
        names
    }

    /// Replace or add entries from `overrides`, keeping the remaining branches
    pub fn with_overrides(mut self, overrides: BranchPolicyTable) -> Self {
        self.branches.extend(overrides.branches);
        self
    }

    /// Check that every label and metadata template yields valid SemVer identifiers
    pub fn validate(&self) -> Result<()> {
        for name in self.branch_names() {
            if let Some(config) = self.branches.get(&name) {
                config.validate(&name)?;
            }
        }
        Ok(())
    }
}

impl Default for BranchPolicyTable {
    fn default() -> Self {
        let mut branches = HashMap::new();
        branches.insert(
            "develop".to_string(),
            BranchConfig::prerelease("dev", Some("sha.{commit_sha}"), true),
        );
        branches.insert(
            "test".to_string(),
            BranchConfig::prerelease("alpha", Some("build.{build_number}"), true),
        );
        branches.insert(
            "beta".to_string(),
            BranchConfig::prerelease("beta", Some("build.{build_number}"), true),
        );
        branches.insert("main".to_string(), BranchConfig::final_release());

        BranchPolicyTable { branches }
    }
}
