use crate::domain::BumpLevel;
use std::collections::HashMap;

/// Context information passed to a release hook
#[derive(Debug, Clone, PartialEq)]
pub struct HookContext {
    /// Version that was released, without the `v` prefix
    pub version: String,
    /// Annotated tag marking the release
    pub tag: String,
    /// Branch the release was cut from
    pub branch: String,
    /// Prerelease label, if this is a prerelease
    pub prerelease: Option<String>,
    /// Bump level applied to the previous version
    pub bump: BumpLevel,
    /// Rendered changelog section for this release
    pub notes: String,
}

impl HookContext {
    /// Convert context to environment variables for the hook script
    ///
    /// Maps context fields to VERSIONER_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("VERSIONER_VERSION".to_string(), self.version.clone());
        env.insert("VERSIONER_TAG".to_string(), self.tag.clone());
        env.insert("VERSIONER_BRANCH".to_string(), self.branch.clone());
        env.insert(
            "VERSIONER_PRERELEASE".to_string(),
            self.prerelease.is_some().to_string(),
        );
        env.insert("VERSIONER_BUMP".to_string(), self.bump.to_string());
        env.insert("VERSIONER_NOTES".to_string(), self.notes.clone());

        if let Some(ref label) = self.prerelease {
            env.insert("VERSIONER_PRERELEASE_LABEL".to_string(), label.clone());
        }

        env
    }
}
