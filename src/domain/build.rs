use chrono::NaiveDateTime;

/// Build number used when the CI environment does not provide one
pub const DEFAULT_BUILD_NUMBER: &str = "1";

/// External values substituted into build-metadata templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInputs {
    /// Abbreviated hash of the commit being released
    pub commit_sha: String,
    /// CI build counter, if the environment provides one
    pub build_number: Option<String>,
    /// Wall-clock time of the run
    pub timestamp: NaiveDateTime,
}

impl BuildInputs {
    pub fn new(
        commit_sha: impl Into<String>,
        build_number: Option<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        BuildInputs {
            commit_sha: commit_sha.into(),
            build_number,
            timestamp,
        }
    }

    pub fn build_number(&self) -> &str {
        self.build_number.as_deref().unwrap_or(DEFAULT_BUILD_NUMBER)
    }

    /// Timestamp formatted as `YYYYMMDDHHMMSS`
    pub fn timestamp_token(&self) -> String {
        self.timestamp.format("%Y%m%d%H%M%S").to_string()
    }

    /// Substitute `{commit_sha}`, `{build_number}` and `{timestamp}` in a template
    ///
    /// Text outside the placeholders is kept verbatim.
    pub fn render(&self, template: &str) -> String {
        let mut rendered = template.to_string();
        if rendered.contains("{commit_sha}") {
            rendered = rendered.replace("{commit_sha}", &self.commit_sha);
        }
        if rendered.contains("{build_number}") {
            rendered = rendered.replace("{build_number}", self.build_number());
        }
        if rendered.contains("{timestamp}") {
            rendered = rendered.replace("{timestamp}", &self.timestamp_token());
        }
        rendered
    }
}
