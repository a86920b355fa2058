use regex::Regex;
use std::sync::OnceLock;

/// Marker that flags a breaking change anywhere in a commit message
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE:";

/// A commit as yielded by the history provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub date: String,
}

impl Commit {
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Commit {
            hash: hash.into(),
            message: message.into(),
            date: date.into(),
        }
    }

    /// Abbreviated hash used in changelog bullets
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }

    /// Classify this commit's message, see [`classify`]
    pub fn classify(&self) -> Option<ClassifiedCommit> {
        classify(&self.message)
    }
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub breaking: bool,
}

fn subject_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\w+)(?:\(([\w\s-]+)\))?(!)?:\s+(.+)$").expect("subject pattern is valid")
    })
}

/// Parse a commit message according to the conventional commits format.
///
/// Supported subjects:
/// - `type(scope)!: description`
/// - `type(scope): description`
/// - `type!: description`
/// - `type: description`
///
/// Only the first line is matched against the pattern. The type is
/// lower-cased and trailing periods are dropped from the description.
/// A commit is breaking when `!` sits right before the colon or when the
/// full message contains `BREAKING CHANGE:`.
///
/// Returns `None` for anything else; such commits are skipped, not rejected.
pub fn classify(message: &str) -> Option<ClassifiedCommit> {
    let subject = message.lines().next()?;
    let captures = subject_pattern().captures(subject)?;

    let r#type = captures.get(1)?.as_str().to_lowercase();
    let scope = captures.get(2).map(|m| m.as_str().to_string());
    let has_exclamation = captures.get(3).is_some();
    let description = captures
        .get(4)?
        .as_str()
        .trim_end_matches('.')
        .to_string();

    Some(ClassifiedCommit {
        r#type,
        scope,
        description,
        breaking: has_exclamation || message.contains(BREAKING_CHANGE_MARKER),
    })
}
