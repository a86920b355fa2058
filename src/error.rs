use thiserror::Error;

/// Unified error type for semantic-versioner operations
#[derive(Error, Debug)]
pub enum VersionerError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed version: {0}")]
    MalformedVersion(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Hook error: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semantic-versioner
pub type Result<T> = std::result::Result<T, VersionerError>;

impl VersionerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionerError::Config(msg.into())
    }

    /// Create a malformed version error with context
    pub fn malformed_version(msg: impl Into<String>) -> Self {
        VersionerError::MalformedVersion(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        VersionerError::Tag(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        VersionerError::Hook(msg.into())
    }

    /// True when the error came from a stored version that failed validation
    pub fn is_malformed_version(&self) -> bool {
        matches!(self, VersionerError::MalformedVersion(_))
    }
}

impl From<toml::de::Error> for VersionerError {
    fn from(err: toml::de::Error) -> Self {
        VersionerError::Config(err.to_string())
    }
}
