use thiserror::Error;

/// Unified error type for gitflow-changelog operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Commit parse error: {0}")]
    Parse(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitflow-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        ChangelogError::Branch(msg.into())
    }

    /// Create a commit parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        ChangelogError::Parse(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChangelogError::Version(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ChangelogError::Manifest(msg.into())
    }

    /// Process exit status for this error kind.
    ///
    /// Every kind gets its own code so scripts can tell a misconfigured run
    /// from a branch that is simply not releasable.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChangelogError::Config(_) => 2,
            ChangelogError::Git(_) => 3,
            ChangelogError::Version(_) => 4,
            ChangelogError::Branch(_) => 5,
            ChangelogError::Parse(_) => 6,
            ChangelogError::Manifest(_) | ChangelogError::Io(_) => 7,
        }
    }
}
