use std::fmt;

/// Non-fatal conditions met while preparing a release.
/// These are reported to the user and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no tags yet
    NoTagsFound { branch: String },
    /// No new commits since the latest tag
    NoNewCommits { latest_tag: String, branch: String },
    /// No repository URL configured or declared by a manifest
    MissingRepoUrl { manifest: String },
    /// A tag that cannot be read as a semantic version was skipped over
    UnparsableTag { tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTagsFound { branch } => {
                write!(
                    f,
                    "No tags found, starting from 0.0.0 with the full history of '{}'",
                    branch
                )
            }
            BoundaryWarning::NoNewCommits { latest_tag, branch } => {
                write!(
                    f,
                    "No new commits on '{}' since tag '{}', version is unchanged",
                    branch, latest_tag
                )
            }
            BoundaryWarning::MissingRepoUrl { manifest } => {
                write!(
                    f,
                    "No repository URL in config or '{}', commit links will be relative",
                    manifest
                )
            }
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Tag '{}' is not a semantic version and was ignored", tag)
            }
        }
    }
}
