use std::fmt;

use crate::config::BranchNaming;

/// Check if the branch name is a release branch
pub fn is_release(name: &str) -> bool {
    BranchKind::classify(name, &BranchNaming::default()) == BranchKind::Release
}

/// Check if the branch name is a hotfix branch
pub fn is_hotfix(name: &str) -> bool {
    BranchKind::classify(name, &BranchNaming::default()) == BranchKind::Hotfix
}

/// Check if the branch name is the develop branch
pub fn is_develop(name: &str) -> bool {
    BranchKind::classify(name, &BranchNaming::default()) == BranchKind::Develop
}

/// Workflow role of a branch, derived from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Release,
    Hotfix,
    Develop,
    Other,
}

impl BranchKind {
    /// Classify a branch name using the configured naming convention
    pub fn classify(name: &str, naming: &BranchNaming) -> Self {
        if name.starts_with(naming.release_prefix.as_str()) {
            BranchKind::Release
        } else if name.starts_with(naming.hotfix_prefix.as_str()) {
            BranchKind::Hotfix
        } else if name == naming.develop {
            BranchKind::Develop
        } else {
            BranchKind::Other
        }
    }

    /// Release and hotfix branches publish: they write files and commit
    pub fn publishes(&self) -> bool {
        matches!(self, BranchKind::Release | BranchKind::Hotfix)
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchKind::Release => write!(f, "release"),
            BranchKind::Hotfix => write!(f, "hotfix"),
            BranchKind::Develop => write!(f, "develop"),
            BranchKind::Other => write!(f, "other"),
        }
    }
}
