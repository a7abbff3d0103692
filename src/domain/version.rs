use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Version bump type decision, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionBump {
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    /// Apply the bump following semver increment rules
    ///
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    ///
    /// Pre-release and build metadata are dropped.
    pub fn apply(self, version: &Version) -> Version {
        let (major, minor, patch) = match self {
            VersionBump::Major => (version.major + 1, 0, 0),
            VersionBump::Minor => (version.major, version.minor + 1, 0),
            VersionBump::Patch => (version.major, version.minor, version.patch + 1),
        };

        Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}
