use std::cmp::Ordering;

use semver::Version;

use crate::error::{ChangelogError, Result};

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Extract version number from tag (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self) -> &str {
        self.name.trim_start_matches(['v', 'V'])
    }

    /// Parse the tag as a semantic version
    pub fn version(&self) -> Result<Version> {
        Version::parse(self.version_part()).map_err(|e| {
            ChangelogError::version(format!("tag '{}' is not a semantic version: {}", self.name, e))
        })
    }
}

/// Order tags the way `git tag --sort=-v:refname` does: highest version
/// first, tags that are not semantic versions last (by name, descending).
pub fn sort_by_version_desc(tags: &mut [String]) {
    tags.sort_by(|a, b| {
        let va = Tag::new(a.as_str()).version().ok();
        let vb = Tag::new(b.as_str()).version().ok();
        match (va, vb) {
            (Some(va), Some(vb)) => vb.cmp(&va).then_with(|| b.cmp(a)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.cmp(a),
        }
    });
}

/// The most recent tag by version, if any
pub fn latest_tag(mut tags: Vec<String>) -> Option<String> {
    sort_by_version_desc(&mut tags);
    tags.into_iter().next()
}
