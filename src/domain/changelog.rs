use std::collections::HashSet;

use super::commit::Commit;

/// Everything one release section of the changelog is rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    pub header: String,
    pub repo_url: String,
    pub version: String,
    pub date: String,
    /// Feature branches merged since the last tag
    pub merges: Vec<Commit>,
    /// `feat` commits since the last tag
    pub features: Vec<Commit>,
    /// Every commit on the current branch since it left develop
    pub release: Vec<Commit>,
    /// `fix` commits from both ranges, each hash once
    pub bugfixes: Vec<Commit>,
}

impl Changelog {
    /// Group the two commit sets of a run into changelog sections.
    ///
    /// `all` holds the commits since the last tag, `release` those on the
    /// current branch since develop.
    pub fn build(
        header: impl Into<String>,
        repo_url: impl Into<String>,
        version: impl Into<String>,
        date: impl Into<String>,
        all: &[Commit],
        release: &[Commit],
    ) -> Self {
        let merges = all.iter().filter(|c| c.is_merge()).cloned().collect();
        let features = all.iter().filter(|c| c.is_feature()).cloned().collect();
        let fixes = all.iter().chain(release.iter()).filter(|c| c.is_fix());

        Changelog {
            header: header.into(),
            repo_url: repo_url.into(),
            version: version.into(),
            date: date.into(),
            merges,
            features,
            release: release.to_vec(),
            bugfixes: dedup_by_hash(fixes),
        }
    }
}

/// Keep the first commit for each hash, preserving order
fn dedup_by_hash<'a>(commits: impl Iterator<Item = &'a Commit>) -> Vec<Commit> {
    let mut seen = HashSet::new();
    commits
        .filter(|c| seen.insert(c.hash.clone()))
        .cloned()
        .collect()
}
