use semver::Version;
use tracing::{debug, instrument};

use crate::config::{BranchNaming, ConventionalCommitsConfig};
use crate::domain::{BranchKind, Commit, CommitParser, Tag, VersionBump};
use crate::error::{ChangelogError, Result};
use crate::git::{parsed_commits, Repository};

/// Decide the bump a set of commits warrants on a given kind of branch.
///
/// `Ok(None)` means nothing since the last tag warrants a release and the
/// version stays as it is.
pub fn decide_bump(kind: BranchKind, commits: &[Commit]) -> Result<Option<VersionBump>> {
    match kind {
        BranchKind::Hotfix => Ok(commits
            .iter()
            .any(Commit::is_fix)
            .then_some(VersionBump::Patch)),
        // Merged feature branches are at least a minor release, with or
        // without an explicit `feat` commit.
        BranchKind::Develop | BranchKind::Release => Ok(commits
            .iter()
            .map(|commit| {
                if commit.is_major() {
                    VersionBump::Major
                } else {
                    VersionBump::Minor
                }
            })
            .max()),
        BranchKind::Other => Err(ChangelogError::branch(
            "no version policy for branches outside release, hotfix and develop",
        )),
    }
}

/// Parse the last tag into a version; no tag at all starts from 0.0.0
pub fn base_version(last_tag: Option<&str>) -> Result<Version> {
    match last_tag {
        Some(tag) => Tag::new(tag).version(),
        None => Ok(Version::new(0, 0, 0)),
    }
}

/// Computes the next version from the commit history of a branch
pub struct VersionCalculator {
    parser: CommitParser,
    naming: BranchNaming,
    keep_untyped: bool,
}

impl VersionCalculator {
    /// Create a new version calculator
    pub fn new(conventional: &ConventionalCommitsConfig, naming: BranchNaming) -> Result<Self> {
        Ok(VersionCalculator {
            parser: CommitParser::new(conventional.breaking_change_indicators.clone())?,
            naming,
            keep_untyped: conventional.keep_untyped,
        })
    }

    /// Parsed commits of the `(from, to]` range, filtered by the untyped policy
    pub fn commits<R: Repository + ?Sized>(
        &self,
        repo: &R,
        from: Option<&str>,
        to: &str,
    ) -> Result<Vec<Commit>> {
        parsed_commits(repo, &self.parser, from, to, self.keep_untyped)
    }

    /// Next version for `branch`, reading the commits since `last_tag` from the repository
    #[instrument(skip(self, repo))]
    pub fn next_version<R: Repository + ?Sized>(
        &self,
        repo: &R,
        last_tag: Option<&str>,
        branch: &str,
    ) -> Result<Version> {
        let kind = BranchKind::classify(branch, &self.naming);
        let commits = self.commits(repo, last_tag, branch)?;
        self.next_version_for(last_tag, kind, &commits)
    }

    /// Next version from an already fetched commit set
    pub fn next_version_for(
        &self,
        last_tag: Option<&str>,
        kind: BranchKind,
        commits: &[Commit],
    ) -> Result<Version> {
        let current = base_version(last_tag)?;
        let bump = decide_bump(kind, commits)?;
        debug!(%kind, bump = ?bump, commits = commits.len(), "decided version bump");

        Ok(match bump {
            Some(bump) => bump.apply(&current),
            None => current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{MockRepository, RawCommit};

    fn calculator() -> VersionCalculator {
        VersionCalculator::new(&ConventionalCommitsConfig::default(), BranchNaming::default())
            .unwrap()
    }

    fn repo_with(last_tag: &str, branch: &str, messages: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        repo.set_current_branch(branch);
        repo.add_tag(last_tag);
        repo.set_range(
            Some(last_tag),
            branch,
            messages
                .iter()
                .enumerate()
                .map(|(i, m)| RawCommit::new(format!("{:07x}", i + 1), *m))
                .collect(),
        );
        repo
    }

    fn next(last_tag: &str, branch: &str, messages: &[&str]) -> String {
        let repo = repo_with(last_tag, branch, messages);
        calculator()
            .next_version(&repo, Some(last_tag), branch)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_empty_release_range_keeps_version() {
        assert_eq!(next("1.2.3", "release/1.3.0", &[]), "1.2.3");
        assert_eq!(next("1.2.3", "develop", &[]), "1.2.3");
    }

    #[test]
    fn test_feature_on_release_is_minor() {
        assert_eq!(next("1.2.3", "release/1.3.0", &["feat: search"]), "1.3.0");
    }

    #[test]
    fn test_breaking_header_is_major() {
        assert_eq!(
            next("1.2.3", "release/2.0.0", &["feat: search", "feat(api)!: drop v1"]),
            "2.0.0"
        );
    }

    #[test]
    fn test_breaking_footer_is_major() {
        assert_eq!(
            next(
                "1.2.3",
                "develop",
                &["refactor: storage\n\nBREAKING CHANGE: new on-disk format"]
            ),
            "2.0.0"
        );
    }

    #[test]
    fn test_fix_only_on_release_still_minor() {
        assert_eq!(next("1.2.3", "release/1.3.0", &["fix: typo"]), "1.3.0");
    }

    #[test]
    fn test_feature_merge_on_develop_is_minor() {
        assert_eq!(
            next("1.2.3", "develop", &["Merge branch 'feature/login' into develop"]),
            "1.3.0"
        );
    }

    #[test]
    fn test_hotfix_with_fix_is_patch() {
        assert_eq!(next("1.2.4", "hotfix/1.2.5", &["fix(auth): token expiry"]), "1.2.5");
    }

    #[test]
    fn test_hotfix_without_fix_keeps_version() {
        assert_eq!(next("1.2.4", "hotfix/1.2.5", &["docs: changelog"]), "1.2.4");
        assert_eq!(next("1.2.4", "hotfix/1.2.5", &[]), "1.2.4");
    }

    #[test]
    fn test_hotfix_ignores_breaking_markers() {
        assert_eq!(next("1.2.4", "hotfix/1.2.5", &["fix!: strict parsing"]), "1.2.5");
    }

    #[test]
    fn test_v_prefixed_tag() {
        assert_eq!(next("v1.2.3", "release/1.3.0", &["feat: x"]), "1.3.0");
    }

    #[test]
    fn test_other_branch_is_rejected() {
        let repo = repo_with("1.2.3", "main", &["feat: x"]);
        let err = calculator()
            .next_version(&repo, Some("1.2.3"), "main")
            .unwrap_err();
        assert!(matches!(err, ChangelogError::Branch(_)));
    }

    #[test]
    fn test_unparsable_tag_is_version_error() {
        let repo = repo_with("nightly", "develop", &["feat: x"]);
        let err = calculator()
            .next_version(&repo, Some("nightly"), "develop")
            .unwrap_err();
        assert!(matches!(err, ChangelogError::Version(_)));
    }

    #[test]
    fn test_no_tag_starts_from_zero() {
        let mut repo = MockRepository::new();
        repo.set_range(None, "develop", vec![RawCommit::new("abc1234", "feat: first")]);
        let version = calculator().next_version(&repo, None, "develop").unwrap();
        assert_eq!(version.to_string(), "0.1.0");
    }

    #[test]
    fn test_decision_ignores_commit_order() {
        let parser = CommitParser::with_default_keywords().unwrap();
        let major = parser.parse("aaaaaaa", "feat!: rewrite").unwrap();
        let minor = parser.parse("bbbbbbb", "feat: add").unwrap();

        let forward = decide_bump(BranchKind::Release, &[major.clone(), minor.clone()]).unwrap();
        let backward = decide_bump(BranchKind::Release, &[minor, major]).unwrap();
        assert_eq!(forward, Some(VersionBump::Major));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_type_with_bang_record_is_major() {
        let commit = Commit {
            hash: "abc1234".to_string(),
            r#type: Some("feat!".to_string()),
            scope: None,
            subject: Some("rewrite".to_string()),
            header: "abc1234 feat!: rewrite".to_string(),
            body: None,
            notes: Vec::new(),
            revert: None,
        };
        let version = calculator()
            .next_version_for(Some("1.2.3"), BranchKind::Release, &[commit])
            .unwrap();
        assert_eq!(version.to_string(), "2.0.0");
    }
}
