//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! collaborator, allowing for a real git2-backed implementation and a mock
//! implementation for testing.
//!
//! # Overview
//!
//! The [Repository] trait covers the four operations the changelog pipeline
//! needs: the current branch, the tag list, the log between two refs and a
//! commit of a set of files.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use gitflow_changelog::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> gitflow_changelog::Result<()> {
//! let branch = repo.current_branch()?;
//! let commits = repo.commits_between(Some("1.2.3"), &branch)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::PathBuf;

use crate::domain::{Commit, CommitParser};
use crate::error::Result;

/// One raw log entry: short hash and full message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub hash: String,
    pub message: String,
}

impl RawCommit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        RawCommit {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// Format as `<short-hash> <full-message>`
    pub fn log_line(&self) -> String {
        format!("{} {}", self.hash, self.message)
    }
}

/// Version-control operations consumed by the changelog pipeline
///
/// All methods return [crate::error::Result<T>]; implementations map their
/// underlying errors (like `git2::Error`) to [crate::error::ChangelogError].
pub trait Repository {
    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// All tag names, in no particular order
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Commits reachable from `to` but not from `from`, oldest first
    ///
    /// `from = None` walks back to the root commit.
    fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<RawCommit>>;

    /// Stage the given files and commit them on the current branch
    ///
    /// Returns the hash of the new commit.
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<String>;
}

/// Retrieve and parse the commits of a range.
///
/// Any parse failure aborts the whole range. Commits without a conventional
/// type are dropped unless `keep_untyped` is set.
pub fn parsed_commits<R: Repository + ?Sized>(
    repo: &R,
    parser: &CommitParser,
    from: Option<&str>,
    to: &str,
    keep_untyped: bool,
) -> Result<Vec<Commit>> {
    let raw = repo.commits_between(from, to)?;

    let mut commits = Vec::with_capacity(raw.len());
    for entry in &raw {
        let commit = parser.parse_log_entry(&entry.log_line())?;
        if keep_untyped || commit.r#type.is_some() {
            commits.push(commit);
        }
    }

    tracing::debug!(
        from = from.unwrap_or("<root>"),
        to,
        raw = raw.len(),
        kept = commits.len(),
        "parsed commit range"
    );
    Ok(commits)
}
