use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ChangelogError, Result};
use crate::git::{RawCommit, Repository};

/// A commit recorded by [MockRepository::commit_paths]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub paths: Vec<PathBuf>,
    pub message: String,
}

/// Mock repository for testing without actual git operations
///
/// Ranges that were never registered are empty.
pub struct MockRepository {
    branch: Option<String>,
    tags: Vec<String>,
    ranges: HashMap<(Option<String>, String), Vec<RawCommit>>,
    committed: RefCell<Vec<RecordedCommit>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            branch: None,
            tags: Vec::new(),
            ranges: HashMap::new(),
            committed: RefCell::new(Vec::new()),
        }
    }

    /// Set the checked-out branch
    pub fn set_current_branch(&mut self, branch: impl Into<String>) {
        self.branch = Some(branch.into());
    }

    /// Add a tag name
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Register the commits returned for a `(from, to]` range
    pub fn set_range(&mut self, from: Option<&str>, to: &str, commits: Vec<RawCommit>) {
        self.ranges
            .insert((from.map(str::to_string), to.to_string()), commits);
    }

    /// Commits made through [Repository::commit_paths] so far
    pub fn committed(&self) -> Vec<RecordedCommit> {
        self.committed.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| ChangelogError::branch("HEAD does not point to a branch"))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<RawCommit>> {
        let key = (from.map(str::to_string), to.to_string());
        Ok(self.ranges.get(&key).cloned().unwrap_or_default())
    }

    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<String> {
        let mut committed = self.committed.borrow_mut();
        committed.push(RecordedCommit {
            paths: paths.to_vec(),
            message: message.to_string(),
        });
        Ok(format!("{:07x}", committed.len()))
    }
}
