use std::path::{Path, PathBuf};

use git2::{Oid, Repository as Git2Repo, Sort};
use tracing::{debug, info, instrument};

use crate::error::{ChangelogError, Result};
use crate::git::RawCommit;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("repository has no working directory").into())
    }

    fn resolve_commit(&self, spec: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(spec)?;
        Ok(object.peel_to_commit()?.id())
    }

    fn relative_to_workdir(&self, path: &Path) -> Result<PathBuf> {
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        let workdir = self.workdir()?;
        if let Ok(relative) = path.strip_prefix(workdir) {
            return Ok(relative.to_path_buf());
        }

        // Temp dirs and symlinked homes may differ only after canonicalization.
        let canonical_workdir = workdir.canonicalize()?;
        let canonical_path = path.canonicalize()?;
        canonical_path
            .strip_prefix(&canonical_workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                git2::Error::from_str(&format!(
                    "{} is outside the repository",
                    path.display()
                ))
                .into()
            })
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if !head.is_branch() {
            return Err(ChangelogError::branch("HEAD is detached"));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ChangelogError::branch("branch name is not valid UTF-8"))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    #[instrument(skip(self))]
    fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<RawCommit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(self.resolve_commit(to)?)?;

        if let Some(from) = from {
            revwalk.hide(self.resolve_commit(from)?)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;

            let short_id = commit.as_object().short_id()?;
            let hash = short_id
                .as_str()
                .ok_or_else(|| ChangelogError::parse("short commit id is not valid UTF-8"))?
                .to_string();

            let message = commit
                .message()
                .ok_or_else(|| {
                    ChangelogError::parse(format!("commit {} has a non UTF-8 message", hash))
                })?
                .to_string();

            commits.push(RawCommit { hash, message });
        }

        // Reverse to get chronological order (oldest first)
        commits.reverse();
        debug!(count = commits.len(), "walked commit range");
        Ok(commits)
    }

    #[instrument(skip(self, paths), fields(count = paths.len()))]
    fn commit_paths(&self, paths: &[PathBuf], message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(&self.relative_to_workdir(path)?)?;
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        info!(commit = %oid, "committed release files");
        Ok(oid.to_string())
    }
}
