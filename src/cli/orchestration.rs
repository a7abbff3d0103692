//! Main workflow orchestration logic
//!
//! The release pipeline runs as a fixed sequence of stages, each blocking
//! until its git or file operation completes. The first error aborts the run;
//! files already written are left as they are.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use semver::Version;
use tracing::{debug, info};

use crate::analyzer::VersionCalculator;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::tag::{latest_tag, Tag};
use crate::domain::{BranchKind, Changelog, Commit};
use crate::error::{ChangelogError, Result};
use crate::files;
use crate::git::Repository;
use crate::template;

/// Arguments for the release workflow
///
/// Mirrors the CLI flags that affect the run, so the workflow can be driven
/// without clap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowArgs {
    /// Render only; no file is written and nothing is committed
    pub dry_run: bool,
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadConfig,
    DetectBranch,
    ValidateBranch,
    ResolveTag,
    FetchCommits,
    ComputeVersion,
    RenderPreview,
    WriteChangelog,
    BumpManifest,
    Commit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::LoadConfig => "load-config",
            Stage::DetectBranch => "detect-branch",
            Stage::ValidateBranch => "validate-branch",
            Stage::ResolveTag => "resolve-tag",
            Stage::FetchCommits => "fetch-commits",
            Stage::ComputeVersion => "compute-version",
            Stage::RenderPreview => "render-preview",
            Stage::WriteChangelog => "write-changelog",
            Stage::BumpManifest => "bump-manifest",
            Stage::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// What the run did once the version was known
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseAction {
    /// Changelog written, manifests bumped and both committed
    Released {
        changelog: PathBuf,
        manifests: Vec<PathBuf>,
        commit: String,
    },
    /// Plain-text preview of the pending release (develop branch)
    Previewed { preview: String },
    /// Markdown section that a release run would prepend
    DryRun { rendered: String },
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOutcome {
    pub branch: String,
    pub kind: BranchKind,
    pub previous_tag: Option<String>,
    pub version: Version,
    /// Commits since the previous tag
    pub commits: Vec<Commit>,
    pub warnings: Vec<BoundaryWarning>,
    pub action: ReleaseAction,
}

/// The release pipeline bound to one repository and its working tree
pub struct Workflow<'a, R: Repository + ?Sized> {
    config: &'a Config,
    repo: &'a R,
    root: PathBuf,
    date: String,
}

impl<'a, R: Repository + ?Sized> Workflow<'a, R> {
    /// Create a workflow; relative paths from the config resolve against `root`
    pub fn new(config: &'a Config, repo: &'a R, root: impl Into<PathBuf>) -> Self {
        Workflow {
            config,
            repo,
            root: root.into(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Override the release date (`YYYY-MM-DD`) stamped on the section
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn manifest_paths(&self) -> Vec<PathBuf> {
        self.config
            .manifests
            .files
            .iter()
            .map(|file| self.resolve(file))
            .collect()
    }

    /// Run every stage and report what was done
    pub fn run(&self, args: &WorkflowArgs) -> Result<WorkflowOutcome> {
        let mut warnings = Vec::new();

        debug!(stage = %Stage::DetectBranch, "entering stage");
        let branch = self.repo.current_branch()?;
        let kind = BranchKind::classify(&branch, &self.config.branches);
        info!(%branch, %kind, "detected branch");

        debug!(stage = %Stage::ValidateBranch, "entering stage");
        if kind == BranchKind::Other {
            return Err(ChangelogError::branch(format!(
                "'{}' is not a release, hotfix or develop branch",
                branch
            )));
        }

        debug!(stage = %Stage::ResolveTag, "entering stage");
        let previous_tag = self.resolve_tag(&branch, &mut warnings)?;

        debug!(stage = %Stage::FetchCommits, "entering stage");
        let calculator = VersionCalculator::new(
            &self.config.conventional_commits,
            self.config.branches.clone(),
        )?;
        let all = calculator.commits(self.repo, previous_tag.as_deref(), &branch)?;
        let release = if kind == BranchKind::Develop {
            Vec::new()
        } else {
            calculator.commits(self.repo, Some(self.config.branches.develop.as_str()), &branch)?
        };
        if all.is_empty() {
            if let Some(tag) = &previous_tag {
                warnings.push(self.note(BoundaryWarning::NoNewCommits {
                    latest_tag: tag.clone(),
                    branch: branch.clone(),
                }));
            }
        }

        debug!(stage = %Stage::ComputeVersion, "entering stage");
        let version = calculator.next_version_for(previous_tag.as_deref(), kind, &all)?;
        info!(
            previous = previous_tag.as_deref().unwrap_or("<none>"),
            %version,
            "computed next version"
        );

        let repo_url = self.repo_url(&mut warnings);
        let changelog = Changelog::build(
            self.config.changelog.header.as_str(),
            repo_url,
            version.to_string(),
            self.date.as_str(),
            &all,
            &release,
        );

        let action = if !kind.publishes() {
            debug!(stage = %Stage::RenderPreview, "entering stage");
            ReleaseAction::Previewed {
                preview: template::render_preview(&changelog),
            }
        } else if args.dry_run {
            debug!(stage = %Stage::RenderPreview, dry_run = true, "entering stage");
            ReleaseAction::DryRun {
                rendered: template::render_changelog(&changelog),
            }
        } else {
            self.publish(&changelog)?
        };

        Ok(WorkflowOutcome {
            branch,
            kind,
            previous_tag,
            version,
            commits: all,
            warnings,
            action,
        })
    }

    fn note(&self, warning: BoundaryWarning) -> BoundaryWarning {
        debug!(%warning, "boundary condition");
        warning
    }

    fn resolve_tag(
        &self,
        branch: &str,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<Option<String>> {
        let tags = self.repo.list_tags()?;
        let latest = latest_tag(tags.clone());

        match &latest {
            Some(latest) => {
                for tag in tags.iter().filter(|tag| *tag != latest) {
                    if Tag::new(tag.as_str()).version().is_err() {
                        warnings.push(self.note(BoundaryWarning::UnparsableTag { tag: tag.clone() }));
                    }
                }
            }
            None => warnings.push(self.note(BoundaryWarning::NoTagsFound {
                branch: branch.to_string(),
            })),
        }

        Ok(latest)
    }

    fn repo_url(&self, warnings: &mut Vec<BoundaryWarning>) -> String {
        if let Some(url) = &self.config.changelog.repo_url {
            return files::normalize_repo_url(url);
        }

        let manifest = self.config.manifests.files.first();
        let declared = manifest.and_then(|file| {
            files::manifest_repo_url(&self.resolve(file))
                .map_err(|e| debug!(error = %e, "no repository URL from manifest"))
                .ok()
                .flatten()
        });

        declared.unwrap_or_else(|| {
            warnings.push(self.note(BoundaryWarning::MissingRepoUrl {
                manifest: manifest
                    .map(|file| file.display().to_string())
                    .unwrap_or_default(),
            }));
            String::new()
        })
    }

    fn publish(&self, changelog: &Changelog) -> Result<ReleaseAction> {
        debug!(stage = %Stage::WriteChangelog, "entering stage");
        let changelog_path = self.resolve(&self.config.changelog.path);
        files::write_changelog(&changelog_path, &template::render_changelog(changelog))?;

        debug!(stage = %Stage::BumpManifest, "entering stage");
        let manifests = self.manifest_paths();
        for manifest in &manifests {
            files::update_manifest_version(manifest, &changelog.version)?;
        }

        debug!(stage = %Stage::Commit, "entering stage");
        let mut paths = Vec::with_capacity(manifests.len() + 1);
        paths.push(changelog_path.clone());
        paths.extend(manifests.iter().cloned());
        let message = self.config.commit.message_for(&changelog.version);
        let commit = self.repo.commit_paths(&paths, &message)?;
        info!(%commit, version = %changelog.version, "release committed");

        Ok(ReleaseAction::Released {
            changelog: changelog_path,
            manifests,
            commit,
        })
    }
}
