use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChangelogError, Result};

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "gitflow-changelog.toml";

/// Represents the complete configuration for gitflow-changelog.
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults of the develop / release / hotfix workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub branches: BranchNaming,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub manifests: ManifestsConfig,

    #[serde(default)]
    pub commit: CommitConfig,
}

fn default_changelog_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

/// Where the changelog lives and what goes above each release section.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    /// Path of the Markdown file, relative to the repository root unless absolute
    #[serde(default = "default_changelog_path")]
    pub path: PathBuf,

    /// Static banner rendered before the version heading
    #[serde(default)]
    pub header: String,

    /// Base URL used for commit links; read from the manifest when unset
    #[serde(default)]
    pub repo_url: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_changelog_path(),
            header: String::new(),
            repo_url: None,
        }
    }
}

fn default_release_prefix() -> String {
    "release/".to_string()
}

fn default_hotfix_prefix() -> String {
    "hotfix/".to_string()
}

fn default_develop_branch() -> String {
    "develop".to_string()
}

/// Branch naming convention of the workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchNaming {
    #[serde(default = "default_release_prefix")]
    pub release_prefix: String,

    #[serde(default = "default_hotfix_prefix")]
    pub hotfix_prefix: String,

    /// Exact name of the integration branch
    #[serde(default = "default_develop_branch")]
    pub develop: String,
}

impl Default for BranchNaming {
    fn default() -> Self {
        BranchNaming {
            release_prefix: default_release_prefix(),
            hotfix_prefix: default_hotfix_prefix(),
            develop: default_develop_branch(),
        }
    }
}

/// Returns the default list of breaking change keywords.
fn default_breaking_change_indicators() -> Vec<String> {
    vec!["BREAKING CHANGE".to_string(), "BREAKING-CHANGE".to_string()]
}

/// Configuration for conventional commit parsing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalCommitsConfig {
    /// Footer keywords that mark a commit as breaking
    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,

    /// Keep commits whose header does not follow the grammar
    #[serde(default)]
    pub keep_untyped: bool,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            breaking_change_indicators: default_breaking_change_indicators(),
            keep_untyped: false,
        }
    }
}

fn default_manifest_files() -> Vec<PathBuf> {
    vec![
        PathBuf::from("package.json"),
        PathBuf::from("package-lock.json"),
    ]
}

/// JSON manifests whose top-level `version` field is bumped.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestsConfig {
    #[serde(default = "default_manifest_files")]
    pub files: Vec<PathBuf>,
}

impl Default for ManifestsConfig {
    fn default() -> Self {
        ManifestsConfig {
            files: default_manifest_files(),
        }
    }
}

fn default_commit_message() -> String {
    "chore(release): bump version to {version}".to_string()
}

/// Settings of the bump commit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitConfig {
    /// Commit message; `{version}` is replaced by the new version
    #[serde(default = "default_commit_message")]
    pub message: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            message: default_commit_message(),
        }
    }
}

impl CommitConfig {
    /// Format the bump commit message for a version
    pub fn message_for(&self, version: &str) -> String {
        self.message.replace("{version}", version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitflow-changelog.toml` in current directory
/// 3. `gitflow-changelog.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or an explicit path is missing
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let content = fs::read_to_string(&path).map_err(|e| {
                ChangelogError::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            parse_config(&content)
                .map_err(|e| ChangelogError::config(format!("{}: {}", path.display(), e)))
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ChangelogError::config(e.to_string()))
}

fn discover_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
