//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Gantry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema")]
    pub schema: Option<String>,

    /// Project name (used in log output only)
    pub name: Option<String>,

    /// Git configuration
    pub git: GitConfig,

    /// GitHub API configuration
    pub github: GitHubConfig,

    /// Version-PR mode configuration
    pub version: VersionConfig,

    /// Publish mode configuration
    pub publish: PublishConfig,

    /// Changelog aggregation configuration
    pub changelog: ChangelogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: None,
            name: None,
            git: GitConfig::default(),
            github: GitHubConfig::default(),
            version: VersionConfig::default(),
            publish: PublishConfig::default(),
            changelog: ChangelogConfig::default(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,

    /// Base branch the version PR targets
    pub base_branch: String,

    /// Prefix for the generated release branch; the base branch name is
    /// appended, e.g. `gantry-release/main`
    pub release_branch_prefix: String,

    /// Commit message for the version commit
    pub commit_message: String,

    /// Committer identity to fall back to when the repository has none
    /// (the usual case on CI runners)
    pub fallback_name: String,
    pub fallback_email: String,
}

impl GitConfig {
    /// Full name of the release branch for the configured base branch
    pub fn release_branch(&self) -> String {
        format!("{}/{}", self.release_branch_prefix, self.base_branch)
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            base_branch: "main".to_string(),
            release_branch_prefix: "gantry-release".to_string(),
            commit_message: "Version packages".to_string(),
            fallback_name: "gantry[bot]".to_string(),
            fallback_email: "gantry[bot]@users.noreply.github.com".to_string(),
        }
    }
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API base URL (override for GitHub Enterprise)
    pub api_url: String,

    /// Environment variable holding the API token
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

/// Version-PR mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// External command that applies pending changesets
    /// (e.g. "npx changeset version")
    pub command: String,

    /// Title for the version PR
    pub pr_title: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            command: "npx changeset version".to_string(),
            pr_title: "Version Packages".to_string(),
        }
    }
}

/// Publish mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// External command that publishes packages
    /// (e.g. "npx changeset publish")
    pub command: String,

    /// Whether to create a GitHub release per published package
    pub github_releases: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            command: "npx changeset publish".to_string(),
            github_releases: true,
        }
    }
}

/// Changelog aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Directory the aggregated release changelog is written into
    pub directory: PathBuf,

    /// Directory holding pending changeset files
    pub changeset_directory: PathBuf,

    /// Per-package changelog file name
    pub file_name: String,

    /// Optional external formatter command; the document is piped through
    /// stdin/stdout (e.g. "npx prettier --parser markdown")
    pub formatter: Option<String>,
}

impl ChangelogConfig {
    /// Path of the aggregated document for a release version
    pub fn aggregate_path(&self, release_version: &str) -> PathBuf {
        self.directory
            .join(format!("v{}-changelog.md", release_version))
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("changelogs"),
            changeset_directory: PathBuf::from(".changeset"),
            file_name: "CHANGELOG.md".to_string(),
            formatter: None,
        }
    }
}
