//! GitHub API types

use serde::{Deserialize, Serialize};

/// A pull request, as returned by the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Browser URL
    pub html_url: String,
    /// PR title
    pub title: String,
    /// PR body (markdown)
    pub body: Option<String>,
    /// State ("open" or "closed")
    pub state: String,
}

/// A release, as returned by the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Release id
    pub id: u64,
    /// Browser URL
    pub html_url: String,
    /// Tag the release points at
    pub tag_name: String,
    /// Release display name
    pub name: Option<String>,
    /// Whether the release is marked as a prerelease
    pub prerelease: bool,
}

/// Error payload GitHub returns on failed requests
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
