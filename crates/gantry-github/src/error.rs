//! GitHub error types

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// GitHub-related errors
#[derive(Debug, Error)]
pub enum HubError {
    /// No token available in the configured environment variable
    #[error("No GitHub token found in ${0}")]
    MissingToken(String),

    /// API error from GitHub
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Remote URL is not a GitHub repository URL
    #[error("Cannot determine owner/repo from remote URL: {0}")]
    InvalidRemoteUrl(String),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
