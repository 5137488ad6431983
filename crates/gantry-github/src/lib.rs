//! Gantry GitHub - GitHub REST integration
//!
//! Provides the pull request and release operations the Gantry workflows
//! need. Authentication is a plain token, usually `GITHUB_TOKEN` on a CI
//! runner.

pub mod client;
pub mod error;
pub mod pulls;
pub mod releases;
pub mod repo;
pub mod types;

pub use client::{truncate_body, GitHubClient, GitHubClientConfig, MAX_BODY_LENGTH};
pub use error::{HubError, Result};
pub use repo::RepoSlug;
pub use types::{PullRequest, Release};
