//! Repository slug parsing

use url::Url;

use crate::error::{HubError, Result};

/// An `owner/repo` pair parsed from a git remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoSlug {
    /// Create a slug directly
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse a slug from a git remote URL.
    ///
    /// Handles the two URL forms git remotes use in practice:
    ///   - `https://github.com/owner/repo.git`
    ///   - `git@github.com:owner/repo.git`
    pub fn from_remote_url(remote_url: &str) -> Result<Self> {
        // scp-like ssh form has no scheme; rewrite it into one Url accepts
        let normalized = match remote_url.split_once('@') {
            Some((_, rest)) if !remote_url.contains("://") => {
                format!("ssh://{}", rest.replacen(':', "/", 1))
            }
            _ => remote_url.to_string(),
        };

        let url = Url::parse(&normalized)
            .map_err(|_| HubError::InvalidRemoteUrl(remote_url.to_string()))?;

        let mut segments = url
            .path_segments()
            .ok_or_else(|| HubError::InvalidRemoteUrl(remote_url.to_string()))?
            .filter(|s| !s.is_empty());

        let owner = segments
            .next()
            .ok_or_else(|| HubError::InvalidRemoteUrl(remote_url.to_string()))?;
        let repo = segments
            .next()
            .ok_or_else(|| HubError::InvalidRemoteUrl(remote_url.to_string()))?
            .trim_end_matches(".git");

        if owner.is_empty() || repo.is_empty() {
            return Err(HubError::InvalidRemoteUrl(remote_url.to_string()));
        }

        Ok(Self::new(owner, repo))
    }

    /// Browser URL of a file on a branch
    pub fn blob_url(&self, branch: &str, path: &str) -> String {
        format!(
            "https://github.com/{}/{}/blob/{}/{}",
            self.owner, self.repo, branch, path
        )
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_url() {
        let slug = RepoSlug::from_remote_url("https://github.com/acme/widgets.git").unwrap();
        assert_eq!(slug, RepoSlug::new("acme", "widgets"));
    }

    #[test]
    fn test_parse_https_url_without_suffix() {
        let slug = RepoSlug::from_remote_url("https://github.com/acme/widgets").unwrap();
        assert_eq!(slug.to_string(), "acme/widgets");
    }

    #[test]
    fn test_parse_ssh_url() {
        let slug = RepoSlug::from_remote_url("git@github.com:acme/widgets.git").unwrap();
        assert_eq!(slug, RepoSlug::new("acme", "widgets"));
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(RepoSlug::from_remote_url("not a url").is_err());
        assert!(RepoSlug::from_remote_url("https://github.com/").is_err());
    }

    #[test]
    fn test_blob_url() {
        let slug = RepoSlug::new("acme", "widgets");
        assert_eq!(
            slug.blob_url("gantry-release/main", "changelogs/v1.2.0-changelog.md"),
            "https://github.com/acme/widgets/blob/gantry-release/main/changelogs/v1.2.0-changelog.md"
        );
    }
}
