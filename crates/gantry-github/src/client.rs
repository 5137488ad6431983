//! GitHub API client

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{HubError, Result};
use crate::repo::RepoSlug;
use crate::types::ApiErrorBody;

/// Maximum length GitHub accepts for a PR or release body
pub const MAX_BODY_LENGTH: usize = 65_536;

const TRUNCATION_NOTICE: &str = "\n\n_The remainder of this message was truncated._\n";

/// GitHub client configuration
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// API base URL (override for GitHub Enterprise)
    pub api_url: String,
    /// API token
    pub token: String,
    /// Target repository
    pub slug: RepoSlug,
}

impl GitHubClientConfig {
    /// Build a config reading the token from an environment variable
    pub fn from_env(api_url: impl Into<String>, token_env: &str, slug: RepoSlug) -> Result<Self> {
        let token = std::env::var(token_env)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HubError::MissingToken(token_env.to_string()))?;

        Ok(Self {
            api_url: api_url.into(),
            token,
            slug,
        })
    }
}

/// GitHub REST client
pub struct GitHubClient {
    config: GitHubClientConfig,
    pub(crate) client: Client,
}

impl GitHubClient {
    /// Create a new client
    pub fn new(config: GitHubClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("gantry"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| HubError::MissingToken("token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { config, client })
    }

    /// Target repository slug
    pub fn slug(&self) -> &RepoSlug {
        &self.config.slug
    }

    /// Full API URL for a repo-scoped path
    pub(crate) fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.slug.owner,
            self.config.slug.repo,
            path
        )
    }

    /// Deserialize a response, turning non-2xx statuses into [`HubError::Api`]
    pub(crate) async fn parse<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        debug!(status = status.as_u16(), "github response");

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(api_error(status, response).await)
        }
    }
}

async fn api_error(status: StatusCode, response: Response) -> HubError {
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|b| b.message)
        .unwrap_or(text);

    HubError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Truncate a body to GitHub's limit, appending a notice before the cut.
///
/// The cut lands on a char boundary at or below the budget left after the
/// notice.
pub fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_BODY_LENGTH {
        return body.to_string();
    }

    let budget = MAX_BODY_LENGTH - TRUNCATION_NOTICE.len();
    let mut cut = budget;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}{}", &body[..cut], TRUNCATION_NOTICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_body_unchanged() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(MAX_BODY_LENGTH + 100);
        let truncated = truncate_body(&body);
        assert!(truncated.len() <= MAX_BODY_LENGTH);
        assert!(truncated.ends_with(TRUNCATION_NOTICE));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Multi-byte chars straddling the cut point must not split
        let body = "é".repeat(MAX_BODY_LENGTH);
        let truncated = truncate_body(&body);
        assert!(truncated.len() <= MAX_BODY_LENGTH);
        assert!(truncated.is_char_boundary(truncated.len() - TRUNCATION_NOTICE.len()));
    }

    #[test]
    fn test_repo_url() {
        let config = GitHubClientConfig {
            api_url: "https://api.github.com/".to_string(),
            token: "t".to_string(),
            slug: RepoSlug::new("acme", "widgets"),
        };
        let client = GitHubClient::new(config).unwrap();
        assert_eq!(
            client.repo_url("/pulls"),
            "https://api.github.com/repos/acme/widgets/pulls"
        );
    }

    #[test]
    fn test_missing_token_env() {
        let result = GitHubClientConfig::from_env(
            "https://api.github.com",
            "GANTRY_TEST_TOKEN_THAT_DOES_NOT_EXIST",
            RepoSlug::new("acme", "widgets"),
        );
        assert!(matches!(result, Err(HubError::MissingToken(_))));
    }
}
