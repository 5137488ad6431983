//! Release operations

use serde::Serialize;
use tracing::{info, instrument};

use crate::client::{truncate_body, GitHubClient};
use crate::error::Result;
use crate::types::Release;

#[derive(Serialize)]
struct CreateRelease<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
    prerelease: bool,
}

impl GitHubClient {
    /// Create a release for an existing tag
    #[instrument(skip(self, body), fields(tag, prerelease, body_len = body.len()))]
    pub async fn create_release(
        &self,
        tag: &str,
        name: &str,
        body: &str,
        prerelease: bool,
    ) -> Result<Release> {
        let url = self.repo_url("/releases");
        let body = truncate_body(body);
        let response = self
            .client
            .post(&url)
            .json(&CreateRelease {
                tag_name: tag,
                name,
                body: &body,
                prerelease,
            })
            .send()
            .await?;

        let release: Release = self.parse(response).await?;
        info!(tag, url = %release.html_url, "created GitHub release");
        Ok(release)
    }
}
