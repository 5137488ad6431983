//! Pull request operations

use serde::Serialize;
use tracing::{info, instrument};

use crate::client::{truncate_body, GitHubClient};
use crate::error::Result;
use crate::types::PullRequest;

#[derive(Serialize)]
struct CreatePullRequest<'a> {
    title: &'a str,
    body: &'a str,
    head: &'a str,
    base: &'a str,
}

#[derive(Serialize)]
struct UpdatePullRequest<'a> {
    title: &'a str,
    body: &'a str,
}

impl GitHubClient {
    /// Find the open version PR from `head` into `base`, if one exists.
    ///
    /// The head filter requires the `owner:branch` form.
    #[instrument(skip(self), fields(head, base))]
    pub async fn find_version_pr(&self, head: &str, base: &str) -> Result<Option<PullRequest>> {
        let url = self.repo_url("/pulls");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("state", "open"),
                ("head", &format!("{}:{}", self.slug().owner, head)),
                ("base", base),
            ])
            .send()
            .await?;

        let mut pulls: Vec<PullRequest> = self.parse(response).await?;
        info!(count = pulls.len(), "searched for open version PR");
        let first = pulls.drain(..).next();
        Ok(first)
    }

    /// Open a new pull request
    #[instrument(skip(self, body), fields(title, head, base, body_len = body.len()))]
    pub async fn create_pr(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest> {
        let url = self.repo_url("/pulls");
        let body = truncate_body(body);
        let response = self
            .client
            .post(&url)
            .json(&CreatePullRequest {
                title,
                body: &body,
                head,
                base,
            })
            .send()
            .await?;

        let pr: PullRequest = self.parse(response).await?;
        info!(number = pr.number, url = %pr.html_url, "created version PR");
        Ok(pr)
    }

    /// Update an existing pull request's title and body
    #[instrument(skip(self, body), fields(number, title, body_len = body.len()))]
    pub async fn update_pr(&self, number: u64, title: &str, body: &str) -> Result<PullRequest> {
        let url = self.repo_url(&format!("/pulls/{}", number));
        let body = truncate_body(body);
        let response = self
            .client
            .patch(&url)
            .json(&UpdatePullRequest { title, body: &body })
            .send()
            .await?;

        let pr: PullRequest = self.parse(response).await?;
        info!(number = pr.number, "updated version PR");
        Ok(pr)
    }
}
