use anyhow::Context;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;

use crate::check::RequestClient;
use crate::github::{CommentId, GithubRepoName, IssueComment, IssueNumber};

/// Maximum page size of the GitHub REST API.
const PAGE_SIZE: u8 = 100;

/// Provides access to the issues of a single repository using the GitHub API.
pub struct GithubRequestClient {
    client: Octocrab,
    repo_name: GithubRepoName,
}

#[derive(serde::Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

#[derive(serde::Deserialize, Debug)]
struct LabelPayload {
    name: String,
}

#[derive(serde::Deserialize, Debug)]
struct CommentPayload {
    id: u64,
    body: Option<String>,
}

impl From<CommentPayload> for IssueComment {
    fn from(comment: CommentPayload) -> Self {
        Self {
            id: CommentId(comment.id),
            body: comment.body.unwrap_or_default(),
        }
    }
}

#[derive(serde::Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GithubRequestClient {
    pub fn new(client: Octocrab, repo_name: GithubRepoName) -> Self {
        Self { client, repo_name }
    }

    fn format_issue(&self, issue: IssueNumber) -> String {
        format!("{}#{}", self.repo_name, issue)
    }

    fn issue_url(&self, issue: IssueNumber, resource: &str) -> String {
        format!(
            "/repos/{}/{}/issues/{issue}/{resource}",
            self.repo_name.owner(),
            self.repo_name.name()
        )
    }

    fn comment_url(&self, id: CommentId) -> String {
        format!(
            "/repos/{}/{}/issues/comments/{id}",
            self.repo_name.owner(),
            self.repo_name.name()
        )
    }

    /// Downloads all pages of a list endpoint. A page shorter than [`PAGE_SIZE`] is the last one.
    async fn get_all_pages<T: DeserializeOwned>(&self, route: &str) -> anyhow::Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<T> = self
                .client
                .get(
                    route,
                    Some(&PageParams {
                        per_page: PAGE_SIZE,
                        page,
                    }),
                )
                .await?;
            let received = batch.len();
            items.extend(batch);
            tracing::trace!("Received {received} item(s) from page {page} of {route}");
            if received < PAGE_SIZE as usize {
                return Ok(items);
            }
            page += 1;
        }
    }
}

#[async_trait]
impl RequestClient for GithubRequestClient {
    async fn get_labels(&self, issue: IssueNumber) -> anyhow::Result<Vec<String>> {
        // https://docs.github.com/en/rest/issues/labels?apiVersion=2022-11-28#list-labels-for-an-issue
        let labels: Vec<LabelPayload> = self
            .get_all_pages(&self.issue_url(issue, "labels"))
            .await
            .with_context(|| format!("Cannot fetch labels of {}", self.format_issue(issue)))?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn get_comments(&self, issue: IssueNumber) -> anyhow::Result<Vec<IssueComment>> {
        // https://docs.github.com/en/rest/issues/comments?apiVersion=2022-11-28#list-issue-comments
        let comments: Vec<CommentPayload> = self
            .get_all_pages(&self.issue_url(issue, "comments"))
            .await
            .with_context(|| format!("Cannot fetch comments of {}", self.format_issue(issue)))?;
        Ok(comments.into_iter().map(IssueComment::from).collect())
    }

    /// The comment will be posted as the user owning the token.
    async fn post_comment(
        &self,
        issue: IssueNumber,
        body: &str,
    ) -> anyhow::Result<IssueComment> {
        let comment: CommentPayload = self
            .client
            .post(self.issue_url(issue, "comments"), Some(&CommentBody { body }))
            .await
            .with_context(|| format!("Cannot post comment to {}", self.format_issue(issue)))?;
        Ok(comment.into())
    }

    async fn update_comment(&self, id: CommentId, body: &str) -> anyhow::Result<()> {
        let _: CommentPayload = self
            .client
            .patch(self.comment_url(id), Some(&CommentBody { body }))
            .await
            .with_context(|| format!("Cannot update comment {id} in {}", self.repo_name))?;
        Ok(())
    }

    async fn delete_comment(&self, id: CommentId) -> anyhow::Result<()> {
        self.client
            .issues(self.repo_name.owner(), self.repo_name.name())
            .delete_comment(octocrab::models::CommentId(id.0))
            .await
            .with_context(|| format!("Cannot delete comment {id} in {}", self.repo_name))?;
        Ok(())
    }
}
