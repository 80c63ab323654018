//! Keeps at most one status comment, identified by a hidden marker, on a request.
use std::fmt::{Display, Formatter};

use crate::check::RequestClient;
use crate::github::{CommentId, IssueComment, IssueNumber};

/// Hidden HTML comment that identifies the status comment of one workflow step.
///
/// It is derived from the workflow, job and step (action) identifiers, so different steps
/// checking the same request keep separate comments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerToken(String);

impl MarkerToken {
    pub fn new(workflow: &str, job: &str, action: &str) -> Self {
        Self(format!("<!-- {workflow}/{job}/{action} -->\n"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_in(&self, body: &str) -> bool {
        body.contains(&self.0)
    }
}

impl Display for MarkerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the status comment posted when the check fails.
pub struct FailureComment<'a> {
    marker: &'a MarkerToken,
    message: &'a str,
}

impl<'a> FailureComment<'a> {
    pub fn new(marker: &'a MarkerToken, message: &'a str) -> Self {
        Self { marker, message }
    }

    /// The marker always comes first, the marker's own newline separates it from the message.
    pub fn render(&self) -> String {
        format!("{}{}", self.marker, self.message)
    }
}

/// What happened to the status comment during a sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentAction {
    Untouched,
    Created(CommentId),
    Updated(CommentId),
    Deleted(CommentId),
}

pub struct CommentManager<'a> {
    marker: &'a MarkerToken,
    enabled: bool,
}

impl<'a> CommentManager<'a> {
    pub fn new(marker: &'a MarkerToken, enabled: bool) -> Self {
        Self { marker, enabled }
    }

    /// Returns the first comment carrying our marker.
    fn find_marked<'c>(&self, comments: &'c [IssueComment]) -> Option<&'c IssueComment> {
        let mut marked = comments.iter().filter(|c| self.marker.is_in(&c.body));
        let found = marked.next();
        let extra = marked.count();
        if extra > 0 {
            tracing::warn!("Found {} marked status comments, using the first one", extra + 1);
        }
        found
    }

    /// Brings the status comment in line with the outcome of the check: `failure` holds the
    /// failure message, or `None` if the check passed.
    ///
    /// A failure creates the comment or rewrites the existing one, a pass deletes it. When
    /// commenting is disabled, the comments of the request are not touched (or even listed).
    pub async fn sync<Client: RequestClient + ?Sized>(
        &self,
        client: &Client,
        issue: IssueNumber,
        failure: Option<&str>,
    ) -> anyhow::Result<CommentAction> {
        if !self.enabled {
            return Ok(CommentAction::Untouched);
        }

        let comments = client.get_comments(issue).await?;
        let existing = self.find_marked(&comments).map(|comment| comment.id);

        let action = match (failure, existing) {
            (Some(message), Some(id)) => {
                let body = FailureComment::new(self.marker, message).render();
                client.update_comment(id, &body).await?;
                tracing::info!("Updated status comment {id} on #{issue}");
                CommentAction::Updated(id)
            }
            (Some(message), None) => {
                let body = FailureComment::new(self.marker, message).render();
                let comment = client.post_comment(issue, &body).await?;
                tracing::info!("Created status comment {} on #{issue}", comment.id);
                CommentAction::Created(comment.id)
            }
            (None, Some(id)) => {
                client.delete_comment(id).await?;
                tracing::info!("Deleted stale status comment {id} from #{issue}");
                CommentAction::Deleted(id)
            }
            (None, None) => CommentAction::Untouched,
        };
        Ok(action)
    }
}
