use async_trait::async_trait;

use crate::check::comment::{CommentManager, MarkerToken};
use crate::check::matcher::LabelMatcher;
use crate::check::patterns::normalize_patterns;
use crate::check::report::{report_failure, report_success, Reporter};
use crate::check::template::{render_template, TemplateValues};
use crate::config::CheckConfig;
use crate::github::{CommentId, IssueComment, IssueNumber};

pub mod comment;
mod error;
pub mod matcher;
pub mod mode;
pub mod patterns;
pub mod report;
pub mod template;

pub use error::CheckError;

/// Provides the operations on a single issue or pull request that the check needs.
#[async_trait]
pub trait RequestClient: Sync {
    /// Names of all labels currently applied to the issue.
    async fn get_labels(&self, issue: IssueNumber) -> anyhow::Result<Vec<String>>;

    /// Comments of the issue, in the order returned by GitHub (oldest first).
    async fn get_comments(&self, issue: IssueNumber) -> anyhow::Result<Vec<IssueComment>>;

    /// Post a comment to the issue with the given number.
    async fn post_comment(&self, issue: IssueNumber, body: &str) -> anyhow::Result<IssueComment>;

    /// Replace the body of an existing comment.
    async fn update_comment(&self, id: CommentId, body: &str) -> anyhow::Result<()>;

    async fn delete_comment(&self, id: CommentId) -> anyhow::Result<()>;
}

/// Everything a single check run needs to know about its environment.
pub struct CheckContext {
    pub issue: IssueNumber,
    pub marker: MarkerToken,
    pub config: CheckConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed { intersection: Vec<String> },
    Failed { message: String },
}

/// Runs the label check against the request described by `context`.
///
/// Configuration problems and unmet label requirements are regular outcomes: they update the
/// status comment and are reported as a failure. Any other error is returned and the run should
/// be marked as failed without further reporting.
pub async fn run_check<Client, R>(
    client: &Client,
    reporter: &mut R,
    context: &CheckContext,
) -> Result<CheckOutcome, CheckError>
where
    Client: RequestClient + ?Sized,
    R: Reporter + ?Sized,
{
    let comments = CommentManager::new(&context.marker, context.config.add_comment);

    match evaluate(client, reporter, context).await {
        Ok(intersection) => {
            reporter.debug("remove the comment if it exists...");
            let action = comments.sync(client, context.issue, None).await?;
            tracing::debug!("Status comment of #{}: {action:?}", context.issue);
            report_success(reporter, &intersection).map_err(CheckError::Runner)?;
            Ok(CheckOutcome::Passed { intersection })
        }
        Err(error) if !error.is_fatal() => {
            let message = error.to_string();
            tracing::info!("Label check failed for #{}: {message}", context.issue);
            let action = comments
                .sync(client, context.issue, Some(&message))
                .await?;
            tracing::debug!("Status comment of #{}: {action:?}", context.issue);
            report_failure(reporter, context.config.failure_exit_type(), &message)
                .map_err(CheckError::Runner)?;
            Ok(CheckOutcome::Failed { message })
        }
        Err(error) => Err(error),
    }
}

/// Returns the intersection if the label requirement is met.
async fn evaluate<Client, R>(
    client: &Client,
    reporter: &mut R,
    context: &CheckContext,
) -> Result<Vec<String>, CheckError>
where
    Client: RequestClient + ?Sized,
    R: Reporter + ?Sized,
{
    let config = &context.config;
    let settings = config.validate()?;

    reporter.debug(&format!("gather labels: {}", config.labels));
    let match_mode = config.match_mode();
    let patterns = normalize_patterns(&config.labels, match_mode);
    let matcher = LabelMatcher::new(&patterns, match_mode)?;

    reporter.debug(&format!(
        "fetch the labels for {} using the API",
        context.issue
    ));
    let applied = client.get_labels(context.issue).await?;
    let intersection = matcher.intersection(&applied);
    tracing::info!(
        "Matched {} of {} applied label(s) on #{}: {intersection:?}",
        intersection.len(),
        applied.len(),
        context.issue
    );

    reporter.debug("detect errors...");
    if let Some(violation) = settings.mode.evaluate(intersection.len(), settings.count) {
        let values = TemplateValues::new()
            .with("mode", settings.mode)
            .with("count", settings.count)
            .with("errorString", violation)
            .with("provided", patterns.join(", "))
            .with("applied", applied.join(", "));
        return Err(CheckError::Violation(render_template(
            &config.message,
            &values,
        )));
    }
    Ok(intersection)
}
