//! Identity of the workflow step and of the request it runs for, taken from the
//! `GITHUB_*` variables of the runner.
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use crate::check::comment::MarkerToken;
use crate::check::CheckError;
use crate::github::{GithubRepoName, IssueNumber};

const MERGE_GROUP_EVENT: &str = "merge_group";

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ActionContext {
    /// `owner/name` of the repository.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// Path to the JSON payload of the triggering event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    #[arg(long = "ref", env = "GITHUB_REF", default_value = "")]
    pub git_ref: String,

    #[arg(long, env = "GITHUB_WORKFLOW", default_value = "")]
    pub workflow: String,

    #[arg(long, env = "GITHUB_JOB", default_value = "")]
    pub job: String,

    #[arg(long, env = "GITHUB_ACTION", default_value = "")]
    pub action: String,

    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,
}

/// The parts of an event payload that can carry the issue number.
#[derive(serde::Deserialize, Debug, Default)]
struct EventPayload {
    issue: Option<NumberedPayload>,
    pull_request: Option<NumberedPayload>,
    number: Option<u64>,
}

#[derive(serde::Deserialize, Debug)]
struct NumberedPayload {
    number: u64,
}

impl ActionContext {
    pub fn repo_name(&self) -> Result<GithubRepoName, CheckError> {
        self.repository
            .parse()
            .map_err(|error: anyhow::Error| CheckError::Identity(error.to_string()))
    }

    /// Marker identifying the status comment of this workflow step.
    pub fn marker(&self) -> MarkerToken {
        MarkerToken::new(&self.workflow, &self.job, &self.action)
    }

    /// Finds the issue or pull request the check runs for.
    ///
    /// Merge queue events carry no issue in their payload, in that case the number is recovered
    /// from the temporary merge queue branch name.
    pub fn resolve_issue(&self) -> Result<IssueNumber, CheckError> {
        let payload = self.load_payload()?;
        if let Some(number) = issue_from_payload(&payload) {
            return Ok(number);
        }
        if self.event_name == MERGE_GROUP_EVENT {
            let number = issue_from_merge_group_ref(&self.git_ref)?;
            tracing::info!("merge_group event detected and issue number parsed as {number}");
            return Ok(number);
        }
        Err(CheckError::Identity(format!(
            "No issue or pull request found in the payload of the `{}` event",
            self.event_name
        )))
    }

    /// A missing payload file is treated as an empty payload.
    fn load_payload(&self) -> Result<EventPayload, CheckError> {
        let Some(path) = self.event_path.as_ref().filter(|path| path.exists()) else {
            tracing::debug!("No event payload available");
            return Ok(EventPayload::default());
        };
        let content = std::fs::read_to_string(path).map_err(|error| {
            CheckError::Identity(format!(
                "Cannot read event payload {}: {error}",
                path.display()
            ))
        })?;
        parse_payload(&content)
    }
}

fn parse_payload(content: &str) -> Result<EventPayload, CheckError> {
    serde_json::from_str(content)
        .map_err(|error| CheckError::Identity(format!("Cannot parse event payload: {error}")))
}

fn issue_from_payload(payload: &EventPayload) -> Option<IssueNumber> {
    payload
        .issue
        .as_ref()
        .or(payload.pull_request.as_ref())
        .map(|numbered| numbered.number)
        .or(payload.number)
        .map(IssueNumber)
}

/// Parses the PR number out of a merge queue ref, e.g.
/// `refs/heads/gh-readonly-queue/main/pr-17-a3c310584587d4b97c2df0cb46fe050cc46a15d6`.
pub fn issue_from_merge_group_ref(git_ref: &str) -> Result<IssueNumber, CheckError> {
    static PR_SEGMENT: OnceLock<Regex> = OnceLock::new();
    let regex = PR_SEGMENT.get_or_init(|| Regex::new(r"pr-(\d+)-").expect("valid ref regex"));

    let last = git_ref.rsplit('/').next().unwrap_or_default();
    regex
        .captures(last)
        .and_then(|captures| captures[1].parse::<u64>().ok())
        .map(IssueNumber)
        .ok_or_else(|| {
            CheckError::Identity(format!(
                "Cannot find a pull request number in merge queue ref `{git_ref}`"
            ))
        })
}
