//! Contains definitions of common types (repository name, issue number, comment) needed
//! for working with GitHub requests, plus the glue to the GitHub Actions runner.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod actions;
pub mod api;
pub mod context;

pub use api::client::GithubRequestClient;
pub use api::create_github_client;
pub use context::ActionContext;

/// Unique identifier of a GitHub repository
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GithubRepoName {
    owner: String,
    name: String,
}

impl GithubRepoName {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for GithubRepoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}/{}", self.owner, self.name))
    }
}

/// Parses the `owner/name` form used by `GITHUB_REPOSITORY`.
impl FromStr for GithubRepoName {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(anyhow::anyhow!(
                "Invalid repository name `{value}`, expected `owner/name`"
            )),
        }
    }
}

/// Number of an issue or pull request. GitHub shares the numbering between both, and
/// labels and comments of a pull request live on its issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueNumber(pub u64);

impl Display for IssueNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommentId(pub u64);

impl Display for CommentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <u64 as Display>::fmt(&self.0, f)
    }
}

/// A comment that exists on an issue or pull request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueComment {
    pub id: CommentId,
    pub body: String,
}
