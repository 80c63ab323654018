use anyhow::Context;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};

pub mod client;

fn base_github_url() -> &'static str {
    "https://api.github.com"
}

/// Creates an API client authenticated with the token passed to the action.
///
/// `base_uri` allows running against GitHub Enterprise (`GITHUB_API_URL`) or a mock server.
pub fn create_github_client(
    token: &SecretString,
    base_uri: Option<&str>,
) -> anyhow::Result<Octocrab> {
    let base_uri = base_uri
        .filter(|uri| !uri.is_empty())
        .unwrap_or(base_github_url());
    Octocrab::builder()
        .personal_token(token.expose_secret().clone())
        .base_uri(base_uri.to_string())
        .with_context(|| format!("Invalid GitHub API URL `{base_uri}`"))?
        .build()
        .context("Could not create octocrab client")
}
