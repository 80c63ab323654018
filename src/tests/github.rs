use std::sync::{Arc, Mutex};

use regex::Regex;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::github::{create_github_client, GithubRepoName, GithubRequestClient, IssueNumber};

pub fn default_repo_name() -> GithubRepoName {
    GithubRepoName::new("rust-lang", "bors-test")
}

pub fn default_pr_number() -> IssueNumber {
    IssueNumber(1)
}

// Subset of the fields GitHub returns for a label
#[derive(Serialize)]
struct GitHubLabel {
    id: u64,
    node_id: String,
    name: String,
    color: String,
    default: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GitHubComment {
    pub id: u64,
    pub body: String,
}

#[derive(Deserialize)]
struct CommentPayload {
    body: String,
}

/// Labels and comments of the default pull request.
#[derive(Default)]
struct IssueState {
    labels: Vec<String>,
    comments: Vec<GitHubComment>,
    next_comment_id: u64,
}

/// A simulated GitHub API serving a single pull request of the default repository.
pub struct GitHubMockServer {
    mock_server: MockServer,
    state: Arc<Mutex<IssueState>>,
}

impl GitHubMockServer {
    pub async fn start(labels: &[&str]) -> Self {
        let mock_server = MockServer::start().await;
        let state = Arc::new(Mutex::new(IssueState {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            comments: vec![],
            next_comment_id: 1,
        }));
        mount_issue(&mock_server, state.clone()).await;
        Self { mock_server, state }
    }

    /// Adds a comment that was created outside of the check.
    pub fn add_comment(&self, body: &str) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_comment_id;
        state.next_comment_id += 1;
        state.comments.push(GitHubComment {
            id,
            body: body.to_string(),
        });
        id
    }

    pub fn comments(&self) -> Vec<GitHubComment> {
        self.state.lock().unwrap().comments.clone()
    }

    pub fn client(&self) -> GithubRequestClient {
        let client = create_github_client(
            &SecretString::new("test-token".to_string()),
            Some(self.mock_server.uri().as_str()),
        )
        .unwrap();
        GithubRequestClient::new(client, default_repo_name())
    }

    /// Requests received by the server with the given method.
    pub async fn received(&self, http_method: &str) -> Vec<Request> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == http_method)
            .collect()
    }
}

fn issue_path(resource: &str) -> String {
    let repo = default_repo_name();
    format!(
        "/repos/{}/{}/issues/{}/{resource}",
        repo.owner(),
        repo.name(),
        default_pr_number()
    )
}

fn comment_path_regex() -> String {
    let repo = default_repo_name();
    format!(
        "^/repos/{}/{}/issues/comments/([0-9]+)$",
        repo.owner(),
        repo.name()
    )
}

fn query_param(request: &Request, name: &str, default: usize) -> usize {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(default)
}

/// Returns the requested page of `items`.
fn page<T: Clone>(request: &Request, items: &[T]) -> Vec<T> {
    let per_page = query_param(request, "per_page", 30);
    let page = query_param(request, "page", 1);
    items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect()
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(serde_json::json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

async fn mount_issue(mock_server: &MockServer, state: Arc<Mutex<IssueState>>) {
    let labels_state = state.clone();
    Mock::given(method("GET"))
        .and(path(issue_path("labels")))
        .respond_with(move |request: &Request| {
            let state = labels_state.lock().unwrap();
            let labels: Vec<GitHubLabel> = page(request, &state.labels)
                .into_iter()
                .enumerate()
                .map(|(index, name)| GitHubLabel {
                    id: index as u64 + 1,
                    node_id: format!("label-{index}"),
                    name,
                    color: "000000".to_string(),
                    default: false,
                })
                .collect();
            ResponseTemplate::new(200).set_body_json(labels)
        })
        .mount(mock_server)
        .await;

    let list_state = state.clone();
    Mock::given(method("GET"))
        .and(path(issue_path("comments")))
        .respond_with(move |request: &Request| {
            let state = list_state.lock().unwrap();
            ResponseTemplate::new(200).set_body_json(page(request, &state.comments))
        })
        .mount(mock_server)
        .await;

    let create_state = state.clone();
    Mock::given(method("POST"))
        .and(path(issue_path("comments")))
        .respond_with(move |request: &Request| {
            let payload: CommentPayload = request.body_json().unwrap();
            let mut state = create_state.lock().unwrap();
            let comment = GitHubComment {
                id: state.next_comment_id,
                body: payload.body,
            };
            state.next_comment_id += 1;
            state.comments.push(comment.clone());
            ResponseTemplate::new(201).set_body_json(comment)
        })
        .mount(mock_server)
        .await;

    let update_state = state.clone();
    dynamic_mock_req(
        move |request: &Request, [id]: [&str; 1]| {
            let payload: CommentPayload = request.body_json().unwrap();
            let id: u64 = id.parse().unwrap();
            let mut state = update_state.lock().unwrap();
            match state.comments.iter_mut().find(|comment| comment.id == id) {
                Some(comment) => {
                    comment.body = payload.body;
                    ResponseTemplate::new(200).set_body_json(comment.clone())
                }
                None => not_found(),
            }
        },
        "PATCH",
        comment_path_regex(),
    )
    .mount(mock_server)
    .await;

    dynamic_mock_req(
        move |_req: &Request, [id]: [&str; 1]| {
            let id: u64 = id.parse().unwrap();
            let mut state = state.lock().unwrap();
            let before = state.comments.len();
            state.comments.retain(|comment| comment.id != id);
            if state.comments.len() < before {
                ResponseTemplate::new(204)
            } else {
                not_found()
            }
        },
        "DELETE",
        comment_path_regex(),
    )
    .mount(mock_server)
    .await;
}

/// Create a mock that dynamically responds to its requests using the given function `f`.
/// It is expected that the path will be a regex, which will be parsed when a request is received,
/// and matched capture groups will be passed as a second argument to `f`.
fn dynamic_mock_req<
    F: Fn(&Request, [&str; N]) -> ResponseTemplate + Send + Sync + 'static,
    const N: usize,
>(
    f: F,
    m: &str,
    regex: String,
) -> Mock {
    // We need to parse the regex from the request path again, because wiremock doesn't give
    // the parsed path regex results to us :(
    let parsed_regex = Regex::new(&regex).unwrap();
    Mock::given(method(m))
        .and(path_regex(regex))
        .respond_with(move |req: &Request| {
            let captured = parsed_regex
                .captures(req.url.path())
                .unwrap()
                .extract::<N>()
                .1;
            f(req, captured)
        })
}
