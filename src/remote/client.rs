use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::model::{Config, Task};
use crate::remote::issue::{Issue, IssuePatch, NewIssue};

/// Error type for remote calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status} from {url}: {message}")]
    Status {
        status: StatusCode,
        url: String,
        message: String,
    },
}

/// The remote's error envelope, e.g. `{"message": "Bad credentials"}`
#[derive(Deserialize)]
struct RemoteMessage {
    message: String,
}

/// Boundary component translating local mutations to HTTP calls against
/// the issue tracker. Wraps exactly three operations: list, create,
/// update. No retry at this layer.
pub struct IssueClient {
    http: Client,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl IssueClient {
    pub fn new(config: &Config, token: String) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .user_agent(concat!("punchlist/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(IssueClient {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            owner: config.repo.owner.clone(),
            repo: config.repo.name.clone(),
            token,
        })
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.base_url, self.owner, self.repo
        )
    }

    fn issue_url(&self, number: u64) -> String {
        format!("{}/{}", self.issues_url(), number)
    }

    /// List the repository's issues (open and closed, one page), skipping
    /// pull requests.
    pub fn list(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.issues_url();
        debug!(%url, "list issues");
        let resp = self
            .http
            .get(&url)
            .query(&[("state", "all"), ("per_page", "100")])
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .send()?;
        let issues: Vec<Issue> = check(resp)?.json()?;
        Ok(issues
            .into_iter()
            .filter(|i| !i.is_pull_request())
            .map(Issue::into_task)
            .collect())
    }

    /// Create an issue and return the canonical task the remote assigned.
    pub fn create(&self, title: &str, body: &str) -> Result<Task, ApiError> {
        let url = self.issues_url();
        debug!(%url, title, "create issue");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .json(&NewIssue {
                title: title.to_string(),
                body: body.to_string(),
            })
            .send()?;
        let issue: Issue = check(resp)?.json()?;
        Ok(issue.into_task())
    }

    /// Update title/body/state and return the canonical task.
    pub fn update(&self, number: u64, patch: &IssuePatch) -> Result<Task, ApiError> {
        let url = self.issue_url(number);
        debug!(%url, "update issue");
        let resp = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .json(patch)
            .send()?;
        let issue: Issue = check(resp)?.json()?;
        Ok(issue.into_task())
    }
}

/// Turn a non-2xx response into `ApiError::Status`, extracting the
/// remote's message field when the body carries one.
fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().to_string();
    let body = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<RemoteMessage>(&body)
        .map(|m| m.message)
        .unwrap_or(body);
    Err(ApiError::Status {
        status,
        url,
        message,
    })
}
