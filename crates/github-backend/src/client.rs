use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;
use ureq::http::Response;

use crate::error::{GitHubError, Result};
use crate::models::*;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("issue-seed/", env!("CARGO_PKG_VERSION"));

/// Blocking GitHub REST API client
///
/// Not scoped to a repository: every repository operation takes the owner and
/// name explicitly.
pub struct GitHubClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a new GitHub client targeting api.github.com
    pub fn new(token: &str) -> Self {
        Self::with_base_url(DEFAULT_API_URL, token)
    }

    /// Create a new GitHub client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(base_url: &str, token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn repo_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            path
        )
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let response = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(GitHubError::Http)?;

        let mut response = check_response(response)?;
        Ok(response.body_mut().read_json()?)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        debug!(%url, "POST");
        let response = self
            .agent
            .post(url)
            .header("Authorization", &self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
            .send_json(body)
            .map_err(GitHubError::Http)?;

        let mut response = check_response(response)?;
        Ok(response.body_mut().read_json()?)
    }

    // ==================== Account ====================

    /// The user the token belongs to; fails with `Unauthorized` on a bad token
    pub fn get_authenticated_user(&self) -> Result<GitHubUser> {
        self.get_json(&format!("{}/user", self.base_url))
    }

    // ==================== Repository Operations ====================

    /// Get a specific repository
    pub fn get_repo(&self, owner: &str, repo: &str) -> Result<GitHubRepo> {
        self.get_json(&self.repo_url(owner, repo, ""))
    }

    // ==================== Label Operations ====================

    /// List one page of labels for a repository
    pub fn list_labels(
        &self,
        owner: &str,
        repo: &str,
        per_page: usize,
        page: usize,
    ) -> Result<Vec<GitHubLabel>> {
        let url = format!(
            "{}?per_page={}&page={}",
            self.repo_url(owner, repo, "/labels"),
            per_page,
            page
        );
        self.get_json(&url)
    }

    /// Create a label
    pub fn create_label(
        &self,
        owner: &str,
        repo: &str,
        label: &CreateGitHubLabel,
    ) -> Result<GitHubLabel> {
        self.post_json(&self.repo_url(owner, repo, "/labels"), label)
    }

    // ==================== Issue Operations ====================

    /// List one page of the issues endpoint
    ///
    /// GitHub returns pull requests here too; callers filter them with
    /// [`GitHubIssue::is_pull_request`] after paging, since a filtered page
    /// may look short while more pages follow.
    pub fn list_issue_page(
        &self,
        owner: &str,
        repo: &str,
        state: &str,
        per_page: usize,
        page: usize,
    ) -> Result<Vec<GitHubIssue>> {
        let url = format!(
            "{}?state={}&per_page={}&page={}",
            self.repo_url(owner, repo, "/issues"),
            urlencoding::encode(state),
            per_page,
            page
        );
        self.get_json(&url)
    }

    /// Create a new issue
    pub fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &CreateGitHubIssue,
    ) -> Result<GitHubIssue> {
        self.post_json(&self.repo_url(owner, repo, "/issues"), issue)
    }
}

/// Check response status and return error if not successful
fn check_response(mut response: Response<ureq::Body>) -> Result<Response<ureq::Body>> {
    let status = response.status().as_u16();

    if (200..300).contains(&status) {
        return Ok(response);
    }

    // Detect rate limiting: 429, or 403 with x-ratelimit-remaining: 0
    let quota_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "0");
    if status == 429 || (status == 403 && quota_exhausted) {
        return Err(GitHubError::RateLimited);
    }

    let body = response
        .body_mut()
        .read_to_string()
        .unwrap_or_else(|_| String::new());
    let message = error_message(status, &body);

    match status {
        401 => Err(GitHubError::Unauthorized),
        404 => Err(GitHubError::NotFound(message)),
        _ => Err(GitHubError::Api { status, message }),
    }
}

/// Extract a readable message from a GitHub error body.
///
/// Validation failures carry their reason in `errors[].code`
/// (e.g. `already_exists`), which is appended to the top-level message.
fn error_message(status: u16, body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        };
    };

    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or(body)
        .to_string();

    let codes: Vec<&str> = value
        .get("errors")
        .and_then(|e| e.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("code").and_then(|c| c.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if codes.is_empty() {
        message
    } else {
        format!("{} ({})", message, codes.join(", "))
    }
}
