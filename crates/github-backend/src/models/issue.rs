use serde::{Deserialize, Serialize};

use super::label::GitHubLabel;

/// GitHub user (minimal representation)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
}

/// GitHub pull request indicator (presence means the issue is actually a PR)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubPullRequest {
    pub url: Option<String>,
}

/// GitHub issue
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    pub html_url: Option<String>,
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
    /// If present (non-null), this "issue" is actually a pull request
    pub pull_request: Option<GitHubPullRequest>,
}

impl GitHubIssue {
    /// Returns true if this is actually a pull request, not an issue
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Request body for creating a GitHub issue
#[derive(Debug, Clone, Serialize)]
pub struct CreateGitHubIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}
