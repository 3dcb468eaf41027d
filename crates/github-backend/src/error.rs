use sync_core::SyncError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for SyncError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Http(e) => SyncError::Http(e.to_string()),
            GitHubError::Parse(e) => SyncError::Parse(e.to_string()),
            GitHubError::NotFound(what) => SyncError::NotFound(what),
            GitHubError::Unauthorized => SyncError::Unauthorized,
            GitHubError::RateLimited => SyncError::RateLimited,
            GitHubError::Api { status, message } => SyncError::Api { status, message },
        }
    }
}
