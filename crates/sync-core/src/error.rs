use thiserror::Error;

/// Errors surfaced by a resource store or the synchronizer
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Authentication failed")]
    Unauthorized,

    #[error("Repository not found: {0}")]
    ContainerNotFound(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid catalog: {0}")]
    Catalog(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl SyncError {
    /// HTTP status associated with the error, when the remote store reported one
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Unauthorized => Some(401),
            SyncError::ContainerNotFound(_) | SyncError::NotFound(_) => Some(404),
            SyncError::RateLimited => Some(429),
            SyncError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
