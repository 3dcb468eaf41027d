pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;


pub use client::{DEFAULT_API_URL, GitHubClient};
pub use error::{GitHubError, Result};
pub use models::*;

// Re-export sync-core types for convenience
pub use sync_core::{ResourceStore, SyncError};
