use serde::{Deserialize, Serialize};

use super::issue::GitHubUser;

/// GitHub repository (the container labels and issues live in)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub owner: GitHubUser,
    pub html_url: Option<String>,
    #[serde(default = "default_true")]
    pub has_issues: bool,
}

fn default_true() -> bool {
    true
}
