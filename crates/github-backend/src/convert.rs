//! Model conversions between GitHub types and sync-core types

use sync_core::{ContainerRef, IssueSpec, LabelSpec, RemoteHandle};

use crate::models::*;

pub fn create_label_from_core(label: &LabelSpec) -> CreateGitHubLabel {
    CreateGitHubLabel {
        name: label.name.clone(),
        color: label.color.trim_start_matches('#').to_string(),
        description: label.description.clone(),
    }
}

pub fn create_issue_from_core(issue: &IssueSpec) -> CreateGitHubIssue {
    CreateGitHubIssue {
        title: issue.title.clone(),
        body: issue.body.clone(),
        labels: if issue.labels.is_empty() {
            None
        } else {
            Some(issue.labels.clone())
        },
    }
}

pub fn github_repo_to_container(repo: GitHubRepo) -> ContainerRef {
    ContainerRef {
        owner: repo.owner.login,
        name: repo.name,
        full_name: repo.full_name,
        html_url: repo.html_url,
    }
}

/// Labels have no web URL in the API response; it is derived from the repository page
pub fn label_handle(label: &GitHubLabel, container: &ContainerRef) -> RemoteHandle {
    RemoteHandle {
        id: label.id,
        reference: label.name.clone(),
        url: container
            .html_url
            .as_ref()
            .map(|base| format!("{}/labels/{}", base, urlencoding::encode(&label.name))),
    }
}

pub fn issue_handle(issue: &GitHubIssue) -> RemoteHandle {
    RemoteHandle {
        id: issue.id,
        reference: format!("#{}", issue.number),
        url: issue.html_url.clone(),
    }
}
