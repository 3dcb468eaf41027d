//! Implementation of the sync-core store trait for GitHubClient

use std::collections::HashSet;

use sync_core::{
    fetch_all_pages, ContainerRef, DesiredResource, RemoteHandle, ResourceKind, ResourceStore,
    Result, SyncError,
};
use tracing::warn;

use crate::client::GitHubClient;
use crate::convert::{
    create_issue_from_core, create_label_from_core, github_repo_to_container, issue_handle,
    label_handle,
};
use crate::error::GitHubError;

/// GitHub caps `per_page` at 100
const PAGE_SIZE: usize = 100;

impl ResourceStore for GitHubClient {
    fn authenticate(&self) -> Result<String> {
        let user = self.get_authenticated_user().map_err(SyncError::from)?;
        Ok(user.login)
    }

    fn get_container(&self, full_name: &str) -> Result<ContainerRef> {
        let parsed = ContainerRef::parse(full_name).ok_or_else(|| {
            SyncError::InvalidInput(format!(
                "Invalid repository '{}'. Expected 'owner/name'.",
                full_name
            ))
        })?;

        let repo = match self.get_repo(&parsed.owner, &parsed.name) {
            Ok(repo) => repo,
            Err(GitHubError::NotFound(_)) => {
                return Err(SyncError::ContainerNotFound(full_name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !repo.has_issues {
            warn!(repository = %repo.full_name, "issues are disabled for this repository");
        }

        Ok(github_repo_to_container(repo))
    }

    fn list_existing(
        &self,
        container: &ContainerRef,
        kind: ResourceKind,
    ) -> Result<HashSet<String>> {
        let (owner, repo) = (container.owner.as_str(), container.name.as_str());

        let names = match kind {
            ResourceKind::Label => fetch_all_pages(
                |page, per_page| {
                    self.list_labels(owner, repo, per_page, page)
                        .map_err(SyncError::from)
                },
                PAGE_SIZE,
            )?
            .into_iter()
            .map(|label| label.name)
            .collect(),
            ResourceKind::Issue => fetch_all_pages(
                |page, per_page| {
                    self.list_issue_page(owner, repo, "all", per_page, page)
                        .map_err(SyncError::from)
                },
                PAGE_SIZE,
            )?
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .map(|issue| issue.title)
            .collect(),
        };

        Ok(names)
    }

    fn create_one(
        &self,
        container: &ContainerRef,
        resource: &DesiredResource,
    ) -> Result<RemoteHandle> {
        let (owner, repo) = (container.owner.as_str(), container.name.as_str());

        match resource {
            DesiredResource::Label(label) => {
                let created = self
                    .create_label(owner, repo, &create_label_from_core(label))
                    .map_err(SyncError::from)?;
                Ok(label_handle(&created, container))
            }
            DesiredResource::Issue(issue) => {
                let created = self
                    .create_issue(owner, repo, &create_issue_from_core(issue))
                    .map_err(SyncError::from)?;
                Ok(issue_handle(&created))
            }
        }
    }
}
