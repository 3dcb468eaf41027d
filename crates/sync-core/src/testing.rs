//! In-memory store used by the unit tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::error::{Result, SyncError};
use crate::models::*;
use crate::traits::ResourceStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Authenticate,
    GetContainer(String),
    ListExisting(ResourceKind),
    Create(String),
}

/// Records every call and keeps created names so duplicates can be rejected
#[derive(Default)]
pub struct RecordingStore {
    labels: RefCell<HashSet<String>>,
    issues: RefCell<HashSet<String>>,
    failures: HashMap<String, u16>,
    reject_duplicates: bool,
    fail_listing: bool,
    missing_container: bool,
    unauthorized: bool,
    next_id: RefCell<u64>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing_labels(self, names: &[&str]) -> Self {
        self.labels
            .borrow_mut()
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_existing_issues(self, titles: &[&str]) -> Self {
        self.issues
            .borrow_mut()
            .extend(titles.iter().map(|t| t.to_string()));
        self
    }

    pub fn fail_on(mut self, name: &str, status: u16) -> Self {
        self.failures.insert(name.to_string(), status);
        self
    }

    pub fn reject_duplicates(mut self) -> Self {
        self.reject_duplicates = true;
        self
    }

    pub fn fail_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn without_container(mut self) -> Self {
        self.missing_container = true;
        self
    }

    pub fn unauthorized(mut self) -> Self {
        self.unauthorized = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }

    /// Names that were actually created, in order
    pub fn created_names(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Create(name) => Some(name.clone()),
                _ => None,
            })
            .filter(|name| !self.failures.contains_key(name))
            .collect()
    }

    fn collection(&self, kind: ResourceKind) -> &RefCell<HashSet<String>> {
        match kind {
            ResourceKind::Label => &self.labels,
            ResourceKind::Issue => &self.issues,
        }
    }
}

impl ResourceStore for RecordingStore {
    fn authenticate(&self) -> Result<String> {
        self.calls.borrow_mut().push(Call::Authenticate);
        if self.unauthorized {
            return Err(SyncError::Unauthorized);
        }
        Ok("tester".to_string())
    }

    fn get_container(&self, full_name: &str) -> Result<ContainerRef> {
        self.calls
            .borrow_mut()
            .push(Call::GetContainer(full_name.to_string()));
        if self.missing_container {
            return Err(SyncError::ContainerNotFound(full_name.to_string()));
        }
        ContainerRef::parse(full_name)
            .ok_or_else(|| SyncError::InvalidInput(full_name.to_string()))
    }

    fn list_existing(
        &self,
        _container: &ContainerRef,
        kind: ResourceKind,
    ) -> Result<HashSet<String>> {
        self.calls.borrow_mut().push(Call::ListExisting(kind));
        if self.fail_listing {
            return Err(SyncError::Api {
                status: 500,
                message: "listing failed".to_string(),
            });
        }
        Ok(self.collection(kind).borrow().clone())
    }

    fn create_one(
        &self,
        _container: &ContainerRef,
        resource: &DesiredResource,
    ) -> Result<RemoteHandle> {
        let name = resource.name().to_string();
        self.calls.borrow_mut().push(Call::Create(name.clone()));

        if let Some(status) = self.failures.get(&name) {
            return Err(SyncError::Api {
                status: *status,
                message: "Server Error".to_string(),
            });
        }

        let mut names = self.collection(resource.kind()).borrow_mut();
        if self.reject_duplicates && names.contains(&name) {
            return Err(SyncError::Api {
                status: 422,
                message: "Validation Failed (already_exists)".to_string(),
            });
        }
        names.insert(name.clone());

        let mut next_id = self.next_id.borrow_mut();
        *next_id += 1;
        let reference = match resource.kind() {
            ResourceKind::Label => name,
            ResourceKind::Issue => format!("#{}", next_id),
        };
        Ok(RemoteHandle {
            id: *next_id,
            reference,
            url: Some(format!("https://example.test/{}", next_id)),
        })
    }
}

pub fn label(name: &str) -> DesiredResource {
    DesiredResource::Label(LabelSpec {
        name: name.to_string(),
        color: "0e8a16".to_string(),
        description: None,
    })
}

pub fn issue(title: &str) -> DesiredResource {
    DesiredResource::Issue(IssueSpec {
        title: title.to_string(),
        body: Some("body".to_string()),
        labels: vec!["feature".to_string()],
    })
}
