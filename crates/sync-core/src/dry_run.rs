//! Store wrapper that reads from the remote but never writes to it

use std::cell::Cell;
use std::collections::HashSet;

use tracing::info;

use crate::error::Result;
use crate::models::*;
use crate::traits::ResourceStore;

/// Delegates every read to the inner store and answers creations locally.
///
/// Handles returned for would-be creations have an ID of 0, a `(dry run)`
/// reference and no URL.
pub struct DryRunStore<S> {
    inner: S,
    planned: Cell<usize>,
}

impl<S: ResourceStore> DryRunStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            planned: Cell::new(0),
        }
    }

    /// Number of creations that would have been sent
    pub fn planned(&self) -> usize {
        self.planned.get()
    }
}

impl<S: ResourceStore> ResourceStore for DryRunStore<S> {
    fn authenticate(&self) -> Result<String> {
        self.inner.authenticate()
    }

    fn get_container(&self, full_name: &str) -> Result<ContainerRef> {
        self.inner.get_container(full_name)
    }

    fn list_existing(
        &self,
        container: &ContainerRef,
        kind: ResourceKind,
    ) -> Result<HashSet<String>> {
        self.inner.list_existing(container, kind)
    }

    fn create_one(
        &self,
        container: &ContainerRef,
        resource: &DesiredResource,
    ) -> Result<RemoteHandle> {
        self.planned.set(self.planned.get() + 1);
        info!(
            repository = %container.full_name,
            name = resource.name(),
            "dry run: would create {}",
            resource.kind()
        );
        Ok(RemoteHandle {
            id: 0,
            reference: "(dry run)".to_string(),
            url: None,
        })
    }
}
