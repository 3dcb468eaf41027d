use std::collections::HashSet;

use crate::error::Result;
use crate::models::*;

/// Capabilities a remote store must offer to be synchronized against
///
/// Every method is a single blocking remote call (or a paginated sequence of
/// them). Implementations map their transport errors into [`SyncError`] so the
/// synchronizer can tell fatal preconditions apart from per-item failures.
///
/// [`SyncError`]: crate::error::SyncError
pub trait ResourceStore {
    /// Verify the credential and return the login it belongs to
    fn authenticate(&self) -> Result<String>;

    /// Resolve an "owner/name" identifier to a container
    ///
    /// Fails with `SyncError::ContainerNotFound` when it does not exist or is
    /// not visible to the credential.
    fn get_container(&self, full_name: &str) -> Result<ContainerRef>;

    /// Names of every existing resource of `kind` in the container
    fn list_existing(&self, container: &ContainerRef, kind: ResourceKind)
        -> Result<HashSet<String>>;

    /// Create a single resource
    fn create_one(
        &self,
        container: &ContainerRef,
        resource: &DesiredResource,
    ) -> Result<RemoteHandle>;
}

impl<S: ResourceStore + ?Sized> ResourceStore for &S {
    fn authenticate(&self) -> Result<String> {
        (**self).authenticate()
    }

    fn get_container(&self, full_name: &str) -> Result<ContainerRef> {
        (**self).get_container(full_name)
    }

    fn list_existing(
        &self,
        container: &ContainerRef,
        kind: ResourceKind,
    ) -> Result<HashSet<String>> {
        (**self).list_existing(container, kind)
    }

    fn create_one(
        &self,
        container: &ContainerRef,
        resource: &DesiredResource,
    ) -> Result<RemoteHandle> {
        (**self).create_one(container, resource)
    }
}
