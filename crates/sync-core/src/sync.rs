//! Idempotent bulk synchronization of named resources
//!
//! A synchronization takes at most one snapshot of existing names, then walks the
//! desired items in order and creates what is missing. Remote failures for a
//! single item are recorded in its [`SyncResult`] and never stop the batch;
//! only failures that happen before the loop (authentication, repository lookup,
//! snapshot listing) are returned as errors.

use tracing::{debug, info, warn};

use crate::error::{Result, SyncError};
use crate::models::*;
use crate::traits::ResourceStore;

/// Synchronize `desired` using the default policy for `kind`
pub fn synchronize<S: ResourceStore + ?Sized>(
    store: &S,
    container: &ContainerRef,
    kind: ResourceKind,
    desired: &[DesiredResource],
) -> Result<SyncReport> {
    synchronize_with(store, container, kind, desired, kind.default_policy())
}

/// Synchronize `desired` with an explicit policy for existing resources
pub fn synchronize_with<S: ResourceStore + ?Sized>(
    store: &S,
    container: &ContainerRef,
    kind: ResourceKind,
    desired: &[DesiredResource],
    policy: ExistingPolicy,
) -> Result<SyncReport> {
    let existing = match policy {
        ExistingPolicy::Skip => {
            let names = store.list_existing(container, kind)?;
            debug!(
                repository = %container.full_name,
                count = names.len(),
                "snapshot of existing {}",
                kind.plural()
            );
            Some(names)
        }
        ExistingPolicy::Ignore => None,
    };

    let mut report = SyncReport::new(kind);

    for item in desired {
        let name = item.name().to_string();

        if item.kind() != kind {
            warn!(%name, expected = %kind, actual = %item.kind(), "resource kind mismatch");
            report.results.push(SyncResult {
                kind,
                name,
                outcome: SyncOutcome::Failed {
                    reason: format!("expected a {}, got a {}", kind, item.kind()),
                    status: None,
                },
            });
            continue;
        }

        if existing.as_ref().is_some_and(|names| names.contains(&name)) {
            info!(%name, "{} already exists, skipping", kind);
            report.results.push(SyncResult {
                kind,
                name,
                outcome: SyncOutcome::Skipped,
            });
            continue;
        }

        let outcome = match store.create_one(container, item) {
            Ok(handle) => {
                info!(%name, reference = %handle.reference, "created {}", kind);
                SyncOutcome::Created(handle)
            }
            Err(err) => {
                warn!(%name, error = %err, "could not create {}", kind);
                SyncOutcome::Failed {
                    status: err.status(),
                    reason: err.to_string(),
                }
            }
        };

        report.results.push(SyncResult {
            kind,
            name,
            outcome,
        });
    }

    Ok(report)
}

/// Which synchronization passes a run performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phases {
    #[default]
    All,
    LabelsOnly,
    IssuesOnly,
}

impl Phases {
    fn labels(self) -> bool {
        matches!(self, Phases::All | Phases::LabelsOnly)
    }

    fn issues(self) -> bool {
        matches!(self, Phases::All | Phases::IssuesOnly)
    }
}

/// Desired state for a whole run
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub labels: Vec<DesiredResource>,
    pub issues: Vec<DesiredResource>,
    pub issue_policy: ExistingPolicy,
    pub phases: Phases,
}

impl SyncPlan {
    pub fn new(labels: Vec<DesiredResource>, issues: Vec<DesiredResource>) -> Self {
        Self {
            labels,
            issues,
            issue_policy: ResourceKind::Issue.default_policy(),
            phases: Phases::All,
        }
    }
}

/// Authenticate, resolve the repository, then synchronize labels and issues.
///
/// Returns an error without touching any resource when authentication or the
/// repository lookup fails.
pub fn execute_plan<S: ResourceStore + ?Sized>(
    store: &S,
    full_name: &str,
    plan: &SyncPlan,
) -> Result<RunReport> {
    if ContainerRef::parse(full_name).is_none() {
        return Err(SyncError::InvalidInput(format!(
            "Invalid repository '{}'. Expected 'owner/name'.",
            full_name
        )));
    }

    let account = store.authenticate()?;
    info!(%account, "authenticated");

    let container = store.get_container(full_name)?;
    info!(repository = %container.full_name, "repository found");

    let labels = if plan.phases.labels() {
        Some(synchronize(
            store,
            &container,
            ResourceKind::Label,
            &plan.labels,
        )?)
    } else {
        None
    };

    let issues = if plan.phases.issues() {
        Some(synchronize_with(
            store,
            &container,
            ResourceKind::Issue,
            &plan.issues,
            plan.issue_policy,
        )?)
    } else {
        None
    };

    Ok(RunReport {
        container,
        account,
        labels,
        issues,
        dry_run: false,
    })
}
