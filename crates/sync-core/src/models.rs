use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of remote resource managed by the synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Label,
    Issue,
}

impl ResourceKind {
    /// How existing resources of this kind are treated when no policy is given.
    ///
    /// Labels are checked against the snapshot, issues are always submitted.
    pub fn default_policy(self) -> ExistingPolicy {
        match self {
            ResourceKind::Label => ExistingPolicy::Skip,
            ResourceKind::Issue => ExistingPolicy::Ignore,
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Label => "labels",
            ResourceKind::Issue => "issues",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Label => write!(f, "label"),
            ResourceKind::Issue => write!(f, "issue"),
        }
    }
}

/// Treatment of desired resources whose name is already present remotely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingPolicy {
    /// Take a snapshot of existing names and skip matches
    Skip,
    /// Submit every item without looking at what exists
    Ignore,
}

/// Desired label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub name: String,
    /// Color hex string WITHOUT `#` prefix (e.g., "0e8a16")
    pub color: String,
    pub description: Option<String>,
}

/// Desired issue with its body already rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSpec {
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A named resource that should exist in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DesiredResource {
    Label(LabelSpec),
    Issue(IssueSpec),
}

impl DesiredResource {
    /// Unique key of the resource within its collection
    pub fn name(&self) -> &str {
        match self {
            DesiredResource::Label(label) => &label.name,
            DesiredResource::Issue(issue) => &issue.title,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            DesiredResource::Label(_) => ResourceKind::Label,
            DesiredResource::Issue(_) => ResourceKind::Issue,
        }
    }
}

impl From<LabelSpec> for DesiredResource {
    fn from(label: LabelSpec) -> Self {
        DesiredResource::Label(label)
    }
}

impl From<IssueSpec> for DesiredResource {
    fn from(issue: IssueSpec) -> Self {
        DesiredResource::Issue(issue)
    }
}

/// Resolved handle to the repository that holds the resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRef {
    pub owner: String,
    pub name: String,
    /// "owner/name"
    pub full_name: String,
    pub html_url: Option<String>,
}

impl ContainerRef {
    /// Split an "owner/name" string into a reference without remote details
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            html_url: None,
        })
    }
}

/// Identifier and location of a resource created remotely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHandle {
    /// Store-assigned numeric ID (0 when nothing was created)
    pub id: u64,
    /// Human-readable reference, e.g. "#12" for issues or the label name
    pub reference: String,
    pub url: Option<String>,
}

/// Terminal outcome for one desired resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    Created(RemoteHandle),
    /// Name was present in the snapshot; nothing was sent
    Skipped,
    Failed {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },
}

/// Per-item result, in the same order as the desired input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub kind: ResourceKind,
    pub name: String,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

impl SyncResult {
    pub fn is_created(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Created(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Failed { .. })
    }

    /// Remote handle of the created resource, if any
    pub fn handle(&self) -> Option<&RemoteHandle> {
        match &self.outcome {
            SyncOutcome::Created(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Results of one synchronization pass over a single resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub kind: ResourceKind,
    pub results: Vec<SyncResult>,
}

impl SyncReport {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            results: Vec::new(),
        }
    }

    pub fn created_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_created()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// Created items paired with their handles, in input order
    pub fn created(&self) -> impl Iterator<Item = (&SyncResult, &RemoteHandle)> {
        self.results
            .iter()
            .filter_map(|r| r.handle().map(|handle| (r, handle)))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Everything a full run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub container: ContainerRef,
    /// Login of the authenticated account
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<SyncReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<SyncReport>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn reports(&self) -> impl Iterator<Item = &SyncReport> {
        self.labels.iter().chain(self.issues.iter())
    }

    pub fn failed_count(&self) -> usize {
        self.reports().map(SyncReport::failed_count).sum()
    }
}
