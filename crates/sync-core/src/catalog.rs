//! Catalog of desired labels and issues, loaded from TOML
//!
//! ```toml
//! repository = "owner/name"
//! due_date = "2025-12-31"
//!
//! [[labels]]
//! name = "feature"
//! color = "0E8A16"
//! description = "Feature documentation"
//!
//! [[issues]]
//! title = "Search"
//! labels = ["feature"]
//! body = "Due {due_date}"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::{Result, SyncError};
use crate::models::{DesiredResource, IssueSpec, LabelSpec};

/// Substitution field recognised in issue bodies
pub const DUE_DATE_PLACEHOLDER: &str = "{due_date}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Default target repository ("owner/name")
    pub repository: Option<String>,
    /// Value substituted for `{due_date}` in issue bodies
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub labels: Vec<CatalogLabel>,
    #[serde(default)]
    pub issues: Vec<CatalogIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogLabel {
    pub name: String,
    /// Hex color, with or without a leading `#`
    pub color: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogIssue {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Something wrong (or suspicious) in a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogProblem {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for CatalogProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}

impl Catalog {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SyncError::Catalog(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Io(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| SyncError::Catalog(format!("{}: {}", path.display(), e)))
    }

    /// Desired labels, in catalog order, with colors normalised
    pub fn label_resources(&self) -> Vec<DesiredResource> {
        self.labels
            .iter()
            .map(|label| {
                DesiredResource::Label(LabelSpec {
                    name: label.name.clone(),
                    color: normalize_color(&label.color),
                    description: label.description.clone(),
                })
            })
            .collect()
    }

    /// Desired issues, in catalog order, with bodies rendered
    pub fn issue_resources(&self) -> Vec<DesiredResource> {
        self.issues
            .iter()
            .map(|issue| {
                let body = render_body(&issue.body, self.due_date);
                DesiredResource::Issue(IssueSpec {
                    title: issue.title.clone(),
                    body: (!body.trim().is_empty()).then_some(body),
                    labels: issue.labels.clone(),
                })
            })
            .collect()
    }

    pub fn validate(&self) -> Vec<CatalogProblem> {
        let mut problems = Vec::new();
        let mut label_names = HashSet::new();

        for label in &self.labels {
            if label.name.trim().is_empty() {
                problems.push(error("label with an empty name"));
                continue;
            }
            if !label_names.insert(label.name.as_str()) {
                problems.push(error(format!("label '{}' is defined twice", label.name)));
            }
            if !is_valid_color(&label.color) {
                problems.push(error(format!(
                    "label '{}' has invalid color '{}' (expected 6 hex digits)",
                    label.name, label.color
                )));
            }
        }

        let mut titles = HashSet::new();
        for issue in &self.issues {
            if issue.title.trim().is_empty() {
                problems.push(error("issue with an empty title"));
                continue;
            }
            if !titles.insert(issue.title.as_str()) {
                problems.push(warning(format!(
                    "issue '{}' appears more than once and will be created more than once",
                    issue.title
                )));
            }
            for name in &issue.labels {
                if !label_names.contains(name.as_str()) {
                    problems.push(warning(format!(
                        "issue '{}' uses label '{}' which the catalog does not define",
                        issue.title, name
                    )));
                }
            }
            if self.due_date.is_none() && issue.body.contains(DUE_DATE_PLACEHOLDER) {
                problems.push(error(format!(
                    "issue '{}' references {} but no due date is set",
                    issue.title, DUE_DATE_PLACEHOLDER
                )));
            }
        }

        problems
    }
}

/// Whether any problem is severe enough to refuse a run
pub fn has_errors(problems: &[CatalogProblem]) -> bool {
    problems.iter().any(|p| p.severity == Severity::Error)
}

fn error(message: impl Into<String>) -> CatalogProblem {
    CatalogProblem {
        severity: Severity::Error,
        message: message.into(),
    }
}

fn warning(message: impl Into<String>) -> CatalogProblem {
    CatalogProblem {
        severity: Severity::Warning,
        message: message.into(),
    }
}

/// Strip a leading `#` and surrounding whitespace
pub fn normalize_color(color: &str) -> String {
    color.trim().trim_start_matches('#').to_string()
}

fn is_valid_color(color: &str) -> bool {
    let color = normalize_color(color);
    color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit())
}

fn render_body(template: &str, due_date: Option<NaiveDate>) -> String {
    match due_date {
        Some(date) => template.replace(DUE_DATE_PLACEHOLDER, &date.format("%Y-%m-%d").to_string()),
        None => template.to_string(),
    }
}
