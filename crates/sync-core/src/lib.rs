pub mod catalog;
pub mod dry_run;
pub mod error;
pub mod models;
pub mod pagination;
pub mod sync;
pub mod traits;

#[cfg(test)]
mod testing;

pub use catalog::{has_errors, Catalog, CatalogIssue, CatalogLabel, CatalogProblem, Severity};
pub use dry_run::DryRunStore;
pub use error::{Result, SyncError};
pub use models::*;
pub use pagination::fetch_all_pages;
pub use sync::{execute_plan, synchronize, synchronize_with, Phases, SyncPlan};
pub use traits::ResourceStore;
