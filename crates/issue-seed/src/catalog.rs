use crate::config::Config;
use anyhow::{Context, Result};
use sync_core::Catalog;

/// Feature documentation catalog for the Gemeente Meldpunt application
pub const BUNDLED_CATALOG: &str = include_str!("../catalog/gemeente-meldpunt.toml");

/// Load the configured catalog (or the bundled one) and apply the due date override
pub fn load(config: &Config) -> Result<Catalog> {
    let mut catalog = match &config.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::from_toml_str(BUNDLED_CATALOG).context("Bundled catalog is invalid")?,
    };

    if let Some(due_date) = config.parsed_due_date()? {
        catalog.due_date = Some(due_date);
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sync_core::{has_errors, DesiredResource};

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = load(&Config::default()).unwrap();
        let problems = catalog.validate();
        assert!(problems.is_empty(), "unexpected problems: {:?}", problems);
        assert!(!has_errors(&problems));
        assert_eq!(catalog.labels.len(), 10);
        assert_eq!(catalog.issues.len(), 10);
        assert_eq!(
            catalog.repository.as_deref(),
            Some("hussen612/nextjs_gemeente")
        );
    }

    #[test]
    fn due_date_override_reaches_issue_bodies() {
        let config = Config {
            due_date: Some("2026-06-30".to_string()),
            ..Config::default()
        };
        let catalog = load(&config).unwrap();
        assert_eq!(catalog.due_date, NaiveDate::from_ymd_opt(2026, 6, 30));

        for issue in catalog.issue_resources() {
            let DesiredResource::Issue(issue) = issue else {
                panic!("expected issue");
            };
            let body = issue.body.unwrap();
            assert!(body.ends_with("## Due Date\n2026-06-30"), "{}", issue.title);
            assert!(!body.contains("{due_date}"));
        }
    }
}
