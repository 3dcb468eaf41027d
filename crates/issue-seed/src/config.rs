use crate::cli::Cli;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings merged from config files, environment and command line
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// GitHub token
    pub token: Option<String>,
    /// Target repository ("owner/name")
    pub repository: Option<String>,
    /// GitHub API base URL
    pub api_url: Option<String>,
    /// Catalog file; the bundled catalog is used when unset
    pub catalog: Option<PathBuf>,
    /// Due date for issue bodies (YYYY-MM-DD)
    pub due_date: Option<String>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(
            Env::prefixed("ISSUE_SEED_").only(&["token", "repository", "api_url", "catalog", "due_date"]),
        );

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    /// Command line flags (and the env vars clap reads for them) win over everything else
    pub fn merge_with_cli(&mut self, cli: &Cli) {
        if let Some(token) = &cli.remote.token {
            self.token = Some(token.clone());
        }
        if let Some(repo) = &cli.remote.repo {
            self.repository = Some(repo.clone());
        }
        if let Some(url) = &cli.remote.api_url {
            self.api_url = Some(url.clone());
        }
        if let Some(catalog) = &cli.catalog {
            self.catalog = Some(catalog.clone());
        }
        if let Some(due_date) = &cli.due_date {
            self.due_date = Some(due_date.clone());
        }
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "GITHUB_TOKEN environment variable not set. Usage: export GITHUB_TOKEN=your_token"
                )
            })
    }

    pub fn parsed_due_date(&self) -> Result<Option<NaiveDate>> {
        self.due_date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .with_context(|| format!("Invalid due date '{}'. Expected YYYY-MM-DD", raw))
            })
            .transpose()
    }
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "issue-seed").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("issue-seed").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("issue-seed")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(".issue-seed.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load(Some(PathBuf::from("/no/such/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "repository = \"owner/repo\"\ndue_date = \"2026-01-15\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.repository.as_deref(), Some("owner/repo"));
        assert_eq!(
            config.parsed_due_date().unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 15)
        );
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = Config {
            repository: Some("owner/from-file".to_string()),
            ..Config::default()
        };
        let cli = Cli::parse_from([
            "issue-seed",
            "--repo",
            "owner/from-cli",
            "--token",
            "t0ken",
            "--due-date",
            "2030-02-01",
        ]);

        config.merge_with_cli(&cli);

        assert_eq!(config.repository.as_deref(), Some("owner/from-cli"));
        assert_eq!(config.require_token().unwrap(), "t0ken");
        assert_eq!(config.due_date.as_deref(), Some("2030-02-01"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = Config {
            token: Some("  ".to_string()),
            ..Config::default()
        };
        let err = config.require_token().unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn malformed_due_date_is_rejected() {
        let config = Config {
            due_date: Some("31-12-2025".to_string()),
            ..Config::default()
        };
        assert!(config.parsed_due_date().is_err());
    }
}
