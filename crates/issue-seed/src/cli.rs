use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "issue-seed",
    version,
    about = "Seed a GitHub repository with a catalog of labels and issues"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML config file
    #[arg(long, env = "ISSUE_SEED_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog of labels and issues (defaults to the bundled catalog)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Due date substituted into issue bodies (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub due_date: Option<String>,

    #[command(flatten)]
    pub remote: RemoteArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options that only matter when talking to GitHub
#[derive(Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Target repository as owner/name (overrides config and catalog)
    #[arg(long, short = 'r', env = "ISSUE_SEED_REPO", global = true)]
    pub repo: Option<String>,

    /// GitHub API base URL (GitHub Enterprise or testing)
    #[arg(long, env = "GITHUB_API_URL", global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Show what would be created without creating anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Skip issues whose title already exists in the repository (any state)
    #[arg(long, global = true)]
    pub skip_existing_issues: bool,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ensure catalog labels exist, then create catalog issues (default)
    Sync,
    /// Only ensure catalog labels exist
    Labels,
    /// Only create catalog issues
    Issues,
    /// Inspect the catalog without contacting GitHub
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Print the labels and issues that would be synchronized
    Show,
    /// Check the catalog for errors and suspicious entries
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn command_defaults_to_none() {
        let cli = Cli::try_parse_from(["issue-seed", "--dry-run"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.remote.dry_run);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "issue-seed",
            "issues",
            "--repo",
            "owner/repo",
            "--skip-existing-issues",
            "-vv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Issues)));
        assert_eq!(cli.remote.repo.as_deref(), Some("owner/repo"));
        assert!(cli.remote.skip_existing_issues);
        assert_eq!(cli.verbose, 2);
    }
}
