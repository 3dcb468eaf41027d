use crate::cli::{OutputFormat, RemoteArgs};
use crate::config::Config;
use crate::output::output_result;
use anyhow::{anyhow, bail, Context, Result};
use github_backend::{GitHubClient, DEFAULT_API_URL};
use sync_core::{
    execute_plan, has_errors, Catalog, DryRunStore, ExistingPolicy, Phases, RunReport,
    SyncPlan,
};
use tracing::{info, warn};

/// Run a synchronization against GitHub and print the report
pub fn handle_sync(
    config: &Config,
    catalog: &Catalog,
    remote: &RemoteArgs,
    phases: Phases,
    format: OutputFormat,
) -> Result<()> {
    let token = config.require_token()?;
    let repository = config
        .repository
        .as_deref()
        .or(catalog.repository.as_deref())
        .ok_or_else(|| {
            anyhow!("No repository configured. Set via --repo, ISSUE_SEED_REPO, config file, or the catalog's `repository` key")
        })?;

    let problems = catalog.validate();
    for problem in &problems {
        warn!("catalog {}", problem);
    }
    if has_errors(&problems) {
        let errors: Vec<String> = problems.iter().map(|p| p.to_string()).collect();
        bail!("Catalog has errors:\n  {}", errors.join("\n  "));
    }

    let plan = build_plan(catalog, remote, phases);
    let api_url = config.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
    let client = GitHubClient::with_base_url(api_url, token);

    info!(%repository, %api_url, dry_run = remote.dry_run, "starting synchronization");

    let report = run_plan(&client, repository, &plan, remote.dry_run)
        .with_context(|| format!("Failed to synchronize {}", repository))?;

    output_result(&report, format);
    Ok(())
}

fn build_plan(catalog: &Catalog, remote: &RemoteArgs, phases: Phases) -> SyncPlan {
    let mut plan = SyncPlan::new(catalog.label_resources(), catalog.issue_resources());
    plan.phases = phases;
    if remote.skip_existing_issues {
        plan.issue_policy = ExistingPolicy::Skip;
    }
    plan
}

fn run_plan(
    client: &GitHubClient,
    repository: &str,
    plan: &SyncPlan,
    dry_run: bool,
) -> Result<RunReport> {
    if dry_run {
        let store = DryRunStore::new(client);
        let mut report = execute_plan(&store, repository, plan)?;
        info!(planned = store.planned(), "dry run finished");
        report.dry_run = true;
        return Ok(report);
    }

    Ok(execute_plan(client, repository, plan)?)
}
