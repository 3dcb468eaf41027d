use crate::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use sync_core::{
    Catalog, CatalogProblem, ContainerRef, DesiredResource, ResourceKind, RunReport, Severity,
    SyncOutcome, SyncReport, SyncResult,
};

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

fn error_code(err: &anyhow::Error) -> &'static str {
    use sync_core::SyncError;

    match err.downcast_ref::<SyncError>() {
        Some(SyncError::Unauthorized) => "unauthorized",
        Some(SyncError::ContainerNotFound(_)) => "repository_not_found",
        Some(SyncError::RateLimited) => "rate_limited",
        Some(SyncError::Catalog(_)) => "invalid_catalog",
        _ => "error",
    }
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for SyncResult {
    fn display(&self) -> String {
        match &self.outcome {
            SyncOutcome::Created(handle) => {
                let name = if self.kind == ResourceKind::Issue {
                    format!("{} {}", handle.reference.cyan(), self.name)
                } else {
                    self.name.clone()
                };
                format!("{} {}", "✓ created".green(), name)
            }
            SyncOutcome::Skipped => {
                format!("{} {}", "- exists ".dimmed(), self.name.dimmed())
            }
            SyncOutcome::Failed { reason, .. } => {
                format!("{} {}: {}", "✗ failed ".red(), self.name, reason)
            }
        }
    }
}

impl Displayable for SyncReport {
    fn display(&self) -> String {
        let mut output = format!("{}", capitalize(self.kind.plural()).bold());

        if self.is_empty() {
            output.push_str(&format!("\n  {}", "(nothing to do)".dimmed()));
            return output;
        }

        for result in &self.results {
            output.push_str(&format!("\n  {}", result.display()));
        }

        output.push_str(&format!(
            "\n  {}",
            format!(
                "{} created, {} skipped, {} failed",
                self.created_count(),
                self.skipped_count(),
                self.failed_count()
            )
            .dimmed()
        ));

        output
    }
}

impl Displayable for RunReport {
    fn display(&self) -> String {
        let mut output = format!(
            "{}: {} {}",
            "Repository".dimmed(),
            self.container.full_name.white().bold(),
            format!("(authenticated as {})", self.account).dimmed()
        );
        if self.dry_run {
            output.push_str(&format!(
                "\n{}",
                "Dry run: nothing was created".yellow().bold()
            ));
        }

        for report in self.reports() {
            output.push_str("\n\n");
            output.push_str(&report.display());
        }

        let failed = self.failed_count();
        if failed > 0 {
            output.push_str(&format!(
                "\n\n{}",
                format!("{} item(s) failed, see above", failed).red().bold()
            ));
        }

        if let Some(issues) = &self.issues {
            output.push_str("\n\n");
            output.push_str(&issue_summary(issues, self.dry_run));
            if !self.dry_run {
                output.push_str("\n\n");
                output.push_str(&next_steps(&self.container));
            }
        }

        output
    }
}

fn issue_summary(issues: &SyncReport, dry_run: bool) -> String {
    let created = issues.created_count();

    if dry_run {
        return format!("{} issues would be created", created)
            .yellow()
            .bold()
            .to_string();
    }

    let mut output = format!("Successfully created {} issues!", created)
        .green()
        .bold()
        .to_string();

    if created > 0 {
        output.push_str(&format!("\n\n{}", "Created issues:".bold()));
        for (result, handle) in issues.created() {
            output.push_str(&format!(
                "\n   {}: {}",
                handle.reference.cyan(),
                result.name
            ));
            if let Some(url) = &handle.url {
                output.push_str(&format!("\n   {}: {}", "URL".dimmed(), url));
            }
        }
    }

    output
}

fn next_steps(container: &ContainerRef) -> String {
    let base = container
        .html_url
        .clone()
        .unwrap_or_else(|| format!("https://github.com/{}", container.full_name));

    format!(
        "{}\n  1. View all issues: {}/issues\n  2. Create a project board: {}/projects\n  3. Add issues to the project\n  4. Set due dates in the project view",
        "Next steps:".bold(),
        base,
        base
    )
}

impl Displayable for Catalog {
    fn display(&self) -> String {
        let mut output = format!(
            "{}: {}\n{}: {}",
            "Repository".dimmed(),
            self.repository.as_deref().unwrap_or("(not set)"),
            "Due date".dimmed(),
            self.due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        );

        output.push_str(&format!("\n\n{} ({})", "Labels".bold(), self.labels.len()));
        for resource in self.label_resources() {
            if let DesiredResource::Label(label) = resource {
                output.push_str(&format!(
                    "\n  {} {}",
                    label.name.magenta(),
                    format!("#{}", label.color).dimmed()
                ));
                if let Some(description) = &label.description {
                    output.push_str(&format!(" - {}", description));
                }
            }
        }

        output.push_str(&format!("\n\n{} ({})", "Issues".bold(), self.issues.len()));
        for issue in &self.issues {
            output.push_str(&format!("\n  {}", issue.title.white().bold()));
            if !issue.labels.is_empty() {
                let names: Vec<String> = issue
                    .labels
                    .iter()
                    .map(|l| l.magenta().to_string())
                    .collect();
                output.push_str(&format!(" [{}]", names.join(", ")));
            }
        }

        output
    }
}

impl Displayable for CatalogProblem {
    fn display(&self) -> String {
        match self.severity {
            Severity::Error => format!("{}: {}", "error".red().bold(), self.message),
            Severity::Warning => format!("{}: {}", "warning".yellow(), self.message),
        }
    }
}

impl Displayable for Vec<CatalogProblem> {
    fn display(&self) -> String {
        if self.is_empty() {
            return "Catalog is valid".green().to_string();
        }
        self.iter()
            .map(Displayable::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
