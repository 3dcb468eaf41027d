mod catalog;
mod cli;
mod color;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use config::Config;
use output::output_error;
use std::process::ExitCode;
use sync_core::Phases;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            output_error(&e, cli.format);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    // Completions need neither config nor catalog
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli);
    let catalog = catalog::load(&config)?;

    let phases = match &cli.command {
        Some(Commands::Catalog { action }) => {
            return commands::catalog::handle_catalog(&catalog, action, cli.format);
        }
        Some(Commands::Labels) => Phases::LabelsOnly,
        Some(Commands::Issues) => Phases::IssuesOnly,
        None | Some(Commands::Sync) | Some(Commands::Completions { .. }) => Phases::All,
    };

    // Per-item failures are part of the report; only fatal errors change the exit status
    commands::sync::handle_sync(&config, &catalog, &cli.remote, phases, cli.format)?;
    Ok(ExitCode::SUCCESS)
}
