use crate::cli::{CatalogCommands, OutputFormat};
use crate::output::output_result;
use anyhow::Result;
use std::process::ExitCode;
use sync_core::{has_errors, Catalog};

pub fn handle_catalog(
    catalog: &Catalog,
    action: &CatalogCommands,
    format: OutputFormat,
) -> Result<ExitCode> {
    match action {
        CatalogCommands::Show => {
            output_result(catalog, format);
            Ok(ExitCode::SUCCESS)
        }
        CatalogCommands::Validate => {
            let problems = catalog.validate();
            output_result(&problems, format);
            if has_errors(&problems) {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
