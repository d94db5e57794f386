//! enable / disable / list commands.

use std::path::Path;

use crate::app::api;
use crate::domain::AppError;

pub(super) fn run_enable(
    base_dir: &Path,
    services: &[String],
    non_interactive: bool,
) -> Result<(), AppError> {
    api::enable(base_dir, services, non_interactive)?;
    Ok(())
}

pub(super) fn run_disable(base_dir: &Path, service: &str) -> Result<(), AppError> {
    let outcome = api::disable(base_dir, service)?;
    println!("✅ Disabled '{}'", outcome.service);
    match outcome.archived {
        Some(archived) => println!("ℹ️ Archived env file to {}", archived.path.display()),
        None => println!("ℹ️ No env file to archive"),
    }
    Ok(())
}

pub(super) fn run_list(base_dir: &Path, enabled_only: bool) -> Result<(), AppError> {
    let listings = api::list(base_dir, enabled_only)?;
    if listings.is_empty() {
        println!("No services found");
        return Ok(());
    }

    let width = listings.iter().map(|l| l.name.len()).max().unwrap_or(0);
    for listing in listings {
        let mark = if listing.enabled { "[enabled]" } else { "         " };
        match listing.description {
            Some(description) => {
                println!("{} {:width$}  {}", mark, listing.name.as_str(), description)
            }
            None => println!("{} {}", mark, listing.name),
        }
    }
    Ok(())
}
