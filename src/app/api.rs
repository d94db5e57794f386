//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::Path;

use crate::adapters::{DefaultDecisions, FilesystemStore, HostTools, InteractiveDecisions};
use crate::app::commands::{disable, enable, list, scaffold};
use crate::app::config::resolve_layout;
use crate::app::AppContext;
use crate::domain::{Environment, ServiceName};
use crate::ports::{DecisionSource, EnablementStore};

pub use crate::app::commands::disable::DisableOutcome;
pub use crate::app::commands::enable::EnableOutcome;
pub use crate::app::commands::list::ServiceListing;
pub use crate::app::commands::scaffold::{BuildOutcome, ManifestReport, TeardownOutcome};
pub use crate::domain::AppError;

/// Create an `AppContext` for the installation at `base_dir`.
fn create_context(base_dir: &Path) -> Result<AppContext<FilesystemStore, HostTools>, AppError> {
    let layout = resolve_layout(base_dir)?;
    let store = FilesystemStore::new(layout.clone());
    Ok(AppContext::new(layout, store, HostTools::new()?, Environment::from_process()))
}

fn create_store(base_dir: &Path) -> Result<FilesystemStore, AppError> {
    Ok(FilesystemStore::new(resolve_layout(base_dir)?))
}

/// Enable each service in turn, resolving its dependencies first.
///
/// Stops at the first service that cannot be enabled.
pub fn enable(
    base_dir: &Path,
    services: &[String],
    non_interactive: bool,
) -> Result<Vec<EnableOutcome>, AppError> {
    let names = services.iter().map(|s| ServiceName::new(s)).collect::<Result<Vec<_>, _>>()?;
    let ctx = create_context(base_dir)?;
    let decisions: Box<dyn DecisionSource> = if non_interactive {
        Box::new(DefaultDecisions)
    } else {
        Box::new(InteractiveDecisions)
    };

    names.iter().map(|name| enable::execute(&ctx, decisions.as_ref(), name)).collect()
}

/// Disable a service and archive its env file.
pub fn disable(base_dir: &Path, service: &str) -> Result<DisableOutcome, AppError> {
    let service = ServiceName::new(service)?;
    disable::execute(&create_store(base_dir)?, &service)
}

/// List available services.
pub fn list(base_dir: &Path, enabled_only: bool) -> Result<Vec<ServiceListing>, AppError> {
    list::execute(&create_store(base_dir)?, enabled_only)
}

/// Build one service's scaffold.
pub fn scaffold_build(base_dir: &Path, service: &str) -> Result<BuildOutcome, AppError> {
    let service = ServiceName::new(service)?;
    let ctx = create_context(base_dir)?;
    scaffold::build::execute(&ctx, &service)?.into_result()
}

/// Build the global scaffold (when present) and every enabled service.
///
/// All builds run even when some fail; failures are reported together.
pub fn scaffold_build_all(base_dir: &Path) -> Result<Vec<BuildOutcome>, AppError> {
    let ctx = create_context(base_dir)?;
    let layout = ctx.layout();

    let mut services = Vec::new();
    let global = ServiceName::new(layout.global_service())?;
    if layout.scaffold_dir(&global).is_dir() {
        services.push(global);
    }
    services.extend(ctx.store().enabled_services()?);

    let mut outcomes = Vec::new();
    let mut failed = Vec::new();
    for service in services {
        println!("🔨 Building '{}'", service);
        match scaffold::build::execute(&ctx, &service) {
            Ok(outcome) if outcome.is_success() => outcomes.push(outcome),
            Ok(outcome) => {
                failed.push(service.to_string());
                outcomes.push(outcome);
            }
            Err(err) => {
                eprintln!("  ❌ {}", err);
                failed.push(service.to_string());
            }
        }
    }

    if failed.is_empty() { Ok(outcomes) } else { Err(AppError::BuildsFailed(failed)) }
}

/// Remove a service's generated env file, and its config tree unless
/// `preserve_config`.
pub fn scaffold_teardown(
    base_dir: &Path,
    service: &str,
    preserve_config: bool,
) -> Result<TeardownOutcome, AppError> {
    let service = ServiceName::new(service)?;
    let layout = resolve_layout(base_dir)?;
    scaffold::teardown::execute(&layout, &service, preserve_config)
}
