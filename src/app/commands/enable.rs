//! Enable wizard: depth-first dependency resolution with optional prompts.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::scaffold::build;
use crate::app::AppContext;
use crate::domain::{AppError, ServiceName};
use crate::ports::{
    ComposeDefinitionReader, DecisionSource, EnablementStore, EnvArchive, ServiceCatalog,
    SystemTools,
};

const START_FRESH: &str = "Start fresh";

/// Services enabled by one top-level `enable` call, in enablement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableOutcome {
    pub requested: ServiceName,
    pub enabled: Vec<ServiceName>,
    /// The requested service was enabled before this call.
    pub already_enabled: bool,
}

/// Per-invocation state threaded through the recursion.
#[derive(Debug, Default)]
struct Session {
    seen: HashSet<ServiceName>,
    enabled: Vec<ServiceName>,
}

struct Wizard<'a, S, T: SystemTools, D: ?Sized> {
    ctx: &'a AppContext<S, T>,
    decisions: &'a D,
    session: Session,
}

/// Enable `service` and, first, everything it requires.
///
/// Required dependency failures abort with `DependencyFailed`; optional
/// services that fail are reported and skipped.
pub fn execute<S, T, D>(
    ctx: &AppContext<S, T>,
    decisions: &D,
    service: &ServiceName,
) -> Result<EnableOutcome, AppError>
where
    S: ServiceCatalog + ComposeDefinitionReader + EnablementStore + EnvArchive,
    T: SystemTools,
    D: DecisionSource + ?Sized,
{
    let already_enabled = ctx.store().is_enabled(service);
    let mut wizard = Wizard { ctx, decisions, session: Session::default() };
    wizard.enable_service(service, true)?;

    let enabled = wizard.session.enabled;
    if enabled.len() > 1 {
        println!("\n✅ Enabled {} services:", enabled.len());
        for name in &enabled {
            println!("  - {}", name);
        }
    }

    Ok(EnableOutcome { requested: service.clone(), enabled, already_enabled })
}

impl<S, T, D> Wizard<'_, S, T, D>
where
    S: ServiceCatalog + ComposeDefinitionReader + EnablementStore + EnvArchive,
    T: SystemTools,
    D: DecisionSource + ?Sized,
{
    fn store(&self) -> &S {
        self.ctx.store()
    }

    fn enable_service(&mut self, name: &ServiceName, is_root: bool) -> Result<(), AppError> {
        if self.store().is_enabled(name) {
            if is_root {
                println!("ℹ️ Service '{}' is already enabled", name);
            }
            return Ok(());
        }

        // Marking before recursing is what terminates dependency cycles.
        if !self.session.seen.insert(name.clone()) {
            debug!(service = %name, "already processed in this session");
            return Ok(());
        }

        if !self.store().exists(name) {
            return Err(AppError::ServiceNotFound(name.to_string()));
        }
        let descriptor = self.store().descriptor(name)?;

        for dependency in &descriptor.requires {
            if self.store().is_enabled(dependency) {
                continue;
            }
            println!("📦 '{}' requires '{}'", name, dependency);
            self.enable_service(dependency, false).map_err(|source| {
                AppError::DependencyFailed {
                    service: name.to_string(),
                    dependency: dependency.to_string(),
                    source: Box::new(source),
                }
            })?;
        }

        for group in &descriptor.optional_groups {
            if group.members.iter().all(|member| self.is_settled(member)) {
                continue;
            }
            if self.decisions.confirm(&group.prompt, false) {
                for member in &group.members {
                    self.enable_optional(name, member);
                }
            }
        }

        for optional in &descriptor.optional_services {
            if self.is_settled(&optional.service) {
                continue;
            }
            if self.decisions.confirm(&optional.prompt, false) {
                self.enable_optional(name, &optional.service);
            }
        }

        println!("🔧 Enabling '{}'", name);
        self.store().enable(name)?;
        self.restore_archived_env(name)?;
        build::execute(self.ctx, name)?.into_result()?;

        self.session.enabled.push(name.clone());
        println!("✅ Enabled '{}'", name);
        Ok(())
    }

    /// Already enabled, or already handled earlier in this session.
    fn is_settled(&self, name: &ServiceName) -> bool {
        self.session.seen.contains(name) || self.store().is_enabled(name)
    }

    fn enable_optional(&mut self, parent: &ServiceName, name: &ServiceName) {
        if let Err(err) = self.enable_service(name, false) {
            warn!(service = %name, parent = %parent, "optional service failed: {}", err);
            println!(
                "⚠️ Optional service '{}' for '{}' was not enabled: {}",
                name, parent, err
            );
        }
    }

    fn restore_archived_env(&self, name: &ServiceName) -> Result<(), AppError> {
        if self.ctx.layout().env_file(name).exists() {
            return Ok(());
        }
        let archives = self.store().archives(name)?;

        let chosen = match archives.as_slice() {
            [] => None,
            [only] => {
                let prompt = format!(
                    "Restore archived environment for '{}' from {}?",
                    name,
                    only.archived_at.format("%Y-%m-%d %H:%M:%S")
                );
                self.decisions.confirm(&prompt, true).then_some(only)
            }
            several => {
                let mut items: Vec<String> = several
                    .iter()
                    .map(|a| a.archived_at.format("%Y-%m-%d %H:%M:%S").to_string())
                    .collect();
                items.push(START_FRESH.to_string());
                let prompt = format!("Archived environments found for '{}'", name);
                several.get(self.decisions.select(&prompt, &items, 0))
            }
        };

        if let Some(archive) = chosen {
            self.store().restore(name, archive)?;
            println!("♻️ Restored environment for '{}' from {}", name, archive.path.display());
        }
        Ok(())
    }
}
