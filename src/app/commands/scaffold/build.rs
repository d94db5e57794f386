//! Per-service scaffold build.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::discovery::discover;
use super::manifest_runner::{ManifestReport, load_manifest, run_manifest};
use super::render::{FileOutcome, copy_static, render_template};
use super::volumes::precreate_volumes;
use crate::app::AppContext;
use crate::domain::scaffold::{ManifestError, OperationContext, is_env_target, render_target};
use crate::domain::{AppError, Layout, ServiceName};
use crate::ports::{ComposeDefinitionReader, ServiceCatalog, SystemTools};

/// Everything a build did, phase by phase.
#[derive(Debug)]
pub struct BuildOutcome {
    pub service: ServiceName,
    pub volumes_created: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
    pub preserved: Vec<PathBuf>,
    pub failures: Vec<String>,
    pub manifest: Option<Result<ManifestReport, ManifestError>>,
    pub post_install: Option<String>,
    /// The service has no templates, statics or manifest.
    pub nothing_to_do: bool,
}

impl BuildOutcome {
    fn new(service: ServiceName) -> Self {
        Self {
            service,
            volumes_created: Vec::new(),
            written: Vec::new(),
            preserved: Vec::new(),
            failures: Vec::new(),
            manifest: None,
            post_install: None,
            nothing_to_do: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !matches!(self.manifest, Some(Err(_)))
    }

    /// Collapse a failed build into its error.
    pub fn into_result(self) -> Result<Self, AppError> {
        if let Some(Err(source)) = self.manifest {
            return Err(AppError::Manifest { service: self.service.to_string(), source });
        }
        if !self.failures.is_empty() {
            return Err(AppError::ScaffoldFailed {
                service: self.service.to_string(),
                failures: self.failures.len(),
            });
        }
        Ok(self)
    }
}

/// Materialize one service: volumes, templates and statics, manifest,
/// post-install message.
///
/// File failures are collected and the remaining files still processed; the
/// manifest stops at its first failing operation. Only a missing service or
/// an unreadable scaffold directory is returned as `Err`.
pub fn execute<S, T>(
    ctx: &AppContext<S, T>,
    service: &ServiceName,
) -> Result<BuildOutcome, AppError>
where
    S: ServiceCatalog + ComposeDefinitionReader,
    T: SystemTools,
{
    let layout = ctx.layout();
    let has_descriptor = ctx.store().exists(service);
    if !has_descriptor && !layout.is_global(service) {
        return Err(AppError::ServiceNotFound(service.to_string()));
    }

    let sources = discover(layout, service)?;
    let mut outcome = BuildOutcome::new(service.clone());

    let targets: Vec<(PathBuf, PathBuf)> = sources
        .templates
        .iter()
        .chain(&sources.statics)
        .map(|relative| (relative.clone(), render_target(layout, service, relative)))
        .collect();

    if has_descriptor {
        let planned: BTreeSet<PathBuf> = targets.iter().map(|(_, t)| t.clone()).collect();
        match precreate_volumes(ctx.store(), layout, service, ctx.env(), &planned) {
            Ok(report) => {
                for path in &report.created {
                    println!("  📁 Created mount point {}", display(layout, path));
                }
                outcome.volumes_created = report.created;
                outcome.failures.extend(report.failures);
            }
            Err(err) => outcome.failures.push(err.to_string()),
        }
    }

    if sources.is_empty() {
        debug!(service = %service, "no scaffold sources");
        outcome.nothing_to_do = true;
        return Ok(outcome);
    }

    for (relative, target) in &targets {
        let source = sources.root.join(relative);
        let result = if sources.templates.contains(relative) {
            if is_env_target(layout, target) && target.exists() {
                Ok(FileOutcome::Preserved)
            } else {
                render_template(ctx.env(), &source, target)
            }
        } else {
            copy_static(&source, target)
        };

        match result {
            Ok(FileOutcome::Written) => {
                println!("  ✅ {}", display(layout, target));
                outcome.written.push(target.clone());
            }
            Ok(FileOutcome::Preserved) => {
                println!("  ⏭️  {} (skipped, exists)", display(layout, target));
                outcome.preserved.push(target.clone());
            }
            Err(err) => {
                eprintln!("  ❌ {}: {}", display(layout, target), err);
                outcome.failures.push(err.to_string());
            }
        }
    }

    if let Some(manifest_path) = &sources.manifest {
        let service_root = layout.service_config_dir(service);
        let op_ctx = OperationContext { service_root: &service_root, tools: ctx.tools() };
        let result = load_manifest(manifest_path).and_then(|m| run_manifest(&m, &op_ctx));
        match &result {
            Ok(report) => {
                for warning in &report.warnings {
                    println!("  ⚠️ {}", warning);
                }
                println!(
                    "  ✅ Manifest: {} applied, {} unchanged, {} skipped",
                    report.applied, report.unchanged, report.skipped
                );
            }
            Err(err) => eprintln!("  ❌ Manifest: {}", err),
        }
        outcome.manifest = Some(result);
    }

    if outcome.is_success() {
        if let Some(path) = &sources.post_install {
            match fs::read_to_string(path) {
                Ok(message) => {
                    println!("\n{}", message.trim_end());
                    outcome.post_install = Some(message);
                }
                Err(err) => {
                    warn!(path = %path.display(), "cannot read post-install message: {}", err)
                }
            }
        }
    }

    Ok(outcome)
}

fn display(layout: &Layout, path: &Path) -> String {
    path.strip_prefix(layout.base_dir()).unwrap_or(path).display().to_string()
}
