//! Bind-mount pre-creation so Docker never creates mount points itself.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::compose::config_mount_paths;
use crate::domain::{AppError, Environment, Layout, ServiceName};
use crate::ports::ComposeDefinitionReader;

/// Result of volume pre-creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeReport {
    pub created: Vec<PathBuf>,
    pub failures: Vec<String>,
}

/// Create every bind-mount source under the service's config directory that
/// does not exist yet and is not in `planned`.
///
/// A final segment with an extension becomes an empty file, anything else a
/// directory.
pub fn precreate_volumes<C: ComposeDefinitionReader + ?Sized>(
    compose: &C,
    layout: &Layout,
    service: &ServiceName,
    env: &Environment,
    planned: &BTreeSet<PathBuf>,
) -> Result<VolumeReport, AppError> {
    let sources = compose.bind_mount_sources(service)?;
    let mut report = VolumeReport::default();

    for path in config_mount_paths(&sources, layout, service, env) {
        if planned.contains(&path) || fs::symlink_metadata(&path).is_ok() {
            continue;
        }
        match create_mount_point(&path) {
            Ok(()) => report.created.push(path),
            Err(err) => report.failures.push(format!("{}: {}", path.display(), err)),
        }
    }

    Ok(report)
}

fn create_mount_point(path: &Path) -> std::io::Result<()> {
    if path.extension().is_some() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::File::create(path).map(|_| ())
    } else {
        fs::create_dir_all(path)
    }
}
