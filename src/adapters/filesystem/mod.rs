//! Filesystem adapter implementations for store ports.
//!
//! `ServiceCatalog`, `ComposeDefinitionReader`, `EnablementStore` and
//! `EnvArchive` are all implemented on a single `FilesystemStore` that owns
//! the installation layout.

mod env_archive;
mod enablement_store;
mod service_catalog;

use std::path::Path;

use crate::domain::{AppError, Layout, ServiceName};
use crate::domain::layout::DESCRIPTOR_EXTENSION;

/// Filesystem-backed store rooted at an installation base directory.
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    layout: Layout,
}

impl FilesystemStore {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

/// Service names of every `<name>.yml` entry in `dir`, sorted.
///
/// Entries whose stem is not a valid service name are ignored; a missing
/// directory yields an empty list.
pub(crate) fn list_descriptor_entries(dir: &Path) -> Result<Vec<ServiceName>, AppError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(DESCRIPTOR_EXTENSION) {
            continue;
        }
        if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
            if let Ok(name) = ServiceName::new(name) {
                names.push(name);
            }
        }
    }
    names.sort();
    Ok(names)
}
