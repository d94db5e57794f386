//! `EnablementStore` for `FilesystemStore`: relative symlinks in the enabled set.

use std::fs;

use crate::domain::{AppError, ServiceName};
use crate::ports::EnablementStore;

use super::{FilesystemStore, list_descriptor_entries};

impl EnablementStore for FilesystemStore {
    fn is_enabled(&self, service: &ServiceName) -> bool {
        fs::symlink_metadata(self.layout.marker_path(service)).is_ok()
    }

    fn enable(&self, service: &ServiceName) -> Result<bool, AppError> {
        if self.is_enabled(service) {
            return Ok(false);
        }
        let marker = self.layout.marker_path(service);
        fs::create_dir_all(self.layout.enabled_dir())?;
        create_symlink(&self.layout.marker_target(service), &marker)?;
        Ok(true)
    }

    fn disable(&self, service: &ServiceName) -> Result<bool, AppError> {
        let marker = self.layout.marker_path(service);
        match fs::symlink_metadata(&marker) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                fs::remove_file(&marker)?;
                Ok(true)
            }
            Ok(_) => Err(AppError::ForeignMarker(marker)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn enabled_services(&self) -> Result<Vec<ServiceName>, AppError> {
        list_descriptor_entries(&self.layout.enabled_dir())
    }
}

#[cfg(unix)]
fn create_symlink(target: &std::path::Path, link: &std::path::Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn create_symlink(target: &std::path::Path, link: &std::path::Path) -> std::io::Result<()> {
    let source = link.parent().map(|dir| dir.join(target)).unwrap_or_else(|| target.to_path_buf());
    fs::copy(source, link).map(|_| ())
}
