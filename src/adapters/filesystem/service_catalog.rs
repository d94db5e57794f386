//! `ServiceCatalog` and `ComposeDefinitionReader` for `FilesystemStore`.

use std::fs;

use crate::domain::catalog::parse_descriptor_header;
use crate::domain::compose::bind_mount_sources;
use crate::domain::{AppError, ServiceDescriptor, ServiceName};
use crate::ports::{ComposeDefinitionReader, ServiceCatalog};

use super::{FilesystemStore, list_descriptor_entries};

impl FilesystemStore {
    fn read_descriptor(&self, service: &ServiceName) -> Result<String, AppError> {
        let path = self.layout.descriptor_path(service);
        if !path.is_file() {
            return Err(AppError::ServiceNotFound(service.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }
}

impl ServiceCatalog for FilesystemStore {
    fn exists(&self, service: &ServiceName) -> bool {
        self.layout.descriptor_path(service).is_file()
    }

    fn descriptor(&self, service: &ServiceName) -> Result<ServiceDescriptor, AppError> {
        let content = self.read_descriptor(service)?;
        parse_descriptor_header(service, &content)
    }

    fn list(&self) -> Result<Vec<ServiceName>, AppError> {
        list_descriptor_entries(&self.layout.available_dir())
    }
}

impl ComposeDefinitionReader for FilesystemStore {
    fn bind_mount_sources(&self, service: &ServiceName) -> Result<Vec<String>, AppError> {
        let content = self.read_descriptor(service)?;
        bind_mount_sources(&content).map_err(|e| AppError::ComposeParse {
            service: service.to_string(),
            details: e.to_string(),
        })
    }
}
