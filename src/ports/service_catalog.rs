//! Service catalog port definition.

use crate::domain::{AppError, ServiceDescriptor, ServiceName};

/// Read access to the available service descriptors.
pub trait ServiceCatalog {
    /// Whether a descriptor exists for the service.
    fn exists(&self, service: &ServiceName) -> bool;

    /// Load and parse the descriptor header.
    ///
    /// Returns `AppError::ServiceNotFound` when no descriptor exists.
    fn descriptor(&self, service: &ServiceName) -> Result<ServiceDescriptor, AppError>;

    /// All available services sorted by name.
    fn list(&self) -> Result<Vec<ServiceName>, AppError>;
}
