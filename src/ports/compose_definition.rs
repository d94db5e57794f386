//! Compose definition port definition.

use crate::domain::{AppError, ServiceName};

/// Inspection of a service's compose definition.
pub trait ComposeDefinitionReader {
    /// Raw host-side sources of the service's bind mounts, unexpanded.
    fn bind_mount_sources(&self, service: &ServiceName) -> Result<Vec<String>, AppError>;
}
