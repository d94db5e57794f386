//! Enablement store port definition.

use crate::domain::{AppError, ServiceName};

/// The set of enabled services, represented by marker entries.
pub trait EnablementStore {
    /// Whether the enablement marker for the service exists.
    fn is_enabled(&self, service: &ServiceName) -> bool;

    /// Create the marker. Returns `false` when it already existed.
    fn enable(&self, service: &ServiceName) -> Result<bool, AppError>;

    /// Remove the marker. Returns `false` when it did not exist.
    fn disable(&self, service: &ServiceName) -> Result<bool, AppError>;

    /// Enabled services sorted by name.
    fn enabled_services(&self) -> Result<Vec<ServiceName>, AppError>;
}
