//! Service listing.

use tracing::warn;

use crate::domain::{AppError, ServiceName};
use crate::ports::{EnablementStore, ServiceCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceListing {
    pub name: ServiceName,
    pub description: Option<String>,
    pub enabled: bool,
}

/// Available services sorted by name, optionally only the enabled ones.
pub fn execute<S>(store: &S, enabled_only: bool) -> Result<Vec<ServiceListing>, AppError>
where
    S: ServiceCatalog + EnablementStore,
{
    let mut listings = Vec::new();
    for name in store.list()? {
        let enabled = store.is_enabled(&name);
        if enabled_only && !enabled {
            continue;
        }
        let description = match store.descriptor(&name) {
            Ok(descriptor) => descriptor.description,
            Err(err) => {
                warn!(service = %name, "unreadable descriptor: {}", err);
                None
            }
        };
        listings.push(ServiceListing { name, description, enabled });
    }
    Ok(listings)
}
