//! Disable: drop the enablement marker and archive the service env file.

use crate::domain::{AppError, ServiceName};
use crate::ports::{ArchivedEnv, EnablementStore, EnvArchive};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisableOutcome {
    pub service: ServiceName,
    pub archived: Option<ArchivedEnv>,
}

/// Configuration under the config root is left in place so a later enable
/// picks it up again.
pub fn execute<S>(store: &S, service: &ServiceName) -> Result<DisableOutcome, AppError>
where
    S: EnablementStore + EnvArchive,
{
    if !store.is_enabled(service) {
        return Err(AppError::ServiceNotEnabled(service.to_string()));
    }

    store.disable(service)?;
    let archived = store.archive(service)?;

    Ok(DisableOutcome { service: service.clone(), archived })
}
