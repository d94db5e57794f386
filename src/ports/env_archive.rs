//! Environment archive port definition.

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::domain::{AppError, ServiceName};

/// A previously archived per-service environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedEnv {
    pub path: PathBuf,
    pub archived_at: NaiveDateTime,
}

/// Storage for env files of disabled services.
pub trait EnvArchive {
    /// Archived env files of the service, newest first.
    fn archives(&self, service: &ServiceName) -> Result<Vec<ArchivedEnv>, AppError>;

    /// Move an archived file back into the enabled set.
    fn restore(&self, service: &ServiceName, archive: &ArchivedEnv) -> Result<(), AppError>;

    /// Move the service's current env file into the archive, if present.
    fn archive(&self, service: &ServiceName) -> Result<Option<ArchivedEnv>, AppError>;
}
