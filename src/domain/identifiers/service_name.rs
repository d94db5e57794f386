//! Service identifier.

use std::fmt;
use std::ops::Deref;

use super::validation::is_valid_service_name;
use crate::domain::AppError;

/// A validated service name.
///
/// Service names double as file stems (`<name>.yml`, `<name>.env`) and
/// directory names, so they never contain path separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: &str) -> Result<Self, AppError> {
        if is_valid_service_name(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(AppError::InvalidServiceName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ServiceName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
