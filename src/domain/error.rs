use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::scaffold::ManifestError;

/// Library-wide error type for homelab operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Service identifier is invalid.
    #[error(
        "Invalid service name '{0}': must be alphanumeric with hyphens, underscores, or periods"
    )]
    InvalidServiceName(String),

    /// No descriptor exists for the service.
    #[error("Service '{0}' not found in services-available")]
    ServiceNotFound(String),

    /// Descriptor header could not be interpreted.
    #[error("Invalid descriptor for '{service}': {reason}")]
    InvalidDescriptor { service: String, reason: String },

    /// Compose definition could not be read.
    #[error("Failed to parse compose definition for '{service}': {details}")]
    ComposeParse { service: String, details: String },

    /// A required dependency could not be enabled.
    #[error("Required dependency '{dependency}' of '{service}' failed: {source}")]
    DependencyFailed {
        service: String,
        dependency: String,
        #[source]
        source: Box<AppError>,
    },

    /// Service is not enabled.
    #[error("Service '{0}' is not enabled")]
    ServiceNotEnabled(String),

    /// Enablement marker exists but is not managed by homelab.
    #[error("Refusing to touch '{}': not a symlink", .0.display())]
    ForeignMarker(PathBuf),

    /// Scaffold build finished with per-file failures.
    #[error("Scaffold for '{service}' failed ({failures} file(s) failed)")]
    ScaffoldFailed { service: String, failures: usize },

    /// Several builds of a batch failed.
    #[error("Scaffold build failed for: {}", .0.join(", "))]
    BuildsFailed(Vec<String>),

    /// Manifest validation or execution failed.
    #[error("Manifest for '{service}': {source}")]
    Manifest {
        service: String,
        #[source]
        source: ManifestError,
    },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidServiceName(_)
            | AppError::InvalidDescriptor { .. }
            | AppError::ComposeParse { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::ServiceNotFound(_) | AppError::ServiceNotEnabled(_) => {
                io::ErrorKind::NotFound
            }
            AppError::ForeignMarker(_) => io::ErrorKind::AlreadyExists,
            AppError::DependencyFailed { .. }
            | AppError::ScaffoldFailed { .. }
            | AppError::BuildsFailed(_)
            | AppError::Manifest { .. } => io::ErrorKind::Other,
        }
    }
}
