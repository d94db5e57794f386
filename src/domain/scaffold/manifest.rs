//! Declarative per-service operations list.

use serde::Deserialize;

use crate::domain::scaffold::{ManifestError, Operation};

/// The only manifest schema this version understands.
pub const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Ordered operations of one service scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScaffoldManifest {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl ScaffoldManifest {
    /// Parse manifest YAML and validate every operation's parameters.
    ///
    /// The version marker is checked separately by [`check_version`] so that
    /// callers can refuse to run before touching anything.
    ///
    /// [`check_version`]: ScaffoldManifest::check_version
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let manifest: ScaffoldManifest =
            serde_yaml::from_str(content).map_err(|e| ManifestError::Invalid(e.to_string()))?;

        for (idx, operation) in manifest.operations.iter().enumerate() {
            operation.validate().map_err(|reason| {
                ManifestError::Invalid(format!(
                    "operation {} ({}): {}",
                    idx + 1,
                    operation.kind(),
                    reason
                ))
            })?;
        }

        Ok(manifest)
    }

    pub fn check_version(&self) -> Result<(), ManifestError> {
        match self.version {
            Some(SUPPORTED_MANIFEST_VERSION) => Ok(()),
            found => Err(ManifestError::UnsupportedVersion {
                found,
                supported: SUPPORTED_MANIFEST_VERSION,
            }),
        }
    }
}
