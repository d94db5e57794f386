use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by an external capability (openssl, chown, HTTP).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{tool}: {details}")]
pub struct ToolError {
    pub tool: String,
    pub details: String,
}

impl ToolError {
    pub fn new(tool: impl Into<String>, details: impl Into<String>) -> Self {
        Self { tool: tool.into(), details: details.into() }
    }
}

/// Failure of a single manifest operation.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl OperationError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        OperationError::Io { action, path: path.into(), source }
    }
}

/// Manifest validation or execution failure.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest: {0}")]
    Invalid(String),

    #[error("unsupported manifest version {found:?} (supported: {supported})")]
    UnsupportedVersion { found: Option<u32>, supported: u32 },

    #[error("operation {index} ({kind}) failed: {source}")]
    OperationFailed {
        /// 1-based position in the manifest.
        index: usize,
        kind: &'static str,
        #[source]
        source: OperationError,
    },
}

/// Failure to render or copy one scaffold file.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        RenderError::Io { action, path: path.into(), source }
    }
}
