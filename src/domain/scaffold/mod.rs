//! Scaffold model: conditions, operations, manifests and render targets.

mod condition;
mod error;
mod manifest;
mod mode;
mod operation;
mod render_target;

pub use condition::Condition;
pub use error::{ManifestError, OperationError, RenderError, ToolError};
pub use manifest::{SUPPORTED_MANIFEST_VERSION, ScaffoldManifest};
pub use mode::FileMode;
pub use operation::{Operation, OperationContext, OperationOutcome, SecretEncoding};
pub use render_target::{is_env_target, is_template, render_target};
