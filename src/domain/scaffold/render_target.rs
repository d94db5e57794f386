//! Destination paths of rendered templates and copied statics.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::domain::layout::{ENV_TEMPLATE_NAME, GLOBAL_ENV_PREFIX, TEMPLATE_SUFFIX};
use crate::domain::{Layout, ServiceName};

/// Compute where a scaffold file lands.
///
/// `relative` is the file's path inside the service's scaffold directory.
/// - global service, final name starting with `.env`: `<enabled>/<name>`
/// - any file named `env.template`: `<enabled>/<service>.env`
/// - anything else: `<config-root>/<service>/<relative minus .template>`
pub fn render_target(layout: &Layout, service: &ServiceName, relative: &Path) -> PathBuf {
    let stripped = strip_template_suffix(relative);

    if layout.is_global(service) {
        if let Some(name) = stripped.file_name().and_then(|n| n.to_str()) {
            if name.starts_with(GLOBAL_ENV_PREFIX) {
                return layout.enabled_dir().join(name);
            }
        }
    } else if relative.file_name() == Some(OsStr::new(ENV_TEMPLATE_NAME)) {
        return layout.env_file(service);
    }

    layout.service_config_dir(service).join(stripped)
}

/// Whether `relative` names a template.
pub fn is_template(relative: &Path) -> bool {
    relative
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.len() > TEMPLATE_SUFFIX.len() && name.ends_with(TEMPLATE_SUFFIX))
}

/// Whether a computed target is an environment file in the enabled set.
pub fn is_env_target(layout: &Layout, target: &Path) -> bool {
    target.parent() == Some(layout.enabled_dir().as_path())
        && target.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
            name.starts_with(GLOBAL_ENV_PREFIX) || name.ends_with(".env")
        })
}

fn strip_template_suffix(relative: &Path) -> PathBuf {
    if !is_template(relative) {
        return relative.to_path_buf();
    }
    let name = relative.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    relative.with_file_name(&name[..name.len() - TEMPLATE_SUFFIX.len()])
}
