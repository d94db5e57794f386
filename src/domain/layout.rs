//! Path catalog for an installation rooted at a base directory.

use std::path::{Component, Path, PathBuf};

use crate::domain::ServiceName;
use crate::domain::configuration::HomelabConfig;

/// Default installation root inside the management container.
pub const DEFAULT_BASE_DIR: &str = "/app";

/// Optional configuration file below the base directory.
pub const CONFIG_FILE: &str = "homelab.toml";

/// Extension of service descriptors and enablement markers.
pub const DESCRIPTOR_EXTENSION: &str = "yml";

/// Suffix marking a scaffold file for variable substitution.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Service-level env template; renders to `<enabled>/<service>.env`.
pub const ENV_TEMPLATE_NAME: &str = "env.template";

/// Prefix shared by the global environment files.
pub const GLOBAL_ENV_PREFIX: &str = ".env";

/// Declarative operations list inside a scaffold directory.
pub const MANIFEST_FILE: &str = "manifest.yml";

/// Message shown after a successful build.
pub const POST_INSTALL_FILE: &str = "POST_INSTALL.md";

/// Scaffold files that are never copied as statics.
pub const STATIC_IGNORE: &[&str] =
    &["README.md", ".gitkeep", ".keep", MANIFEST_FILE, POST_INSTALL_FILE];

/// Resolved directory layout of one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base: PathBuf,
    available_rel: PathBuf,
    enabled_rel: PathBuf,
    scaffold_rel: PathBuf,
    config_rel: PathBuf,
    archive_rel: PathBuf,
    global_service: String,
}

impl Layout {
    /// Layout with the default directory names.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self::from_config(base, &HomelabConfig::default())
    }

    pub fn from_config(base: impl Into<PathBuf>, config: &HomelabConfig) -> Self {
        Self {
            base: base.into(),
            available_rel: config.layout.available_dir.clone(),
            enabled_rel: config.layout.enabled_dir.clone(),
            scaffold_rel: config.layout.scaffold_dir.clone(),
            config_rel: config.layout.config_dir.clone(),
            archive_rel: config.layout.archive_dir.clone(),
            global_service: config.scaffold.global_service.clone(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn available_dir(&self) -> PathBuf {
        self.base.join(&self.available_rel)
    }

    pub fn enabled_dir(&self) -> PathBuf {
        self.base.join(&self.enabled_rel)
    }

    pub fn scaffold_root(&self) -> PathBuf {
        self.base.join(&self.scaffold_rel)
    }

    pub fn config_root(&self) -> PathBuf {
        self.base.join(&self.config_rel)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.base.join(&self.archive_rel)
    }

    /// `services-available/<service>.yml`
    pub fn descriptor_path(&self, service: &ServiceName) -> PathBuf {
        self.available_dir().join(descriptor_file_name(service))
    }

    /// `services-enabled/<service>.yml`
    pub fn marker_path(&self, service: &ServiceName) -> PathBuf {
        self.enabled_dir().join(descriptor_file_name(service))
    }

    /// Symlink target for the enablement marker, relative to the enabled dir.
    pub fn marker_target(&self, service: &ServiceName) -> PathBuf {
        let mut target = PathBuf::new();
        for component in self.enabled_rel.components() {
            if matches!(component, Component::Normal(_)) {
                target.push("..");
            }
        }
        target.join(&self.available_rel).join(descriptor_file_name(service))
    }

    /// `services-enabled/<service>.env`
    pub fn env_file(&self, service: &ServiceName) -> PathBuf {
        self.enabled_dir().join(format!("{}.env", service))
    }

    /// `services-scaffold/<service>/`
    pub fn scaffold_dir(&self, service: &ServiceName) -> PathBuf {
        self.scaffold_root().join(service.as_str())
    }

    /// `etc/<service>/`
    pub fn service_config_dir(&self, service: &ServiceName) -> PathBuf {
        self.config_root().join(service.as_str())
    }

    pub fn global_service(&self) -> &str {
        &self.global_service
    }

    pub fn is_global(&self, service: &ServiceName) -> bool {
        service.as_str() == self.global_service
    }
}

fn descriptor_file_name(service: &ServiceName) -> String {
    format!("{}.{}", service, DESCRIPTOR_EXTENSION)
}
