use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::identifiers::validation::is_valid_service_name;

/// Root of `homelab.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomelabConfig {
    /// Directory names relative to the base directory.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Scaffold conventions.
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
}

impl HomelabConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.layout.validate()?;
        self.scaffold.validate()?;
        Ok(())
    }
}

/// Directory layout below the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default = "default_available_dir")]
    pub available_dir: PathBuf,
    #[serde(default = "default_enabled_dir")]
    pub enabled_dir: PathBuf,
    #[serde(default = "default_scaffold_dir")]
    pub scaffold_dir: PathBuf,
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            available_dir: default_available_dir(),
            enabled_dir: default_enabled_dir(),
            scaffold_dir: default_scaffold_dir(),
            config_dir: default_config_dir(),
            archive_dir: default_archive_dir(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        for (key, value) in [
            ("available_dir", &self.available_dir),
            ("enabled_dir", &self.enabled_dir),
            ("scaffold_dir", &self.scaffold_dir),
            ("config_dir", &self.config_dir),
            ("archive_dir", &self.archive_dir),
        ] {
            if !is_plain_relative(value) {
                return Err(AppError::config_error(format!(
                    "layout.{} must be a relative path without '..' (got '{}')",
                    key,
                    value.display()
                )));
            }
        }
        Ok(())
    }
}

/// Scaffold conventions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Service whose env templates land directly in the enabled set.
    #[serde(default = "default_global_service")]
    pub global_service: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self { global_service: default_global_service() }
    }
}

impl ScaffoldConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_valid_service_name(&self.global_service) {
            return Err(AppError::config_error(format!(
                "scaffold.global_service '{}' is not a valid service name",
                self.global_service
            )));
        }
        Ok(())
    }
}

fn is_plain_relative(path: &Path) -> bool {
    let mut components = path.components().peekable();
    if components.peek().is_none() {
        return false;
    }
    components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn default_available_dir() -> PathBuf {
    PathBuf::from("services-available")
}

fn default_enabled_dir() -> PathBuf {
    PathBuf::from("services-enabled")
}

fn default_scaffold_dir() -> PathBuf {
    PathBuf::from("services-scaffold")
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("etc")
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from("archive/env")
}

fn default_global_service() -> String {
    "global".to_string()
}
