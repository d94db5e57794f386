//! `homelab.toml` loading from the base directory.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::configuration::parse_config_content;
use crate::domain::layout::CONFIG_FILE;
use crate::domain::{AppError, HomelabConfig, Layout};

/// Load `<base>/homelab.toml`, falling back to defaults when it is absent.
pub fn load_config(base_dir: &Path) -> Result<HomelabConfig, AppError> {
    let config_path = base_dir.join(CONFIG_FILE);

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %config_path.display(), "no config file; using defaults");
            return Ok(HomelabConfig::default());
        }
        Err(err) => return Err(err.into()),
    };

    parse_config_content(&content).map_err(|e| {
        AppError::config_error(format!("{}: {}", config_path.display(), e))
    })
}

/// Layout of the installation at `base_dir`, honouring its config file.
pub fn resolve_layout(base_dir: &Path) -> Result<Layout, AppError> {
    let config = load_config(base_dir)?;
    Ok(Layout::from_config(base_dir, &config))
}
