//! Pure parse/validate for `homelab.toml`.

use crate::domain::AppError;
use crate::domain::configuration::HomelabConfig;

/// Parse and validate installation configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<HomelabConfig, AppError> {
    let config: HomelabConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
