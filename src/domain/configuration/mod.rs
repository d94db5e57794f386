//! Installation configuration (`homelab.toml`).

mod homelab_config;
mod parse;

pub use homelab_config::{HomelabConfig, LayoutConfig, ScaffoldConfig};
pub use parse::parse_config_content;
