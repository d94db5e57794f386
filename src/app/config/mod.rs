//! Base-directory configuration loading.
//!
//! Pure schema parsing lives in `domain::configuration`.

mod load_config;

pub use load_config::{load_config, resolve_layout};
