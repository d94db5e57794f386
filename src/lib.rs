//! homelab: enable Docker Compose services with their dependencies and
//! scaffold their configuration, secrets and mount points.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    BuildOutcome, DisableOutcome, EnableOutcome, ManifestReport, ServiceListing, TeardownOutcome,
    disable, enable, list, scaffold_build, scaffold_build_all, scaffold_teardown,
};
pub use domain::AppError;
