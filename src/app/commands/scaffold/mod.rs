//! Scaffold orchestration: build, teardown and the phases behind them.

pub mod build;
pub mod discovery;
pub mod manifest_runner;
pub mod render;
pub mod teardown;
pub mod volumes;

pub use build::BuildOutcome;
pub use manifest_runner::ManifestReport;
pub use teardown::TeardownOutcome;
