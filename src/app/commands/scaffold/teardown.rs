//! Scaffold teardown: remove generated env file and optionally the config tree.

use std::fs;
use std::path::PathBuf;

use crate::domain::{AppError, Layout, ServiceName};

/// Paths removed by a teardown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownOutcome {
    pub removed: Vec<PathBuf>,
}

/// Remove `<enabled>/<service>.env` and, unless `preserve_config`, the whole
/// `<config-root>/<service>` tree.
///
/// The descriptor and the enablement marker are never touched.
pub fn execute(
    layout: &Layout,
    service: &ServiceName,
    preserve_config: bool,
) -> Result<TeardownOutcome, AppError> {
    let mut outcome = TeardownOutcome::default();

    let env_file = layout.env_file(service);
    if env_file.is_file() {
        fs::remove_file(&env_file)?;
        outcome.removed.push(env_file);
    }

    if !preserve_config {
        let config_dir = layout.service_config_dir(service);
        if config_dir.exists() {
            fs::remove_dir_all(&config_dir)?;
            outcome.removed.push(config_dir);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestBase, svc};

    fn seeded() -> TestBase {
        let base = TestBase::new();
        base.service("app", &[])
            .write("services-enabled/app.env", "A=1")
            .write("etc/app/app.ini", "x");
        base
    }

    #[test]
    fn teardown_keeps_config() {
        let base = seeded();

        let outcome = execute(&base.layout(), &svc("app"), true).unwrap();

        assert_eq!(outcome.removed, vec![base.path("services-enabled/app.env")]);
        assert!(base.exists("etc/app/app.ini"));
        assert!(base.exists("services-available/app.yml"));
    }

    #[test]
    fn nuke_removes_config_tree() {
        let base = seeded();

        execute(&base.layout(), &svc("app"), false).unwrap();

        assert!(!base.exists("etc/app"));
        assert!(!base.exists("services-enabled/app.env"));
        assert!(base.exists("services-available/app.yml"));
    }

    #[test]
    fn teardown_of_clean_service_is_noop() {
        let base = TestBase::new();
        let outcome = execute(&base.layout(), &svc("app"), false).unwrap();
        assert!(outcome.removed.is_empty());
    }
}
