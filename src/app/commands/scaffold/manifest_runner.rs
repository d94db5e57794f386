//! Ordered, stop-on-first-failure manifest execution.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::scaffold::{ManifestError, OperationContext, OperationOutcome, ScaffoldManifest};
use crate::ports::SystemTools;

/// Tally of one manifest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestReport {
    pub applied: usize,
    /// Operations whose condition did not hold.
    pub skipped: usize,
    /// Operations that found nothing to do.
    pub unchanged: usize,
    pub warnings: Vec<String>,
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<ScaffoldManifest, ManifestError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ManifestError::Invalid(format!("cannot read {}: {}", path.display(), e)))?;
    ScaffoldManifest::parse(&content)
}

/// Execute `manifest` in declared order.
///
/// The version is checked before anything runs. Effects of operations that
/// completed before a failure are kept.
pub fn run_manifest<T: SystemTools + ?Sized>(
    manifest: &ScaffoldManifest,
    ctx: &OperationContext<'_, T>,
) -> Result<ManifestReport, ManifestError> {
    manifest.check_version()?;

    let mut report = ManifestReport::default();
    for (idx, operation) in manifest.operations.iter().enumerate() {
        let index = idx + 1;
        let kind = operation.kind();

        if !operation.should_execute(ctx) {
            let reason = operation.condition().map(|c| c.describe()).unwrap_or_default();
            debug!(index, kind, "skipping operation: condition not met ({})", reason);
            report.skipped += 1;
            continue;
        }

        match operation.execute(ctx) {
            Ok(OperationOutcome::Applied) => report.applied += 1,
            Ok(OperationOutcome::Unchanged(reason)) => {
                debug!(index, kind, "operation unchanged: {}", reason);
                report.unchanged += 1;
            }
            Ok(OperationOutcome::Warned(message)) => {
                report.warnings.push(format!("operation {} ({}): {}", index, kind, message));
            }
            Err(source) => return Err(ManifestError::OperationFailed { index, kind, source }),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    use super::*;
    use crate::testing::FakeTools;

    fn manifest(yaml: &str) -> ScaffoldManifest {
        ScaffoldManifest::parse(yaml).unwrap()
    }

    #[test]
    fn stops_at_first_failure_and_keeps_earlier_effects() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new().failing("genrsa");
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let manifest = manifest(
            r#"
version: 1
operations:
  - type: mkdir
    path: data
  - type: keygen
    private_key: keys/jwt.pem
  - type: mkdir
    path: never
"#,
        );

        let err = run_manifest(&manifest, &ctx).unwrap_err();

        match err {
            ManifestError::OperationFailed { index, kind, .. } => {
                assert_eq!(index, 2);
                assert_eq!(kind, "keygen");
            }
            other => panic!("unexpected error: {other}"),
        }
        tmp.child("data").assert(predicates::path::is_dir());
        tmp.child("never").assert(predicates::path::missing());
    }

    #[test]
    fn chown_failure_does_not_stop_the_run() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new().failing("chown");
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let manifest = manifest(
            r#"
version: 1
operations:
  - type: mkdir
    path: data
  - type: chown
    path: data
    user: "1000"
  - type: mkdir
    path: after
"#,
        );

        let report = run_manifest(&manifest, &ctx).unwrap();

        assert_eq!(report.applied, 2);
        assert_eq!(report.warnings.len(), 1);
        tmp.child("after").assert(predicates::path::is_dir());
    }

    #[test]
    fn unsupported_version_runs_nothing() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };

        for yaml in [
            "version: 2\noperations:\n  - type: mkdir\n    path: data\n",
            "operations:\n  - type: mkdir\n    path: data\n",
        ] {
            let result = run_manifest(&manifest(yaml), &ctx);
            assert!(matches!(result, Err(ManifestError::UnsupportedVersion { .. })));
        }
        tmp.child("data").assert(predicates::path::missing());
    }

    #[test]
    fn conditions_see_effects_of_earlier_operations() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let manifest = manifest(
            r#"
version: 1
operations:
  - type: random
    output: secrets/token
  - type: mkdir
    path: marker
    condition:
      type: file_exists
      path: secrets/token
  - type: mkdir
    path: skipped
    condition:
      type: dir_empty
      path: secrets
"#,
        );

        let report = run_manifest(&manifest, &ctx).unwrap();

        assert_eq!(report, ManifestReport { applied: 2, skipped: 1, ..Default::default() });
        tmp.child("marker").assert(predicates::path::is_dir());
        tmp.child("skipped").assert(predicates::path::missing());
    }
}
