//! Shared testing harness for `homelab` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated installation base directory driven through the compiled binary.
pub(crate) struct TestContext {
    root: TempDir,
}

impl TestContext {
    /// Create a new isolated installation.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("services-available"))
            .expect("Failed to create services-available");
        Self { root }
    }

    /// Installation base directory.
    pub(crate) fn base_dir(&self) -> &Path {
        self.root.path()
    }

    pub(crate) fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Build a non-interactive command against this installation.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("homelab").expect("Failed to locate homelab binary");
        cmd.arg("--base-dir").arg(self.base_dir()).arg("--non-interactive");
        cmd.env_remove("HOMELAB_BASE_DIR").env_remove("RUST_LOG");
        cmd
    }

    /// Declare a service with `# key: value` headers and a compose body.
    pub(crate) fn service(&self, name: &str, headers: &[&str]) -> &Self {
        let mut content: String = headers.iter().map(|h| format!("# {}\n", h)).collect();
        content.push_str(&format!("services:\n  {name}:\n    image: {name}:latest\n"));
        self.write(&format!("services-available/{}.yml", name), &content)
    }

    /// Declare a service with a raw compose body.
    pub(crate) fn service_with_compose(&self, name: &str, content: &str) -> &Self {
        self.write(&format!("services-available/{}.yml", name), content)
    }

    pub(crate) fn scaffold(&self, service: &str, relative: &str, content: &str) -> &Self {
        self.write(&format!("services-scaffold/{}/{}", service, relative), content)
    }

    pub(crate) fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("path has parent"))
            .expect("Failed to create parent directory");
        fs::write(&path, content).expect("Failed to write fixture file");
        self
    }

    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("Failed to read file")
    }

    pub(crate) fn is_enabled(&self, service: &str) -> bool {
        fs::symlink_metadata(self.path(&format!("services-enabled/{}.yml", service))).is_ok()
    }

    pub(crate) fn enable(&self, service: &str) {
        self.cli().args(["enable", service]).assert().success();
    }
}
