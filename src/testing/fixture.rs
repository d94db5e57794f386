//! Real-filesystem installation tree for command tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::adapters::FilesystemStore;
use crate::domain::{Layout, ServiceName};

pub struct TestBase {
    dir: TempDir,
}

impl TestBase {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        Self { dir }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.dir.path())
    }

    pub fn store(&self) -> FilesystemStore {
        FilesystemStore::new(self.layout())
    }

    /// Write `services-available/<name>.yml` with the given header lines
    /// followed by a minimal compose body.
    pub fn service(&self, name: &str, headers: &[&str]) -> &Self {
        let mut content: String = headers.iter().map(|h| format!("# {}\n", h)).collect();
        content.push_str(&format!("services:\n  {}:\n    image: {}:latest\n", name, name));
        self.write(&format!("services-available/{}.yml", name), &content)
    }

    /// Write `services-scaffold/<service>/<relative>`.
    pub fn scaffold(&self, service: &str, relative: &str, content: &str) -> &Self {
        self.write(&format!("services-scaffold/{}/{}", service, relative), content)
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.path(relative)).is_ok()
    }
}

pub fn svc(name: &str) -> ServiceName {
    ServiceName::new(name).unwrap()
}
