//! Scaffold source discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::layout::{MANIFEST_FILE, POST_INSTALL_FILE, STATIC_IGNORE};
use crate::domain::scaffold::is_template;
use crate::domain::{AppError, Layout, ServiceName};

/// Files found under `services-scaffold/<service>/`.
///
/// Template and static paths are relative to `root` and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldSources {
    pub root: PathBuf,
    pub templates: Vec<PathBuf>,
    pub statics: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub post_install: Option<PathBuf>,
}

impl ScaffoldSources {
    /// No templates, statics or manifest.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.statics.is_empty() && self.manifest.is_none()
    }
}

pub fn discover(layout: &Layout, service: &ServiceName) -> Result<ScaffoldSources, AppError> {
    let root = layout.scaffold_dir(service);
    let mut sources = ScaffoldSources { root: root.clone(), ..Default::default() };
    if !root.is_dir() {
        return Ok(sources);
    }

    let manifest = root.join(MANIFEST_FILE);
    sources.manifest = manifest.is_file().then_some(manifest);
    let post_install = root.join(POST_INSTALL_FILE);
    sources.post_install = post_install.is_file().then_some(post_install);

    let mut files = Vec::new();
    collect_files(&root, &root, &mut files)?;
    files.sort();

    for relative in files {
        if is_template(&relative) {
            sources.templates.push(relative);
        } else if !is_ignored(&relative) {
            sources.statics.push(relative);
        }
    }

    Ok(sources)
}

fn is_ignored(relative: &Path) -> bool {
    relative
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| STATIC_IGNORE.contains(&name))
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), AppError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative.to_path_buf());
        }
    }
    Ok(())
}
