//! Template rendering and no-clobber static copies.

use std::fs;
use std::path::Path;

use crate::domain::Environment;
use crate::domain::scaffold::RenderError;

/// What happened to one destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Written,
    /// Destination existed and was left as is.
    Preserved,
}

/// Substitute `${VAR}`/`${VAR:-default}` in `source` and write `dest`.
pub fn render_template(
    env: &Environment,
    source: &Path,
    dest: &Path,
) -> Result<FileOutcome, RenderError> {
    let content =
        fs::read_to_string(source).map_err(|e| RenderError::io("read template", source, e))?;
    let rendered = env.substitute(&content);

    ensure_parent(dest)?;
    fs::write(dest, rendered).map_err(|e| RenderError::io("write", dest, e))?;
    Ok(FileOutcome::Written)
}

/// Copy `source` to `dest` byte for byte unless `dest` already exists.
pub fn copy_static(source: &Path, dest: &Path) -> Result<FileOutcome, RenderError> {
    if fs::symlink_metadata(dest).is_ok() {
        return Ok(FileOutcome::Preserved);
    }
    ensure_parent(dest)?;
    fs::copy(source, dest).map_err(|e| RenderError::io("copy", dest, e))?;
    Ok(FileOutcome::Written)
}

fn ensure_parent(path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RenderError::io("create directory", parent, e))?;
    }
    Ok(())
}
