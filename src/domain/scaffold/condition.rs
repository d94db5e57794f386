//! Filesystem predicates gating manifest operations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Predicate over the current filesystem state.
///
/// Conditions are evaluated right before their operation runs, never cached:
/// an earlier operation in the same manifest may change the answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    FileExists { path: PathBuf },
    FileNotExists { path: PathBuf },
    #[serde(alias = "directory_empty")]
    DirEmpty { path: PathBuf },
    #[serde(alias = "directory_not_empty")]
    DirNotEmpty { path: PathBuf },
    /// Any condition type this version does not know.
    #[serde(other)]
    Unknown,
}

impl Condition {
    /// Evaluate against the filesystem, resolving relative paths with `resolve`.
    pub fn evaluate(&self, resolve: impl Fn(&Path) -> PathBuf) -> bool {
        match self {
            Condition::FileExists { path } => resolve(path).is_file(),
            Condition::FileNotExists { path } => !resolve(path).exists(),
            Condition::DirEmpty { path } => {
                let path = resolve(path);
                !path.exists() || (path.is_dir() && dir_entry_count(&path) == Some(0))
            }
            Condition::DirNotEmpty { path } => {
                let path = resolve(path);
                path.is_dir() && dir_entry_count(&path).is_some_and(|count| count > 0)
            }
            Condition::Unknown => {
                warn!("unknown condition type; treating as not met");
                false
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Condition::FileExists { path } => format!("file_exists {}", path.display()),
            Condition::FileNotExists { path } => format!("file_not_exists {}", path.display()),
            Condition::DirEmpty { path } => format!("dir_empty {}", path.display()),
            Condition::DirNotEmpty { path } => format!("dir_not_empty {}", path.display()),
            Condition::Unknown => "unknown condition".to_string(),
        }
    }
}

fn dir_entry_count(path: &Path) -> Option<usize> {
    fs::read_dir(path).ok().map(|entries| entries.count())
}
