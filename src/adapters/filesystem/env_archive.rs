//! `EnvArchive` for `FilesystemStore`: `<archive>/<service>.env.<timestamp>` files.

use std::fs;

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::domain::{AppError, ServiceName};
use crate::ports::{ArchivedEnv, EnvArchive};

use super::FilesystemStore;

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

impl EnvArchive for FilesystemStore {
    fn archives(&self, service: &ServiceName) -> Result<Vec<ArchivedEnv>, AppError> {
        let dir = self.layout.archive_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let prefix = format!("{}.env.", service);
        let mut archives = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let Some(stamp) =
                path.file_name().and_then(|n| n.to_str()).and_then(|n| n.strip_prefix(&prefix))
            else {
                continue;
            };
            if let Ok(archived_at) = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT) {
                archives.push(ArchivedEnv { path, archived_at });
            }
        }

        archives.sort_by(|a, b| b.archived_at.cmp(&a.archived_at));
        Ok(archives)
    }

    fn restore(&self, service: &ServiceName, archive: &ArchivedEnv) -> Result<(), AppError> {
        let target = self.layout.env_file(service);
        fs::create_dir_all(self.layout.enabled_dir())?;
        move_file(&archive.path, &target)?;
        Ok(())
    }

    fn archive(&self, service: &ServiceName) -> Result<Option<ArchivedEnv>, AppError> {
        let source = self.layout.env_file(service);
        if !source.is_file() {
            return Ok(None);
        }

        let archived_at = Local::now().naive_local().trunc_subsecs(0);
        let dir = self.layout.archive_dir();
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.env.{}", service, archived_at.format(TIMESTAMP_FORMAT)));
        move_file(&source, &path)?;

        Ok(Some(ArchivedEnv { path, archived_at }))
    }
}

/// Rename, falling back to copy+remove across filesystems.
fn move_file(from: &std::path::Path, to: &std::path::Path) -> std::io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
