//! Idempotent side-effecting actions declared by a scaffold manifest.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::domain::scaffold::{Condition, FileMode, OperationError};
use crate::ports::SystemTools;

/// Encoding of generated random secrets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    #[default]
    Base64,
    Hex,
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum Operation {
    #[serde(rename = "mkdir")]
    CreateDirectory {
        path: PathBuf,
        #[serde(default = "default_dir_mode")]
        mode: FileMode,
        #[serde(default)]
        condition: Option<Condition>,
    },

    #[serde(rename = "keygen")]
    GenerateKeypair {
        private_key: PathBuf,
        #[serde(default)]
        public_key: Option<PathBuf>,
        #[serde(default = "default_key_bits")]
        bits: u32,
        #[serde(default = "default_true")]
        skip_if_exists: bool,
        #[serde(default)]
        condition: Option<Condition>,
    },

    #[serde(rename = "random")]
    GenerateRandomSecret {
        output: PathBuf,
        #[serde(default = "default_secret_bytes")]
        bytes: usize,
        #[serde(default)]
        encoding: SecretEncoding,
        #[serde(default = "default_true")]
        skip_if_exists: bool,
        #[serde(default)]
        condition: Option<Condition>,
    },

    #[serde(rename = "download")]
    DownloadFile {
        url: String,
        output: PathBuf,
        #[serde(default)]
        mode: Option<FileMode>,
        #[serde(default = "default_true")]
        skip_if_exists: bool,
        #[serde(default)]
        condition: Option<Condition>,
    },

    #[serde(rename = "delete")]
    DeletePath {
        path: PathBuf,
        #[serde(default)]
        condition: Option<Condition>,
    },

    #[serde(rename = "chown")]
    ChangeOwner {
        path: PathBuf,
        #[serde(deserialize_with = "owner_name")]
        user: String,
        #[serde(default, deserialize_with = "optional_owner_name")]
        group: Option<String>,
        #[serde(default)]
        recursive: bool,
        #[serde(default)]
        condition: Option<Condition>,
    },

    #[serde(rename = "chmod")]
    ChangeMode {
        path: PathBuf,
        mode: FileMode,
        #[serde(default)]
        recursive: bool,
        #[serde(default)]
        condition: Option<Condition>,
    },
}

/// Result of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Applied,
    /// Nothing to do (skip-if-exists, already absent).
    Unchanged(String),
    /// Best-effort failure downgraded to a warning.
    Warned(String),
}

/// Where an operation runs and which capabilities it may call.
pub struct OperationContext<'a, T: SystemTools + ?Sized> {
    /// Relative operation paths resolve below this directory.
    pub service_root: &'a Path,
    pub tools: &'a T,
}

impl<T: SystemTools + ?Sized> OperationContext<'_, T> {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.service_root.join(path) }
    }
}

impl Operation {
    /// Manifest spelling of the operation type.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::CreateDirectory { .. } => "mkdir",
            Operation::GenerateKeypair { .. } => "keygen",
            Operation::GenerateRandomSecret { .. } => "random",
            Operation::DownloadFile { .. } => "download",
            Operation::DeletePath { .. } => "delete",
            Operation::ChangeOwner { .. } => "chown",
            Operation::ChangeMode { .. } => "chmod",
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        match self {
            Operation::CreateDirectory { condition, .. }
            | Operation::GenerateKeypair { condition, .. }
            | Operation::GenerateRandomSecret { condition, .. }
            | Operation::DownloadFile { condition, .. }
            | Operation::DeletePath { condition, .. }
            | Operation::ChangeOwner { condition, .. }
            | Operation::ChangeMode { condition, .. } => condition.as_ref(),
        }
    }

    /// Parameter checks that do not touch the filesystem.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Operation::GenerateKeypair { bits, .. } if !(512..=16384).contains(bits) => {
                Err(format!("keygen bits must be between 512 and 16384 (got {})", bits))
            }
            Operation::GenerateRandomSecret { bytes: 0, .. } => {
                Err("random bytes must be greater than 0".to_string())
            }
            Operation::DownloadFile { url, .. } => match Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
                Ok(parsed) => {
                    Err(format!("download url scheme '{}' is not supported", parsed.scheme()))
                }
                Err(err) => Err(format!("invalid download url '{}': {}", url, err)),
            },
            Operation::ChangeOwner { user, .. } if user.trim().is_empty() => {
                Err("chown user must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Whether the gating condition (if any) currently holds.
    pub fn should_execute<T: SystemTools + ?Sized>(&self, ctx: &OperationContext<'_, T>) -> bool {
        self.condition().is_none_or(|condition| condition.evaluate(|p| ctx.resolve(p)))
    }

    pub fn execute<T: SystemTools + ?Sized>(
        &self,
        ctx: &OperationContext<'_, T>,
    ) -> Result<OperationOutcome, OperationError> {
        match self {
            Operation::CreateDirectory { path, mode, .. } => {
                let path = ctx.resolve(path);
                fs::create_dir_all(&path)
                    .map_err(|e| OperationError::io("create directory", &path, e))?;
                set_mode(&path, *mode)?;
                Ok(OperationOutcome::Applied)
            }

            Operation::GenerateKeypair { private_key, public_key, bits, skip_if_exists, .. } => {
                let private_key = ctx.resolve(private_key);
                if *skip_if_exists && private_key.exists() {
                    return Ok(unchanged_exists(&private_key));
                }
                ensure_parent(&private_key)?;
                ctx.tools.generate_private_key(&private_key, *bits)?;
                set_mode(&private_key, FileMode::GENERATED_FILE)?;

                if let Some(public_key) = public_key {
                    let public_key = ctx.resolve(public_key);
                    ensure_parent(&public_key)?;
                    ctx.tools.derive_public_key(&private_key, &public_key)?;
                    set_mode(&public_key, FileMode::GENERATED_FILE)?;
                }
                Ok(OperationOutcome::Applied)
            }

            Operation::GenerateRandomSecret { output, bytes, encoding, skip_if_exists, .. } => {
                let output = ctx.resolve(output);
                if *skip_if_exists && output.exists() {
                    return Ok(unchanged_exists(&output));
                }
                let secret = ctx.tools.random_secret(*bytes, *encoding)?;
                ensure_parent(&output)?;
                fs::write(&output, secret).map_err(|e| OperationError::io("write", &output, e))?;
                set_mode(&output, FileMode::GENERATED_FILE)?;
                Ok(OperationOutcome::Applied)
            }

            Operation::DownloadFile { url, output, mode, skip_if_exists, .. } => {
                let output = ctx.resolve(output);
                if *skip_if_exists && output.exists() {
                    return Ok(unchanged_exists(&output));
                }
                ensure_parent(&output)?;
                ctx.tools.download(url, &output)?;
                if let Some(mode) = mode {
                    set_mode(&output, *mode)?;
                }
                Ok(OperationOutcome::Applied)
            }

            Operation::DeletePath { path, .. } => {
                let path = ctx.resolve(path);
                let Ok(metadata) = fs::symlink_metadata(&path) else {
                    return Ok(OperationOutcome::Unchanged(format!(
                        "{} already absent",
                        path.display()
                    )));
                };
                let removed = if metadata.is_dir() {
                    fs::remove_dir_all(&path)
                } else {
                    fs::remove_file(&path)
                };
                removed.map_err(|e| OperationError::io("delete", &path, e))?;
                Ok(OperationOutcome::Applied)
            }

            Operation::ChangeOwner { path, user, group, recursive, .. } => {
                let path = ctx.resolve(path);
                match ctx.tools.change_owner(&path, user, group.as_deref(), *recursive) {
                    Ok(()) => Ok(OperationOutcome::Applied),
                    Err(err) => {
                        warn!(path = %path.display(), "ownership change failed: {}", err);
                        Ok(OperationOutcome::Warned(err.to_string()))
                    }
                }
            }

            Operation::ChangeMode { path, mode, recursive, .. } => {
                let path = ctx.resolve(path);
                if *recursive {
                    set_mode_recursive(&path, *mode)?;
                } else {
                    set_mode(&path, *mode)?;
                }
                Ok(OperationOutcome::Applied)
            }
        }
    }
}

fn unchanged_exists(path: &Path) -> OperationOutcome {
    OperationOutcome::Unchanged(format!("{} exists", path.display()))
}

fn ensure_parent(path: &Path) -> Result<(), OperationError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| OperationError::io("create directory", parent, e))?;
    }
    Ok(())
}

fn set_mode(path: &Path, mode: FileMode) -> Result<(), OperationError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
            .map_err(|e| OperationError::io("chmod", path, e))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}

/// Children first, so a mode without search permission still reaches them.
/// Symlinks are left alone.
fn set_mode_recursive(path: &Path, mode: FileMode) -> Result<(), OperationError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| OperationError::io("chmod", path, e))?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }
    if metadata.is_dir() {
        let entries =
            fs::read_dir(path).map_err(|e| OperationError::io("read directory", path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| OperationError::io("read directory", path, e))?;
            set_mode_recursive(&entry.path(), mode)?;
        }
    }
    set_mode(path, mode)
}

fn default_dir_mode() -> FileMode {
    FileMode::DIRECTORY_DEFAULT
}

fn default_key_bits() -> u32 {
    2048
}

fn default_secret_bytes() -> usize {
    32
}

fn default_true() -> bool {
    true
}

struct OwnerNameVisitor;

impl Visitor<'_> for OwnerNameVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user/group name or numeric id")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
        Ok(value.to_string())
    }
}

fn owner_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(OwnerNameVisitor)
}

fn optional_owner_name<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    owner_name(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    use super::*;
    use crate::testing::FakeTools;

    fn parse(yaml: &str) -> Operation {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[cfg(unix)]
    fn mode_of(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o7777
    }

    #[test]
    fn parses_every_operation_type() {
        let kinds: Vec<&str> = [
            "type: mkdir\npath: data\n",
            "type: keygen\nprivate_key: k.pem\n",
            "type: random\noutput: token\n",
            "type: download\nurl: https://example.org/x\noutput: x\n",
            "type: delete\npath: old\n",
            "type: chown\npath: data\nuser: 1000\ngroup: 1000\n",
            "type: chmod\npath: data\nmode: \"0700\"\n",
        ]
        .iter()
        .map(|yaml| parse(yaml).kind())
        .collect();

        assert_eq!(kinds, vec!["mkdir", "keygen", "random", "download", "delete", "chown", "chmod"]);
    }

    #[test]
    fn defaults_favor_rerunnable_behavior() {
        let op = parse("type: random\noutput: token\n");
        assert_eq!(
            op,
            Operation::GenerateRandomSecret {
                output: "token".into(),
                bytes: 32,
                encoding: SecretEncoding::Base64,
                skip_if_exists: true,
                condition: None,
            }
        );
    }

    #[test]
    fn unknown_operation_type_is_rejected() {
        let result: Result<Operation, _> = serde_yaml::from_str("type: format_disk\npath: /\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(parse("type: keygen\nprivate_key: k\nbits: 128\n").validate().is_err());
        assert!(parse("type: random\noutput: t\nbytes: 0\n").validate().is_err());
        assert!(parse("type: download\nurl: ftp://x/y\noutput: y\n").validate().is_err());
        assert!(parse("type: download\nurl: not a url\noutput: y\n").validate().is_err());
        assert!(parse("type: mkdir\npath: data\n").validate().is_ok());
    }

    #[test]
    fn mkdir_is_idempotent_and_applies_mode() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let op = parse("type: mkdir\npath: data/nested\nmode: \"0750\"\n");

        assert_eq!(op.execute(&ctx).unwrap(), OperationOutcome::Applied);
        assert_eq!(op.execute(&ctx).unwrap(), OperationOutcome::Applied);

        tmp.child("data/nested").assert(predicates::path::is_dir());
        #[cfg(unix)]
        assert_eq!(mode_of(&tmp.path().join("data/nested")), 0o750);
    }

    #[test]
    fn random_secret_respects_skip_if_exists() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let path = tmp.path().join("secrets/token");

        let keep = parse("type: random\noutput: secrets/token\nskip_if_exists: true\n");
        keep.execute(&ctx).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert!(matches!(keep.execute(&ctx).unwrap(), OperationOutcome::Unchanged(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), first);

        let rotate = parse("type: random\noutput: secrets/token\nskip_if_exists: false\n");
        rotate.execute(&ctx).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), first);
        #[cfg(unix)]
        assert_eq!(mode_of(&path), 0o644);
    }

    #[test]
    fn keygen_writes_private_and_public_keys() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let op = parse("type: keygen\nprivate_key: keys/jwt.pem\npublic_key: keys/jwt.pub\n");

        op.execute(&ctx).unwrap();

        tmp.child("keys/jwt.pem").assert(predicates::path::is_file());
        tmp.child("keys/jwt.pub").assert(predicates::path::is_file());
        assert_eq!(tools.calls(), vec!["genrsa jwt.pem 2048", "pubout jwt.pub"]);
    }

    #[test]
    fn keygen_tool_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new().failing("genrsa");
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };

        let err = parse("type: keygen\nprivate_key: k.pem\n").execute(&ctx).unwrap_err();

        assert!(matches!(err, OperationError::Tool(_)));
    }

    #[test]
    fn download_skips_existing_output() {
        let tmp = TempDir::new().unwrap();
        tmp.child("GeoLite.mmdb").write_str("cached").unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };

        let op = parse("type: download\nurl: https://example.org/db\noutput: GeoLite.mmdb\n");

        assert!(matches!(op.execute(&ctx).unwrap(), OperationOutcome::Unchanged(_)));
        assert!(tools.calls().is_empty());
    }

    #[test]
    fn delete_removes_trees_and_tolerates_absence() {
        let tmp = TempDir::new().unwrap();
        tmp.child("cache/a/b").write_str("x").unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let op = parse("type: delete\npath: cache\n");

        assert_eq!(op.execute(&ctx).unwrap(), OperationOutcome::Applied);
        tmp.child("cache").assert(predicates::path::missing());
        assert!(matches!(op.execute(&ctx).unwrap(), OperationOutcome::Unchanged(_)));
    }

    #[test]
    fn chown_failure_is_only_a_warning() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new().failing("chown");
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };

        let outcome = parse("type: chown\npath: data\nuser: root\n").execute(&ctx).unwrap();

        assert!(matches!(outcome, OperationOutcome::Warned(_)));
    }

    #[test]
    fn chmod_failure_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };

        let result = parse("type: chmod\npath: missing\nmode: \"0600\"\n").execute(&ctx);

        assert!(matches!(result, Err(OperationError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn chmod_recursive_reaches_nested_entries() {
        let tmp = TempDir::new().unwrap();
        tmp.child("secrets/nested/key").write_str("k").unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };

        parse("type: chmod\npath: secrets\nmode: \"0700\"\nrecursive: true\n")
            .execute(&ctx)
            .unwrap();

        assert_eq!(mode_of(&tmp.path().join("secrets/nested/key")), 0o700);
    }

    #[cfg(unix)]
    #[test]
    fn chmod_recursive_without_search_bit_still_reaches_children_and_skips_symlinks() {
        use std::os::unix::fs::{PermissionsExt, symlink};

        let tmp = TempDir::new().unwrap();
        tmp.child("outside.txt").write_str("o").unwrap();
        tmp.child("secrets/nested/key").write_str("k").unwrap();
        let outside = tmp.path().join("outside.txt");
        fs::set_permissions(&outside, fs::Permissions::from_mode(0o644)).unwrap();
        symlink(&outside, tmp.path().join("secrets/link")).unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };

        parse("type: chmod\npath: secrets\nmode: \"0600\"\nrecursive: true\n")
            .execute(&ctx)
            .unwrap();

        assert_eq!(mode_of(&tmp.path().join("secrets")), 0o600);
        assert_eq!(mode_of(&outside), 0o644);
        for dir in ["secrets", "secrets/nested"] {
            fs::set_permissions(tmp.path().join(dir), fs::Permissions::from_mode(0o700)).unwrap();
        }
        assert_eq!(mode_of(&tmp.path().join("secrets/nested/key")), 0o600);
    }

    #[test]
    fn condition_gates_execution() {
        let tmp = TempDir::new().unwrap();
        let tools = FakeTools::new();
        let ctx = OperationContext { service_root: tmp.path(), tools: &tools };
        let op = parse(
            "type: mkdir\npath: seeded\ncondition:\n  type: file_exists\n  path: seed.sql\n",
        );

        assert!(!op.should_execute(&ctx));
        tmp.child("seed.sql").write_str("--").unwrap();
        assert!(op.should_execute(&ctx));
    }
}
