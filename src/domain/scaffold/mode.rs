//! Octal permission modes as written in manifests.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Unix permission bits.
///
/// Accepts `"0755"`, `"755"`, `"0o755"` or a bare integer whose decimal digits
/// are read as octal (`755`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode(u32);

impl FileMode {
    pub const DIRECTORY_DEFAULT: FileMode = FileMode(0o755);
    pub const GENERATED_FILE: FileMode = FileMode(0o644);

    pub fn new(bits: u32) -> Option<Self> {
        (bits <= 0o7777).then_some(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text.strip_prefix("0o").unwrap_or(text);
        if digits.is_empty() {
            return None;
        }
        u32::from_str_radix(digits, 8).ok().and_then(Self::new)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl<'de> Deserialize<'de> for FileMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModeVisitor;

        impl Visitor<'_> for ModeVisitor {
            type Value = FileMode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an octal permission mode such as \"0755\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<FileMode, E> {
                FileMode::parse(value)
                    .ok_or_else(|| E::custom(format!("invalid permission mode '{}'", value)))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<FileMode, E> {
                self.visit_str(&value.to_string())
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<FileMode, E> {
                self.visit_str(&value.to_string())
            }
        }

        deserializer.deserialize_any(ModeVisitor)
    }
}
