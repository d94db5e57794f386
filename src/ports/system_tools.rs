//! External capability port used by manifest operations.

use std::path::Path;

use crate::domain::scaffold::{SecretEncoding, ToolError};

/// Key generation, randomness, downloads and ownership changes.
pub trait SystemTools {
    /// Write an RSA private key of `bits` to `path`.
    fn generate_private_key(&self, path: &Path, bits: u32) -> Result<(), ToolError>;

    /// Derive the public key of `private_key` into `public_key`.
    fn derive_public_key(&self, private_key: &Path, public_key: &Path) -> Result<(), ToolError>;

    /// `num_bytes` of cryptographically random data, encoded.
    fn random_secret(&self, num_bytes: usize, encoding: SecretEncoding)
    -> Result<String, ToolError>;

    /// Fetch `url` into `output`, following redirects.
    fn download(&self, url: &str, output: &Path) -> Result<(), ToolError>;

    fn change_owner(
        &self,
        path: &Path,
        user: &str,
        group: Option<&str>,
        recursive: bool,
    ) -> Result<(), ToolError>;
}
