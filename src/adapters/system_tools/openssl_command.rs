//! `openssl` invocations for key pairs and random secrets.

use std::path::Path;

use crate::domain::scaffold::{SecretEncoding, ToolError};

use super::{run, tool_command};

const OPENSSL: &str = "openssl";

pub(super) fn generate_private_key(path: &Path, bits: u32) -> Result<(), ToolError> {
    let mut command = tool_command(OPENSSL)?;
    command.arg("genrsa").arg("-out").arg(path).arg(bits.to_string());
    run(OPENSSL, &mut command).map(|_| ())
}

pub(super) fn derive_public_key(private_key: &Path, public_key: &Path) -> Result<(), ToolError> {
    let mut command = tool_command(OPENSSL)?;
    command.arg("rsa").arg("-in").arg(private_key).arg("-pubout").arg("-out").arg(public_key);
    run(OPENSSL, &mut command).map(|_| ())
}

pub(super) fn random_secret(
    num_bytes: usize,
    encoding: SecretEncoding,
) -> Result<String, ToolError> {
    let flag = match encoding {
        SecretEncoding::Base64 => "-base64",
        SecretEncoding::Hex => "-hex",
    };
    let mut command = tool_command(OPENSSL)?;
    command.arg("rand").arg(flag).arg(num_bytes.to_string());
    let stdout = run(OPENSSL, &mut command)?;

    // base64 output wraps at 64 columns
    let secret: String =
        String::from_utf8_lossy(&stdout).chars().filter(|c| !c.is_whitespace()).collect();
    if secret.is_empty() {
        return Err(ToolError::new(OPENSSL, "rand produced no output"));
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use assert_fs::TempDir;

    use super::*;

    fn openssl_available() -> bool {
        which::which(OPENSSL).is_ok()
    }

    #[test]
    fn hex_secret_has_two_chars_per_byte() {
        if !openssl_available() {
            return;
        }
        let secret = random_secret(16, SecretEncoding::Hex).unwrap();
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn long_base64_secret_is_single_line() {
        if !openssl_available() {
            return;
        }
        let secret = random_secret(96, SecretEncoding::Base64).unwrap();
        assert_eq!(secret.len(), 128);
        assert!(!secret.contains('\n'));
    }

    #[test]
    fn generates_key_pair() {
        if !openssl_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let private_key = tmp.path().join("key.pem");
        let public_key = tmp.path().join("key.pub");

        generate_private_key(&private_key, 2048).unwrap();
        derive_public_key(&private_key, &public_key).unwrap();

        assert!(fs::read_to_string(&public_key).unwrap().contains("BEGIN PUBLIC KEY"));
    }
}
