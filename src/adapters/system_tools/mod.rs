//! Host implementation of `SystemTools`.
//!
//! Key material and randomness come from the `openssl` binary, ownership
//! changes from `chown`, downloads from a blocking HTTP client.

mod chown_command;
mod http_download;
mod openssl_command;

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::AppError;
use crate::domain::scaffold::{SecretEncoding, ToolError};
use crate::ports::SystemTools;

const DOWNLOAD_TIMEOUT_SECS: u64 = 300;

/// External tools available on the host.
#[derive(Debug, Clone)]
pub struct HostTools {
    client: Client,
}

impl HostTools {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .user_agent(concat!("homelab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl SystemTools for HostTools {
    fn generate_private_key(&self, path: &Path, bits: u32) -> Result<(), ToolError> {
        openssl_command::generate_private_key(path, bits)
    }

    fn derive_public_key(&self, private_key: &Path, public_key: &Path) -> Result<(), ToolError> {
        openssl_command::derive_public_key(private_key, public_key)
    }

    fn random_secret(
        &self,
        num_bytes: usize,
        encoding: SecretEncoding,
    ) -> Result<String, ToolError> {
        openssl_command::random_secret(num_bytes, encoding)
    }

    fn download(&self, url: &str, output: &Path) -> Result<(), ToolError> {
        http_download::download(&self.client, url, output)
    }

    fn change_owner(
        &self,
        path: &Path,
        user: &str,
        group: Option<&str>,
        recursive: bool,
    ) -> Result<(), ToolError> {
        chown_command::change_owner(path, user, group, recursive)
    }
}

/// Locate `tool` in PATH.
fn tool_command(tool: &str) -> Result<Command, ToolError> {
    let binary = which::which(tool)
        .map_err(|_| ToolError::new(tool, format!("'{}' was not found in PATH", tool)))?;
    Ok(Command::new(binary))
}

/// Run a prepared command, returning stdout or the trimmed stderr as a `ToolError`.
fn run(tool: &str, command: &mut Command) -> Result<Vec<u8>, ToolError> {
    let output = command.output().map_err(|e| ToolError::new(tool, e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ToolError::new(
            tool,
            if stderr.is_empty() { format!("exited with {}", output.status) } else { stderr },
        ));
    }

    Ok(output.stdout)
}
