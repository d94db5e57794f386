//! Single-attempt HTTP download.

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;

use crate::domain::scaffold::ToolError;

const TOOL: &str = "download";

/// Fetch `url` and write the body to `output`.
///
/// Redirects are followed; non-2xx responses are errors and leave `output`
/// untouched.
pub(super) fn download(client: &Client, url: &str, output: &Path) -> Result<(), ToolError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| ToolError::new(TOOL, format!("request to {} failed: {}", url, e)))?;

    let response = response
        .error_for_status()
        .map_err(|e| ToolError::new(TOOL, format!("{} returned an error: {}", url, e)))?;

    let body = response
        .bytes()
        .map_err(|e| ToolError::new(TOOL, format!("reading {} failed: {}", url, e)))?;

    fs::write(output, &body)
        .map_err(|e| ToolError::new(TOOL, format!("writing {} failed: {}", output.display(), e)))
}
