//! Bind-mount discovery in compose definitions.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::domain::{Environment, Layout, ServiceName};

/// Collect the raw host-side source of every bind mount in a compose file.
///
/// Named volumes and non-bind long-syntax entries are skipped.
pub fn bind_mount_sources(content: &str) -> Result<Vec<String>, serde_yaml::Error> {
    let document: Value = serde_yaml::from_str(content)?;
    let mut sources = Vec::new();

    let Some(services) = document.get("services").and_then(Value::as_mapping) else {
        return Ok(sources);
    };

    for definition in services.values() {
        let Some(volumes) = definition.get("volumes").and_then(Value::as_sequence) else {
            continue;
        };
        for volume in volumes {
            match volume {
                Value::String(short) => {
                    let source = split_short_syntax(short);
                    if looks_like_host_path(source) {
                        sources.push(source.to_string());
                    }
                }
                Value::Mapping(_) => {
                    let is_bind = volume.get("type").and_then(Value::as_str) == Some("bind");
                    if let (true, Some(source)) =
                        (is_bind, volume.get("source").and_then(Value::as_str))
                    {
                        sources.push(source.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    Ok(sources)
}

/// Resolve bind-mount sources to paths under the service's config directory.
///
/// `~` and variables are expanded against `env`; the result is anchored at
/// the base directory and normalised lexically.
pub fn config_mount_paths(
    sources: &[String],
    layout: &Layout,
    service: &ServiceName,
    env: &Environment,
) -> Vec<PathBuf> {
    let config_dir = layout.service_config_dir(service);
    let mut paths = BTreeSet::new();

    for source in sources {
        let expanded = shellexpand::tilde_with_context(source, || env.get("HOME"));
        let expanded = env.substitute(&expanded);
        if expanded.is_empty() {
            debug!(service = %service, source = %source, "skipping volume: empty source");
            continue;
        }

        let path = normalize(&layout.base_dir().join(expanded));
        if path.starts_with(&config_dir) {
            paths.insert(path);
        }
    }

    paths.into_iter().collect()
}

/// Host part of `source:target[:mode]`, ignoring colons inside `${...}`.
fn split_short_syntax(volume: &str) -> &str {
    let mut depth = 0usize;
    for (idx, c) in volume.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return &volume[..idx],
            _ => {}
        }
    }
    volume
}

fn looks_like_host_path(source: &str) -> bool {
    source.starts_with(['/', '.', '$', '~'])
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
