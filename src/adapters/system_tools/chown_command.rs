//! `chown` invocation.

use std::path::Path;

use crate::domain::scaffold::ToolError;

use super::{run, tool_command};

const CHOWN: &str = "chown";

/// `user[:group]` owner spec as `chown` expects it.
fn owner_spec(user: &str, group: Option<&str>) -> String {
    match group {
        Some(group) => format!("{}:{}", user, group),
        None => user.to_string(),
    }
}

pub(super) fn change_owner(
    path: &Path,
    user: &str,
    group: Option<&str>,
    recursive: bool,
) -> Result<(), ToolError> {
    let mut command = tool_command(CHOWN)?;
    if recursive {
        command.arg("-R");
    }
    command.arg(owner_spec(user, group)).arg(path);
    run(CHOWN, &mut command).map(|_| ())
}
