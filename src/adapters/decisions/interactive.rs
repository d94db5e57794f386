use std::io::{ErrorKind, IsTerminal};

use dialoguer::{Confirm, Error as DialoguerError, Select};
use tracing::{debug, warn};

use crate::ports::DecisionSource;

/// Terminal prompts.
///
/// Without a terminal on stdin, or when reading an answer fails, the default
/// is used so scripted runs never block.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveDecisions;

impl InteractiveDecisions {
    fn has_terminal() -> bool {
        std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
    }
}

impl DecisionSource for InteractiveDecisions {
    fn confirm(&self, prompt: &str, default: bool) -> bool {
        if !Self::has_terminal() {
            debug!(prompt, default, "no terminal; using default answer");
            return default;
        }

        match Confirm::new().with_prompt(prompt).default(default).interact_opt() {
            Ok(Some(answer)) => answer,
            Ok(None) => default,
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => default,
            Err(err) => {
                warn!(prompt, "prompt failed, using default: {}", err);
                default
            }
        }
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> usize {
        if !Self::has_terminal() || items.is_empty() {
            debug!(prompt, default, "no terminal; using default selection");
            return default;
        }

        match Select::new().with_prompt(prompt).items(items).default(default).interact_opt() {
            Ok(Some(index)) => index,
            Ok(None) => default,
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => default,
            Err(err) => {
                warn!(prompt, "prompt failed, using default: {}", err);
                default
            }
        }
    }
}
