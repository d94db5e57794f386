use tracing::debug;

use crate::ports::DecisionSource;

/// Answers every question with its default. Used for `--non-interactive`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDecisions;

impl DecisionSource for DefaultDecisions {
    fn confirm(&self, prompt: &str, default: bool) -> bool {
        debug!(prompt, default, "non-interactive confirm");
        default
    }

    fn select(&self, prompt: &str, _items: &[String], default: usize) -> usize {
        debug!(prompt, default, "non-interactive select");
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_defaults() {
        let decisions = DefaultDecisions;
        assert!(decisions.confirm("Include redis?", true));
        assert!(!decisions.confirm("Include redis?", false));
        assert_eq!(decisions.select("Pick", &["a".into(), "b".into()], 1), 1);
    }
}
