//! Decision source port definition.

/// Answers the yes/no and pick-one questions asked while enabling services.
///
/// Implementations must fall back to `default` rather than fail when no
/// answer can be obtained.
pub trait DecisionSource {
    fn confirm(&self, prompt: &str, default: bool) -> bool;

    /// Index into `items`.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> usize;
}
