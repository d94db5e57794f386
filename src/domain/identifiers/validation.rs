/// Whether `name` can be used as a service name.
///
/// Names become file stems and directory names under the base directory, so
/// they are limited to ASCII letters, digits, `-`, `_` and `.`, and may not
/// start with `-` or `.` (which also rules out `.` and `..`).
pub fn is_valid_service_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(['-', '.'])
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(is_valid_service_name("valkey"));
        assert!(is_valid_service_name("node_exporter"));
        assert!(is_valid_service_name("home-assistant.v2"));
    }

    #[test]
    fn rejects_paths_flags_and_hidden_names() {
        for name in ["", ".", "..", ".env", "-rf", "a/b", "a\\b", "with space", "café"] {
            assert!(!is_valid_service_name(name), "{name:?} should be rejected");
        }
    }
}
