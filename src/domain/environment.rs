//! Snapshot of the variables available to template substitution.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

/// Variables captured once per invocation.
///
/// Rendering never reads the live process environment; everything flows
/// through this value so independent runs can coexist in one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

/// One `$NAME`, `${NAME}` or `${NAME:-default}` occurrence.
#[derive(Debug, PartialEq, Eq)]
struct Reference<'a> {
    name: &'a str,
    default: Option<&'a str>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self { vars: std::env::vars().collect() }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Shell-style substitution of `$VAR`, `${VAR}` and `${VAR:-default}`.
    ///
    /// Only `[A-Za-z_][A-Za-z0-9_]*` names are references; any other `$` text
    /// (`$1`, `$$`, a lone `$`) is kept. Unset variables expand to an empty
    /// string and `:-` also replaces an empty value.
    pub fn substitute(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut unset = BTreeSet::new();
        let mut rest = input;

        while let Some(idx) = rest.find('$') {
            output.push_str(&rest[..idx]);
            rest = &rest[idx..];
            match parse_reference(rest) {
                Some((reference, len)) => {
                    output.push_str(self.resolve(&reference, &mut unset));
                    rest = &rest[len..];
                }
                None => {
                    output.push('$');
                    rest = &rest[1..];
                }
            }
        }
        output.push_str(rest);

        for name in unset {
            warn!(variable = name, "variable is not set, substituting an empty string");
        }
        output
    }

    fn resolve<'a>(
        &'a self,
        reference: &Reference<'a>,
        unset: &mut BTreeSet<&'a str>,
    ) -> &'a str {
        let value = self.get(reference.name);
        match (value, reference.default) {
            (Some(value), None) => value,
            (Some(value), Some(_)) if !value.is_empty() => value,
            (_, Some(default)) => default,
            (None, None) => {
                unset.insert(reference.name);
                ""
            }
        }
    }
}

/// Parse the reference at the start of `text` (which begins with `$`),
/// returning it with the number of bytes it spans.
fn parse_reference(text: &str) -> Option<(Reference<'_>, usize)> {
    let body = &text[1..];
    match body.strip_prefix('{') {
        Some(braced) => {
            let close = braced.find('}')?;
            let inner = &braced[..close];
            let (name, default) = match inner.split_once(":-") {
                Some((name, default)) => (name, Some(default)),
                None => (inner, None),
            };
            (!name.is_empty() && identifier_len(name) == name.len())
                .then_some((Reference { name, default }, close + 3))
        }
        None => {
            let len = identifier_len(body);
            (len > 0).then(|| (Reference { name: &body[..len], default: None }, len + 1))
        }
    }
}

/// Length of the identifier prefix of `text`, 0 when there is none.
fn identifier_len(text: &str) -> usize {
    match text.chars().next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => text
            .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
            .unwrap_or(text.len()),
        _ => 0,
    }
}
