//! Ordered string map for headers, query data and body data.
//!
//! # Design
//! Entries keep first-insertion order; overwriting a key keeps its position
//! and replaces the value (last-writer-wins). Merging layers one map over
//! another with the override winning on key collision, which is how
//! call-level data is applied over configuration-level defaults.

use crate::error::Error;

/// An ordered string-to-string mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    /// Check a field name before it enters a map: non-empty, no ASCII
    /// control characters. The error message quotes the offending value and
    /// the caller's map is left untouched.
    pub(crate) fn validate_name(name: &str, what: &str) -> Result<(), Error> {
        if name.is_empty() || name.chars().any(|c| c.is_ascii_control()) {
            return Err(Error::InvalidArgument(format!(
                "the argument {name:?} is not a valid {what} name"
            )));
        }
        Ok(())
    }

    /// Insert `name`, or overwrite its value in place if already present.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Remove `name`; no-op when absent.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Layer `overrides` over `base`: base entries keep their positions,
    /// override entries win on key collision.
    pub fn merged(base: &Params, overrides: &Params) -> Params {
        let mut merged = base.clone();
        for (name, value) in overrides.iter() {
            merged.set(name, value);
        }
        merged
    }
}
