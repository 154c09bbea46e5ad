//! `{{name}}` placeholder substitution.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize,
};

/// Interpolation parameters: placeholder name to substitution text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.0.insert(name.into(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Replaces every `{{name}}` in `template` whose name is in `params`.
///
/// Single pass: substituted values are never re-scanned, and unknown or
/// unterminated placeholders are copied verbatim.
#[must_use]
pub fn interpolate(template: &str, params: &Params) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((before, after_open)) = rest.split_once("{{") {
        output.push_str(before);

        match after_open.split_once("}}") {
            Some((name, after_close)) if !name.contains("{{") => {
                if let Some(value) = params.get(name) {
                    output.push_str(value);
                } else {
                    output.push_str("{{");
                    output.push_str(name);
                    output.push_str("}}");
                }
                rest = after_close;
            }
            // Unterminated, or another `{{` opens before the close: keep this
            // brace pair and rescan from just after it.
            _ => {
                output.push_str("{{");
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}
