//! URL location split into path, query and hash.

use std::fmt;

use crate::types::Locale;

/// A site-relative URL: `/{path}?{query}#{hash}`.
///
/// Query and hash are kept verbatim (without their `?` / `#` markers) so a
/// rewrite of the path never alters them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// Path component
    path: String,
    /// Query string without the leading `?`
    query: Option<String>,
    /// Fragment without the leading `#`
    hash: Option<String>,
}

impl Location {
    /// Splits a site-relative URL. An empty path becomes `/`.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (url, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        let path = if path.is_empty() { "/".to_string() } else { path.to_string() };

        Self { path, query, hash }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Same query and hash, new path.
    #[must_use]
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self { path: path.into(), query: self.query.clone(), hash: self.hash.clone() }
    }

    /// Locale named by the first non-empty path segment, if it is exactly `en` or `fr`.
    #[must_use]
    pub fn locale_prefix(&self) -> Option<Locale> {
        self.path.split('/').find(|segment| !segment.is_empty()).and_then(Locale::parse)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(hash) = &self.hash {
            write!(f, "#{hash}")?;
        }
        Ok(())
    }
}

impl From<&str> for Location {
    fn from(url: &str) -> Self {
        Self::parse(url)
    }
}

/// Replaces a leading `/{from}` segment of `path` with `/{to}`.
///
/// Only a whole first segment counts: `/energy` is not prefixed by `en`.
/// A path without that prefix comes back unchanged.
#[must_use]
pub fn rewrite_locale_prefix(path: &str, from: Locale, to: Locale) -> String {
    let rest = path.trim_start_matches('/');
    let (segment, tail) = match rest.split_once('/') {
        Some((segment, tail)) => (segment, Some(tail)),
        None => (rest, None),
    };
    if segment != from.as_str() {
        return path.to_string();
    }

    match tail {
        Some(tail) => format!("/{to}/{tail}"),
        None => format!("/{to}"),
    }
}
