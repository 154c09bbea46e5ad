//! Translation dictionary input definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::types::Locale;

/// Directory names that group translation files without naming a namespace.
const COMMON_PARENTS: [&str; 6] = ["locales", "messages", "translations", "i18n", "lang", "langs"];

/// One node of a translation dictionary: a leaf string or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Text(String),
    Map(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    /// Converts a JSON value; numbers, booleans, arrays and null have no
    /// representation and yield `None`.
    fn from_json(value: &Value, path: &str, dropped: &mut Vec<String>) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Object(object) => {
                let mut map = BTreeMap::new();
                for (key, child) in object {
                    let child_path =
                        if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                    if let Some(node) = Self::from_json(child, &child_path, dropped) {
                        map.insert(key.clone(), node);
                    }
                }
                Some(Self::Map(map))
            }
            _ => {
                dropped.push(path.to_string());
                None
            }
        }
    }

    /// Returns the leaf text, or `None` for a mapping.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Map(_) => None,
        }
    }
}

/// A nested translation dictionary for one locale.
///
/// Immutable once built; shared read-only by every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    /// Top-level entries
    root: BTreeMap<String, TranslationNode>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from parsed JSON.
    ///
    /// A non-object root produces an empty dictionary. Values that are neither
    /// strings nor objects are dropped with a warning.
    #[must_use]
    pub fn from_json(json: &Value) -> Self {
        let mut dropped = Vec::new();
        let root = match TranslationNode::from_json(json, "", &mut dropped) {
            Some(TranslationNode::Map(root)) => root,
            Some(TranslationNode::Text(_)) | None => {
                tracing::warn!("Translation document root is not an object; ignoring it");
                return Self::default();
            }
        };

        if !dropped.is_empty() {
            tracing::warn!(keys = ?dropped, "Dropped non-string translation values");
        }

        Self { root }
    }

    /// Walks the dictionary one segment at a time.
    ///
    /// Returns `None` as soon as a segment is missing or the walk reaches a
    /// leaf with segments left over.
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&TranslationNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = segments.into_iter();
        let first = segments.next()?;
        let mut current = self.root.get(first)?;

        for segment in segments {
            current = match current {
                TranslationNode::Map(children) => children.get(segment)?,
                TranslationNode::Text(_) => return None,
            };
        }

        Some(current)
    }

    /// Deep-merges `other` into `self`; `other` wins on conflicting leaves.
    pub fn merge(&mut self, other: Self) {
        merge_maps(&mut self.root, other.root, "");
    }

    /// Merges `other` under the top-level key `namespace`.
    pub fn merge_namespace(&mut self, namespace: &str, other: Self) {
        let mut wrapper = BTreeMap::new();
        wrapper.insert(namespace.to_string(), TranslationNode::Map(other.root));
        merge_maps(&mut self.root, wrapper, "");
    }

    /// Flattens leaves into `separator`-joined keys.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use estate_i18n::input::translation::Dictionary;
    ///
    /// let dictionary = Dictionary::from_json(&json!({
    ///     "dashboard": { "admin": { "title": "Admin Panel" } }
    /// }));
    ///
    /// let flattened = dictionary.flatten(".");
    /// assert_eq!(flattened.get("dashboard.admin.title").map(String::as_str), Some("Admin Panel"));
    /// ```
    #[must_use]
    pub fn flatten(&self, separator: &str) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        flatten_map(&self.root, separator, None, &mut result);
        result
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Deep-merges `source` into `target`; `prefix` is only used for logging.
fn merge_maps(
    target: &mut BTreeMap<String, TranslationNode>,
    source: BTreeMap<String, TranslationNode>,
    prefix: &str,
) {
    for (key, incoming) in source {
        let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        match (target.get_mut(&key), incoming) {
            (Some(TranslationNode::Map(existing)), TranslationNode::Map(children)) => {
                merge_maps(existing, children, &path);
            }
            (Some(_), incoming) => {
                tracing::warn!(key = %path, "Conflicting translation entry; later file wins");
                target.insert(key, incoming);
            }
            (None, incoming) => {
                target.insert(key, incoming);
            }
        }
    }
}

/// Collects every leaf of `map` under its joined key.
fn flatten_map(
    map: &BTreeMap<String, TranslationNode>,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, String>,
) {
    for (key, node) in map {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        match node {
            TranslationNode::Text(text) => {
                result.insert(full_key, text.clone());
            }
            TranslationNode::Map(children) => {
                flatten_map(children, separator, Some(&full_key), result);
            }
        }
    }
}

/// Parses one path part as a locale tag (`en`, `fr`, `fr-FR`, `en_us`).
///
/// The part must look like a language code; `en-trans` is not one.
fn locale_from_path_part(part: &str) -> Option<Locale> {
    let (language, region) = part.split_once(['-', '_']).unwrap_or((part, ""));
    let region_ok = region.is_empty()
        || (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()))
        || (region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()));
    if language.len() != 2 || !region_ok {
        return None;
    }
    Locale::from_language_tag(language)
}

/// Detects the locale of a translation file from its path.
///
/// Splits the path on `/` and `.` and searches backwards for a supported
/// locale tag.
///
/// # Examples
/// - `locales/en.json` -> `en`
/// - `locales/fr-FR/common.json` -> `fr`
/// - `locales/ja.json` -> `None`
#[must_use]
pub fn detect_locale_from_path(file_path: &Path) -> Option<Locale> {
    let path_str = file_path.to_string_lossy();
    path_str.split(['/', '\\', '.']).rev().find_map(locale_from_path_part)
}

/// Detects the namespace of a translation file from its path.
///
/// Locale tags are never namespaces.
///
/// # Examples
/// - `locales/en/dashboard.json` -> `Some("dashboard")` (file name)
/// - `locales/dashboard/en.json` -> `Some("dashboard")` (directory name)
/// - `locales/en.json` -> `None`
#[must_use]
pub fn detect_namespace_from_path(file_path: &Path) -> Option<String> {
    let file_stem = file_path.file_stem()?.to_string_lossy().to_string();

    if locale_from_path_part(&file_stem).is_none() {
        return Some(file_stem);
    }

    let parent_name = file_path.parent()?.file_name()?.to_string_lossy().to_string();
    if locale_from_path_part(&parent_name).is_none()
        && !COMMON_PARENTS.contains(&parent_name.to_lowercase().as_str())
    {
        return Some(parent_name);
    }

    None
}
