//! Core types used throughout the project.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// A supported locale.
///
/// Every locale-consuming entry point normalizes unknown tags to [`Locale::En`],
/// so this enum is the only place the supported set is spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Self; 2] = [Self::En, Self::Fr];

    /// The fallback locale.
    pub const DEFAULT: Self = Self::En;

    /// Two-letter tag used in URL prefixes and dictionary file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Strict parse: only the exact tags `en` and `fr` match.
    ///
    /// Used for URL segments, where `/EN/` or `/fr-FR/` are not locale prefixes.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Lenient parse for file names and configuration values.
    ///
    /// Accepts case variants and regional forms (`fr-FR`, `en_US`).
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        Self::parse(&language.to_ascii_lowercase())
    }

    /// Normalizes any caller-supplied locale value; unknown or absent values become `en`.
    #[must_use]
    pub fn normalize(tag: Option<&str>) -> Self {
        tag.and_then(Self::parse).unwrap_or(Self::DEFAULT)
    }

    /// Cardinal plural category for `count`.
    ///
    /// French treats 0 and 1 as singular, English only 1.
    #[must_use]
    pub const fn plural_category(self, count: u64) -> PluralCategory {
        match (self, count) {
            (Self::En, 1) | (Self::Fr, 0 | 1) => PluralCategory::One,
            _ => PluralCategory::Other,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cardinal plural categories used by the supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    One,
    Other,
}

impl PluralCategory {
    /// Key suffix for this category (`_one`, `_other`).
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::One => "_one",
            Self::Other => "_other",
        }
    }
}
