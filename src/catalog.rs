//! Translation catalog and key resolution.
//!
//! A [`Catalog`] holds one [`Dictionary`] per locale. It is built once at
//! startup and then only read, so it is shared behind an `Arc` without locks.

mod interpolate;
mod plural;

use std::collections::{
    BTreeSet,
    HashMap,
};

pub use interpolate::{
    Params,
    interpolate,
};

use crate::input::translation::Dictionary;
use crate::types::Locale;

/// Per-locale translation dictionaries plus the key separator used to walk them.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// One merged dictionary per loaded locale
    dictionaries: HashMap<Locale, Dictionary>,
    /// Separator between key segments
    key_separator: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Catalog {
    #[must_use]
    pub fn new(key_separator: impl Into<String>) -> Self {
        Self { dictionaries: HashMap::new(), key_separator: key_separator.into() }
    }

    /// Adds a dictionary for `locale`, merging with what is already there.
    ///
    /// With a namespace the entries land under that top-level key.
    pub fn add(&mut self, locale: Locale, namespace: Option<&str>, dictionary: Dictionary) {
        let target = self.dictionaries.entry(locale).or_default();
        match namespace {
            Some(namespace) => target.merge_namespace(namespace, dictionary),
            None => target.merge(dictionary),
        }
    }

    /// Builder-style [`Self::add`] without a namespace.
    #[must_use]
    pub fn with(mut self, locale: Locale, dictionary: Dictionary) -> Self {
        self.add(locale, None, dictionary);
        self
    }

    #[must_use]
    pub fn key_separator(&self) -> &str {
        &self.key_separator
    }

    /// Locales that have a dictionary, in a stable order.
    #[must_use]
    pub fn locales(&self) -> Vec<Locale> {
        Locale::ALL.into_iter().filter(|locale| self.dictionaries.contains_key(locale)).collect()
    }

    /// Resolves `key` for `locale`.
    ///
    /// Returns the leaf string with `{{name}}` placeholders filled from
    /// `params`. A missing key, an empty leaf, or a key naming a nested
    /// mapping yields the key itself. There is no retry against `en` for a
    /// supported locale.
    #[must_use]
    pub fn resolve(&self, locale: Locale, key: &str, params: Option<&Params>) -> String {
        let Some(text) = self.lookup(locale, key) else {
            tracing::debug!(%locale, key, "Translation not found; falling back to key");
            return key.to_string();
        };

        match params {
            Some(params) if !params.is_empty() => interpolate(text, params),
            _ => text.to_string(),
        }
    }

    /// [`Self::resolve`] for an unchecked locale tag; unsupported or absent tags resolve as `en`.
    #[must_use]
    pub fn resolve_tag(&self, tag: Option<&str>, key: &str, params: Option<&Params>) -> String {
        self.resolve(Locale::normalize(tag), key, params)
    }

    /// Returns the non-empty leaf string at `key`, if any.
    #[must_use]
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let dictionary = self.dictionaries.get(&locale)?;
        dictionary
            .lookup(key.split(self.key_separator.as_str()))?
            .as_text()
            .filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn contains(&self, locale: Locale, key: &str) -> bool {
        self.lookup(locale, key).is_some()
    }

    /// All leaf keys of `locale`, sorted.
    #[must_use]
    pub fn keys(&self, locale: Locale) -> Vec<String> {
        self.dictionaries
            .get(&locale)
            .map(|dictionary| dictionary.flatten(&self.key_separator).into_keys().collect())
            .unwrap_or_default()
    }

    /// Keys defined for some other locale but absent from `locale`, sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let present: BTreeSet<String> = self.keys(locale).into_iter().collect();

        let mut missing = BTreeSet::new();
        for other in Locale::ALL.into_iter().filter(|other| *other != locale) {
            missing.extend(self.keys(other).into_iter().filter(|key| !present.contains(key)));
        }

        missing.into_iter().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[fixture]
    fn catalog() -> Catalog {
        Catalog::default()
            .with(
                Locale::En,
                Dictionary::from_json(&json!({
                    "dashboard": {
                        "admin": { "title": "Admin Panel" },
                        "partner": { "title": "Partner Space" }
                    },
                    "hero": { "greeting": "Hello {{name}}", "blank": "" },
                    "nav": { "buy": "Buy" }
                })),
            )
            .with(
                Locale::Fr,
                Dictionary::from_json(&json!({
                    "dashboard": { "admin": { "title": "Panneau d'administration" } },
                    "hero": { "greeting": "Bonjour {{name}}" },
                    "footer": { "legal": "Mentions légales" }
                })),
            )
    }

    #[rstest]
    #[case(Locale::En, "dashboard.admin.title", "Admin Panel")]
    #[case(Locale::En, "nav.buy", "Buy")]
    #[case(Locale::Fr, "dashboard.admin.title", "Panneau d'administration")]
    #[case(Locale::Fr, "footer.legal", "Mentions légales")]
    fn resolve_returns_leaf(
        catalog: Catalog,
        #[case] locale: Locale,
        #[case] key: &str,
        #[case] expected: &str,
    ) {
        assert_that!(catalog.resolve(locale, key, None), eq(expected));
    }

    #[rstest]
    #[case::missing_leaf(Locale::En, "dashboard.admin.subtitle")]
    #[case::missing_root(Locale::En, "footer.legal")]
    #[case::no_en_retry(Locale::Fr, "nav.buy")]
    #[case::nested_mapping(Locale::En, "dashboard.admin")]
    #[case::top_level_mapping(Locale::En, "dashboard")]
    #[case::past_leaf(Locale::En, "nav.buy.label")]
    #[case::empty_leaf(Locale::En, "hero.blank")]
    #[case::empty_key(Locale::En, "")]
    fn resolve_falls_back_to_key(catalog: Catalog, #[case] locale: Locale, #[case] key: &str) {
        assert_that!(catalog.resolve(locale, key, None), eq(key));
    }

    #[rstest]
    #[case::german(Some("de"))]
    #[case::empty(Some(""))]
    #[case::absent(None)]
    #[case::uppercase(Some("FR"))]
    fn resolve_tag_treats_unsupported_as_en(catalog: Catalog, #[case] tag: Option<&str>) {
        for key in ["dashboard.admin.title", "footer.legal", "hero.greeting"] {
            let expected = catalog.resolve(Locale::En, key, None);
            assert_that!(catalog.resolve_tag(tag, key, None), eq(&expected));
        }
    }

    #[rstest]
    fn resolve_interpolates_params(catalog: Catalog) {
        let params = Params::new().with("name", "Ama");

        assert_that!(catalog.resolve(Locale::En, "hero.greeting", Some(&params)), eq("Hello Ama"));
        assert_that!(catalog.resolve(Locale::Fr, "hero.greeting", Some(&params)), eq("Bonjour Ama"));
    }

    #[rstest]
    fn resolve_leaves_unknown_tokens(catalog: Catalog) {
        let params = Params::new().with("other", "x");

        assert_that!(
            catalog.resolve(Locale::En, "hero.greeting", Some(&params)),
            eq("Hello {{name}}")
        );
        assert_that!(
            catalog.resolve(Locale::En, "hero.greeting", Some(&Params::new())),
            eq("Hello {{name}}")
        );
        assert_that!(catalog.resolve(Locale::En, "hero.greeting", None), eq("Hello {{name}}"));
    }

    #[rstest]
    fn resolve_is_idempotent(catalog: Catalog) {
        let params = Params::new().with("name", "Ama");
        let keys_before = catalog.keys(Locale::En);

        let first = catalog.resolve(Locale::En, "hero.greeting", Some(&params));
        let second = catalog.resolve(Locale::En, "hero.greeting", Some(&params));

        assert_that!(first, eq(&second));
        assert_that!(catalog.keys(Locale::En), eq(&keys_before));
        assert_that!(catalog.resolve(Locale::En, "hero.greeting", None), eq("Hello {{name}}"));
    }

    #[googletest::test]
    fn resolve_without_dictionary_returns_key() {
        let catalog = Catalog::default();

        assert_that!(catalog.resolve(Locale::Fr, "nav.buy", None), eq("nav.buy"));
        assert_that!(catalog.keys(Locale::Fr), is_empty());
        assert_that!(catalog.locales(), is_empty());
    }

    #[googletest::test]
    fn resolve_with_custom_separator() {
        let catalog = Catalog::new("/")
            .with(Locale::En, Dictionary::from_json(&json!({"a": {"b.c": "dotted"}})));

        assert_that!(catalog.resolve(Locale::En, "a/b.c", None), eq("dotted"));
        assert_that!(catalog.resolve(Locale::En, "a.b.c", None), eq("a.b.c"));
        assert_that!(catalog.keys(Locale::En), elements_are![eq("a/b.c")]);
    }

    #[rstest]
    fn missing_keys_reports_other_locale_coverage(catalog: Catalog) {
        assert_that!(
            catalog.missing_keys(Locale::Fr),
            elements_are![eq("dashboard.partner.title"), eq("hero.blank"), eq("nav.buy")]
        );
        assert_that!(catalog.missing_keys(Locale::En), elements_are![eq("footer.legal")]);
    }

    #[rstest]
    fn add_with_namespace(mut catalog: Catalog) {
        catalog.add(
            Locale::En,
            Some("sponsor"),
            Dictionary::from_json(&json!({"title": "Become a sponsor"})),
        );

        assert_that!(catalog.resolve(Locale::En, "sponsor.title", None), eq("Become a sponsor"));
        assert_that!(catalog.contains(Locale::En, "dashboard.admin.title"), eq(true));
        assert_eq!(catalog.locales(), vec![Locale::En, Locale::Fr]);
    }
}
