//! Count-driven plural key selection (`key_one` / `key_other`).

use super::{
    Catalog,
    Params,
};
use crate::types::Locale;

/// Name of the parameter injected with the count.
const COUNT_PARAM: &str = "count";

impl Catalog {
    /// Resolves the plural variant of `key` for `count`.
    ///
    /// Picks `{key}_one` or `{key}_other` by the locale's cardinal rule and
    /// exposes `count` as `{{count}}`. When the variant is missing the plain
    /// key is resolved instead, with the usual literal-key fallback.
    #[must_use]
    pub fn resolve_count(
        &self,
        locale: Locale,
        key: &str,
        count: u64,
        params: Option<&Params>,
    ) -> String {
        let mut params = params.cloned().unwrap_or_default();
        params.insert(COUNT_PARAM, count);

        let variant = plural_key(locale, key, count);
        if self.contains(locale, &variant) {
            return self.resolve(locale, &variant, Some(&params));
        }

        tracing::debug!(%locale, key, %variant, "Plural variant not found; using base key");
        self.resolve(locale, key, Some(&params))
    }
}

/// Appends the plural suffix for `count` in `locale` to `key`.
#[must_use]
pub(crate) fn plural_key(locale: Locale, key: &str, count: u64) -> String {
    format!("{key}{}", locale.plural_category(count).suffix())
}
