//! Locale derived from, and switched through, the URL.

use super::history::{
    History,
    NavigateOptions,
};
use super::location::{
    Location,
    rewrite_locale_prefix,
};
use super::transition::Transition;
use crate::types::Locale;

/// A locale switch waiting on the transition lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSwitch {
    pub to: Locale,
}

/// Reads the active locale from the URL and rewrites the URL to change it.
///
/// The locale is never stored: every read derives it from the first path
/// segment of the current location, so it cannot drift from the visible URL.
#[derive(Debug, Clone)]
pub struct LocaleRouter<H> {
    /// Source of the current URL
    history: H,
    /// Locale for paths without a locale prefix
    default_locale: Locale,
    /// Single-slot lane for the queued switch
    transition: Transition<LocaleSwitch>,
}

impl<H: History> LocaleRouter<H> {
    /// Router whose unprefixed paths resolve to `en`.
    #[must_use]
    pub fn new(history: H) -> Self {
        Self::with_default_locale(history, Locale::DEFAULT)
    }

    #[must_use]
    pub fn with_default_locale(history: H, default_locale: Locale) -> Self {
        Self { history, default_locale, transition: Transition::new() }
    }

    /// Locale of the current URL: the first path segment when it is exactly
    /// `en` or `fr`, else the default locale.
    #[must_use]
    pub fn active_locale(&self) -> Locale {
        self.history.location().locale_prefix().unwrap_or(self.default_locale)
    }

    /// True while a switch is queued and not yet applied.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.transition.is_pending()
    }

    /// Queues a switch to `locale` on the transition lane.
    ///
    /// No-op when `locale` is already active or another switch is pending.
    /// Nothing changes until [`Self::run_pending`] applies it.
    pub fn set_locale(&mut self, locale: Locale) {
        let active = self.active_locale();
        if locale == active {
            tracing::debug!(%locale, "Locale already active; ignoring switch");
            return;
        }

        if self.transition.start(LocaleSwitch { to: locale }) {
            tracing::debug!(from = %active, to = %locale, "Locale switch queued");
        } else {
            tracing::debug!(to = %locale, "Locale switch already pending; ignoring");
        }
    }

    /// Applies the queued switch, if any. Returns whether the URL was updated.
    ///
    /// A leading `/{active}` segment becomes `/{target}`; query and hash
    /// are carried over and the entry is replaced in place, keeping scroll
    /// position. The rewrite uses the URL as it is now, so a navigation that
    /// happened while the switch waited is not undone.
    pub fn run_pending(&mut self) -> bool {
        let Some(switch) = self.transition.take() else {
            return false;
        };

        let active = self.active_locale();
        if active == switch.to {
            tracing::debug!(locale = %active, "Locale reached before switch ran; dropping it");
            return false;
        }

        let location = self.history.location();
        let next = location.with_path(rewrite_locale_prefix(location.path(), active, switch.to));
        tracing::info!(from = %active, to = %switch.to, url = %next, "Locale switched");
        self.history.replace(next, NavigateOptions::IN_PLACE);
        true
    }

    /// Regular navigation to `location` (new entry, scroll to top).
    pub fn navigate(&mut self, location: Location) {
        tracing::debug!(url = %location, "Navigating");
        self.history.push(location, NavigateOptions::NAVIGATE);
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        self.history.location()
    }

    #[must_use]
    pub const fn history(&self) -> &H {
        &self.history
    }

    pub const fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}
