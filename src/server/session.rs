//! Per-connection state: the shared catalog, one router, one toast registry.

use std::sync::Arc;

use super::protocol::{
    Request,
    Response,
    params_from_wire,
};
use crate::catalog::Catalog;
use crate::notify::{
    Toast,
    ToastDispatcher,
};
use crate::router::{
    LocaleRouter,
    Location,
    MemoryHistory,
};
use crate::types::Locale;

/// Request handler for one client.
#[derive(Debug)]
pub struct Session {
    /// Translations shared across sessions
    catalog: Arc<Catalog>,
    /// Current URL and the pending locale switch
    router: LocaleRouter<MemoryHistory>,
    /// Toast subscribers for this client
    toasts: ToastDispatcher,
}

impl Session {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, default_locale: Locale, initial: Location) -> Self {
        Self {
            catalog,
            router: LocaleRouter::with_default_locale(MemoryHistory::new(initial), default_locale),
            toasts: ToastDispatcher::new(),
        }
    }

    #[must_use]
    pub const fn toasts(&self) -> &ToastDispatcher {
        &self.toasts
    }

    #[must_use]
    pub const fn router(&self) -> &LocaleRouter<MemoryHistory> {
        &self.router
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.router.is_pending()
    }

    /// Runs the queued locale switch, if any.
    pub fn run_transition(&mut self) -> bool {
        self.router.run_pending()
    }

    /// Parses and handles one request line; malformed input becomes an error response.
    pub fn handle_line(&mut self, line: &str) -> Response {
        match Request::parse(line) {
            Ok(request) => self.handle(request),
            Err(error) => {
                tracing::warn!(%error, "Rejected request line");
                Response::Error { error: error.to_string() }
            }
        }
    }

    pub fn handle(&mut self, request: Request) -> Response {
        tracing::debug!(?request, "Handling request");

        match request {
            Request::Resolve { key, locale, params } => {
                let params = params.map(params_from_wire);
                let text = match locale {
                    Some(tag) => self.catalog.resolve_tag(Some(&tag), &key, params.as_ref()),
                    None => self.catalog.resolve(self.router.active_locale(), &key, params.as_ref()),
                };
                Response::Text { text }
            }
            Request::ResolveCount { key, count, locale, params } => {
                let locale = self.locale_or_active(locale.as_deref());
                let params = params.map(params_from_wire);
                Response::Text {
                    text: self.catalog.resolve_count(locale, &key, count, params.as_ref()),
                }
            }
            Request::ActiveLocale => Response::ActiveLocale {
                locale: self.router.active_locale(),
                pending: self.router.is_pending(),
            },
            Request::Navigate { url } => {
                self.router.navigate(Location::parse(&url));
                Response::Navigated {
                    url: self.router.location().to_string(),
                    locale: self.router.active_locale(),
                }
            }
            Request::SetLocale { locale } => {
                self.router.set_locale(locale);
                Response::Pending { pending: self.router.is_pending() }
            }
            Request::Scroll { y } => {
                self.router.history_mut().set_scroll_y(y);
                self.location_response()
            }
            Request::Location => self.location_response(),
            Request::MissingKeys { locale } => {
                let locale = self.locale_or_active(locale.as_deref());
                Response::Keys { keys: self.catalog.missing_keys(locale) }
            }
            Request::Toast { level, key, params } => {
                let params = params.map(params_from_wire);
                let message = self.catalog.resolve(self.router.active_locale(), &key, params.as_ref());
                let delivered = self.toasts.dispatch(&Toast::new(level, message));
                Response::Delivered { delivered }
            }
        }
    }

    /// An explicit tag is normalized (unsupported -> `en`); none means the URL's locale.
    fn locale_or_active(&self, tag: Option<&str>) -> Locale {
        tag.map_or_else(|| self.router.active_locale(), |tag| Locale::normalize(Some(tag)))
    }

    /// Current URL and scroll offset.
    fn location_response(&self) -> Response {
        Response::Location {
            url: self.router.location().to_string(),
            scroll_y: self.router.history().scroll_y(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::input::translation::Dictionary;

    #[fixture]
    fn session() -> Session {
        let catalog = Catalog::default()
            .with(
                Locale::En,
                Dictionary::from_json(&json!({
                    "nav": { "buy": "Buy" },
                    "hero": { "greeting": "Hello {{name}}" },
                    "toast": { "saved": "Saved {{what}}" }
                })),
            )
            .with(
                Locale::Fr,
                Dictionary::from_json(&json!({
                    "nav": { "buy": "Acheter" },
                    "toast": { "saved": "{{what}} enregistré" }
                })),
            );
        Session::new(Arc::new(catalog), Locale::En, Location::parse("/en/buy?type=villa#section2"))
    }

    #[rstest]
    fn resolve_uses_active_locale_by_default(mut session: Session) {
        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"nav.buy"}"#),
            Response::Text { text: "Buy".to_string() }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"nav.buy","locale":"fr"}"#),
            Response::Text { text: "Acheter".to_string() }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"nav.buy","locale":"de"}"#),
            Response::Text { text: "Buy".to_string() }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"nav.buy","locale":""}"#),
            Response::Text { text: "Buy".to_string() }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"hero.greeting","params":{"name":"Ama"}}"#),
            Response::Text { text: "Hello Ama".to_string() }
        );
    }

    #[rstest]
    fn unsupported_locale_tag_resolves_as_english_on_french_page(mut session: Session) {
        session.handle_line(r#"{"op":"navigate","url":"/fr/buy"}"#);

        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"nav.buy"}"#),
            Response::Text { text: "Acheter".to_string() }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"nav.buy","locale":"de"}"#),
            Response::Text { text: "Buy".to_string() }
        );
    }

    #[rstest]
    fn set_locale_is_deferred_until_transition_runs(mut session: Session) {
        session.handle_line(r#"{"op":"scroll","y":300}"#);

        assert_eq!(
            session.handle_line(r#"{"op":"setLocale","locale":"fr"}"#),
            Response::Pending { pending: true }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"activeLocale"}"#),
            Response::ActiveLocale { locale: Locale::En, pending: true }
        );

        assert_that!(session.run_transition(), eq(true));

        assert_eq!(
            session.handle_line(r#"{"op":"location"}"#),
            Response::Location { url: "/fr/buy?type=villa#section2".to_string(), scroll_y: 300 }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"resolve","key":"nav.buy"}"#),
            Response::Text { text: "Acheter".to_string() }
        );
    }

    #[rstest]
    fn set_locale_to_current_stays_idle(mut session: Session) {
        assert_eq!(
            session.handle_line(r#"{"op":"setLocale","locale":"en"}"#),
            Response::Pending { pending: false }
        );
        assert_that!(session.router().history().updates(), eq(0));
    }

    #[rstest]
    fn navigate_scrolls_to_top(mut session: Session) {
        session.handle_line(r#"{"op":"scroll","y":300}"#);

        assert_eq!(
            session.handle_line(r#"{"op":"navigate","url":"/fr/dashboard/admin"}"#),
            Response::Navigated { url: "/fr/dashboard/admin".to_string(), locale: Locale::Fr }
        );
        assert_that!(session.router().history().scroll_y(), eq(0));
    }

    #[rstest]
    fn missing_keys_defaults_to_active_locale(mut session: Session) {
        session.handle_line(r#"{"op":"navigate","url":"/fr"}"#);

        assert_eq!(
            session.handle_line(r#"{"op":"missingKeys"}"#),
            Response::Keys { keys: vec!["hero.greeting".to_string()] }
        );
        assert_eq!(
            session.handle_line(r#"{"op":"missingKeys","locale":"en"}"#),
            Response::Keys { keys: vec![] }
        );
    }

    #[rstest]
    fn toast_resolves_in_active_locale(mut session: Session) {
        let received = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let _subscription = session.toasts().subscribe(move |toast: &Toast| {
            sink.lock().unwrap().push(toast.message.clone());
        });
        session.handle_line(r#"{"op":"navigate","url":"/fr/buy"}"#);

        let response = session.handle_line(
            r#"{"op":"toast","level":"success","key":"toast.saved","params":{"what":"Annonce"}}"#,
        );

        assert_eq!(response, Response::Delivered { delivered: 1 });
        assert_eq!(*received.lock().unwrap(), vec!["Annonce enregistré".to_string()]);
    }

    #[rstest]
    fn malformed_line_yields_error(mut session: Session) {
        let response = session.handle_line("{not json");

        assert!(matches!(response, Response::Error { ref error } if error.starts_with("Invalid request")));
    }
}
