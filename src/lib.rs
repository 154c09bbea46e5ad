//! estate-i18n
//!
//! Translation resolution and URL-driven locale routing for an English/French
//! real-estate site.
//!
//! ```
//! use estate_i18n::catalog::{Catalog, Params};
//! use estate_i18n::input::translation::Dictionary;
//! use estate_i18n::types::Locale;
//!
//! let fr = Dictionary::from_json(&serde_json::json!({
//!     "hero": { "greeting": "Bonjour {{name}}" }
//! }));
//! let catalog = Catalog::default().with(Locale::Fr, fr);
//!
//! let params = Params::new().with("name", "Ama");
//! assert_eq!(catalog.resolve(Locale::Fr, "hero.greeting", Some(&params)), "Bonjour Ama");
//! assert_eq!(catalog.resolve(Locale::Fr, "nav.sell", None), "nav.sell");
//! ```

pub mod catalog;
pub mod config;
pub mod indexer;
pub mod input;
pub mod notify;
pub mod router;
pub mod server;
pub mod types;

pub use catalog::Catalog;
pub use router::LocaleRouter;
pub use server::Session;
pub use types::Locale;
