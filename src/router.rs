//! Locale routing: the active locale lives in the first URL path segment.

pub mod bridge;
pub mod history;
pub mod location;
pub mod transition;

pub use bridge::{
    LocaleRouter,
    LocaleSwitch,
};
pub use history::{
    History,
    MemoryHistory,
    NavigateOptions,
};
pub use location::{
    Location,
    rewrite_locale_prefix,
};
pub use transition::Transition;
