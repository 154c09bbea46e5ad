//! JSON-lines wire types.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::Params;
use crate::notify::{
    Toast,
    ToastLevel,
};
use crate::types::Locale;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Interpolation parameters as sent by clients; non-string values are rendered as JSON text.
pub type WireParams = BTreeMap<String, Value>;

/// One request line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    Resolve {
        key: String,
        /// Unchecked tag; absent means the active locale.
        #[serde(default)]
        locale: Option<String>,
        #[serde(default)]
        params: Option<WireParams>,
    },
    ResolveCount {
        key: String,
        count: u64,
        #[serde(default)]
        locale: Option<String>,
        #[serde(default)]
        params: Option<WireParams>,
    },
    ActiveLocale,
    Navigate {
        url: String,
    },
    SetLocale {
        locale: Locale,
    },
    Scroll {
        y: u32,
    },
    Location,
    MissingKeys {
        #[serde(default)]
        locale: Option<String>,
    },
    Toast {
        level: ToastLevel,
        key: String,
        #[serde(default)]
        params: Option<WireParams>,
    },
}

impl Request {
    /// Parses one request line.
    ///
    /// # Errors
    /// The line is not a valid request object.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Converts wire parameters into interpolation parameters.
#[must_use]
pub fn params_from_wire(params: WireParams) -> Params {
    params
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(text) => (name, text),
            other => (name, other.to_string()),
        })
        .collect()
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Text {
        text: String,
    },
    ActiveLocale {
        locale: Locale,
        pending: bool,
    },
    Navigated {
        url: String,
        locale: Locale,
    },
    Pending {
        pending: bool,
    },
    Location {
        url: String,
        #[serde(rename = "scrollY")]
        scroll_y: u32,
    },
    Keys {
        keys: Vec<String>,
    },
    Delivered {
        delivered: usize,
    },
    Error {
        error: String,
    },
}

/// Unsolicited event line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Event {
    Toast(Toast),
}
