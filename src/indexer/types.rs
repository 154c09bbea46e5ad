//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;
use crate::types::Locale;

/// A translation file selected for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    pub path: PathBuf,
    pub locale: Locale,
    /// Top-level key the file's entries are merged under, if any.
    pub namespace: Option<String>,
}

#[derive(Error, Debug)]
pub enum IndexerError {
    /// The workspace root cannot be walked
    #[error("Invalid workspace path: {0}")]
    InvalidPath(PathBuf),
    /// Translation file patterns failed to compile
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}
