//! Workspace translation indexing.

use std::path::Path;

use ignore::WalkBuilder;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::config::{
    ConfigManager,
    FileMatcher,
};
use crate::indexer::types::{
    IndexerError,
    TranslationFile,
};
use crate::input::translation::{
    Dictionary,
    detect_locale_from_path,
    detect_namespace_from_path,
};

/// Builds a [`Catalog`] from the translation files of a workspace.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranslationIndexer;

impl TranslationIndexer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Indexes every translation file under `workspace_path`.
    ///
    /// Files are read concurrently. A file that cannot be read or parsed is
    /// skipped with a warning; only an unusable workspace or invalid patterns
    /// fail the whole load.
    ///
    /// # Errors
    /// - `workspace_path` is not a directory
    /// - translation file patterns do not compile
    pub async fn index_workspace(
        &self,
        workspace_path: &Path,
        config_manager: &ConfigManager,
    ) -> Result<Catalog, IndexerError> {
        tracing::debug!(workspace_path = %workspace_path.display(), "Indexing workspace");

        if !workspace_path.is_dir() {
            return Err(IndexerError::InvalidPath(workspace_path.to_path_buf()));
        }

        let settings = config_manager.get_settings();
        let matcher = FileMatcher::new(workspace_path.to_path_buf(), settings)?;
        let files = Self::find_translation_files(&matcher);

        let loads = files.iter().map(|file| Self::load_file(&file.path));
        let dictionaries = futures::future::join_all(loads).await;

        let mut catalog = Catalog::new(settings.key_separator.clone());
        let mut loaded = 0_usize;
        for (file, dictionary) in files.iter().zip(dictionaries) {
            let Some(dictionary) = dictionary else {
                continue;
            };
            catalog.add(file.locale, file.namespace.as_deref(), dictionary);
            loaded += 1;
        }

        tracing::info!(
            files = loaded,
            skipped = files.len() - loaded,
            locales = ?catalog.locales(),
            "Translation catalog loaded"
        );

        Ok(catalog)
    }

    /// Finds translation files, sorted by path so merges are deterministic.
    fn find_translation_files(matcher: &FileMatcher) -> Vec<TranslationFile> {
        let workspace_path = matcher.workspace_root();
        let mut found_files = Vec::new();

        for result in WalkBuilder::new(workspace_path)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(workspace_path) else {
                continue;
            };
            if !matcher.is_translation_file_relative(relative_path) {
                continue;
            }

            let Some(locale) = detect_locale_from_path(relative_path) else {
                tracing::warn!(
                    path = %relative_path.display(),
                    "No supported locale in translation file path; skipping"
                );
                continue;
            };

            found_files.push(TranslationFile {
                path: path.to_path_buf(),
                locale,
                namespace: detect_namespace_from_path(relative_path),
            });
        }

        found_files.sort_by(|a, b| a.path.cmp(&b.path));
        found_files
    }

    async fn load_file(file_path: &Path) -> Option<Dictionary> {
        let content = match tokio::fs::read_to_string(file_path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read translation file {:?}: {}", file_path, e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(json) => Some(Dictionary::from_json(&json)),
            Err(e) => {
                tracing::warn!("Failed to parse translation file {:?}: {}", file_path, e);
                None
            }
        }
    }
}
