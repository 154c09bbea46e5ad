//! End-to-end: index a workspace on disk and drive the line protocol.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::fs;
use std::sync::Arc;

use estate_i18n::config::ConfigManager;
use estate_i18n::indexer::workspace::TranslationIndexer;
use estate_i18n::router::Location;
use estate_i18n::server::{
    Session,
    serve,
};
use serde_json::{
    Value,
    json,
};
use tempfile::TempDir;

fn write(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(&dir, "locales/en/common.json", r#"{"nav": {"buy": "Buy", "sell": "Sell"}}"#);
    write(&dir, "locales/fr/common.json", r#"{"nav": {"buy": "Acheter"}}"#);
    write(
        &dir,
        "locales/en.json",
        r#"{"listing": {"results_one": "{{count}} result", "results_other": "{{count}} results"}}"#,
    );
    write(
        &dir,
        "locales/fr.json",
        r#"{"listing": {"results_one": "{{count}} résultat", "results_other": "{{count}} résultats"}}"#,
    );
    dir
}

async fn session_for(dir: &TempDir, url: &str) -> Session {
    let mut config = ConfigManager::new();
    config.load_settings(Some(dir.path().to_path_buf())).unwrap();
    let catalog = TranslationIndexer::new().index_workspace(dir.path(), &config).await.unwrap();
    Session::new(Arc::new(catalog), config.get_settings().default_locale(), Location::parse(url))
}

async fn exchange(mut session: Session, requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|request| format!("{request}\n")).collect();
    let mut output = Vec::new();
    serve(input.as_bytes(), &mut output, &mut session).await.unwrap();
    String::from_utf8(output).unwrap().lines().map(|line| serde_json::from_str(line).unwrap()).collect()
}

#[tokio::test]
async fn resolves_namespaced_and_plural_keys() {
    let dir = workspace();
    let session = session_for(&dir, "/fr/buy").await;

    let output = exchange(
        session,
        &[
            json!({"op": "resolve", "key": "common.nav.buy"}),
            json!({"op": "resolve", "key": "common.nav.sell"}),
            json!({"op": "resolveCount", "key": "listing.results", "count": 0}),
            json!({"op": "resolveCount", "key": "listing.results", "count": 3, "locale": "en"}),
            json!({"op": "missingKeys"}),
        ],
    )
    .await;

    assert_eq!(
        output,
        vec![
            json!({"text": "Acheter"}),
            json!({"text": "common.nav.sell"}),
            json!({"text": "0 résultat"}),
            json!({"text": "3 results"}),
            json!({"keys": ["common.nav.sell"]}),
        ]
    );
}

#[tokio::test]
async fn config_file_changes_default_locale() {
    let dir = workspace();
    write(&dir, ".estate-i18n.json", r#"{"defaultLocale": "fr"}"#);
    let session = session_for(&dir, "/about").await;

    let output = exchange(
        session,
        &[json!({"op": "activeLocale"}), json!({"op": "resolve", "key": "common.nav.buy"})],
    )
    .await;

    assert_eq!(output, vec![json!({"locale": "fr", "pending": false}), json!({"text": "Acheter"})]);
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let dir = workspace();
    write(&dir, ".estate-i18n.json", r#"{"defaultLocale": "de"}"#);

    let mut config = ConfigManager::new();
    let result = config.load_settings(Some(dir.path().to_path_buf()));

    assert!(result.unwrap_err().to_string().contains("Supported: en, fr"));
}
