//! Entry point for the JSON-lines translation server.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use estate_i18n::config::ConfigManager;
use estate_i18n::indexer::workspace::TranslationIndexer;
use estate_i18n::router::Location;
use estate_i18n::server::{
    Session,
    serve,
};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Workspace root: the first argument, else the current directory.
fn workspace_root() -> std::io::Result<PathBuf> {
    std::env::args_os().nth(1).map_or_else(std::env::current_dir, |arg| Ok(PathBuf::from(arg)))
}

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let root = match workspace_root() {
        Ok(root) => root,
        Err(error) => {
            tracing::error!(%error, "Cannot determine workspace root");
            return ExitCode::FAILURE;
        }
    };

    let mut config_manager = ConfigManager::new();
    if let Err(error) = config_manager.load_settings(Some(root.clone())) {
        tracing::error!(%error, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let catalog = match TranslationIndexer::new().index_workspace(&root, &config_manager).await {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::error!(%error, "Failed to index translations");
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(
        Arc::new(catalog),
        config_manager.get_settings().default_locale(),
        Location::parse("/"),
    );

    match serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), &mut session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "Server stopped");
            ExitCode::FAILURE
        }
    }
}
