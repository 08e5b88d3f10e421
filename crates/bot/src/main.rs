mod handlers;
mod render;
mod state;
mod telegram;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinescope_core::{
    load_config, validate_config, FilmCatalog, KinopoiskClient, LookupPipeline, LookupStore,
    SanitizedConfig, SearchEngineLinkFinder, SqliteLookupStore, WebLinkFinder,
};

use state::AppState;
use telegram::TelegramClient;

/// Delay before retrying a failed getUpdates call
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("CINESCOPE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "Config: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    // Open the lookup store
    let store: Arc<dyn LookupStore> = Arc::new(
        SqliteLookupStore::new(&config.database.path).context("Failed to open lookup store")?,
    );
    info!("Lookup store opened at {:?}", config.database.path);

    // Startup maintenance: refuse to serve against a store we could not repair
    store
        .compact_counters()
        .context("Startup counter compaction failed")?;
    info!("Counter compaction complete");

    // Create the metadata provider client
    let catalog: Arc<dyn FilmCatalog> = Arc::new(
        KinopoiskClient::new(config.kinopoisk.clone())
            .context("Failed to create Kinopoisk client")?,
    );
    info!("Kinopoisk client initialized");

    // Create the web link finder
    let link_finder: Arc<dyn WebLinkFinder> = Arc::new(
        SearchEngineLinkFinder::new(config.weblink.clone().unwrap_or_default())
            .context("Failed to create web link finder")?,
    );

    let pipeline = LookupPipeline::new(catalog, link_finder, store);

    // Create the Telegram gateway client
    let telegram = TelegramClient::new(&config.telegram.token, config.telegram.poll_timeout_secs)
        .context("Failed to create Telegram client")?;

    let app_state = Arc::new(AppState::new(pipeline, telegram));

    // Long-poll loop with graceful shutdown
    info!("Polling for updates");
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut offset: Option<i64> = None;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
            updates = app_state.telegram().get_updates(offset) => match updates {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        if let Some(message) = update.message {
                            // One task per message so a slow provider call
                            // from one user does not block the others.
                            let app_state = Arc::clone(&app_state);
                            tokio::spawn(async move {
                                handlers::handle_message(app_state, message).await;
                            });
                        }
                    }
                }
                Err(e) => {
                    error!("getUpdates failed: {}", e);
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                }
            }
        }
    }

    // The store connection closes when the last AppState clone drops.
    info!("Bot stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
