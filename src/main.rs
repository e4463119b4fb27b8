//! MedEquip Server - Hospital Medical Equipment Management
//!
//! REST API server for equipment registry, checks, maintenance and loans.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use medequip_server::{
    config::AppConfig,
    create_router,
    repository::{remote::build_client, LocalStore, Repository, SettingsStore},
    services::{notifier::TelegramNotifier, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("medequip_server={},tower_http=debug", config.logging.level).into());

    let console = if config.logging.format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let (file_layer, _log_guard) = match &config.logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "medequip.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    tracing::info!("Starting MedEquip Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the local store and load settings
    let local = Arc::new(
        LocalStore::open(&config.storage.data_dir)
            .await
            .context("Failed to open data directory")?,
    );
    let settings = SettingsStore::load(local.clone(), config.storage.remote_url.as_deref())
        .await
        .context("Failed to load settings")?;

    tracing::info!("Data directory: {}", local.dir().display());

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let http = build_client(Duration::from_secs(config.storage.request_timeout_secs))?;
    let repository = Repository::new(local, http, settings.clone());
    tracing::info!("Storage mode: {:?}", repository.storage_mode().await);

    let notifier = TelegramNotifier::new(&config.notifications, settings)?;
    let services = Services::new(repository, config.auth.clone(), Arc::new(notifier));

    if services.users.ensure_default_admin().await? {
        tracing::info!("Default admin account created");
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().context("Invalid host address")?,
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
