mod cli;

use crate::cli::{LogFormatArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tinylink_core::{LinkStore, Registry};
use tinylink_gateway::{App, AppState};
use tinylink_generator::RandomGenerator;
use tinylink_registry::{RegistryService, RegistrySettings};
use tinylink_storage::{InMemoryStore, MySqlStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length = config.code_length,
        max_create_attempts = config.max_create_attempts,
        "starting tinylink gateway"
    );

    let generator = RandomGenerator::with_length(config.code_length);
    let settings = RegistrySettings::builder()
        .max_attempts(config.max_create_attempts)
        .build();

    let registry = match config.storage {
        StorageBackendArg::InMemory => registry(InMemoryStore::new(), generator, settings),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(mysql_dsn)
                .await
                .context("failed to connect to mysql")?;
            store
                .ensure_schema()
                .await
                .context("failed to prepare mysql schema")?;
            registry(store, generator, settings)
        }
    };

    let app = App::router(AppState::new(registry));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn registry<S: LinkStore>(
    store: S,
    generator: RandomGenerator,
    settings: RegistrySettings,
) -> Arc<dyn Registry> {
    Arc::new(RegistryService::with_settings(store, generator, settings))
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
