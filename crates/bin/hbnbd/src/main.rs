//! # hbnbd: hbnb daemon
//!
//! Composition root that wires the storage backend and the HTTP adapter
//! together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (`hbnb.toml`, environment variables)
//! - Initialize logging
//! - Open the selected storage backend (JSON file or `SQLite`, running
//!   migrations for the latter)
//! - Build the axum router on top of the application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), then close the storage
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::error::Error;
use std::sync::Arc;

use hbnb_adapter_http_axum::router;
use hbnb_adapter_http_axum::state::AppState;
use hbnb_adapter_storage_json::FileStorage;
use hbnb_adapter_storage_sqlite_sqlx::SqliteStorage;
use hbnb_adapter_storage_sqlite_sqlx::pool;
use hbnb_app::ports::Storage;
use tracing_subscriber::EnvFilter;

use crate::config::{Backend, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    match config.storage.backend {
        Backend::File => {
            let storage = FileStorage::open(config.storage.file_path.clone()).await?;
            serve(&config, storage).await
        }
        Backend::Db => {
            let database = pool::Config {
                database_url: config.storage.database_url.clone(),
            }
            .build()
            .await?;
            serve(&config, SqliteStorage::from_database(database)).await
        }
    }
}

async fn serve<S: Storage + 'static>(config: &Config, storage: S) -> Result<(), Box<dyn Error>> {
    let storage = Arc::new(storage);
    let app = router::build(AppState::new(Arc::clone(&storage)));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, backend = %config.storage.backend, "hbnbd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await?;
    tracing::info!("storage closed, bye");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested");
}
