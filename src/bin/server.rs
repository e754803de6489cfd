//! Invoice actions HTTP server
//!
//! Usage: `invoice-actions-server [config.yaml]`
//!
//! `DATABASE_URL` and `BIND_ADDR` override the file; `RUST_LOG` sets the
//! log filter (default `info`).

use anyhow::Result;
use invoice_actions::config::AppConfig;
use invoice_actions::core::service::InvoiceStore;
use invoice_actions::server::ServerBuilder;
use invoice_actions::storage::InMemoryInvoiceStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    }
    .with_env_overrides();
    config.validate()?;

    let store = open_store(&config).await?;

    ServerBuilder::new()
        .with_shared_store(store)
        .with_config(config.actions.clone())
        .serve(&config.server.bind_addr)
        .await
}

#[cfg(feature = "postgres")]
async fn open_store(config: &AppConfig) -> Result<Arc<dyn InvoiceStore>> {
    use invoice_actions::storage::PostgresInvoiceStore;
    use invoice_actions::storage::postgres::{connect, ensure_schema};
    use std::time::Duration;

    let Some(url) = config.database.url.as_deref() else {
        tracing::info!("No database configured, using the in-memory store");
        return Ok(Arc::new(InMemoryInvoiceStore::new()));
    };

    let pool = connect(
        url,
        config.database.max_connections,
        Duration::from_secs(config.database.acquire_timeout_secs),
    )
    .await?;
    ensure_schema(&pool).await?;
    tracing::info!("Connected to PostgreSQL");

    Ok(Arc::new(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &AppConfig) -> Result<Arc<dyn InvoiceStore>> {
    if config.database.url.is_some() {
        anyhow::bail!("a database URL is configured but this build lacks the `postgres` feature");
    }
    tracing::info!("Using the in-memory store");
    Ok(Arc::new(InMemoryInvoiceStore::new()))
}
