// src/main.rs
//
// Headless host for the state container: opens storage, restores saved
// state, flushes periodically and writes pending changes on Ctrl-C.

use std::sync::Arc;

use anyhow::Context;

use streamhub::app::{initialize_app_state, CatalogSource, JsonCatalogSource, SeedCatalog};
use streamhub::config::StoreConfig;
use streamhub::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use streamhub::repositories::{SnapshotRepository, SqliteSnapshotRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. CONFIGURATION
    let config = StoreConfig::from_env().context("reading configuration")?;

    // 2. INFRASTRUCTURE
    let db_path = config.resolve_database_path()?;
    let pool = Arc::new(create_connection_pool(&db_path)?);

    // Initialize schema (idempotent), then refuse to run on a damaged file
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }

    let snapshot_repo: Arc<dyn SnapshotRepository> =
        Arc::new(SqliteSnapshotRepository::new(pool.clone()));

    // 3. CATALOG SOURCE
    let catalog_source: Box<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => Box::new(JsonCatalogSource::new(path)),
        None => Box::new(SeedCatalog),
    };

    // 4. APPLICATION STATE
    let (state, outcome) = initialize_app_state(&config, catalog_source.as_ref(), snapshot_repo)
        .context("initializing state container")?;

    log::info!(
        "StreamHub ready: {} titles, restore outcome {:?}, session {}",
        state.list_content()?.len(),
        outcome,
        state
            .current_session()?
            .map(|s| s.user.email)
            .unwrap_or_else(|| "none".to_string())
    );

    // 5. BACKGROUND FLUSHING
    state.flusher.spawn_periodic();

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;

    log::info!("Shutting down...");
    state.shutdown()?;

    Ok(())
}
