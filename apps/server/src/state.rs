//! Shared application state
//!
//! Everything a handler needs hangs off [`AppState`]; it is cheap to clone
//! and is injected through axum's `State` extractor. The catalog store is
//! held behind `Arc<dyn CatalogStore>` so tests can swap in an in-memory
//! implementation without a database.

use crate::{
    config::Config,
    db::{CatalogStore, PostgresCatalogStore},
    services::search::SearchService,
};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn CatalogStore>,
    pub search: Arc<SearchService>,
}

impl AppState {
    /// Connect to Postgres and build the production state.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(config.database.pool_min_size)
            .max_connections(config.database.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
            .connect(&config.database.url)
            .await
            .context("Failed to connect to Postgres")?;

        if config.database.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let store: Arc<dyn CatalogStore> = Arc::new(PostgresCatalogStore::new(pool));
        Ok(Self::with_store(config, store))
    }

    /// Build state around an existing store. Used by tests to run the full
    /// router against an in-memory catalog.
    pub fn with_store(config: Config, store: Arc<dyn CatalogStore>) -> Self {
        let config = Arc::new(config);
        let search = Arc::new(SearchService::new(
            Arc::clone(&store),
            Arc::clone(&config),
        ));
        Self {
            config,
            store,
            search,
        }
    }
}
