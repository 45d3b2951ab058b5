//! Shared handler state.

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tommyjohns_config::Config;

/// State cloned into every handler: the pool and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Arc<Config>) -> Self {
        Self { pool, config }
    }

    /// Directory the chart fragments were built into.
    pub fn charts_dir(&self) -> &Path {
        Path::new(&self.config.data.charts_dir)
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
