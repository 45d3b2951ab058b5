//! SQLite access: pool setup, schema initialization, and the spreadsheet list.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use serde::Serialize;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tommyjohns_common::{Result, TjError};
use tommyjohns_config::DatabaseConfig;
use tracing::{debug, info, instrument};

use crate::WebError;

/// Schema applied at startup; idempotent.
pub const SCHEMA_SQL: &str = include_str!("../schema.sql");

/// A row of the `spreadsheets` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: i64,
    pub googleuid: String,
    pub title: String,
}

/// Open the pool, creating the database file when missing.
#[instrument(skip_all, fields(path = %config.path))]
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|e| {
            TjError::database_with_source(format!("failed to open database '{}'", config.path), e)
        })?;

    info!("Database pool ready ({} connections max)", config.max_connections);
    Ok(pool)
}

/// Apply the schema script.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .map_err(|e| TjError::database_with_source("failed to apply schema", e))?;
    info!("Database schema initialized");
    Ok(())
}

/// All spreadsheet rows, newest first.
pub async fn list_entries(conn: &mut SqliteConnection) -> Result<Vec<Entry>> {
    let rows = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, googleuid, title FROM spreadsheets ORDER BY id DESC",
    )
    .fetch_all(conn)
    .await
    .map_err(|e| TjError::database_with_source("failed to list spreadsheets", e))?;

    debug!("Fetched {} spreadsheet entries", rows.len());
    Ok(rows
        .into_iter()
        .map(|(id, googleuid, title)| Entry { id, googleuid, title })
        .collect())
}

/// Insert a spreadsheet row and return its id.
pub async fn insert_entry(
    conn: &mut SqliteConnection,
    googleuid: &str,
    title: &str,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO spreadsheets (googleuid, title) VALUES (?, ?)")
        .bind(googleuid)
        .bind(title)
        .execute(conn)
        .await
        .map_err(|e| TjError::database_with_source("failed to insert spreadsheet", e))?;
    Ok(result.last_insert_rowid())
}

/// A pooled connection held for the lifetime of one request.
///
/// Acquired before the handler runs; dropping it returns the connection to
/// the pool.
pub struct DbConn(pub PoolConnection<Sqlite>);

#[async_trait]
impl<S> FromRequestParts<S> for DbConn
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let pool = SqlitePool::from_ref(state);
        let conn = pool
            .acquire()
            .await
            .map_err(|e| TjError::database_with_source("failed to acquire connection", e))?;
        Ok(Self(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let config = DatabaseConfig {
            path: dir.path().join("tj.db").display().to_string(),
            max_connections: 2,
        };
        let pool = connect(&config).await.unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_connect_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        temp_pool(&dir).await;
        assert!(dir.path().join("tj.db").exists());
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir).await;
        assert!(init_schema(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_entries_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir).await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(list_entries(&mut conn).await.unwrap().is_empty());

        insert_entry(&mut conn, "1AbC", "2014 list").await.unwrap();
        insert_entry(&mut conn, "2DeF", "2015 list").await.unwrap();

        let entries = list_entries(&mut conn).await.unwrap();
        let uids: Vec<&str> = entries.iter().map(|e| e.googleuid.as_str()).collect();
        assert_eq!(uids, vec!["2DeF", "1AbC"]);
    }
}
