//! Startup tasks behind the CLI subcommands.

use crate::sheets::SheetsClient;
use crate::{build_router, db, AppState};
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;
use tommyjohns_charts::{ChartArtifact, ChartManager, CsvLoader};
use tommyjohns_common::validate_non_empty;
use tommyjohns_config::Config;
use tracing::{info, instrument};

/// Open the database and apply the schema.
pub async fn init_db(config: &Config) -> Result<SqlitePool> {
    let pool = db::connect(&config.database).await?;
    db::init_schema(&pool).await?;
    Ok(pool)
}

/// Load the surgery CSV and write every enabled chart fragment.
#[instrument(skip_all)]
pub async fn build_charts(config: &Config) -> Result<Vec<ChartArtifact>> {
    let table = CsvLoader::new(config.data.columns.clone())
        .load_path(&config.data.csv_path)
        .with_context(|| format!("failed to load surgeries from {}", config.data.csv_path))?;

    let manager = ChartManager::new(config.charts.clone(), &config.data.charts_dir);
    let artifacts = manager.build_all(&table).await?;
    for artifact in &artifacts {
        info!("Wrote {} ({} bytes)", artifact.path.display(), artifact.bytes);
    }
    Ok(artifacts)
}

/// Initialize the database, build the charts, then serve until shut down.
///
/// Charts are fully written before the listener is bound.
pub async fn serve(config: Arc<Config>) -> Result<()> {
    let pool = init_db(&config).await?;
    build_charts(&config).await?;

    let app = build_router(AppState::new(pool, Arc::clone(&config)));
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?;

    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Fetch a spreadsheet's title and one range and log what came back.
pub async fn import_sheet(
    config: &Config,
    sheet_id: Option<String>,
    range: Option<String>,
) -> Result<()> {
    let sheet_id = validate_non_empty(
        sheet_id.as_deref().unwrap_or(&config.sheets.sheet_id),
        "sheet_id",
    )?;
    let range = range.unwrap_or_else(|| config.sheets.range.clone());

    let client = SheetsClient::new(&config.sheets)?;
    let metadata = client.fetch_metadata(&sheet_id).await?;
    let values = client.fetch_values(&sheet_id, &range).await?;

    info!(
        sheet_id = %metadata.spreadsheet_id,
        title = %metadata.properties.title,
        range = %values.range,
        rows = values.values.len(),
        "Fetched spreadsheet"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tommyjohns_charts::ChartKind;
    use tommyjohns_common::test_utils::SAMPLE_CSV;

    fn temp_config(dir: &tempfile::TempDir) -> Config {
        let csv_path = dir.path().join("TJList.csv");
        std::fs::write(&csv_path, SAMPLE_CSV).unwrap();

        let mut config = Config::default();
        config.database.path = dir.path().join("tj.db").display().to_string();
        config.data.csv_path = csv_path.display().to_string();
        config.data.charts_dir = dir.path().join("charts").display().to_string();
        config
    }

    #[tokio::test]
    async fn test_build_charts_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_config(&dir);

        let artifacts = build_charts(&config).await.unwrap();
        assert_eq!(artifacts.len(), 3);
        for kind in ChartKind::ALL {
            assert!(dir.path().join("charts").join(kind.file_name()).exists());
        }
    }

    #[tokio::test]
    async fn test_build_charts_missing_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = temp_config(&dir);
        config.data.csv_path = dir.path().join("nope.csv").display().to_string();

        let err = build_charts(&config).await.unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }

    #[tokio::test]
    async fn test_init_db_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_db(&temp_config(&dir)).await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        assert!(db::list_entries(&mut conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_sheet_requires_sheet_id() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_sheet(&temp_config(&dir), None, None).await.unwrap_err();
        assert!(err.to_string().contains("sheet_id"));
    }
}
