//! HTTP routes. Every page is a GET and renders HTML.

use crate::db::{self, DbConn};
use crate::{templates, AppState, WebError};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tommyjohns_charts::ChartKind;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_entries))
        .route("/surgeries", get(show_surgeries))
        .route("/surgeries-by-year", get(show_surgeries_by_year))
        .route("/age", get(show_age))
        .route("/recovery-times", get(show_recovery_times))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /
async fn show_entries(DbConn(mut conn): DbConn) -> Result<Html<String>, WebError> {
    let entries = db::list_entries(&mut conn).await?;
    Ok(Html(templates::entries_page(&entries)))
}

/// GET /surgeries
async fn show_surgeries() -> Html<String> {
    Html(templates::surgeries_page())
}

async fn show_surgeries_by_year(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    chart_page(&state, ChartKind::SurgeriesByYear).await
}

async fn show_age(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    chart_page(&state, ChartKind::AgeHistogram).await
}

async fn show_recovery_times(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    chart_page(&state, ChartKind::RecoveryTimes).await
}

/// Read the chart's pre-built fragment and embed it in a page.
async fn chart_page(state: &AppState, kind: ChartKind) -> Result<Html<String>, WebError> {
    let path = kind.artifact_path(state.charts_dir());
    let fragment = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| WebError::MissingChart { path, source })?;

    debug!("Serving {} ({} bytes)", kind, fragment.len());
    Ok(Html(templates::chart_page(kind, &fragment)))
}
