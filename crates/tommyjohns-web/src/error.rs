//! Request-level error type rendered as a generic HTML error page.

use crate::templates;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::path::PathBuf;
use tommyjohns_common::TjError;
use tracing::error;

/// Errors a request handler can fail with.
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    /// A chart page was requested but its fragment could not be read.
    #[error("Chart artifact '{}' unavailable: {source}", .path.display())]
    MissingChart {
        /// Expected artifact location.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: std::io::Error,
    },

    /// Database, template, or other application error.
    #[error(transparent)]
    App(#[from] TjError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(templates::error_page()),
        )
            .into_response()
    }
}
