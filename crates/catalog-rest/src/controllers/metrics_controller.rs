//! Prometheus exposition endpoint.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Creates the metrics router mounted at `path`.
pub fn router(path: &str) -> Router<AppState> {
    Router::new().route(path, get(render_metrics))
}

/// Renders the current metric values in the Prometheus text format.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
