//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use catalog_store::CatalogStore;
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Whether the view holds a snapshot of the active query.
    pub view_ready: bool,
}

/// GET /health: liveness plus view readiness.
pub async fn check<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        view_ready: state.browser.composer().is_populated().await,
    })
}
