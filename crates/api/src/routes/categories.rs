//! Category CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog_store::CatalogStore;
use common::{CategoryId, CategoryRecord, NewCategory};

use super::AppState;
use crate::error::ApiError;

/// GET /categories: list all categories.
#[tracing::instrument(skip(state))]
pub async fn list<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<CategoryRecord>>, ApiError> {
    Ok(Json(state.store().list_categories().await?))
}

/// POST /categories: insert a category.
#[tracing::instrument(skip(state))]
pub async fn create<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<NewCategory>,
) -> Result<(StatusCode, Json<CategoryRecord>), ApiError> {
    let record = state.store().insert_category(req).await?;
    tracing::info!(category_id = %record.id, "category created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /categories/:id: rename a category.
#[tracing::instrument(skip(state))]
pub async fn update<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(req): Json<NewCategory>,
) -> Result<Json<CategoryRecord>, ApiError> {
    let record = CategoryRecord {
        id: CategoryId::new(id),
        name: req.name,
    };
    state.store().update_category(record.clone()).await?;
    Ok(Json(record))
}

/// DELETE /categories/:id: delete a category. Its products become uncategorised.
#[tracing::instrument(skip(state))]
pub async fn delete<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store().delete_category(CategoryId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
