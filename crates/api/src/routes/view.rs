//! Sorted catalog view endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog_query::{FilterCriteria, SortKey};
use catalog_store::CatalogStore;
use catalog_view::{SortedSnapshot, SubscriptionId, ViewUpdate};
use chrono::SecondsFormat;
use common::{PriceValue, ProductView};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

/// Search request. Prices are decimal strings such as `"5.99"`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub barcode_prefix: Option<String>,
    pub name_contains: Option<String>,
    pub category_id: i64,
    pub lower_price: Option<String>,
    pub higher_price: Option<String>,
}

impl SearchRequest {
    fn into_criteria(self) -> Result<FilterCriteria, ApiError> {
        Ok(FilterCriteria {
            barcode_prefix: self.barcode_prefix,
            name_contains: self.name_contains,
            category_id: self.category_id,
            lower_price: parse_price(self.lower_price.as_deref())?,
            higher_price: parse_price(self.higher_price.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub key: String,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub barcode: Option<String>,
    pub name: String,
    pub price: String,
    pub price_minor_units: i64,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub notes: String,
}

impl From<&ProductView> for ProductResponse {
    fn from(view: &ProductView) -> Self {
        Self {
            id: view.id().as_i64(),
            barcode: view.product.barcode.clone(),
            name: view.product.name.clone(),
            price: view.price().to_string(),
            price_minor_units: view.price().to_minor_units(),
            category_id: view.product.category_id.as_i64(),
            category_name: view.category_name().map(String::from),
            notes: view.product.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    /// `false` until the active query has produced its first snapshot.
    pub ready: bool,
    pub subscription: Option<String>,
    pub ordering: SortKey,
    pub natural_ordering: SortKey,
    pub published_at: Option<String>,
    pub products: Vec<ProductResponse>,
}

impl ViewResponse {
    fn from_snapshot(snapshot: &SortedSnapshot, natural_ordering: SortKey) -> Self {
        Self {
            ready: true,
            subscription: Some(snapshot.source.to_string()),
            ordering: snapshot.key,
            natural_ordering,
            published_at: Some(
                snapshot
                    .published_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            products: snapshot.items.iter().map(ProductResponse::from).collect(),
        }
    }

    fn pending(
        subscription: Option<SubscriptionId>,
        ordering: SortKey,
        natural_ordering: SortKey,
    ) -> Self {
        Self {
            ready: false,
            subscription: subscription.map(|id| id.to_string()),
            ordering,
            natural_ordering,
            published_at: None,
            products: Vec::new(),
        }
    }
}

// -- Handlers --

/// GET /view: the latest sorted snapshot with the current and natural ordering.
#[tracing::instrument(skip(state))]
pub async fn current<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<ViewResponse> {
    let natural = state.browser.natural_ordering();
    let response = match state.browser.latest().await {
        Some(snapshot) => ViewResponse::from_snapshot(&snapshot, natural),
        None => ViewResponse::pending(
            state.browser.composer().active_subscription().await,
            state.browser.current_ordering().await,
            natural,
        ),
    };
    Json(response)
}

/// POST /view/all: show every product.
#[tracing::instrument(skip(state))]
pub async fn show_all<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<ViewResponse>, ApiError> {
    let rx = state.browser.subscribe();
    let id = state.browser.show_all().await?;
    settle(&state, rx, id).await.map(Json)
}

/// POST /view/search: show the products matching a search request.
#[tracing::instrument(skip(state, req))]
pub async fn search<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let criteria = req.into_criteria()?;
    let rx = state.browser.subscribe();
    let id = state.browser.search(&criteria).await?;
    settle(&state, rx, id).await.map(Json)
}

/// POST /view/category/:id: show one category; `0` shows everything.
#[tracing::instrument(skip(state))]
pub async fn by_category<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(category_id): Path<i64>,
) -> Result<Json<ViewResponse>, ApiError> {
    let rx = state.browser.subscribe();
    let id = state.browser.filter_by_category(category_id).await?;
    settle(&state, rx, id).await.map(Json)
}

/// POST /view/reorder: re-sort the current view without querying the store.
#[tracing::instrument(skip(state))]
pub async fn reorder<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let key: SortKey = req.key.parse()?;
    let snapshot = state.browser.reorder(key).await?;
    Ok(Json(ViewResponse::from_snapshot(
        &snapshot,
        state.browser.natural_ordering(),
    )))
}

/// Waits up to the settle timeout for the first snapshot from `id`.
///
/// A source failure for `id` becomes an error response. On timeout or a
/// lagged receiver the latest snapshot is used if it already belongs to
/// `id`, otherwise the response reports the view as not ready.
async fn settle<S: CatalogStore>(
    state: &AppState<S>,
    mut rx: broadcast::Receiver<ViewUpdate>,
    id: SubscriptionId,
) -> Result<ViewResponse, ApiError> {
    let natural = state.browser.natural_ordering();
    let wait = async {
        loop {
            match rx.recv().await {
                Ok(ViewUpdate::Snapshot(snapshot)) if snapshot.source == id => {
                    return Ok(Some(snapshot));
                }
                Ok(ViewUpdate::SourceFailed { source, message }) if source == id => {
                    return Err(ApiError::Internal(message));
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "view receiver lagged while settling");
                    return Ok(None);
                }
                Err(RecvError::Closed) => return Ok(None),
            }
        }
    };

    let received = match tokio::time::timeout(state.settle_timeout, wait).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::debug!(subscription = %id, "no snapshot within settle timeout");
            None
        }
    };

    let snapshot = match received {
        Some(snapshot) => Some(snapshot),
        None => state
            .browser
            .latest()
            .await
            .filter(|snapshot| snapshot.source == id),
    };

    Ok(match snapshot {
        Some(snapshot) => ViewResponse::from_snapshot(&snapshot, natural),
        None => ViewResponse::pending(Some(id), state.browser.current_ordering().await, natural),
    })
}

fn parse_price(value: Option<&str>) -> Result<Option<PriceValue>, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse::<PriceValue>())
        .transpose()
        .map_err(ApiError::from)
}
