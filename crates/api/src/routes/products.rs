//! Product CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog_store::CatalogStore;
use common::{CategoryId, NewProduct, PriceValue, ProductId, ProductRecord};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub barcode: Option<String>,
    pub name: String,
    /// Decimal price such as `"5.99"`.
    pub price: String,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub notes: String,
}

impl ProductRequest {
    fn into_new_product(self) -> Result<NewProduct, ApiError> {
        let price: PriceValue = self.price.parse()?;
        Ok(NewProduct {
            barcode: self.barcode.filter(|b| !b.trim().is_empty()),
            name: self.name,
            price,
            category_id: CategoryId::new(self.category_id.max(0)),
            notes: self.notes,
        })
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct ProductRecordResponse {
    pub id: i64,
    pub barcode: Option<String>,
    pub name: String,
    pub price: String,
    pub price_minor_units: i64,
    pub category_id: i64,
    pub notes: String,
}

impl From<ProductRecord> for ProductRecordResponse {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id.as_i64(),
            barcode: record.barcode,
            name: record.name,
            price: record.price.to_string(),
            price_minor_units: record.price.to_minor_units(),
            category_id: record.category_id.as_i64(),
            notes: record.notes,
        }
    }
}

// -- Handlers --

/// POST /products: insert a product.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductRecordResponse>), ApiError> {
    let product = req.into_new_product()?;
    let record = state.store().insert_product(product).await?;
    tracing::info!(product_id = %record.id, "product created");
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /products/:id: load one product.
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductRecordResponse>, ApiError> {
    let record = state
        .store()
        .get_product(ProductId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {id} not found")))?;
    Ok(Json(record.into()))
}

/// PUT /products/:id: replace a product.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductRecordResponse>, ApiError> {
    let record = req.into_new_product()?.with_id(ProductId::new(id));
    state.store().update_product(record.clone()).await?;
    Ok(Json(record.into()))
}

/// DELETE /products/:id: delete a product.
#[tracing::instrument(skip(state))]
pub async fn delete<S: CatalogStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store().delete_product(ProductId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(price: &str) -> ProductRequest {
        ProductRequest {
            barcode: Some(String::new()),
            name: "Taps".to_string(),
            price: price.to_string(),
            category_id: -3,
            notes: String::new(),
        }
    }

    #[test]
    fn test_request_normalises_fields() {
        let product = request("5.99").into_new_product().unwrap();
        assert_eq!(product.price, PriceValue::new(5, 99).unwrap());
        assert_eq!(product.barcode, None);
        assert!(product.category_id.is_none());
    }

    #[test]
    fn test_request_rejects_bad_price() {
        assert!(matches!(
            request("5.999").into_new_product(),
            Err(ApiError::BadRequest(_))
        ));
    }
}
