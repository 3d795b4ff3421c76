//! HTTP API server with observability for the catalog browser.
//!
//! Provides REST endpoints for the sorted catalog view and for product and
//! category maintenance, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use catalog_store::{CatalogStore, CatalogStoreExt, Result as StoreResult};
use catalog_view::{CatalogBrowser, ViewComposer};
use common::{NewCategory, NewProduct, PriceValue};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: CatalogStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route("/view", get(routes::view::current::<S>))
        .route("/view/all", post(routes::view::show_all::<S>))
        .route("/view/search", post(routes::view::search::<S>))
        .route("/view/category/{id}", post(routes::view::by_category::<S>))
        .route("/view/reorder", post(routes::view::reorder::<S>))
        .route("/products", post(routes::products::create::<S>))
        .route(
            "/products/{id}",
            get(routes::products::get::<S>)
                .put(routes::products::update::<S>)
                .delete(routes::products::delete::<S>),
        )
        .route(
            "/categories",
            get(routes::categories::list::<S>).post(routes::categories::create::<S>),
        )
        .route(
            "/categories/{id}",
            put(routes::categories::update::<S>).delete(routes::categories::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state: one browser over `store`.
pub fn create_default_state<S: CatalogStore + 'static>(
    store: S,
    config: &Config,
) -> Arc<AppState<S>> {
    let composer = ViewComposer::with_capacity(config.channel_capacity);
    Arc::new(AppState {
        browser: CatalogBrowser::with_composer(store, composer),
        settle_timeout: config.settle_timeout,
    })
}

/// Fills an empty store with a small demo catalog.
#[tracing::instrument(skip(store))]
pub async fn seed_demo_catalog<S: CatalogStore>(store: &S) -> StoreResult<usize> {
    let bathroom = store.insert_category(NewCategory::new("Bathroom")).await?;
    let bedroom = store.insert_category(NewCategory::new("Bedroom")).await?;
    let kitchen = store.insert_category(NewCategory::new("Kitchen")).await?;

    let products = vec![
        NewProduct::new("Taps", PriceValue::from_minor_units(599))
            .barcode("1234567890123")
            .category(bathroom.id),
        NewProduct::new("Sink", PriceValue::from_minor_units(1099))
            .barcode("3210987654321")
            .category(bathroom.id),
        NewProduct::new("Pillows", PriceValue::from_minor_units(1899))
            .barcode("1234509876109")
            .category(bedroom.id)
            .notes("Pack of two"),
        NewProduct::new("Kettle", PriceValue::from_minor_units(2450))
            .barcode("5012345678900")
            .category(kitchen.id),
        NewProduct::new("Sweets", PriceValue::from_minor_units(99)),
    ];

    let inserted = store.insert_products(products).await?;
    tracing::info!(products = inserted.len(), "seeded demo catalog");
    Ok(inserted.len())
}
