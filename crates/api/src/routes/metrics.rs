//! Prometheus metrics endpoint.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Registers help text for the catalog counters.
pub fn describe() {
    metrics::describe_counter!(
        "catalog_store_queries_total",
        "Snapshot streams opened against the store"
    );
    metrics::describe_counter!(
        "catalog_store_mutations_total",
        "Product and category writes"
    );
    metrics::describe_counter!(
        "catalog_view_snapshots_published_total",
        "Sorted snapshots broadcast to observers"
    );
    metrics::describe_counter!(
        "catalog_view_reorders_total",
        "Re-sorts of the cached snapshot"
    );
    metrics::describe_counter!(
        "catalog_view_stale_emissions_total",
        "Emissions dropped because their subscription was superseded"
    );
    metrics::describe_counter!(
        "catalog_view_source_failures_total",
        "Errors reported by the active snapshot stream"
    );
}

/// GET /metrics: Prometheus text exposition.
pub async fn get(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        handle.render(),
    )
}
