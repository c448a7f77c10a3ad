//! Recharge Travels quote engine.
//!
//! Prices Sri Lanka tours and group transfers from a static catalog and
//! serves the same operations over HTTP for the booking front end.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod cache;
pub mod config;
pub mod error;
pub mod quote;

use cache::QuoteCache;
use quote::PricingCatalog;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PricingCatalog>,
    pub cache: QuoteCache,
}

impl AppState {
    pub fn new(catalog: PricingCatalog, cache: QuoteCache) -> Self {
        AppState {
            catalog: Arc::new(catalog),
            cache,
        }
    }
}

/// Full HTTP application with middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/cache", get(cache_stats))
        .nest("/api/quote", quote::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "catalog": {
            "vehicles": state.catalog.vehicles.len(),
            "destinations": state.catalog.destinations.len(),
            "accommodation_tiers": state.catalog.accommodation_tiers.len(),
        },
        "service": "recharge-quotes"
    }))
}

async fn cache_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.cache.stats())
}
