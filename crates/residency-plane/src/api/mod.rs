//! API module for the residency plane server

pub mod error;
pub mod handlers;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use residency_core::{RegionMap, UserId};

use crate::config::PlaneConfig;
use crate::gates::LookupGrace;
use crate::storage::{ResidencyStore, RetryPolicy};

/// Application state shared across handlers
pub struct AppState {
    /// The replicated residency store
    pub store: Arc<dyn ResidencyStore>,
    /// Jurisdiction ↔ region mapping
    pub regions: RegionMap,
    /// Deployment configuration
    pub config: PlaneConfig,
    /// Backoff policy for store calls
    pub retry: RetryPolicy,
    /// Replication-lag grace window at the admission gate
    pub grace: LookupGrace,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness check response
#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub region: String,
    pub store_reachable: bool,
    pub jurisdiction_count: usize,
}

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Readiness check endpoint
///
/// GET /ready
pub async fn ready(State(state): State<Arc<AppState>>) -> Json<ReadyResponse> {
    // A point read of an id that cannot exist exercises the store path
    // without touching real records
    let probe = UserId::from_raw("readiness-probe");
    let store_reachable = state.store.get_region(&probe).await.is_ok();

    Json(ReadyResponse {
        ready: store_reachable,
        region: state.config.region.to_string(),
        store_reachable,
        jurisdiction_count: state.regions.len(),
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS is open: the config endpoint is consumed by browsers served from
    // a region-agnostic origin, and nothing here requires credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Front-end configuration
        .route("/config", get(handlers::get_config))
        .route("/v1/jurisdictions", get(handlers::list_jurisdictions))
        // Identity-provider lifecycle hooks
        .route("/v1/hooks/pre-signup", post(handlers::pre_signup))
        .route("/v1/hooks/pre-auth", post(handlers::pre_auth))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
