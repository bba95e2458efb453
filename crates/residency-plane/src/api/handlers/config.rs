//! Front-end configuration handlers
//!
//! A front end served from a region-agnostic origin discovers its regional
//! identity-provider coordinates at runtime instead of hard-coding them per
//! region. Nothing returned here is secret.

use axum::{
    extract::State,
    http::{header::CACHE_CONTROL, HeaderMap, HeaderValue},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::AppState;

/// Regional front-end configuration
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    /// Region code of this deployment
    pub region: String,
    /// Identity-provider user pool identifier (public)
    pub identity_pool_id: String,
    /// Identity-provider client identifier (public)
    pub identity_client_id: String,
}

/// Supported jurisdictions, for sign-up choice lists
#[derive(Debug, Serialize)]
pub struct JurisdictionsResponse {
    pub jurisdictions: Vec<String>,
    pub count: usize,
}

/// Expose the regional identity-provider coordinates
///
/// GET /config
///
/// No auth, no secrets, idempotent and cacheable.
pub async fn get_config(
    State(state): State<Arc<AppState>>,
) -> (HeaderMap, Json<ConfigResponse>) {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=300"));

    let config = &state.config;
    (
        headers,
        Json(ConfigResponse {
            region: config.region.to_string(),
            identity_pool_id: config.identity_pool_id.clone(),
            identity_client_id: config.identity_client_id.clone(),
        }),
    )
}

/// List the jurisdictions the resolver supports
///
/// GET /v1/jurisdictions
///
/// The resolver is the single source of truth for jurisdiction choices; UI
/// components must read this list rather than hard-coding their own.
pub async fn list_jurisdictions(
    State(state): State<Arc<AppState>>,
) -> Json<JurisdictionsResponse> {
    let jurisdictions: Vec<String> = state
        .regions
        .jurisdictions()
        .into_iter()
        .map(String::from)
        .collect();
    let count = jurisdictions.len();

    Json(JurisdictionsResponse { jurisdictions, count })
}
