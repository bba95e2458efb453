//! Deployment configuration
//!
//! Each regional deployment is configured through environment variables:
//!
//! - `RESIDENCY_REGION` — region code of this deployment (required)
//! - `RESIDENCY_PORT` — HTTP listen port (default 8080)
//! - `RESIDENCY_REGION_MAP` — jurisdiction→region mapping as JSON
//!   (defaults to the compiled-in mapping)
//! - `IDENTITY_POOL_ID` / `IDENTITY_CLIENT_ID` — public identity-provider
//!   coordinates exposed through `GET /config`
//! - `RESIDENCY_LOG_LEVEL` — tracing level (default `info`)
//! - `DATABASE_URL` — PostgreSQL connection string (with the `postgres`
//!   feature; in-memory store otherwise)

use std::env;

use thiserror::Error;

use residency_core::{RegionCode, RegionMap, ResidencyError};

/// Configuration errors surfaced at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Typed configuration for one regional deployment
#[derive(Debug, Clone)]
pub struct PlaneConfig {
    /// Region code of the running deployment
    pub region: RegionCode,
    /// HTTP listen port
    pub port: u16,
    /// Public identity-provider pool identifier
    pub identity_pool_id: String,
    /// Public identity-provider client identifier
    pub identity_client_id: String,
}

impl PlaneConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let region = env::var("RESIDENCY_REGION")
            .map(RegionCode::new)
            .map_err(|_| ConfigError::MissingVar("RESIDENCY_REGION"))?;

        let port = env::var("RESIDENCY_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                var: "RESIDENCY_PORT",
                reason: e.to_string(),
            })?;

        Ok(PlaneConfig {
            region,
            port,
            identity_pool_id: env::var("IDENTITY_POOL_ID").unwrap_or_default(),
            identity_client_id: env::var("IDENTITY_CLIENT_ID").unwrap_or_default(),
        })
    }
}

/// Load the jurisdiction map from `RESIDENCY_REGION_MAP`, falling back to
/// the compiled-in default mapping
pub fn region_map_from_env() -> Result<RegionMap, ConfigError> {
    match env::var("RESIDENCY_REGION_MAP") {
        Ok(json) => RegionMap::from_json(&json).map_err(|e| match e {
            ResidencyError::InvalidRegionMap(reason) => ConfigError::Invalid {
                var: "RESIDENCY_REGION_MAP",
                reason,
            },
            other => ConfigError::Invalid {
                var: "RESIDENCY_REGION_MAP",
                reason: other.to_string(),
            },
        }),
        Err(_) => Ok(RegionMap::default_mapping()),
    }
}
