//! Residency Plane Server Binary
//!
//! Runs one regional residency-plane deployment: the residency store
//! client, the identity-provider lifecycle gates, and the config endpoint.

use std::env;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use residency_plane::{
    create_router, region_map_from_env, AppState, LookupGrace, MemoryStore, PlaneConfig,
    RetryPolicy,
};

#[tokio::main]
async fn main() {
    // Initialize logging
    let log_level = env::var("RESIDENCY_LOG_LEVEL")
        .unwrap_or_else(|_| "info".into())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    // Configuration
    let config = PlaneConfig::from_env().expect("Invalid deployment configuration");
    let regions = region_map_from_env().expect("Invalid region map");

    // Initialize storage
    let store = build_store().await;

    info!(
        region = %config.region,
        port = config.port,
        jurisdictions = regions.len(),
        "Starting residency plane server"
    );

    // Create application state
    let state = Arc::new(AppState {
        store,
        regions,
        config: config.clone(),
        retry: RetryPolicy::default(),
        grace: LookupGrace::default(),
    });

    // Build router
    let app = create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "Residency plane listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

/// Select the storage backend: PostgreSQL when `DATABASE_URL` is set and the
/// `postgres` feature is enabled, in-memory otherwise
#[cfg(feature = "postgres")]
async fn build_store() -> Arc<dyn residency_plane::ResidencyStore> {
    match env::var("DATABASE_URL") {
        Ok(url) => {
            let store = residency_plane::storage::PostgresStore::new(&url)
                .await
                .expect("Failed to connect to residency database");
            Arc::new(store)
        }
        Err(_) => {
            info!("DATABASE_URL not set; using in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_store() -> Arc<dyn residency_plane::ResidencyStore> {
    Arc::new(MemoryStore::new())
}
