//! Residency Plane Server
//!
//! The residency plane enforces data-residency for a multi-region
//! application: each user's personal data lives only in the region matching
//! their declared jurisdiction, and authentication is refused from any
//! other region. It does this by intercepting two points of the external
//! identity provider's lifecycle:
//!
//! - **Registration gate** — assigns each new identity to exactly one home
//!   region and durably records the assignment (first writer wins at the
//!   store's conditional put)
//! - **Admission gate** — on every authentication attempt, compares the
//!   recorded home region against the region handling the request and
//!   rejects on mismatch (fail closed)
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with store reachability
//! - `GET /config` - Regional identity-provider coordinates for the front end
//! - `GET /v1/jurisdictions` - Supported jurisdiction list
//! - `POST /v1/hooks/pre-signup` - Registration gate lifecycle hook
//! - `POST /v1/hooks/pre-auth` - Admission gate lifecycle hook

pub mod api;
pub mod config;
pub mod gates;
pub mod storage;

pub use api::{create_router, AppState};
pub use config::{region_map_from_env, PlaneConfig};
pub use gates::{admit, register, LookupGrace, SignupDecision};
pub use storage::{MemoryStore, PutOutcome, ResidencyStore, RetryPolicy, StorageError};
