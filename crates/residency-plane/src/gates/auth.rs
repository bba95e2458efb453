//! Admission gate
//!
//! Checked on every authentication attempt, before credentials are
//! accepted, in the region handling the request. Read-only: the gate
//! performs no writes.
//!
//! The lookup tolerates replication lag: a record written moments ago in
//! another region may not be visible here yet, so `None` results are
//! retried within a short bounded grace window before the gate fails
//! closed.

use std::time::Duration;

use tracing::{info, warn};

use residency_core::{RegionCode, ResidencyError, UserId};

use crate::storage::{with_retry, ResidencyStore, RetryPolicy};

/// Bounded grace window for `None` lookups immediately after registration.
///
/// Each miss sleeps `initial_backoff * 2^n` before the next attempt. With
/// `attempts = 1` the window is disabled and the gate is strictly
/// fail-closed on the first miss.
#[derive(Debug, Clone)]
pub struct LookupGrace {
    /// Total lookup attempts, including the first (must be >= 1)
    pub attempts: u32,
    /// Sleep after the first miss; doubles per subsequent miss
    pub initial_backoff: Duration,
}

impl Default for LookupGrace {
    fn default() -> Self {
        LookupGrace {
            attempts: 3,
            initial_backoff: Duration::from_millis(50),
        }
    }
}

impl LookupGrace {
    /// Disable the grace window: one attempt, strict fail-closed
    pub fn none() -> Self {
        LookupGrace {
            attempts: 1,
            initial_backoff: Duration::ZERO,
        }
    }
}

/// Admit or reject an authentication attempt.
///
/// Derives the user id identically to the registration gate, looks up the
/// recorded home region, and compares it against `current_region`:
///
/// - no record after the grace window → [`ResidencyError::NoResidencyRecord`]
/// - recorded region differs → [`ResidencyError::WrongRegion`]
/// - recorded region matches → `Ok` with the assigned region
pub async fn admit(
    store: &dyn ResidencyStore,
    retry: &RetryPolicy,
    grace: &LookupGrace,
    email: &str,
    current_region: &RegionCode,
) -> Result<RegionCode, ResidencyError> {
    let user_id = UserId::derive(email);

    let mut assigned = None;
    let attempts = grace.attempts.max(1);
    for attempt in 0..attempts {
        assigned = with_retry(retry, || store.get_region(&user_id))
            .await
            .map_err(|e| ResidencyError::StoreUnavailable(e.to_string()))?;

        if assigned.is_some() {
            break;
        }
        if attempt + 1 < attempts {
            let backoff = grace.initial_backoff * 2u32.pow(attempt);
            tracing::debug!(
                user_id = %user_id,
                attempt = attempt + 1,
                backoff_ms = backoff.as_millis() as u64,
                "No residency record visible yet; waiting out replication lag"
            );
            tokio::time::sleep(backoff).await;
        }
    }

    let assigned = match assigned {
        Some(region) => region,
        None => {
            warn!(user_id = %user_id, region = %current_region, "Rejecting authentication: no residency record");
            return Err(ResidencyError::NoResidencyRecord);
        }
    };

    if &assigned != current_region {
        warn!(
            user_id = %user_id,
            assigned = %assigned,
            current = %current_region,
            "Rejecting cross-region authentication"
        );
        return Err(ResidencyError::WrongRegion {
            assigned,
            current: current_region.clone(),
        });
    }

    info!(user_id = %user_id, region = %assigned, "Admitting authentication");
    Ok(assigned)
}
