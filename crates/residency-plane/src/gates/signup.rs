//! Registration gate
//!
//! Assigns a new identity to exactly one home region and durably records the
//! assignment before the account is considered provisioned. Concurrent
//! registrations for the same identity race at the store's conditional
//! write; exactly one wins and every caller converges on the recorded
//! region.

use tracing::{info, warn};

use residency_core::{RegionCode, RegionMap, ResidencyError, UserId};

use crate::storage::{with_retry, PutOutcome, ResidencyStore, RetryPolicy};

/// Outcome of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDecision {
    /// Derived pseudonymous identifier
    pub user_id: UserId,
    /// The user's home region after registration. When a record already
    /// existed this is the pre-existing assignment, not the one implied by
    /// the declared jurisdiction.
    pub region: RegionCode,
    /// Whether this call created the record (won the assignment race)
    pub newly_assigned: bool,
}

/// Register an identity: derive the stable id, resolve the declared
/// jurisdiction to its region, and record the assignment if absent.
///
/// Fail-closed: any store failure after retries aborts sign-up entirely —
/// a user without a residency record would be unrouted.
pub async fn register(
    store: &dyn ResidencyStore,
    regions: &RegionMap,
    retry: &RetryPolicy,
    email: &str,
    jurisdiction: &str,
) -> Result<SignupDecision, ResidencyError> {
    let user_id = UserId::derive(email);
    let region = regions.require_region(jurisdiction)?.clone();

    let outcome = with_retry(retry, || store.put_region_if_absent(&user_id, &region))
        .await
        .map_err(|e| ResidencyError::StoreUnavailable(e.to_string()))?;

    match outcome {
        PutOutcome::Written => {
            info!(
                user_id = %user_id,
                region = %region,
                jurisdiction = %jurisdiction,
                "Registered residency assignment"
            );
            Ok(SignupDecision {
                user_id,
                region,
                newly_assigned: true,
            })
        }
        PutOutcome::AlreadyExists(existing) => {
            // Race or re-registration: the existing assignment takes
            // precedence over the newly declared jurisdiction.
            if existing != region {
                warn!(
                    user_id = %user_id,
                    assigned = %existing,
                    declared = %region,
                    "Re-registration declared a different region; keeping existing assignment"
                );
            }
            Ok(SignupDecision {
                user_id,
                region: existing,
                newly_assigned: false,
            })
        }
    }
}
