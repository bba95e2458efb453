//! The residency record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::region::RegionCode;

/// A user's home-region assignment.
///
/// Created exactly once by the registration gate and never mutated: the
/// `region` of a given `user_id` is write-once for the lifetime of the
/// record. Later writes to the same key are no-ops at the store. Deletion is
/// an administrative operation outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidencyRecord {
    /// Pseudonymous identifier derived from the verified email. Primary key.
    pub user_id: UserId,
    /// The deployment region the user was registered under
    pub region: RegionCode,
    /// When the assignment was made. Audit only, not used for correctness.
    pub created_at: DateTime<Utc>,
}

impl ResidencyRecord {
    /// Create a record stamped with the current time
    pub fn new(user_id: UserId, region: RegionCode) -> Self {
        ResidencyRecord {
            user_id,
            region,
            created_at: Utc::now(),
        }
    }
}
