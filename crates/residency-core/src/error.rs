//! Error types for the residency registry

use thiserror::Error;

use crate::region::RegionCode;

/// Result type alias using ResidencyError
pub type Result<T> = std::result::Result<T, ResidencyError>;

/// Errors that can occur in the residency registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResidencyError {
    /// Declared jurisdiction has no region mapping; registration is refused
    /// rather than defaulting to some region
    #[error("Unsupported jurisdiction: '{0}' has no assigned region")]
    UnsupportedJurisdiction(String),

    /// Region code has no jurisdiction mapping (inverse lookup)
    #[error("Unknown region: '{0}' has no assigned jurisdiction")]
    UnknownRegion(String),

    /// Jurisdiction map could not be constructed
    #[error("Invalid region map: {0}")]
    InvalidRegionMap(String),

    /// Authentication attempted for an identity with no recorded region.
    /// Fail closed: a user without a residency record cannot authenticate.
    #[error("No residency record exists for this identity")]
    NoResidencyRecord,

    /// Authentication attempted from a region other than the recorded one
    #[error("Account is associated with region '{assigned}', not '{current}'")]
    WrongRegion {
        /// The user's recorded home region
        assigned: RegionCode,
        /// The region handling the current request
        current: RegionCode,
    },

    /// The residency store could not be reached after retries were exhausted
    #[error("Residency store unavailable: {0}")]
    StoreUnavailable(String),

    /// A required attribute was missing from the identity-provider event
    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),
}
