//! Storage abstraction for the residency registry
//!
//! This module provides a trait-based abstraction over the replicated
//! key-value table that holds residency records, enabling both in-memory
//! (default) and persistent (PostgreSQL) backends.
//!
//! The table is the single source of truth shared by every regional
//! deployment. The contract deliberately exposes only a point lookup and a
//! single-key conditional write: region assignment is a consensus-free
//! "first writer wins" race resolved by the backend's own atomic
//! conditional-write primitive, never by application-level locking. Reads
//! are not read-your-writes across regions; callers must tolerate eventual
//! visibility.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod retry;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
pub use retry::{with_retry, RetryPolicy};

use async_trait::async_trait;
use std::fmt::Debug;

use residency_core::{RegionCode, ResidencyRecord, UserId};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl StorageError {
    /// Whether a retry with backoff could plausibly succeed.
    ///
    /// Transient network and throttling failures are retryable; anything the
    /// backend rejected outright is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Connection(_))
    }
}

/// Outcome of a conditional write to the residency table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was created; this caller won the assignment race
    Written,
    /// A record already existed; carries the previously assigned region.
    /// Not an error — the existing assignment takes precedence.
    AlreadyExists(RegionCode),
}

/// Storage backend trait for the residency table
///
/// Implementations must be thread-safe and support concurrent access.
/// `put_region_if_absent` must be atomic per key at the storage layer so
/// that concurrent registrations for the same identity can never record two
/// different regions.
#[async_trait]
pub trait ResidencyStore: Send + Sync + Debug {
    /// Point lookup of a user's assigned region.
    ///
    /// Eventually consistent across regions: `None` may mean "not yet
    /// visible here" shortly after a write elsewhere.
    async fn get_region(&self, user_id: &UserId) -> Result<Option<RegionCode>, StorageError>;

    /// Conditional write: create the record only if no record exists for
    /// this key. First writer wins; all later writers observe
    /// [`PutOutcome::AlreadyExists`] with the recorded region.
    async fn put_region_if_absent(
        &self,
        user_id: &UserId,
        region: &RegionCode,
    ) -> Result<PutOutcome, StorageError>;

    /// Full record lookup, including the audit timestamp
    async fn record(&self, user_id: &UserId) -> Result<Option<ResidencyRecord>, StorageError>;
}
