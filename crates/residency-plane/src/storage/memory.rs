//! In-memory storage backend
//!
//! Default storage implementation using an in-memory map. Suitable for
//! development, tests, and single-instance deployments. Data is lost on
//! restart, and there is no cross-region replication — every caller sees
//! writes immediately.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::info;

use residency_core::{RegionCode, ResidencyRecord, UserId};

use super::{PutOutcome, ResidencyStore, StorageError};

/// In-memory residency store implementation
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<UserId, ResidencyRecord>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held (for readiness reporting and tests)
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ResidencyStore for MemoryStore {
    async fn get_region(&self, user_id: &UserId) -> Result<Option<RegionCode>, StorageError> {
        let records = self.records.read().unwrap();
        Ok(records.get(user_id).map(|r| r.region.clone()))
    }

    async fn put_region_if_absent(
        &self,
        user_id: &UserId,
        region: &RegionCode,
    ) -> Result<PutOutcome, StorageError> {
        // The write lock makes the check-then-insert atomic per store, which
        // is this backend's equivalent of a single-key conditional put.
        let mut records = self.records.write().unwrap();

        if let Some(existing) = records.get(user_id) {
            return Ok(PutOutcome::AlreadyExists(existing.region.clone()));
        }

        info!(user_id = %user_id, region = %region, "Recording residency assignment");
        records.insert(
            user_id.clone(),
            ResidencyRecord::new(user_id.clone(), region.clone()),
        );
        Ok(PutOutcome::Written)
    }

    async fn record(&self, user_id: &UserId) -> Result<Option<ResidencyRecord>, StorageError> {
        let records = self.records.read().unwrap();
        Ok(records.get(user_id).cloned())
    }
}
