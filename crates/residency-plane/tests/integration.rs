//! Integration Tests for the Residency Plane
//!
//! These tests exercise the two lifecycle gates end to end against the
//! in-memory store:
//! - Registration: region assignment from the declared jurisdiction
//! - Registration idempotence: the first assignment always wins
//! - Admission: same-region pass, cross-region rejection, fail-closed
//!   behavior for unknown identities

use std::time::Duration;

use residency_core::{RegionCode, RegionMap, ResidencyError, UserId};
use residency_plane::{admit, register, LookupGrace, MemoryStore, ResidencyStore, RetryPolicy};

// =============================================================================
// Test Helpers
// =============================================================================

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
    }
}

// =============================================================================
// Registration Gate
// =============================================================================

#[tokio::test]
async fn test_registration_records_resolved_region() {
    let store = MemoryStore::new();
    let regions = RegionMap::default_mapping();

    let decision = register(&store, &regions, &fast_retry(), "a@x.com", "Australia")
        .await
        .unwrap();

    assert!(decision.newly_assigned);
    assert_eq!(decision.region, RegionCode::from("ap-southeast-2"));
    assert_eq!(decision.user_id, UserId::derive("a@x.com"));

    let stored = store.record(&decision.user_id).await.unwrap().unwrap();
    assert_eq!(stored.region, RegionCode::from("ap-southeast-2"));
}

#[tokio::test]
async fn test_registration_is_idempotent() {
    let store = MemoryStore::new();
    let regions = RegionMap::default_mapping();

    let first = register(&store, &regions, &fast_retry(), "a@x.com", "Australia")
        .await
        .unwrap();
    assert!(first.newly_assigned);

    // A retry (same declared jurisdiction) converges on the same region
    let second = register(&store, &regions, &fast_retry(), "a@x.com", "Australia")
        .await
        .unwrap();
    assert!(!second.newly_assigned);
    assert_eq!(second.region, first.region);
}

#[tokio::test]
async fn test_re_registration_keeps_existing_assignment() {
    let store = MemoryStore::new();
    let regions = RegionMap::default_mapping();

    register(&store, &regions, &fast_retry(), "a@x.com", "Australia")
        .await
        .unwrap();

    // Re-registering under a different jurisdiction is accepted silently,
    // but the pre-existing home region takes precedence
    let decision = register(&store, &regions, &fast_retry(), "a@x.com", "United States")
        .await
        .unwrap();
    assert!(!decision.newly_assigned);
    assert_eq!(decision.region, RegionCode::from("ap-southeast-2"));

    let stored = store.get_region(&UserId::derive("a@x.com")).await.unwrap();
    assert_eq!(stored, Some(RegionCode::from("ap-southeast-2")));
}

#[tokio::test]
async fn test_unsupported_jurisdiction_writes_nothing() {
    let store = MemoryStore::new();
    let regions = RegionMap::default_mapping();

    let result = register(&store, &regions, &fast_retry(), "a@x.com", "Mars").await;
    assert_eq!(
        result,
        Err(ResidencyError::UnsupportedJurisdiction("Mars".into()))
    );

    // Fail closed: no record may exist after a refused registration
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_email_canonicalization_shared_across_gates() {
    let store = MemoryStore::new();
    let regions = RegionMap::default_mapping();

    register(&store, &regions, &fast_retry(), "A@X.COM ", "Australia")
        .await
        .unwrap();

    // The admission gate derives the same id from the differently-spelled
    // address and finds the record
    let admitted = admit(
        &store,
        &fast_retry(),
        &LookupGrace::none(),
        "a@x.com",
        &RegionCode::from("ap-southeast-2"),
    )
    .await
    .unwrap();
    assert_eq!(admitted, RegionCode::from("ap-southeast-2"));
}

// =============================================================================
// Admission Gate
// =============================================================================

#[tokio::test]
async fn test_admission_passes_in_home_region() {
    let store = MemoryStore::new();
    let regions = RegionMap::default_mapping();

    register(&store, &regions, &fast_retry(), "a@x.com", "Australia")
        .await
        .unwrap();

    let admitted = admit(
        &store,
        &fast_retry(),
        &LookupGrace::none(),
        "a@x.com",
        &RegionCode::from("ap-southeast-2"),
    )
    .await
    .unwrap();
    assert_eq!(admitted, RegionCode::from("ap-southeast-2"));
}

#[tokio::test]
async fn test_admission_rejects_cross_region() {
    let store = MemoryStore::new();
    let regions = RegionMap::default_mapping();

    register(&store, &regions, &fast_retry(), "a@x.com", "Australia")
        .await
        .unwrap();

    // The spec scenario: registered at ap-southeast-2, attempt at us-east-2
    let result = admit(
        &store,
        &fast_retry(),
        &LookupGrace::none(),
        "a@x.com",
        &RegionCode::from("us-east-2"),
    )
    .await;

    assert_eq!(
        result,
        Err(ResidencyError::WrongRegion {
            assigned: RegionCode::from("ap-southeast-2"),
            current: RegionCode::from("us-east-2"),
        })
    );
}

#[tokio::test]
async fn test_admission_fails_closed_without_record() {
    let store = MemoryStore::new();

    let result = admit(
        &store,
        &fast_retry(),
        &LookupGrace::none(),
        "stranger@x.com",
        &RegionCode::from("eu-west-1"),
    )
    .await;

    assert_eq!(result, Err(ResidencyError::NoResidencyRecord));
}

#[tokio::test]
async fn test_admission_is_read_only() {
    let store = MemoryStore::new();

    let _ = admit(
        &store,
        &fast_retry(),
        &LookupGrace::default(),
        "stranger@x.com",
        &RegionCode::from("eu-west-1"),
    )
    .await;

    // A rejected admission must never have created a record
    assert!(store.is_empty());
}
