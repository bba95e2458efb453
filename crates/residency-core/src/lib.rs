//! Residency registry domain model
//!
//! This crate holds the pure, storage-free parts of the data-residency core:
//!
//! - [`identity`]: deterministic derivation of the pseudonymous user id from
//!   a verified email (shared by both gates — the derivation must never
//!   diverge between registration and admission)
//! - [`region`]: the injectable jurisdiction ↔ region mapping and resolver
//! - [`record`]: the write-once residency record
//! - [`error`]: the error taxonomy shared across the registry
//!
//! The replicated store, the lifecycle gates, and the HTTP surface live in
//! `residency-plane`.

pub mod error;
pub mod identity;
pub mod record;
pub mod region;

pub use error::{ResidencyError, Result};
pub use identity::UserId;
pub use record::ResidencyRecord;
pub use region::{RegionCode, RegionMap};
