//! Pseudonymous identity derivation
//!
//! Both gates key the residency table by a stable identifier derived from the
//! user's verified email. The derivation MUST be byte-for-byte identical at
//! registration and at admission: any divergence silently breaks the
//! residency guarantee, because the admission gate would look up a key the
//! registration gate never wrote.
//!
//! The hash is not a secrecy mechanism. It only provides a stable,
//! de-identified primary key.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

/// Stable pseudonymous user identifier: hex-encoded SHA-256 of the
/// canonicalized email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Derive the identifier from a verified email address.
    ///
    /// Canonical form: Unicode NFC, surrounding whitespace trimmed, then
    /// Unicode lowercase. SHA-256 is used for its collision resistance;
    /// two distinct addresses must never map to the same key.
    pub fn derive(email: &str) -> Self {
        let canonical = canonicalize(email);
        let digest = Sha256::digest(canonical.as_bytes());
        UserId(hex::encode(digest))
    }

    /// Wrap an already-derived identifier (e.g. read back from storage)
    pub fn from_raw(raw: impl Into<String>) -> Self {
        UserId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize an email address prior to hashing.
///
/// NFC first so that composed and decomposed spellings of the same address
/// collapse to one form, then trim, then lowercase. Lowercasing the local
/// part exceeds what RFC 5321 strictly permits, but matches identity-provider
/// practice.
pub fn canonicalize(email: &str) -> String {
    email.nfc().collect::<String>().trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(UserId::derive("a@x.com"), UserId::derive("a@x.com"));
    }

    #[test]
    fn case_and_whitespace_variants_collapse() {
        let base = UserId::derive("a@x.com");
        assert_eq!(UserId::derive("A@X.COM"), base);
        assert_eq!(UserId::derive("  a@x.com\n"), base);
    }

    #[test]
    fn nfc_variants_collapse() {
        // U+00E9 (é) vs U+0065 U+0301 (e + combining acute)
        let composed = UserId::derive("r\u{e9}my@x.com");
        let decomposed = UserId::derive("re\u{301}my@x.com");
        assert_eq!(composed, decomposed);
    }

    #[test]
    fn distinct_addresses_diverge() {
        assert_ne!(UserId::derive("a@x.com"), UserId::derive("b@x.com"));
    }

    #[test]
    fn id_is_hex_sha256() {
        let id = UserId::derive("a@x.com");
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
