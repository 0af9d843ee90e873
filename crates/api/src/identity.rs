//! Privacy-preserving caller identity.
//!
//! Raw identities (normally the caller's IP address) are reduced to a
//! truncated SHA-256 digest before they reach the store, so the daily
//! unique-caller set never holds a raw address.
//!
//! The digest is unsalted: the same caller maps to the same digest on every
//! request and every day, which is what daily deduplication needs. It also
//! means a lookup table over the IPv4 space can reverse it. The counts are
//! low-stakes and non-adversarial, so this is accepted.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the full digest (64 bits).
pub const DIGEST_LEN: usize = 16;

/// Placeholder identity used when the caller's origin is unknown.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Hash a raw identity into a 16 character lowercase hex digest.
pub fn digest(raw_identity: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_identity.as_bytes());
    let mut hashed = hex::encode(hasher.finalize());
    hashed.truncate(DIGEST_LEN);
    hashed
}
