//! Identifier synthesis for records that arrive without an `id`.
//!
//! Content ids are `<prefix>-<source>-<hash>` where `<hash>` is the first
//! [`HASH_HEX_WIDTH`] hex digits of SHA-256 over `"<name>-<source>"`. Two
//! different `(name, source)` pairs can collide on the truncated digest; the
//! aggregator would then treat them as the same record. That risk is
//! accepted; identical `(name, source)` pairs collapse to one record.

use sha2::{Digest, Sha256};

use tome_model::Domain;

/// Source placeholder when a record has no usable citation.
pub const UNKNOWN_SOURCE: &str = "UNKNOWN";

/// Hex digits kept from the digest.
pub const HASH_HEX_WIDTH: usize = 8;

/// Deterministic content-hash id for `(name, source)`.
pub fn content_id(domain: Domain, name: &str, source: Option<&str>) -> String {
    let source = source
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SOURCE);
    let digest = Sha256::digest(format!("{}-{}", name.trim(), source).as_bytes());
    let hex = hex::encode(digest);
    format!("{}-{}-{}", domain.id_prefix(), source, &hex[..HASH_HEX_WIDTH])
}

/// Index-based placeholder (`mo-UNKNOWN-0007`). Not content-derived: the same
/// record at another position gets another id.
pub fn placeholder_id(domain: Domain, index: usize) -> String {
    format!("{}-{UNKNOWN_SOURCE}-{index:04}", domain.id_prefix())
}
