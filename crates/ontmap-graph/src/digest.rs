//! Deterministic content digests.
//!
//! Object identities are derived from content, not from the triples that
//! encode it, so the digest must not depend on per-process hash seeds.
//! We use FNV-1a 64-bit:
//!
//! - input: canonical bytes produced by the caller (never `std::hash`
//!   output, which varies across platforms and releases)
//! - output: `"ontfnv1a64:<16 lowercase hex digits>"`
//!
//! This is not a security primitive; it is an identity tool.

/// Prefix used in serialized content ids.
pub const CONTENT_ID_PREFIX: &str = "ontfnv1a64:";

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001b3;

/// Raw FNV-1a 64-bit hash of `bytes`.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for b in bytes {
        hash ^= (*b) as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// `"ontfnv1a64:<hex>"` digest of `bytes`.
pub fn fnv1a64_digest_bytes(bytes: &[u8]) -> String {
    format!("{CONTENT_ID_PREFIX}{:016x}", fnv1a64(bytes))
}

/// Render a raw digest as a content id.
pub fn content_id(digest: u64) -> String {
    format!("{CONTENT_ID_PREFIX}{digest:016x}")
}
