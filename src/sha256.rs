//! SHA-256 hash function wrapper and the Base58Check checksum built on it.
//! Uses the sha2 crate for a correct implementation.

use sha2::{Digest, Sha256};

/// Length of the Base58Check checksum in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Compute SHA-256 hash
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Double SHA-256 (used in Bitcoin)
#[must_use]
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// First four bytes of HASH256, appended by Base58Check
#[must_use]
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = hash256(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}
