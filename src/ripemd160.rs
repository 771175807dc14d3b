//! RIPEMD-160 hash function wrapper
//! Used in Bitcoin for address generation (HASH160 = RIPEMD160(SHA256(x)))

use crate::sha256::sha256;
use ripemd::{Digest, Ripemd160};

/// Compute RIPEMD-160 hash
#[must_use]
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// HASH160 = RIPEMD160(SHA256(data))
#[must_use]
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
