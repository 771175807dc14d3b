//! Base58 and Base58Check encoding/decoding

use crate::error::{KeyError, Result};
use crate::sha256::{CHECKSUM_LEN, checksum};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn alphabet_inv(c: char) -> Option<u8> {
    ALPHABET.iter().position(|&x| char::from(x) == c).map(|i| i as u8)
}

/// Base58 encode bytes. Every leading zero byte becomes a leading '1'.
#[must_use]
pub fn b58encode(bytes: &[u8]) -> String {
    let mut n = BigUint::from_bytes_be(bytes);
    let fifty_eight = BigUint::from(58u32);
    let mut chars = Vec::new();

    while !n.is_zero() {
        let (quotient, remainder) = n.div_rem(&fifty_eight);
        // remainder < 58
        let idx = remainder.to_usize().unwrap_or_default();
        chars.push(ALPHABET[idx]);
        n = quotient;
    }

    let num_leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    chars.extend(std::iter::repeat_n(ALPHABET[0], num_leading_zeros));

    chars.reverse();
    chars.into_iter().map(char::from).collect()
}

/// Base58 decode to bytes. Every leading '1' becomes a leading zero byte.
pub fn b58decode(s: &str) -> Result<Vec<u8>> {
    let fifty_eight = BigUint::from(58u32);
    let mut n = BigUint::zero();

    for c in s.chars() {
        let val = alphabet_inv(c).ok_or(KeyError::InvalidBase58(c))?;
        n = n * &fifty_eight + BigUint::from(val);
    }

    let num_leading_ones = s.chars().take_while(|&c| c == '1').count();
    let mut result = vec![0u8; num_leading_ones];
    if !n.is_zero() {
        result.extend(n.to_bytes_be());
    }
    Ok(result)
}

/// Append the 4-byte HASH256 checksum of `versioned_payload` and Base58 encode.
#[must_use]
pub fn encode_check(versioned_payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(versioned_payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(versioned_payload);
    data.extend_from_slice(&checksum(versioned_payload));
    b58encode(&data)
}

/// Decode a Base58Check string, verify its checksum and return the versioned payload.
pub fn decode_check(s: &str) -> Result<Vec<u8>> {
    let mut data = b58decode(s)?;
    if data.len() < CHECKSUM_LEN {
        return Err(KeyError::InvalidLength {
            expected: CHECKSUM_LEN,
            actual: data.len(),
        });
    }

    let payload_len = data.len() - CHECKSUM_LEN;
    if checksum(&data[..payload_len])[..] != data[payload_len..] {
        return Err(KeyError::ChecksumMismatch);
    }
    data.truncate(payload_len);
    Ok(data)
}
