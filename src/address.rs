//! WIF and Base58Check address formatting
//!
//! Both formats are `version byte || payload`, checksummed and Base58
//! encoded. The version byte identifies the [`Network`].

use crate::base58::{decode_check, encode_check};
use crate::error::{KeyError, Result};
use crate::keys::{KEY_LEN, PrivateKey, PublicKey};
use crate::ripemd160::hash160;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Trailing WIF byte marking a key whose public key is used compressed
pub const COMPRESSED_MARKER: u8 = 0x01;

const HASH160_LEN: usize = 20;

/// Bitcoin network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    /// Version byte for WIF private keys
    #[inline]
    pub const fn wif_prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }

    /// Version byte for P2PKH addresses
    #[inline]
    pub const fn address_prefix(self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    pub fn from_wif_prefix(prefix: u8) -> Result<Self> {
        [Network::Mainnet, Network::Testnet]
            .into_iter()
            .find(|net| net.wif_prefix() == prefix)
            .ok_or_else(|| KeyError::UnknownNetwork(format!("WIF version byte 0x{prefix:02x}")))
    }

    pub fn from_address_prefix(prefix: u8) -> Result<Self> {
        [Network::Mainnet, Network::Testnet]
            .into_iter()
            .find(|net| net.address_prefix() == prefix)
            .ok_or_else(|| {
                KeyError::UnknownNetwork(format!("address version byte 0x{prefix:02x}"))
            })
    }
}

impl FromStr for Network {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "bitcoin" => Ok(Network::Mainnet),
            "test" | "testnet" => Ok(Network::Testnet),
            _ => Err(KeyError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encode a private key as WIF
#[must_use]
pub fn encode_wif(private_key: &PrivateKey, net: Network, compressed: bool) -> String {
    let mut payload = Zeroizing::new(Vec::with_capacity(2 + KEY_LEN));
    payload.push(net.wif_prefix());
    payload.extend_from_slice(private_key.as_bytes());
    if compressed {
        payload.push(COMPRESSED_MARKER);
    }
    encode_check(&payload)
}

/// Decode a WIF string into its network, private key and compression flag
pub fn wif_to_private(wif: &str) -> Result<(Network, PrivateKey, bool)> {
    let payload = Zeroizing::new(decode_check(wif)?);

    let (key_bytes, compressed) = match payload.len() {
        33 => (&payload[1..], false),
        34 if payload[33] == COMPRESSED_MARKER => (&payload[1..33], true),
        34 => {
            return Err(KeyError::InvalidFormat(format!(
                "WIF compression marker 0x{:02x}",
                payload[33]
            )));
        }
        actual => {
            return Err(KeyError::InvalidLength {
                expected: 1 + KEY_LEN,
                actual,
            });
        }
    };

    let net = Network::from_wif_prefix(payload[0])?;
    Ok((net, PrivateKey::from_bytes(key_bytes)?, compressed))
}

/// Convert a public key hash to a P2PKH address
#[must_use]
pub fn hash160_to_address(pkb_hash: &[u8; HASH160_LEN], net: Network) -> String {
    let mut ver_pkb_hash = Vec::with_capacity(1 + HASH160_LEN);
    ver_pkb_hash.push(net.address_prefix());
    ver_pkb_hash.extend_from_slice(pkb_hash);
    encode_check(&ver_pkb_hash)
}

/// Extract the network and public key hash from a Base58Check address
pub fn address_to_hash160(address: &str) -> Result<(Network, [u8; HASH160_LEN])> {
    let payload = decode_check(address)?;
    if payload.len() != 1 + HASH160_LEN {
        return Err(KeyError::InvalidLength {
            expected: 1 + HASH160_LEN,
            actual: payload.len(),
        });
    }

    let net = Network::from_address_prefix(payload[0])?;
    let mut pkb_hash = [0u8; HASH160_LEN];
    pkb_hash.copy_from_slice(&payload[1..]);
    Ok((net, pkb_hash))
}

/// Hex private key to uncompressed testnet WIF
pub fn private_to_wif(hex_private_key: &str) -> Result<String> {
    private_to_wif_for(Network::Testnet, false, hex_private_key)
}

/// Hex private key to WIF for `net`
pub fn private_to_wif_for(net: Network, compressed: bool, hex_private_key: &str) -> Result<String> {
    let private_key = PrivateKey::from_hex(hex_private_key)?;
    Ok(encode_wif(&private_key, net, compressed))
}

/// Hex SEC1 public key to testnet address
pub fn public_to_address(hex_public_key: &str) -> Result<String> {
    public_to_address_for(Network::Testnet, hex_public_key)
}

/// Hex SEC1 public key to an address for `net`.
///
/// The key must decode to a point on the curve. The address commits to the
/// bytes as given, so compressed and uncompressed input give different addresses.
pub fn public_to_address_for(net: Network, hex_public_key: &str) -> Result<String> {
    let sec = hex::decode(hex_public_key)?;
    PublicKey::decode(&sec)?;
    Ok(hash160_to_address(&hash160(&sec), net))
}
