//! secp256k1 key pairs with WIF and Base58Check address encoding
//!
//! Derives a random private scalar, computes its public point with plain
//! big-integer curve arithmetic, and renders both in the formats wallets
//! exchange: WIF for the private key and a P2PKH address for the public key.
//!
//! ```
//! use btckey::{Network, generate_key_pair, private_to_wif};
//!
//! let pair = generate_key_pair()?;
//! let wif = private_to_wif(&pair.private_key().to_hex())?;
//! assert_eq!(wif, pair.wif(Network::Testnet, false));
//! # Ok::<(), btckey::KeyError>(())
//! ```

pub mod address;
pub mod base58;
pub mod curves;
pub mod error;
pub mod keys;
pub mod ripemd160;
pub mod secp256k1;
pub mod sha256;

pub use error::{KeyError, Result};

pub use address::{
    Network, address_to_hash160, private_to_wif, private_to_wif_for, public_to_address,
    public_to_address_for, wif_to_private,
};
pub use base58::{b58decode, b58encode, decode_check, encode_check};
pub use curves::{Curve, Generator, Point};
pub use keys::{
    KeyPair, PrivateKey, PublicKey, derive_public_key, generate_key_pair, generate_key_pair_with,
    generate_private_key, generate_private_key_with,
};
pub use secp256k1::SECP256K1;
