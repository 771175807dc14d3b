//! Unified error type for key derivation and encoding

use thiserror::Error;

/// Main error type for the btckey library
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Entropy source failed: {0}")]
    EntropyFailure(String),

    #[error("Malformed hex: {0}")]
    MalformedHex(String),

    #[error("Invalid curve parameter: {0}")]
    InvalidCurveParameter(String),

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Private scalar out of range [1, n-1]")]
    InvalidScalar,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid base58 character: {0:?}")]
    InvalidBase58(char),

    #[error("Base58Check checksum mismatch")]
    ChecksumMismatch,

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

impl From<hex::FromHexError> for KeyError {
    fn from(e: hex::FromHexError) -> Self {
        KeyError::MalformedHex(e.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, KeyError>;
