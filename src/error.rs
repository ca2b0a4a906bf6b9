// src/error.rs
use thiserror::Error;

/// Failure to build the canonical paymaster encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("{field} does not fit in {bits} bits")]
    Overflow { field: &'static str, bits: usize },

    #[error("{field} is not a valid unsigned integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    #[error("digest must be 32 bytes, got {0}")]
    InvalidDigestLength(usize),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    Crypto(String),
}

#[derive(Error, Debug)]
pub enum PaymasterError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
