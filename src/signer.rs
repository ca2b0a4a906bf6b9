// src/signer.rs
//! Digest signers used to co-sign user operations.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ethers::core::k256::ecdsa::SigningKey;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;

use crate::error::SigningError;

pub const DIGEST_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 65;

/// Added to the secp256k1 recovery id (0 or 1) so `v` is 27 or 28.
const LEGACY_V_OFFSET: u8 = 27;

/// Something that can sign a 32-byte digest on behalf of the paymaster.
///
/// Implementations must reject digests that are not exactly [`DIGEST_LEN`]
/// bytes and must return exactly [`SIGNATURE_LEN`] bytes (`r ‖ s ‖ v`) on
/// success. Whether signatures are deterministic is up to the implementation.
pub trait PaymasterSigner: Send + Sync {
    /// Address that signatures recover to.
    fn address(&self) -> Address;

    fn sign_hash(&self, digest: &[u8]) -> Result<Vec<u8>, SigningError>;
}

impl<S: PaymasterSigner + ?Sized> PaymasterSigner for &S {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn sign_hash(&self, digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        (**self).sign_hash(digest)
    }
}

impl<S: PaymasterSigner + ?Sized> PaymasterSigner for Box<S> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn sign_hash(&self, digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        (**self).sign_hash(digest)
    }
}

impl<S: PaymasterSigner + ?Sized> PaymasterSigner for Arc<S> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn sign_hash(&self, digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        (**self).sign_hash(digest)
    }
}

/// Signs with an in-memory secp256k1 key.
///
/// The key is never mutated after construction, so one instance can be shared
/// across threads behind an `Arc`. Nonces are RFC 6979 deterministic: the same
/// digest always yields the same signature.
#[derive(Clone)]
pub struct PrivateKeySigner {
    wallet: LocalWallet,
}

impl PrivateKeySigner {
    pub fn new(wallet: LocalWallet) -> Self {
        Self { wallet }
    }

    /// Parses a 32-byte hex private key, with or without `0x`.
    pub fn from_hex(key: &str) -> Result<Self, SigningError> {
        let key = key.trim();
        let key = key
            .strip_prefix("0x")
            .or_else(|| key.strip_prefix("0X"))
            .unwrap_or(key);
        let bytes = hex::decode(key).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(SigningError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        Ok(Self::new(LocalWallet::from(signing_key)))
    }
}

impl FromStr for PrivateKeySigner {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Keeps key material out of logs.
impl fmt::Debug for PrivateKeySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeySigner")
            .field("address", &self.wallet.address())
            .finish()
    }
}

impl PaymasterSigner for PrivateKeySigner {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    fn sign_hash(&self, digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        if digest.len() != DIGEST_LEN {
            return Err(SigningError::InvalidDigestLength(digest.len()));
        }

        let (signature, recovery_id) = self
            .wallet
            .signer()
            .sign_prehash_recoverable(digest)
            .map_err(|e| SigningError::Crypto(e.to_string()))?;

        let mut out = Vec::with_capacity(SIGNATURE_LEN);
        out.extend_from_slice(&signature.to_bytes());
        out.push(recovery_id.to_byte() + LEGACY_V_OFFSET);
        Ok(out)
    }
}
