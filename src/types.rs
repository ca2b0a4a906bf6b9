// src/types.rs
use ethers::abi::{self, Token};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// ERC-4337 (v0.6) user operation as exchanged with bundlers and wallets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperation {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Bytes,
    pub call_data: Bytes,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: Bytes,
    pub signature: Bytes,
}

/// Per-request sponsorship parameters. Never stored on the operation.
///
/// `valid_until` and `valid_after` are unix timestamps that must fit in a
/// `uint48`; they are carried wide so that the encoder can reject bad input
/// instead of truncating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SponsorshipContext {
    pub paymaster: Address,
    pub chain_id: U256,
    pub valid_until: U256,
    pub valid_after: U256,
}

impl SponsorshipContext {
    pub fn new(paymaster: Address, chain_id: U256, valid_until: u64, valid_after: u64) -> Self {
        Self {
            paymaster,
            chain_id,
            valid_until: U256::from(valid_until),
            valid_after: U256::from(valid_after),
        }
    }
}

/// `paymasterAndData` for a verifying paymaster:
/// `paymaster ‖ abi.encode(uint48 validUntil, uint48 validAfter) ‖ signature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymasterAndData {
    pub paymaster: Address,
    pub valid_until: u64,
    pub valid_after: u64,
    pub signature: Bytes,
}

impl PaymasterAndData {
    /// Byte offset of the signature inside the encoded field.
    pub const SIGNATURE_OFFSET: usize = 20 + 64;

    pub fn encode(&self) -> Bytes {
        let mut data = Vec::with_capacity(Self::SIGNATURE_OFFSET + self.signature.len());
        data.extend_from_slice(self.paymaster.as_bytes());
        data.extend_from_slice(&abi::encode(&[
            Token::Uint(U256::from(self.valid_until)),
            Token::Uint(U256::from(self.valid_after)),
        ]));
        data.extend_from_slice(&self.signature);
        Bytes::from(data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterResponse {
    pub paymaster_and_data: Bytes,
}
