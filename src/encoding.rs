// src/encoding.rs
//! Canonical paymaster encoding.
//!
//! The verifying paymaster signs over a static ABI tuple of thirteen words:
//!
//! ```text
//! (address sender, uint256 nonce, bytes32 keccak(initCode), bytes32 keccak(callData),
//!  uint256 callGasLimit, uint256 verificationGasLimit, uint256 preVerificationGas,
//!  uint256 maxFeePerGas, uint256 maxPriorityFeePerGas, uint256 chainId,
//!  address paymaster, uint48 validUntil, uint48 validAfter)
//! ```
//!
//! Every member is a single 32-byte slot, so the encoding has no dynamic tail.
use ethers::abi::{self, Token};
use ethers::types::{H256, U256};
use ethers::utils::keccak256;

use crate::error::EncodingError;
use crate::types::{SponsorshipContext, UserOperation};

pub const UINT256_BITS: usize = 256;
pub const UINT48_BITS: usize = 48;

/// Number of 32-byte words in the encoded tuple.
pub const FIELD_COUNT: usize = 13;
pub const ENCODED_LEN: usize = FIELD_COUNT * 32;

/// Prefix used by `eth_sign` / `personal_sign`.
pub const ETH_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Fails if `value` needs more than `bits` bits.
pub fn check_width(field: &'static str, value: U256, bits: usize) -> Result<U256, EncodingError> {
    if value.bits() > bits {
        return Err(EncodingError::Overflow { field, bits });
    }
    Ok(value)
}

/// Parses a decimal or `0x`-prefixed hex integer that must fit in `bits` bits.
///
/// This is where out-of-range inputs such as `2^256` can actually appear, since
/// a `U256` cannot hold them.
pub fn parse_uint(field: &'static str, text: &str, bits: usize) -> Result<U256, EncodingError> {
    let invalid = || EncodingError::InvalidNumber {
        field,
        value: text.to_string(),
    };
    let overflow = EncodingError::Overflow { field, bits };

    let trimmed = text.trim();
    let value = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(digits) => {
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let digits = digits.trim_start_matches('0');
            if digits.is_empty() {
                U256::zero()
            } else if digits.len() > UINT256_BITS / 4 {
                return Err(overflow);
            } else {
                U256::from_str_radix(digits, 16).map_err(|_| invalid())?
            }
        }
        None => {
            if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            U256::from_dec_str(trimmed).map_err(|_| overflow)?
        }
    };

    check_width(field, value, bits)
}

/// Builds the 13-word tuple the paymaster signature commits to.
pub fn paymaster_tokens(
    op: &UserOperation,
    ctx: &SponsorshipContext,
) -> Result<Vec<Token>, EncodingError> {
    // uint256 slots are bounded by `U256` itself; only the uint48 bounds need a check.
    let uint48 = |field, value| check_width(field, value, UINT48_BITS).map(Token::Uint);

    Ok(vec![
        Token::Address(op.sender),
        Token::Uint(op.nonce),
        Token::FixedBytes(keccak256(&op.init_code).to_vec()),
        Token::FixedBytes(keccak256(&op.call_data).to_vec()),
        Token::Uint(op.call_gas_limit),
        Token::Uint(op.verification_gas_limit),
        Token::Uint(op.pre_verification_gas),
        Token::Uint(op.max_fee_per_gas),
        Token::Uint(op.max_priority_fee_per_gas),
        Token::Uint(ctx.chain_id),
        Token::Address(ctx.paymaster),
        uint48("validUntil", ctx.valid_until)?,
        uint48("validAfter", ctx.valid_after)?,
    ])
}

/// ABI-encodes the paymaster tuple. Always [`ENCODED_LEN`] bytes on success.
pub fn encode_paymaster_fields(
    op: &UserOperation,
    ctx: &SponsorshipContext,
) -> Result<Vec<u8>, EncodingError> {
    let tokens = paymaster_tokens(op, ctx)?;
    Ok(abi::encode(&tokens))
}

/// Inner digest: `keccak256` of the encoded paymaster tuple.
pub fn paymaster_hash(op: &UserOperation, ctx: &SponsorshipContext) -> Result<H256, EncodingError> {
    let encoded = encode_paymaster_fields(op, ctx)?;
    Ok(H256::from(keccak256(encoded)))
}

/// Outer digest: `keccak256("\x19Ethereum Signed Message:\n32" ‖ digest)`.
pub fn to_eth_signed_message_hash(digest: H256) -> H256 {
    let len = digest.as_bytes().len().to_string();
    let mut message = Vec::with_capacity(ETH_MESSAGE_PREFIX.len() + len.len() + 32);
    message.extend_from_slice(ETH_MESSAGE_PREFIX.as_bytes());
    message.extend_from_slice(len.as_bytes());
    message.extend_from_slice(digest.as_bytes());
    H256::from(keccak256(message))
}
