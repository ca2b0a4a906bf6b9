// src/paymaster.rs
use std::time::{SystemTime, UNIX_EPOCH};

use ethers::types::{Address, Bytes, H256, U256};
use tracing::{debug, info};

use crate::encoding;
use crate::error::{EncodingError, PaymasterError};
use crate::signer::PaymasterSigner;
use crate::types::{PaymasterAndData, PaymasterResponse, SponsorshipContext, UserOperation};

/// Default validity window handed out with each sponsorship, in seconds.
pub const DEFAULT_VALID_DURATION: u64 = 3600;

/// Computes the paymaster digest for `op`, wraps it as a personal message and
/// signs it. Errors from either stage are returned untouched.
pub fn paymaster_sign<S>(
    op: &UserOperation,
    ctx: &SponsorshipContext,
    signer: &S,
) -> Result<Vec<u8>, PaymasterError>
where
    S: PaymasterSigner + ?Sized,
{
    let hash = encoding::paymaster_hash(op, ctx)?;
    let message_hash = encoding::to_eth_signed_message_hash(hash);
    debug!(?hash, ?message_hash, sender = ?op.sender, "signing paymaster hash");
    Ok(signer.sign_hash(message_hash.as_bytes())?)
}

impl UserOperation {
    /// Inner digest committed to by the paymaster signature.
    pub fn paymaster_hash(&self, ctx: &SponsorshipContext) -> Result<H256, EncodingError> {
        encoding::paymaster_hash(self, ctx)
    }

    pub fn paymaster_sign<S>(
        &self,
        ctx: &SponsorshipContext,
        signer: &S,
    ) -> Result<Vec<u8>, PaymasterError>
    where
        S: PaymasterSigner + ?Sized,
    {
        paymaster_sign(self, ctx, signer)
    }
}

/// Verifying paymaster: hands out signed `paymasterAndData` for any operation
/// it is asked to sponsor.
pub struct Paymaster<S> {
    signer: S,
    pub paymaster_address: Address,
    chain_id: U256,
    valid_duration: u64, // The validity time window in seconds
}

impl<S: PaymasterSigner> Paymaster<S> {
    /// Uses the signer's own address as the paymaster address.
    pub fn new(signer: S, chain_id: U256) -> Self {
        let paymaster_address = signer.address();
        info!("Initialized paymaster with address: {:?}", paymaster_address);
        Self {
            signer,
            paymaster_address,
            chain_id,
            valid_duration: DEFAULT_VALID_DURATION,
        }
    }

    /// Signs on behalf of a paymaster contract whose address differs from the
    /// signer's (the usual deployment: the contract trusts an off-chain key).
    pub fn with_paymaster_address(mut self, paymaster_address: Address) -> Self {
        self.paymaster_address = paymaster_address;
        self
    }

    pub fn with_valid_duration(mut self, seconds: u64) -> Self {
        self.valid_duration = seconds;
        self
    }

    pub fn chain_id(&self) -> U256 {
        self.chain_id
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    // Sign a user operation to sponsor it
    pub fn sponsor(&self, user_op: &UserOperation) -> Result<PaymasterResponse, PaymasterError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| PaymasterError::InvalidParameters(e.to_string()))?
            .as_secs();
        self.sponsor_at(user_op, now)
    }

    /// Sponsors `user_op` for `[now, now + valid_duration]`.
    pub fn sponsor_at(
        &self,
        user_op: &UserOperation,
        now: u64,
    ) -> Result<PaymasterResponse, PaymasterError> {
        let valid_after = now;
        let valid_until = now.checked_add(self.valid_duration).ok_or_else(|| {
            PaymasterError::InvalidParameters("validity window overflows".to_string())
        })?;

        let paymaster_and_data = self.sign_paymaster_data(user_op, valid_until, valid_after)?;
        info!(
            sender = ?user_op.sender,
            valid_until,
            valid_after,
            "Sponsored user operation"
        );

        Ok(PaymasterResponse {
            paymaster_and_data: paymaster_and_data.encode(),
        })
    }

    /// Signs the operation for an explicit validity window.
    pub fn sign_paymaster_data(
        &self,
        user_op: &UserOperation,
        valid_until: u64,
        valid_after: u64,
    ) -> Result<PaymasterAndData, PaymasterError> {
        let ctx = SponsorshipContext::new(
            self.paymaster_address,
            self.chain_id,
            valid_until,
            valid_after,
        );
        let signature = paymaster_sign(user_op, &ctx, &self.signer)?;

        Ok(PaymasterAndData {
            paymaster: self.paymaster_address,
            valid_until,
            valid_after,
            signature: Bytes::from(signature),
        })
    }
}
