// src/rpc.rs
use std::sync::Arc;

use ethers::types::Address;
use jsonrpsee::core::{async_trait, RpcResult};
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::error::{ErrorObject, ErrorObjectOwned};
use tracing::{debug, error, info};

use crate::error::PaymasterError;
use crate::paymaster::Paymaster;
use crate::signer::PaymasterSigner;
use crate::types::{PaymasterResponse, UserOperation};

/// JSON-RPC error code for any paymaster-side failure.
pub const PAYMASTER_ERROR_CODE: i32 = -32000;

// Define the RPC interface
#[rpc(server, namespace = "pm")]
pub trait PaymasterRpc {
    /// Requests the paymaster to sponsor a user operation. The optional entry
    /// point is accepted for bundler compatibility and is not part of the hash.
    #[method(name = "sponsorUserOperation")]
    async fn sponsor(
        &self,
        user_op: UserOperation,
        entry_point: Option<Address>,
    ) -> RpcResult<PaymasterResponse>;
}

pub struct PaymasterRpcImpl<S> {
    paymaster: Arc<Paymaster<S>>,
}

impl<S> PaymasterRpcImpl<S> {
    pub fn new(paymaster: Arc<Paymaster<S>>) -> Self {
        Self { paymaster }
    }
}

pub fn to_rpc_error(e: PaymasterError) -> ErrorObjectOwned {
    ErrorObject::owned(
        PAYMASTER_ERROR_CODE,
        format!("Paymaster error: {}", e),
        None::<()>,
    )
}

#[async_trait]
impl<S> PaymasterRpcServer for PaymasterRpcImpl<S>
where
    S: PaymasterSigner + 'static,
{
    async fn sponsor(
        &self,
        user_op: UserOperation,
        entry_point: Option<Address>,
    ) -> RpcResult<PaymasterResponse> {
        debug!(
            "Received sponsor request for sender: {:?} (entry point {:?})",
            user_op.sender, entry_point
        );

        match self.paymaster.sponsor(&user_op) {
            Ok(response) => {
                info!("Successfully sponsored operation for {:?}", user_op.sender);
                Ok(response)
            }
            Err(e) => {
                error!("Failed to sponsor operation: {}", e);
                Err(to_rpc_error(e).into())
            }
        }
    }
}
