// src/config.rs
use std::net::SocketAddr;

use clap::Parser;
use ethers::types::U256;

use crate::encoding::{parse_uint, UINT256_BITS};
use crate::error::PaymasterError;
use crate::paymaster::DEFAULT_VALID_DURATION;
use crate::signer::PrivateKeySigner;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(short, long, env = "PAYMASTER_RPC_ADDR", default_value = "127.0.0.1:8545")]
    pub rpc_server_addr: String,

    /// Hex-encoded secp256k1 key the paymaster signs with.
    #[clap(short, long, env = "PAYMASTER_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Decimal or 0x-prefixed hex.
    #[clap(short, long, env = "PAYMASTER_CHAIN_ID")]
    pub chain_id: String,

    /// Seconds each sponsorship stays valid.
    #[clap(short, long, env = "PAYMASTER_VALID_DURATION", default_value_t = DEFAULT_VALID_DURATION)]
    pub valid_duration: u64,
}

impl Args {
    pub fn server_addr(&self) -> Result<SocketAddr, PaymasterError> {
        self.rpc_server_addr
            .parse()
            .map_err(|e| PaymasterError::InvalidParameters(format!("rpc server address: {}", e)))
    }

    pub fn chain_id(&self) -> Result<U256, PaymasterError> {
        Ok(parse_uint("chainId", &self.chain_id, UINT256_BITS)?)
    }

    pub fn signer(&self) -> Result<PrivateKeySigner, PaymasterError> {
        Ok(self.private_key.parse::<PrivateKeySigner>()?)
    }
}
