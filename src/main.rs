// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use jsonrpsee::server::{ServerBuilder, ServerHandle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use paymaster_signer::config::Args;
use paymaster_signer::rpc::{PaymasterRpcImpl, PaymasterRpcServer};
use paymaster_signer::{Paymaster, PrivateKeySigner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let args = Args::parse();

    let paymaster = Paymaster::new(args.signer()?, args.chain_id()?)
        .with_valid_duration(args.valid_duration);
    info!(
        "Paymaster {:?} signing for chain {}",
        paymaster.paymaster_address,
        paymaster.chain_id()
    );

    let server_addr = args.server_addr()?;
    let paymaster_rpc = PaymasterRpcImpl::new(Arc::new(paymaster));

    info!("Starting ERC-4337 Paymaster RPC server on {}", server_addr);
    let server_handle = start_server(server_addr, paymaster_rpc).await?;

    // Keep the server running until Ctrl+C is pressed
    tokio::signal::ctrl_c().await?;
    server_handle.stop()?;
    info!("Server stopped");

    Ok(())
}

async fn start_server(
    server_addr: SocketAddr,
    paymaster_rpc: PaymasterRpcImpl<PrivateKeySigner>,
) -> anyhow::Result<ServerHandle> {
    let server = ServerBuilder::default().build(server_addr).await?;
    let server_handle = server.start(paymaster_rpc.into_rpc());

    Ok(server_handle)
}
