//! RPC client construction

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{
        fillers::{ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller},
        Identity, Provider, ProviderBuilder, ReqwestProvider,
    },
};
use reqwest::Client;
use tracing::info;

use crate::{config::NetworkConfig, errors::ScriptError};

/// Re-export from alloy recommend filter
type RecommendFiller =
    JoinFill<JoinFill<JoinFill<Identity, GasFiller>, NonceFiller>, ChainIdFiller>;

/// An alloy provider that uses a local private key signer to sign transactions
/// & interfaces with the RPC endpoint over HTTP
pub type RpcProvider = FillProvider<
    JoinFill<RecommendFiller, WalletFiller<EthereumWallet>>,
    ReqwestProvider,
    alloy::transports::http::Http<Client>,
    Ethereum,
>;

/// Build the RPC client bound to the deployer signer, without reaching the node.
///
/// Returns the provider and the deployer address.
pub fn build_rpc_provider(network: &NetworkConfig) -> Result<(RpcProvider, Address), ScriptError> {
    // Create our signer
    let signer = network.signer()?;
    let deployer = signer.address();

    let wallet = EthereumWallet::from(signer);

    // Create our provider with the rpc client + signer
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(network.rpc_url.clone());

    Ok((provider, deployer))
}

/// Build the RPC client and check the node answers.
///
/// Returns the provider, the deployer address and the connected chain id.
pub async fn create_rpc_provider(
    network: &NetworkConfig,
) -> Result<(RpcProvider, Address, u64), ScriptError> {
    let (provider, deployer) = build_rpc_provider(network)?;

    // Fetch chain id, also checks the node is reachable
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!(
        "Build client on network {} (chain ID: {})",
        network.name, chain_id
    );

    Ok((provider, deployer, chain_id))
}
