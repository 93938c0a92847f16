//! The runtime environment handed to every deploy task and command

use alloy::primitives::Address;

use crate::{
    config::NetworkConfig,
    constants::DEPLOYER_ACCOUNT,
    deploy::{artifacts::ArtifactStore, registry::DeploymentRegistry},
    errors::ScriptError,
    tx::client::{create_rpc_provider, RpcProvider},
};

/// Connected client plus the artifact & deployment stores of the network
pub struct RuntimeEnvironment {
    /// RPC client signing with the deployer key
    pub provider: RpcProvider,
    /// Network the client is connected to
    pub network: NetworkConfig,
    /// Chain id reported by the node
    pub chain_id: u64,
    /// Address of the signer, resolved as the `deployer` named account
    pub deployer: Address,
    /// Compiled contracts
    pub artifacts: ArtifactStore,
    /// Deployment records of this network
    pub deployments: DeploymentRegistry,
}

impl RuntimeEnvironment {
    /// Connect to the network and open its stores
    pub async fn connect(network: NetworkConfig) -> Result<Self, ScriptError> {
        let (provider, deployer, chain_id) = create_rpc_provider(&network).await?;

        let artifacts = ArtifactStore::new(network.artifacts_dir.clone());
        let deployments = DeploymentRegistry::new(network.deployments_path(), chain_id);

        Ok(RuntimeEnvironment {
            provider,
            network,
            chain_id,
            deployer,
            artifacts,
            deployments,
        })
    }

    /// Resolve a named account
    pub fn named_account(&self, name: &str) -> Result<Address, ScriptError> {
        resolve_named_account(name, self.deployer)
    }

    /// Address of a contract deployed on this network
    pub fn contract_address(&self, contract_name: &str) -> Result<Address, ScriptError> {
        Ok(self.deployments.get(contract_name)?.address)
    }
}

/// Only the deployer account is configured
fn resolve_named_account(name: &str, deployer: Address) -> Result<Address, ScriptError> {
    match name {
        DEPLOYER_ACCOUNT => Ok(deployer),
        _ => Err(ScriptError::Configuration(format!(
            "unknown named account: {name}"
        ))),
    }
}
