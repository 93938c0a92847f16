//! Deployment of a compiled contract through the RPC client

use alloy::{
    network::TransactionBuilder,
    primitives::{keccak256, Address, Bytes},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
};
use tracing::{debug, info, warn};

use crate::{
    config::is_local_chain,
    deploy::registry::Deployment,
    env::RuntimeEnvironment,
    errors::ScriptError,
    tx::client::RpcProvider,
};

/// How a contract gets deployed
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Account signing and paying for the creation tx
    pub from: Address,
    /// ABI encoded constructor args, empty when the constructor takes none
    pub args: Bytes,
    /// Log the deployment progress
    pub log: bool,
    /// Ask a local node to mine the creation tx right away, no effect on live networks
    pub auto_mine: bool,
}

/// Deploy the artifact `contract_name` and record it in the deployment registry
pub async fn deploy(
    env: &RuntimeEnvironment,
    contract_name: &str,
    options: DeployOptions,
) -> Result<Deployment, ScriptError> {
    if options.from != env.deployer {
        return Err(ScriptError::Configuration(format!(
            "no signer available for {}",
            options.from
        )));
    }
    // A record that can't be saved must fail before paying for the creation tx
    env.deployments.ensure_chain()?;

    let artifact = env.artifacts.get(contract_name)?;
    let creation_code = artifact.creation_code(&options.args);

    // Predict the contract address
    let predicted_address = predict_contract_address(env.provider.clone(), options.from).await?;
    debug!("{} expected at {}", contract_name, predicted_address);

    // Build the creation tx
    let tx_request = TransactionRequest::default()
        .with_from(options.from)
        .with_deploy_code(creation_code.clone());

    // Send it
    let pending_tx = env
        .provider
        .send_transaction(tx_request)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    if options.log {
        info!(
            "deploying \"{}\" (tx: {})...",
            contract_name,
            pending_tx.tx_hash()
        );
    }

    if should_auto_mine(options.auto_mine, env.chain_id) {
        mine_block(env.provider.clone()).await;
    }

    // Wait for the transaction to be included.
    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "creation tx of {} reverted: {}",
            contract_name, receipt.transaction_hash
        )));
    }
    let address = receipt
        .contract_address
        .ok_or(ScriptError::ContractDeployment(format!(
            "no contract address in the receipt of {}",
            receipt.transaction_hash
        )))?;
    if address != predicted_address {
        warn!(
            "{} deployed at {} instead of the predicted {}",
            contract_name, address, predicted_address
        );
    }

    if options.log {
        info!(
            "deployed \"{}\" at {} with {} gas",
            contract_name, address, receipt.gas_used
        );
    }

    let deployment = Deployment {
        contract_name: contract_name.to_string(),
        address,
        abi: artifact.abi,
        transaction_hash: Some(receipt.transaction_hash),
        block_number: receipt.block_number,
        gas_used: Some(receipt.gas_used),
        args: options.args,
        bytecode_hash: Some(keccak256(&creation_code)),
    };
    env.deployments.save(&deployment)?;

    Ok(deployment)
}

/// Auto mining only makes sense on a local dev chain
pub fn should_auto_mine(auto_mine: bool, chain_id: u64) -> bool {
    auto_mine && is_local_chain(chain_id)
}

/// Ask the local node to mine a block, the receipt wait covers a failure here
async fn mine_block(client: RpcProvider) {
    let params: Vec<u64> = Vec::new();
    match client
        .raw_request::<_, String>("evm_mine".into(), params)
        .await
    {
        Ok(_) => debug!("Mined a block"),
        Err(e) => warn!("evm_mine failed, waiting for the node to mine: {}", e),
    }
}

/// Predict the address of the next contract created by `sender`
async fn predict_contract_address(
    client: RpcProvider,
    sender: Address,
) -> Result<Address, ScriptError> {
    // Get the sender nonce
    let sender_nonce = client
        .get_transaction_count(sender)
        .await
        .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;

    Ok(sender.create(sender_nonce))
}
