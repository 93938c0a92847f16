//! State changing calls to the token

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, TxHash, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol_types::SolCall,
};
use tracing::{debug, info};

use crate::{
    errors::ScriptError,
    tx::{
        abi::IERC20Test::{
            approveCall, burnCall, mintCall, transferCall, transferFromCall,
            transferOwnershipCall,
        },
        client::RpcProvider,
        reader::{read_allowance, read_balance},
    },
};

/// Summary of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    /// Hash of the transaction
    pub tx_hash: TxHash,
    /// Block it was included in, if the node reports it
    pub block_number: Option<u64>,
    /// Gas paid for it
    pub gas_used: u128,
}

/// Send a contract call and wait for it to be included
async fn send_call<C: SolCall>(
    contract: Address,
    call: &C,
    label: &str,
    client: RpcProvider,
) -> Result<TxOutcome, ScriptError> {
    // Build the tx
    let tx_request = TransactionRequest::default()
        .to(contract)
        .with_call(call)
        .with_value(U256::from(0));

    // Send it
    let pending_tx = client
        .send_transaction(tx_request)
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    info!("Pending {} transaction... {}", label, pending_tx.tx_hash());

    // Wait for the transaction to be included.
    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!(
            "{} transaction {} reverted",
            label, receipt.transaction_hash
        )));
    }
    debug!("{} tx done on block: {:?}", label, receipt.block_number);

    Ok(TxOutcome {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

/// Mint new tokens, only the token owner may do so
pub async fn send_mint(
    contract: Address,
    to: Address,
    amount: U256,
    client: RpcProvider,
) -> Result<TxOutcome, ScriptError> {
    info!("Minting {} tokens to {}", amount, to);
    send_call(contract, &mintCall { to, amount }, "mint", client).await
}

/// Transfer tokens from the deployer to another account
pub async fn send_transfer(
    contract: Address,
    to: Address,
    amount: U256,
    client: RpcProvider,
) -> Result<TxOutcome, ScriptError> {
    info!("Transferring {} tokens to {}", amount, to);
    send_call(contract, &transferCall { to, value: amount }, "transfer", client).await
}

/// Allow `spender` to move tokens on behalf of the deployer
pub async fn send_approve(
    contract: Address,
    spender: Address,
    amount: U256,
    client: RpcProvider,
) -> Result<TxOutcome, ScriptError> {
    info!("Approving {} tokens for spender: {}", amount, spender);
    send_call(
        contract,
        &approveCall {
            spender,
            value: amount,
        },
        "approve",
        client,
    )
    .await
}

/// Burn tokens held by the deployer
pub async fn send_burn(
    contract: Address,
    amount: U256,
    client: RpcProvider,
) -> Result<TxOutcome, ScriptError> {
    info!("Burning {} tokens", amount);
    send_call(contract, &burnCall { amount }, "burn", client).await
}

/// Hand the token over to `new_owner`, the deployer loses the mint right
pub async fn send_transfer_ownership(
    contract: Address,
    new_owner: Address,
    client: RpcProvider,
) -> Result<TxOutcome, ScriptError> {
    info!("Transferring ownership to {}", new_owner);
    send_call(
        contract,
        &transferOwnershipCall {
            newOwner: new_owner,
        },
        "transferOwnership",
        client,
    )
    .await
}

/// Move tokens from `from` to `to`, spending the deployer allowance.
///
/// Balance and allowance are checked up front so a doomed transfer never
/// reaches the chain.
pub async fn send_transfer_from(
    contract: Address,
    from: Address,
    to: Address,
    amount: U256,
    spender: Address,
    client: RpcProvider,
) -> Result<TxOutcome, ScriptError> {
    info!("Starting transferFrom: {} tokens from {} to {}", amount, from, to);

    let balance = read_balance(contract, client.clone(), from).await?;
    info!("From address balance: {}", balance);
    let allowance = read_allowance(contract, client.clone(), from, spender).await?;
    info!("Current allowance for spender {}: {}", spender, allowance);

    check_transfer_from(balance, allowance, amount)?;

    send_call(
        contract,
        &transferFromCall {
            from,
            to,
            value: amount,
        },
        "transferFrom",
        client,
    )
    .await
}

/// Ensure a transferFrom is covered by both the balance and the allowance
pub fn check_transfer_from(
    balance: U256,
    allowance: U256,
    amount: U256,
) -> Result<(), ScriptError> {
    if balance < amount {
        return Err(ScriptError::InsufficientBalance(format!(
            "balance {balance}, required {amount}"
        )));
    }
    if allowance < amount {
        return Err(ScriptError::InsufficientAllowance(format!(
            "current {allowance}, required {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_from_needs_balance_first() {
        let err = check_transfer_from(U256::from(5), U256::from(0), U256::from(10)).unwrap_err();
        assert_eq!(
            err,
            ScriptError::InsufficientBalance("balance 5, required 10".to_string())
        );
    }

    #[test]
    fn transfer_from_needs_allowance() {
        let err =
            check_transfer_from(U256::from(100), U256::from(9), U256::from(10)).unwrap_err();
        assert!(matches!(err, ScriptError::InsufficientAllowance(_)));
    }

    #[test]
    fn ownership_call_matches_ownable() {
        // Selector of OpenZeppelin Ownable.transferOwnership(address)
        assert_eq!(transferOwnershipCall::SELECTOR, [0xf2, 0xfd, 0xe3, 0x8b]);
    }

    #[test]
    fn transfer_from_exact_amounts_pass() {
        assert!(check_transfer_from(U256::from(10), U256::from(10), U256::from(10)).is_ok());
    }
}
