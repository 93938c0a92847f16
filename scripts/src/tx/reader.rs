//! Read only calls to the token and the greeter

use alloy::primitives::{Address, U256};

use crate::{
    errors::ScriptError,
    tx::{
        abi::{IERC20Test, IYourContract},
        client::RpcProvider,
    },
};

/// Identifying metadata of a deployed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Decimals of the base unit
    pub decimals: u8,
    /// Address the metadata was read from
    pub address: Address,
}

/// Read the name, symbol & decimals of a token, one call after the other
pub async fn read_token_metadata(
    contract_address: Address,
    client: RpcProvider,
) -> Result<TokenMetadata, ScriptError> {
    // Build our contract
    let contract = IERC20Test::new(contract_address, client);

    let name = contract
        .name()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        ._0;
    let symbol = contract
        .symbol()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        ._0;
    let decimals = contract
        .decimals()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        ._0;

    Ok(TokenMetadata {
        name,
        symbol,
        decimals,
        address: *contract.address(),
    })
}

/// Get the greeting of the greeter contract
pub async fn read_greeting(
    contract_address: Address,
    client: RpcProvider,
) -> Result<String, ScriptError> {
    let contract = IYourContract::new(contract_address, client);

    let greeting = contract
        .greeting()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(greeting._0)
}

/// Get the token total supply
pub async fn read_total_supply(
    contract_address: Address,
    client: RpcProvider,
) -> Result<U256, ScriptError> {
    let contract = IERC20Test::new(contract_address, client);

    let total_supply = contract
        .totalSupply()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(total_supply._0)
}

/// Get the token balance of an account
pub async fn read_balance(
    contract_address: Address,
    client: RpcProvider,
    account: Address,
) -> Result<U256, ScriptError> {
    let contract = IERC20Test::new(contract_address, client);

    let balance = contract
        .balanceOf(account)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(balance._0)
}

/// Get the amount `spender` may still transfer on behalf of `owner`
pub async fn read_allowance(
    contract_address: Address,
    client: RpcProvider,
    owner: Address,
    spender: Address,
) -> Result<U256, ScriptError> {
    let contract = IERC20Test::new(contract_address, client);

    let allowance = contract
        .allowance(owner, spender)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(allowance._0)
}

/// Get the owner of the token, the only account allowed to mint
pub async fn read_owner(
    contract_address: Address,
    client: RpcProvider,
) -> Result<Address, ScriptError> {
    let contract = IERC20Test::new(contract_address, client);

    let owner = contract
        .owner()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(owner._0)
}
