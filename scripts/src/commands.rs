//! Implementations of the CLI commands

use alloy::primitives::Address;
use tracing::info;

use crate::{
    cli::{
        AllowanceArgs, ApproveArgs, BalanceOfArgs, BurnArgs, DeployArgs, LoadArgs,
        RecipientAmountArgs, TokenArgs, TransferFromArgs, TransferOwnershipArgs,
    },
    constants::ERC20_TEST,
    deploy::registry::Deployment,
    env::RuntimeEnvironment,
    errors::ScriptError,
    tasks::run_tasks,
    tx::{
        reader::{read_allowance, read_balance, read_owner, read_token_metadata, read_total_supply},
        sender::{
            send_approve, send_burn, send_mint, send_transfer, send_transfer_from,
            send_transfer_ownership, TxOutcome,
        },
    },
};

/// Run the deploy tasks matching the requested tags
pub async fn run_deploy(args: DeployArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    info!("Deploying contracts...");
    run_tasks(env, &args.tags).await?;
    info!("Deployed with success");

    Ok(())
}

/// Print everything identifying the token
pub async fn token_info(args: TokenArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let token = token_address(&args, env)?;

    let metadata = read_token_metadata(token, env.provider.clone()).await?;
    let total_supply = read_total_supply(token, env.provider.clone()).await?;
    let owner = read_owner(token, env.provider.clone()).await?;

    println!("Name: {}", metadata.name);
    println!("Symbol: {}", metadata.symbol);
    println!("Decimals: {}", metadata.decimals);
    println!("Total supply: {}", total_supply);
    println!("Owner: {}", owner);
    println!("Address: {}", metadata.address);

    Ok(())
}

/// Print the recorded token address, if any
pub fn show_address(env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    match env.contract_address(ERC20_TEST) {
        Ok(address) => println!("Contract address: {}", address),
        Err(ScriptError::ContractNotFound(_)) => println!("No contract loaded"),
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Record a contract deployed elsewhere so the other commands target it
pub fn load_contract(args: LoadArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    info!("Loading {} contract from address: {}", args.contract, args.address);
    env.deployments
        .save(&Deployment::existing(&args.contract, args.address))?;
    println!("Contract loaded successfully: {}", args.address);

    Ok(())
}

/// Print the total supply
pub async fn total_supply(args: TokenArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let token = token_address(&args, env)?;
    let total_supply = read_total_supply(token, env.provider.clone()).await?;
    println!("Total supply: {}", total_supply);

    Ok(())
}

/// Print the balance of an account
pub async fn balance_of(args: BalanceOfArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let balance = read_balance(token, env.provider.clone(), args.account).await?;
    println!("Balance of {}: {}", args.account, balance);

    Ok(())
}

/// Print what a spender may still move for an owner
pub async fn allowance(args: AllowanceArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let allowance = read_allowance(token, env.provider.clone(), args.owner, args.spender).await?;
    println!(
        "Allowance of {} for {}: {}",
        args.spender, args.owner, allowance
    );

    Ok(())
}

/// Mint tokens to a recipient
pub async fn mint(args: RecipientAmountArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let outcome = send_mint(token, args.to, args.amount, env.provider.clone()).await?;
    print_outcome(token, &outcome);

    Ok(())
}

/// Transfer deployer tokens to a recipient
pub async fn transfer(
    args: RecipientAmountArgs,
    env: &RuntimeEnvironment,
) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let outcome = send_transfer(token, args.to, args.amount, env.provider.clone()).await?;
    print_outcome(token, &outcome);

    Ok(())
}

/// Approve a spender for the deployer tokens
pub async fn approve(args: ApproveArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let outcome = send_approve(token, args.spender, args.amount, env.provider.clone()).await?;
    print_outcome(token, &outcome);

    Ok(())
}

/// The deployer spends its own allowance on `from`
pub async fn transfer_from(
    args: TransferFromArgs,
    env: &RuntimeEnvironment,
) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let outcome = send_transfer_from(
        token,
        args.from,
        args.to,
        args.amount,
        env.deployer,
        env.provider.clone(),
    )
    .await?;
    print_outcome(token, &outcome);

    Ok(())
}

/// Burn deployer tokens
pub async fn burn(args: BurnArgs, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let outcome = send_burn(token, args.amount, env.provider.clone()).await?;
    print_outcome(token, &outcome);

    Ok(())
}

/// Hand the token over to a new owner
pub async fn transfer_ownership(
    args: TransferOwnershipArgs,
    env: &RuntimeEnvironment,
) -> Result<(), ScriptError> {
    let token = token_address(&args.token, env)?;
    let outcome = send_transfer_ownership(token, args.new_owner, env.provider.clone()).await?;
    print_outcome(token, &outcome);
    println!("New owner: {}", args.new_owner);

    Ok(())
}

/// Explicit token address, else the recorded deployment
fn token_address(args: &TokenArgs, env: &RuntimeEnvironment) -> Result<Address, ScriptError> {
    match args.token {
        Some(token) => Ok(token),
        None => env.contract_address(ERC20_TEST),
    }
}

/// Print the receipt summary of a token write
fn print_outcome(token: Address, outcome: &TxOutcome) {
    println!("Transaction hash: {}", outcome.tx_hash);
    if let Some(block_number) = outcome.block_number {
        println!("Block number: {}", block_number);
    }
    println!("Gas used: {}", outcome.gas_used);
    println!("Contract address: {}", token);
}
