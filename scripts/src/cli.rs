//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};

use crate::{
    commands,
    config::NetworkConfig,
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_DIR, DEFAULT_NETWORK, DEFAULT_RPC, ERC20_TEST,
    },
    env::RuntimeEnvironment,
    errors::ScriptError,
};

/// Scripts for deploying the ERC20Test token & operating it
#[derive(Parser)]
#[command(name = "erc20-deploy", version)]
pub struct Cli {
    /// Network name, selects the deployment records folder
    #[arg(short, long, env = "NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// Private key of the deployer, optional on local networks
    #[arg(short, long, env = "DEPLOYER_PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Folder of the compiled contract artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Folder of the deployment records
    #[arg(long, env = "DEPLOYMENTS_DIR", default_value = DEFAULT_DEPLOYMENTS_DIR)]
    pub deployments: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve the network configuration from the parsed arguments
    pub fn network_config(&self) -> Result<NetworkConfig, ScriptError> {
        NetworkConfig::new(
            &self.network,
            &self.rpc_url,
            self.priv_key.clone(),
            self.artifacts.clone(),
            self.deployments.clone(),
        )
    }
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Run the deploy tasks, optionally filtered by tag
    Deploy(DeployArgs),
    /// Print the token metadata
    Info(TokenArgs),
    /// Print the address of the recorded token.
    ///
    /// Only reads the registry, but still needs a reachable RPC node: the
    /// client connects before any command runs.
    Address,
    /// Record an already deployed contract, the token by default.
    ///
    /// Needs a reachable RPC node, its chain id guards the registry folder.
    Load(LoadArgs),
    /// Print the total supply
    TotalSupply(TokenArgs),
    /// Print the token balance of an account
    BalanceOf(BalanceOfArgs),
    /// Print an allowance
    Allowance(AllowanceArgs),
    /// Mint tokens, deployer must own the token
    Mint(RecipientAmountArgs),
    /// Transfer tokens from the deployer
    Transfer(RecipientAmountArgs),
    /// Approve a spender for the deployer tokens
    Approve(ApproveArgs),
    /// Move tokens using the deployer allowance
    TransferFrom(TransferFromArgs),
    /// Burn deployer tokens
    Burn(BurnArgs),
    /// Hand the token ownership, hence the mint right, to another account
    TransferOwnership(TransferOwnershipArgs),
}

impl Command {
    /// Run the command
    pub async fn run(self, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => commands::run_deploy(args, env).await,
            Command::Info(args) => commands::token_info(args, env).await,
            Command::Address => commands::show_address(env),
            Command::Load(args) => commands::load_contract(args, env),
            Command::TotalSupply(args) => commands::total_supply(args, env).await,
            Command::BalanceOf(args) => commands::balance_of(args, env).await,
            Command::Allowance(args) => commands::allowance(args, env).await,
            Command::Mint(args) => commands::mint(args, env).await,
            Command::Transfer(args) => commands::transfer(args, env).await,
            Command::Approve(args) => commands::approve(args, env).await,
            Command::TransferFrom(args) => commands::transfer_from(args, env).await,
            Command::Burn(args) => commands::burn(args, env).await,
            Command::TransferOwnership(args) => commands::transfer_ownership(args, env).await,
        }
    }
}

/// Run the deploy tasks
#[derive(Args)]
pub struct DeployArgs {
    /// Only run the tasks holding one of these tags (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

/// Target token
#[derive(Args)]
pub struct TokenArgs {
    /// Token address, defaults to the recorded ERC20Test deployment
    #[arg(long, value_parser = parse_address)]
    pub token: Option<Address>,
}

/// Record an existing contract
#[derive(Args)]
pub struct LoadArgs {
    /// Address of the deployed contract
    #[arg(value_parser = parse_address)]
    pub address: Address,
    /// Name of the contract, e.g. YourContract for the greeter
    #[arg(long, default_value = ERC20_TEST)]
    pub contract: String,
}

/// Balance lookup
#[derive(Args)]
pub struct BalanceOfArgs {
    /// Account to check
    #[arg(value_parser = parse_address)]
    pub account: Address,
    /// Target token
    #[command(flatten)]
    pub token: TokenArgs,
}

/// Allowance lookup
#[derive(Args)]
pub struct AllowanceArgs {
    /// Owner of the tokens
    #[arg(value_parser = parse_address)]
    pub owner: Address,
    /// Account allowed to spend them
    #[arg(value_parser = parse_address)]
    pub spender: Address,
    /// Target token
    #[command(flatten)]
    pub token: TokenArgs,
}

/// Tokens sent to a recipient, by mint or transfer
#[derive(Args)]
pub struct RecipientAmountArgs {
    /// Receiver of the tokens
    #[arg(value_parser = parse_address)]
    pub to: Address,
    /// Amount in base units
    #[arg(value_parser = parse_amount)]
    pub amount: U256,
    /// Target token
    #[command(flatten)]
    pub token: TokenArgs,
}

/// Allowance granted by the deployer
#[derive(Args)]
pub struct ApproveArgs {
    /// Account allowed to spend the tokens
    #[arg(value_parser = parse_address)]
    pub spender: Address,
    /// Amount in base units
    #[arg(value_parser = parse_amount)]
    pub amount: U256,
    /// Target token
    #[command(flatten)]
    pub token: TokenArgs,
}

/// Transfer spending the deployer allowance
#[derive(Args)]
pub struct TransferFromArgs {
    /// Holder of the tokens
    #[arg(value_parser = parse_address)]
    pub from: Address,
    /// Receiver of the tokens
    #[arg(value_parser = parse_address)]
    pub to: Address,
    /// Amount in base units
    #[arg(value_parser = parse_amount)]
    pub amount: U256,
    /// Target token
    #[command(flatten)]
    pub token: TokenArgs,
}

/// Tokens burnt from the deployer balance
#[derive(Args)]
pub struct BurnArgs {
    /// Amount in base units
    #[arg(value_parser = parse_amount)]
    pub amount: U256,
    /// Target token
    #[command(flatten)]
    pub token: TokenArgs,
}

/// New token owner
#[derive(Args)]
pub struct TransferOwnershipArgs {
    /// Account receiving the ownership
    #[arg(value_parser = parse_address)]
    pub new_owner: Address,
    /// Target token
    #[command(flatten)]
    pub token: TokenArgs,
}

/// Checksummed or lowercase hex address, with the `0x` prefix
fn parse_address(raw: &str) -> Result<Address, String> {
    raw.parse::<Address>()
        .map_err(|e| format!("invalid address {raw}: {e}"))
}

/// Decimal, or hex with a `0x` prefix
fn parse_amount(raw: &str) -> Result<U256, String> {
    raw.parse::<U256>()
        .map_err(|e| format!("invalid amount {raw}: {e}"))
}
