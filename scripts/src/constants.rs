//! Constants used in the deploy scripts

/// Default RPC endpoint, a local hardhat or anvil node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Default network name, used to pick the deployment registry folder
pub const DEFAULT_NETWORK: &str = "localhost";

/// Network names considered local dev chains
pub const LOCAL_NETWORKS: [&str; 2] = ["localhost", "hardhat"];

/// Chain ids of the local dev chains (hardhat, anvil / ganache)
pub const LOCAL_CHAIN_IDS: [u64; 2] = [31337, 1337];

/// First prefunded account of the hardhat / anvil dev mnemonic.
/// Only ever used on local networks.
pub const LOCAL_DEV_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Default folder holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default folder holding the per network deployment records
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// Name of the file storing the chain id of a deployment folder
pub const CHAIN_ID_FILE: &str = ".chainId";

/// Name of the named account used to deploy
pub const DEPLOYER_ACCOUNT: &str = "deployer";

/// The token contract deployed by the scripts
pub const ERC20_TEST: &str = "ERC20Test";

/// The greeting contract, deployed beforehand
pub const YOUR_CONTRACT: &str = "YourContract";

/// Tag of the ERC20Test deploy task
pub const ERC20_TEST_TAG: &str = "ERC20LYC202330550952";
