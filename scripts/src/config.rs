//! Network configuration resolved from the CLI arguments and the environment

use std::path::PathBuf;

use alloy::{hex, primitives::B256, signers::local::PrivateKeySigner};
use reqwest::Url;
use tracing::warn;

use crate::{
    constants::{LOCAL_CHAIN_IDS, LOCAL_DEV_PRIVATE_KEY, LOCAL_NETWORKS},
    errors::ScriptError,
};

/// Everything needed to reach a network and sign for the deployer
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Name of the network, used as the deployment registry folder
    pub name: String,
    /// JSON-RPC endpoint
    pub rpc_url: Url,
    /// Hex encoded private key of the deployer, if any
    pub private_key: Option<String>,
    /// Root folder of the compiled artifacts
    pub artifacts_dir: PathBuf,
    /// Root folder of the deployment records
    pub deployments_dir: PathBuf,
}

impl NetworkConfig {
    /// Build a config, validating the RPC url
    pub fn new(
        name: &str,
        rpc_url: &str,
        private_key: Option<String>,
        artifacts_dir: PathBuf,
        deployments_dir: PathBuf,
    ) -> Result<Self, ScriptError> {
        let rpc_url = rpc_url
            .parse::<Url>()
            .map_err(|e| ScriptError::Configuration(format!("invalid rpc url {rpc_url}: {e}")))?;

        Ok(NetworkConfig {
            name: name.to_string(),
            rpc_url,
            private_key: private_key.filter(|key| !key.trim().is_empty()),
            artifacts_dir,
            deployments_dir,
        })
    }

    /// Whether the network name designates a local dev chain
    pub fn is_local(&self) -> bool {
        LOCAL_NETWORKS.contains(&self.name.as_str())
    }

    /// Folder holding the deployment records of this network
    pub fn deployments_path(&self) -> PathBuf {
        self.deployments_dir.join(&self.name)
    }

    /// Build the deployer signer.
    ///
    /// Local networks fall back to the first prefunded dev account, live
    /// networks require an explicit key.
    pub fn signer(&self) -> Result<PrivateKeySigner, ScriptError> {
        let raw_key = match (&self.private_key, self.is_local()) {
            (Some(key), _) => key.as_str(),
            (None, true) => {
                warn!(
                    "No deployer key configured, using the default dev account on {}",
                    self.name
                );
                LOCAL_DEV_PRIVATE_KEY
            }
            (None, false) => {
                return Err(ScriptError::Configuration(format!(
                    "DEPLOYER_PRIVATE_KEY is required on network {}",
                    self.name
                )))
            }
        };

        let private_key = parse_private_key(raw_key)?;
        PrivateKeySigner::from_bytes(&private_key)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
    }
}

/// Parse a hex private key, with or without the `0x` prefix
pub fn parse_private_key(raw: &str) -> Result<B256, ScriptError> {
    let bytes = hex::decode(raw.trim())
        .map_err(|e| ScriptError::Configuration(format!("malformed private key: {e}")))?;
    if bytes.len() != 32 {
        return Err(ScriptError::Configuration(format!(
            "private key must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(B256::from_slice(&bytes))
}

/// Whether the chain id is one of a local dev chain
pub fn is_local_chain(chain_id: u64) -> bool {
    LOCAL_CHAIN_IDS.contains(&chain_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, private_key: Option<&str>) -> NetworkConfig {
        NetworkConfig::new(
            name,
            "http://127.0.0.1:8545",
            private_key.map(str::to_string),
            PathBuf::from("artifacts"),
            PathBuf::from("deployments"),
        )
        .unwrap()
    }

    #[test]
    fn local_network_falls_back_to_dev_account() {
        let signer = config("localhost", None).signer().unwrap();
        assert_eq!(
            signer.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn live_network_requires_a_key() {
        let err = config("sepolia", None).signer().unwrap_err();
        assert!(matches!(err, ScriptError::Configuration(_)));

        // Blank values from an empty .env entry count as missing
        let err = config("sepolia", Some("  ")).signer().unwrap_err();
        assert!(matches!(err, ScriptError::Configuration(_)));
    }

    #[test]
    fn private_key_accepts_prefix() {
        let bare = parse_private_key(LOCAL_DEV_PRIVATE_KEY).unwrap();
        let prefixed = parse_private_key(&format!("0x{LOCAL_DEV_PRIVATE_KEY}")).unwrap();
        assert_eq!(bare, prefixed);
    }

    #[test]
    fn malformed_private_key_is_rejected() {
        assert!(parse_private_key("0xzz").is_err());
        assert!(parse_private_key("0xdeadbeef").is_err());
    }

    #[test]
    fn invalid_rpc_url_is_rejected() {
        let err = NetworkConfig::new(
            "localhost",
            "not a url",
            None,
            PathBuf::new(),
            PathBuf::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::Configuration(_)));
    }

    #[test]
    fn local_detection() {
        assert!(config("hardhat", None).is_local());
        assert!(!config("mainnet", None).is_local());
        assert!(is_local_chain(31337));
        assert!(!is_local_chain(1));
        assert_eq!(
            config("sepolia", None).deployments_path(),
            PathBuf::from("deployments").join("sepolia")
        );
    }
}
