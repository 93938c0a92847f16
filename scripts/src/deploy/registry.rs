//! Per network records of the deployed contracts.
//!
//! Layout: `<deployments>/<network>/<ContractName>.json`, plus a `.chainId`
//! file pinning the folder to a single chain.

use std::{fs, path::PathBuf};

use alloy::{
    hex,
    primitives::{Address, Bytes, TxHash, B256},
};
use json::{object, JsonValue};

use crate::{constants::CHAIN_ID_FILE, errors::ScriptError};

/// A contract deployed on the current network
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    /// Name the contract is recorded under
    pub contract_name: String,
    /// Address of the contract on this network
    pub address: Address,
    /// Contract ABI, empty for contracts registered from an existing address
    pub abi: JsonValue,
    /// Unknown for contracts registered from an existing address
    pub transaction_hash: Option<TxHash>,
    /// Block including the creation tx
    pub block_number: Option<u64>,
    /// Gas paid by the creation tx
    pub gas_used: Option<u128>,
    /// Encoded constructor args
    pub args: Bytes,
    /// keccak256 of the creation code
    pub bytecode_hash: Option<B256>,
}

impl Deployment {
    /// Record for a contract deployed outside of these scripts
    pub fn existing(contract_name: &str, address: Address) -> Self {
        Deployment {
            contract_name: contract_name.to_string(),
            address,
            abi: JsonValue::new_array(),
            transaction_hash: None,
            block_number: None,
            gas_used: None,
            args: Bytes::new(),
            bytecode_hash: None,
        }
    }

    /// Json record, in the hardhat-deploy layout
    fn to_json(&self) -> JsonValue {
        let mut value = object! {
            contractName: self.contract_name.clone(),
            address: format!("{:#x}", self.address),
            abi: self.abi.clone(),
            args: hex::encode_prefixed(&self.args),
        };
        if let Some(tx_hash) = self.transaction_hash {
            value["transactionHash"] = format!("{tx_hash:#x}").into();
        }
        if let Some(block_number) = self.block_number {
            value["receipt"]["blockNumber"] = block_number.into();
        }
        if let Some(gas_used) = self.gas_used {
            value["receipt"]["gasUsed"] = gas_used.to_string().into();
        }
        if let Some(bytecode_hash) = self.bytecode_hash {
            value["bytecodeHash"] = format!("{bytecode_hash:#x}").into();
        }
        value
    }

    /// Read a json record back, checking every field
    fn from_json(contract_name: &str, value: &JsonValue) -> Result<Self, ScriptError> {
        let address = value["address"]
            .as_str()
            .ok_or_else(|| invalid_record(contract_name, "address"))?
            .parse::<Address>()
            .map_err(|_| invalid_record(contract_name, "address"))?;

        let transaction_hash = value["transactionHash"]
            .as_str()
            .map(|raw| raw.parse::<TxHash>())
            .transpose()
            .map_err(|_| invalid_record(contract_name, "transactionHash"))?;

        let gas_used = value["receipt"]["gasUsed"]
            .as_str()
            .map(|raw| raw.parse::<u128>())
            .transpose()
            .map_err(|_| invalid_record(contract_name, "receipt.gasUsed"))?;

        let args = match value["args"].as_str() {
            Some(raw) => hex::decode(raw)
                .map_err(|_| invalid_record(contract_name, "args"))?
                .into(),
            None => Bytes::new(),
        };

        let bytecode_hash = value["bytecodeHash"]
            .as_str()
            .map(|raw| raw.parse::<B256>())
            .transpose()
            .map_err(|_| invalid_record(contract_name, "bytecodeHash"))?;

        Ok(Deployment {
            contract_name: contract_name.to_string(),
            address,
            abi: value["abi"].clone(),
            transaction_hash,
            block_number: value["receipt"]["blockNumber"].as_u64(),
            gas_used,
            args,
            bytecode_hash,
        })
    }
}

/// Error for a record missing a field or holding a malformed one
fn invalid_record(contract_name: &str, field: &str) -> ScriptError {
    ScriptError::DeploymentRegistry(format!(
        "deployment of {contract_name} has an invalid {field}"
    ))
}

/// The deployment folder of one network
#[derive(Debug, Clone)]
pub struct DeploymentRegistry {
    /// `<deployments>/<network>` folder
    dir: PathBuf,
    /// Chain the client is connected to
    chain_id: u64,
}

impl DeploymentRegistry {
    /// Open the folder of a network, created on the first save
    pub fn new(dir: impl Into<PathBuf>, chain_id: u64) -> Self {
        DeploymentRegistry {
            dir: dir.into(),
            chain_id,
        }
    }

    /// Store (or replace) the record of a deployment
    pub fn save(&self, deployment: &Deployment) -> Result<(), ScriptError> {
        self.ensure_chain()?;

        fs::create_dir_all(&self.dir)
            .map_err(|e| ScriptError::DeploymentRegistry(e.to_string()))?;
        let chain_id_path = self.dir.join(CHAIN_ID_FILE);
        if !chain_id_path.exists() {
            fs::write(&chain_id_path, self.chain_id.to_string())
                .map_err(|e| ScriptError::DeploymentRegistry(e.to_string()))?;
        }

        // Write the updated json back to the file
        fs::write(
            self.record_path(&deployment.contract_name),
            json::stringify_pretty(deployment.to_json(), 2),
        )
        .map_err(|e| ScriptError::DeploymentRegistry(e.to_string()))?;

        Ok(())
    }

    /// Get the record of a contract, failing if it was never deployed here
    pub fn get(&self, contract_name: &str) -> Result<Deployment, ScriptError> {
        let record_path = self.record_path(contract_name);
        if !record_path.exists() {
            return Err(ScriptError::ContractNotFound(contract_name.to_string()));
        }
        self.ensure_chain()?;

        let contents = fs::read_to_string(&record_path)
            .map_err(|e| ScriptError::DeploymentRegistry(e.to_string()))?;
        let parsed =
            json::parse(&contents).map_err(|e| ScriptError::DeploymentRegistry(e.to_string()))?;

        Deployment::from_json(contract_name, &parsed)
    }

    /// Refuse to mix deployments of two chains in the same folder
    pub fn ensure_chain(&self) -> Result<(), ScriptError> {
        let chain_id_path = self.dir.join(CHAIN_ID_FILE);
        if !chain_id_path.exists() {
            return Ok(());
        }

        let stored = fs::read_to_string(&chain_id_path)
            .map_err(|e| ScriptError::DeploymentRegistry(e.to_string()))?;
        match stored.trim().parse::<u64>() {
            Ok(stored) if stored == self.chain_id => Ok(()),
            _ => Err(ScriptError::DeploymentRegistry(format!(
                "{} belongs to chain {}, connected to chain {}",
                self.dir.display(),
                stored.trim(),
                self.chain_id
            ))),
        }
    }

    /// Path of the record of a contract
    fn record_path(&self, contract_name: &str) -> PathBuf {
        self.dir.join(format!("{contract_name}.json"))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};

    use super::*;

    fn token_deployment() -> Deployment {
        Deployment {
            contract_name: "ERC20Test".to_string(),
            address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            abi: json::array![object! { "type": "function", "name": "name" }],
            transaction_hash: Some(b256!(
                "8a8b3e5a2f0b7c1b6f4a83d5a9b15d1f3c4f5e6d7c8b9a0f1e2d3c4b5a697887"
            )),
            block_number: Some(1),
            gas_used: Some(1_234_567),
            args: Bytes::new(),
            bytecode_hash: None,
        }
    }

    #[test]
    fn saved_deployment_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DeploymentRegistry::new(dir.path().join("localhost"), 31337);

        let deployment = token_deployment();
        registry.save(&deployment).unwrap();

        assert_eq!(registry.get("ERC20Test").unwrap(), deployment);
        assert_eq!(
            fs::read_to_string(dir.path().join("localhost").join(CHAIN_ID_FILE)).unwrap(),
            "31337"
        );
    }

    #[test]
    fn missing_contract_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DeploymentRegistry::new(dir.path().join("localhost"), 31337);

        assert_eq!(
            registry.get("YourContract").unwrap_err(),
            ScriptError::ContractNotFound("YourContract".to_string())
        );
    }

    #[test]
    fn chain_id_mismatch_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let network_dir = dir.path().join("localhost");
        DeploymentRegistry::new(&network_dir, 31337)
            .save(&token_deployment())
            .unwrap();

        let other_chain = DeploymentRegistry::new(&network_dir, 1);
        assert!(matches!(
            other_chain.get("ERC20Test").unwrap_err(),
            ScriptError::DeploymentRegistry(_)
        ));
        assert!(matches!(
            other_chain.save(&token_deployment()).unwrap_err(),
            ScriptError::DeploymentRegistry(_)
        ));
        assert!(other_chain.ensure_chain().is_err());
        assert!(DeploymentRegistry::new(&network_dir, 31337)
            .ensure_chain()
            .is_ok());
    }

    #[test]
    fn existing_contract_record_has_no_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DeploymentRegistry::new(dir.path(), 1337);
        let greeter = Deployment::existing(
            "YourContract",
            address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
        );
        registry.save(&greeter).unwrap();

        let read = registry.get("YourContract").unwrap();
        assert_eq!(read.address, greeter.address);
        assert_eq!(read.transaction_hash, None);
        assert_eq!(read.block_number, None);
    }
}
