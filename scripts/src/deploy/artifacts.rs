//! Lookup of the compiled contract artifacts produced by the Solidity toolchain

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{hex, primitives::Bytes};
use json::JsonValue;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::ScriptError;

/// Folder holding the compiler inputs / outputs, never an artifact
const BUILD_INFO_DIR: &str = "build-info";

/// A compiled contract, ready to be deployed
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Name of the contract, as declared in the Solidity source
    pub contract_name: String,
    /// Contract ABI, kept as raw json
    pub abi: JsonValue,
    /// Creation bytecode, without constructor args
    pub bytecode: Bytes,
}

impl Artifact {
    /// Parse a hardhat style artifact json
    pub fn parse(contents: &str) -> Result<Artifact, ScriptError> {
        let parsed = json::parse(contents).map_err(|e| ScriptError::Artifact(e.to_string()))?;

        let contract_name = parsed["contractName"]
            .as_str()
            .ok_or(ScriptError::Artifact(String::from(
                "artifact has no contractName",
            )))?
            .to_string();

        let abi = parsed["abi"].clone();
        if !abi.is_array() {
            return Err(ScriptError::Artifact(format!(
                "artifact of {contract_name} has no abi"
            )));
        }

        let raw_bytecode = parsed["bytecode"].as_str().unwrap_or_default();
        let bytecode = hex::decode(raw_bytecode)
            .map_err(|e| ScriptError::Artifact(format!("{contract_name} bytecode: {e}")))?;
        if bytecode.is_empty() {
            return Err(ScriptError::Artifact(format!(
                "{contract_name} has no bytecode, is it an interface or an abstract contract?"
            )));
        }

        Ok(Artifact {
            contract_name,
            abi,
            bytecode: bytecode.into(),
        })
    }

    /// Creation code of the contract: bytecode followed by the encoded constructor args
    pub fn creation_code(&self, args: &Bytes) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(args);
        code.into()
    }
}

/// Read only access to an artifacts folder
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Root of the artifacts folder
    root: PathBuf,
}

impl ArtifactStore {
    /// Open the artifacts folder at `root`, nothing is read until a lookup
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ArtifactStore { root: root.into() }
    }

    /// Find and parse the artifact of the given contract
    pub fn get(&self, contract_name: &str) -> Result<Artifact, ScriptError> {
        let file_name = format!("{contract_name}.json");
        let path = find_file(&self.root, &file_name).ok_or_else(|| {
            ScriptError::Artifact(format!(
                "no artifact for {} under {}, compile the contracts first",
                contract_name,
                self.root.display()
            ))
        })?;
        debug!("Using artifact {}", path.display());

        let contents =
            fs::read_to_string(&path).map_err(|e| ScriptError::Artifact(e.to_string()))?;
        let artifact = Artifact::parse(&contents)?;
        if artifact.contract_name != contract_name {
            return Err(ScriptError::Artifact(format!(
                "{} holds {} instead of {}",
                path.display(),
                artifact.contract_name,
                contract_name
            )));
        }

        Ok(artifact)
    }
}

/// Walk `root` in file name order for `file_name`, skipping the build info folders
fn find_file(root: &Path, file_name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir() && entry.file_name() == BUILD_INFO_DIR)
        })
        .filter_map(Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
}
