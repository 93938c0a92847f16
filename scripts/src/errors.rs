//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Invalid or missing configuration (network, keys, named accounts)
    Configuration(String),
    /// Error when creating the client
    ClientInitialization(String),
    /// Error when fetching the nonce to deploy a contract
    NonceFetching(String),
    /// Error reading a compiled contract artifact
    Artifact(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// The named contract has no deployment on the current network
    ContractNotFound(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error reading or writing the deployment registry
    DeploymentRegistry(String),
    /// The sender doesn't hold enough tokens for a transfer
    InsufficientBalance(String),
    /// The spender allowance doesn't cover a transfer
    InsufficientAllowance(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Configuration(s) => write!(f, "invalid configuration: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::NonceFetching(s) => {
                write!(f, "error during nonce fetching for client signing: {}", s)
            }
            ScriptError::Artifact(s) => write!(f, "error reading contract artifact: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractNotFound(s) => {
                write!(f, "no deployment found for contract: {}", s)
            }
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::DeploymentRegistry(s) => {
                write!(f, "error accessing deployment registry: {}", s)
            }
            ScriptError::InsufficientBalance(s) => write!(f, "insufficient balance: {}", s),
            ScriptError::InsufficientAllowance(s) => write!(f, "insufficient allowance: {}", s),
        }
    }
}

impl Error for ScriptError {}

#[cfg(test)]
mod tests {
    use super::ScriptError;

    #[test]
    fn display_carries_context() {
        let err = ScriptError::ContractNotFound("YourContract".to_string());
        assert_eq!(
            err.to_string(),
            "no deployment found for contract: YourContract"
        );

        let err = ScriptError::ContractDeployment("insufficient funds for gas".to_string());
        assert!(err.to_string().ends_with("insufficient funds for gas"));
    }
}
