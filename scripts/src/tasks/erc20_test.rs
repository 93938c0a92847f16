//! Deploy & check the ERC20Test token

use std::fmt::{self, Display, Formatter};

use alloy::primitives::{Address, Bytes};

use crate::{
    constants::{DEPLOYER_ACCOUNT, ERC20_TEST, YOUR_CONTRACT},
    deploy::{deploy, DeployOptions},
    env::RuntimeEnvironment,
    errors::ScriptError,
    tx::reader::{read_greeting, read_token_metadata, TokenMetadata},
};

/// Deploy the ERC20Test token with the deployer account, then read it back.
///
/// On a local node the deployer is a prefunded dev account. On a live
/// network it must hold enough funds to pay for the contract creation.
pub async fn deploy_erc20_test(env: &RuntimeEnvironment) -> Result<(), ScriptError> {
    let deployer = env.named_account(DEPLOYER_ACCOUNT)?;

    println!("{}", deployer_line(deployer));

    let deployment = deploy(
        env,
        ERC20_TEST,
        DeployOptions {
            from: deployer,
            // The ERC20Test constructor takes no args
            args: Bytes::new(),
            log: true,
            auto_mine: true,
        },
    )
    .await?;

    // Make sure the token answers before going further
    let metadata = read_token_metadata(deployment.address, env.provider.clone()).await?;
    print!("{}", VerificationReport { metadata });

    let greeter = env.contract_address(YOUR_CONTRACT)?;
    let greeting = read_greeting(greeter, env.provider.clone()).await?;
    println!("{}", greeting_line(&greeting));

    Ok(())
}

/// First console line of the task
fn deployer_line(deployer: Address) -> String {
    format!("Deploying {ERC20_TEST} with deployer account: {deployer}")
}

/// Last console line of the task
fn greeting_line(greeting: &str) -> String {
    format!("👋 Initial greeting: {greeting}")
}

/// Console report of a freshly deployed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// What the token answered
    pub metadata: TokenMetadata,
}

impl Display for VerificationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} deployment check:", ERC20_TEST)?;
        writeln!(f, "- Token name: {}", self.metadata.name)?;
        writeln!(f, "- Token symbol: {}", self.metadata.symbol)?;
        writeln!(f, "- Decimals: {}", self.metadata.decimals)?;
        writeln!(f, "- Contract address: {}", self.metadata.address)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn report_lists_token_metadata() {
        let report = VerificationReport {
            metadata: TokenMetadata {
                name: "CQToken".to_string(),
                symbol: "CQ".to_string(),
                decimals: 18,
                address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            },
        };

        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ERC20Test deployment check:",
                "- Token name: CQToken",
                "- Token symbol: CQ",
                "- Decimals: 18",
                "- Contract address: 0x5FbDB2315678afecb367f032d93F642f64180aa3",
            ]
        );
    }

    #[test]
    fn task_output_reads_top_to_bottom() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let report = VerificationReport {
            metadata: TokenMetadata {
                name: "CQToken".to_string(),
                symbol: "CQ".to_string(),
                decimals: 18,
                address: deployer.create(0),
            },
        };

        // Same sequence of prints as the task
        let output = format!(
            "{}\n{}{}\n",
            deployer_line(deployer),
            report,
            greeting_line("Building Unstoppable Apps!!!")
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Deploying ERC20Test with deployer account: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "ERC20Test deployment check:",
                "- Token name: CQToken",
                "- Token symbol: CQ",
                "- Decimals: 18",
                "- Contract address: 0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "👋 Initial greeting: Building Unstoppable Apps!!!",
            ]
        );
    }
}
