use clap::Parser;
use dotenv::dotenv;
use erc20_deploy::{cli::Cli, env::RuntimeEnvironment, errors::ScriptError};
use tracing::Level;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(max_level)
        .init();

    // Build our RPC client with signer
    let env = RuntimeEnvironment::connect(cli.network_config()?).await?;

    cli.command.run(&env).await
}
