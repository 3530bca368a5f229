use alloy::primitives::utils::format_ether;
use clap::Subcommand;
use eyre::Result;

use crate::commands::common::create_wallet;
use crate::config::Config;

#[derive(Subcommand)]
pub enum WalletCommands {
    /// Print the deployer address
    Address {
        /// Private key source (env:VAR_NAME, file:/path, or interactive)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },
    /// Print the deployer balance
    Balance {
        /// Private key source (env:VAR_NAME, file:/path, or interactive)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },
}

pub async fn handle_command(command: WalletCommands, config: &Config) -> Result<()> {
    match command {
        WalletCommands::Address { key } => {
            let wallet = create_wallet(key, config)?;
            println!("Address: {}", wallet.address());
            Ok(())
        }
        WalletCommands::Balance { key } => {
            let wallet = create_wallet(key, config)?;
            let balance = wallet.get_balance().await?;
            println!("Address: {}", wallet.address());
            println!("Balance: {} ETH", format_ether(balance));
            Ok(())
        }
    }
}
