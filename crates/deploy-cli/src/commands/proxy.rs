use alloy::primitives::Address;
use clap::Subcommand;
use contracts::web3::contracts::core::contract::Contract;
use contracts::web3::contracts::implementations::proxy_contract::ProxyContract;
use eyre::Result;

use crate::commands::common::{artifact_store, read_provider};
use crate::config::Config;

const PROXY_INTERFACE: &str = "IProxy";

#[derive(Subcommand)]
pub enum ProxyCommands {
    /// Read getTotalBouts() from a deployed proxy
    TotalBouts {
        /// Proxy address
        #[arg(short = 'a', long)]
        address: Address,
    },
}

pub async fn handle_command(command: ProxyCommands, config: &Config) -> Result<()> {
    match command {
        ProxyCommands::TotalBouts { address } => total_bouts(address, config).await,
    }
}

async fn total_bouts(address: Address, config: &Config) -> Result<()> {
    let artifact = artifact_store(config).load(PROXY_INTERFACE)?;
    let proxy = ProxyContract::new(Contract::new(address, read_provider(config)?, &artifact));

    let total = proxy.get_total_bouts().await?;
    println!("{total}");
    Ok(())
}
