use alloy::primitives::utils::Unit;
use alloy::primitives::{Address, U256};
use clap::Subcommand;
use contracts::web3::contracts::implementations::mock_twap_contract::MockTwapContract;
use eyre::Result;

use crate::commands::common::create_deployer;
use crate::config::Config;

const MOCK_TWAP: &str = "MockTwap";

#[derive(Subcommand)]
pub enum TwapCommands {
    /// Deploy the MockTwap oracle
    Deploy {
        /// Private key source (env:VAR_NAME, file:/path, or interactive)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },
    /// Set the mocked sqrt price
    SetSqrtPrice {
        /// MockTwap address
        #[arg(short = 'a', long)]
        address: Address,

        /// Price in whole units, scaled by 10^18
        #[arg(short = 'p', long, default_value = "1625")]
        price: u64,

        /// Private key source (env:VAR_NAME, file:/path, or interactive)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },
}

pub async fn handle_command(command: TwapCommands, config: &Config) -> Result<()> {
    match command {
        TwapCommands::Deploy { key } => deploy(key, config).await,
        TwapCommands::SetSqrtPrice {
            address,
            price,
            key,
        } => set_sqrt_price(address, price, key, config).await,
    }
}

async fn deploy(key: Option<String>, config: &Config) -> Result<()> {
    println!("Running deploy script to deploy {MOCK_TWAP} contract");

    let deployer = create_deployer(key, config).await?;
    let (artifact, deployed) = deployer.deploy_named(MOCK_TWAP, &[]).await?;

    println!("{} was deployed to {}", artifact.name, deployed.address);
    Ok(())
}

fn scaled_price(price: u64) -> U256 {
    U256::from(price) * Unit::ETHER.wei()
}

async fn set_sqrt_price(address: Address, price: u64, key: Option<String>, config: &Config) -> Result<()> {
    println!("Running script to set sqrt price of {MOCK_TWAP}");

    let deployer = create_deployer(key, config).await?;
    let artifact = deployer.load_artifact(MOCK_TWAP)?;
    let twap = MockTwapContract::new(deployer.attach(&artifact, address));

    let tx = twap.set_sqrt_price_x96(scaled_price(price)).await?;
    println!("setSqrtPriceX96 tx: {tx}");
    Ok(())
}
