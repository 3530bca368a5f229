use crate::config::Config;
use eyre::Result;

pub mod artifacts;
pub mod common;
pub mod deploy;
pub mod diamond;
pub mod greeter;
pub mod proxy;
pub mod selectors;
pub mod twap;
pub mod wallet;

pub use artifacts::*;
pub use deploy::*;
pub use diamond::*;
pub use greeter::*;
pub use proxy::*;
pub use selectors::*;
pub use twap::*;
pub use wallet::*;

pub fn handle_artifacts_command(command: ArtifactCommands, config: &Config) -> Result<()> {
    artifacts::handle_command(command, config)
}

pub fn handle_selectors_command(args: SelectorArgs, config: &Config) -> Result<()> {
    selectors::handle_command(args, config)
}

pub async fn handle_deploy_command(args: DeployArgs, config: &Config) -> Result<()> {
    deploy::handle_command(args, config).await
}

pub async fn handle_diamond_command(command: DiamondCommands, config: &Config) -> Result<()> {
    diamond::handle_command(command, config).await
}

pub async fn handle_greeter_command(args: GreeterArgs, config: &Config) -> Result<()> {
    greeter::handle_command(args, config).await
}

pub async fn handle_twap_command(command: TwapCommands, config: &Config) -> Result<()> {
    twap::handle_command(command, config).await
}

pub async fn handle_proxy_command(command: ProxyCommands, config: &Config) -> Result<()> {
    proxy::handle_command(command, config).await
}

pub async fn handle_wallet_command(command: WalletCommands, config: &Config) -> Result<()> {
    wallet::handle_command(command, config).await
}
