use clap::Args;
use eyre::Result;

use crate::commands::common::create_deployer;
use crate::config::Config;

#[derive(Args)]
pub struct DeployArgs {
    /// Contract name
    pub name: String,

    /// Constructor argument, repeated in declaration order
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Private key source (env:VAR_NAME, file:/path, or interactive)
    #[arg(short = 'k', long)]
    pub key: Option<String>,
}

pub async fn handle_command(args: DeployArgs, config: &Config) -> Result<()> {
    println!("Running deploy script for the {} contract", args.name);

    let deployer = create_deployer(args.key, config).await?;
    let (artifact, deployed) = deployer.deploy_named(&args.name, &args.args).await?;

    println!("{} was deployed to {}", artifact.name, deployed.address);
    println!("Transaction: {}", deployed.tx_hash);
    Ok(())
}
