use clap::Args;
use contracts::web3::contracts::implementations::greeter_contract::GreeterContract;
use eyre::Result;

use crate::commands::common::create_deployer;
use crate::config::Config;

#[derive(Args)]
pub struct GreeterArgs {
    /// Greeting passed to the constructor
    #[arg(long, default_value = "")]
    pub greeting: String,

    /// Greeting set after deployment
    #[arg(long, default_value = "Hey guys")]
    pub new_greeting: String,

    /// Private key source (env:VAR_NAME, file:/path, or interactive)
    #[arg(short = 'k', long)]
    pub key: Option<String>,
}

pub async fn handle_command(args: GreeterArgs, config: &Config) -> Result<()> {
    println!("Running deploy script for the Greeter contract");

    let deployer = create_deployer(args.key, config).await?;
    let (artifact, deployed) = deployer
        .deploy_named("Greeter", &[args.greeting.clone()])
        .await?;
    println!("{} was deployed to {}", artifact.name, deployed.address);

    let greeter = GreeterContract::new(deployer.attach(&artifact, deployed.address));
    check_greeting(&greeter, &args.greeting).await?;

    let tx = greeter.set_greeting(&args.new_greeting).await?;
    println!("setGreeting tx: {tx}");
    check_greeting(&greeter, &args.new_greeting).await
}

async fn check_greeting(greeter: &GreeterContract, expected: &str) -> Result<()> {
    let greeting = greeter.greet().await?;
    if greeting == expected {
        println!("Contract greets us with {expected}!");
    } else {
        log::warn!("Contract said something unexpected: {greeting}");
    }
    Ok(())
}
