use clap::{Parser, Subcommand};
use eyre::Result;
use log::LevelFilter;
use std::path::PathBuf;

mod commands;
mod config;
mod secure_key;

use commands::*;
use config::Config;

#[derive(Parser)]
#[command(name = "deploy-cli")]
#[command(about = "Deploys contracts and EIP-2535 diamonds from Hardhat or Foundry artifacts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true, default_value = "deploy.toml")]
    config: Option<String>,

    /// Environment file path
    #[arg(long, global = true, default_value = ".env")]
    env_file: String,

    /// RPC URL (overrides config)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Named network (zkTestnet, hardhat, localhost, or one from the config file)
    #[arg(long, global = true)]
    network: Option<String>,

    /// Artifacts directory (overrides config)
    #[arg(long, global = true)]
    artifacts: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect compiled artifacts
    Artifacts {
        #[command(subcommand)]
        command: ArtifactCommands,
    },
    /// Print the selector set of a contract
    Selectors(SelectorArgs),
    /// Deploy a single contract
    Deploy(DeployArgs),
    /// Diamond deployment and upgrades
    Diamond {
        #[command(subcommand)]
        command: DiamondCommands,
    },
    /// Deploy the Greeter contract and exercise it
    Greeter(GreeterArgs),
    /// MockTwap oracle operations
    Twap {
        #[command(subcommand)]
        command: TwapCommands,
    },
    /// Proxy read operations
    Proxy {
        #[command(subcommand)]
        command: ProxyCommands,
    },
    /// Wallet operations
    Wallet {
        #[command(subcommand)]
        command: WalletCommands,
    },
}

fn parse_log_level(level: &str) -> Result<LevelFilter> {
    Ok(match level {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => eyre::bail!("invalid log level: {level}"),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(parse_log_level(&cli.log_level)?)
        .filter_module("alloy", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .filter_module("reqwest", LevelFilter::Warn)
        .format_timestamp(None)
        .init();

    let mut config = Config::load(&cli.config, &cli.env_file)?;
    if let Some(network) = cli.network {
        config = config.with_network(network);
    }
    if let Some(rpc_url) = cli.rpc_url {
        config = config.with_rpc_url(rpc_url);
    }
    if let Some(dir) = cli.artifacts {
        config = config.with_artifacts_dir(dir);
    }

    match cli.command {
        Commands::Artifacts { command } => handle_artifacts_command(command, &config),
        Commands::Selectors(args) => handle_selectors_command(args, &config),
        Commands::Deploy(args) => handle_deploy_command(args, &config).await,
        Commands::Diamond { command } => handle_diamond_command(command, &config).await,
        Commands::Greeter(args) => handle_greeter_command(args, &config).await,
        Commands::Twap { command } => handle_twap_command(command, &config).await,
        Commands::Proxy { command } => handle_proxy_command(command, &config).await,
        Commands::Wallet { command } => handle_wallet_command(command, &config).await,
    }
}
