use alloy::primitives::Address;
use clap::Subcommand;
use contracts::web3::contracts::diamond::cut::FacetCutAction;
use contracts::web3::contracts::diamond::deployment::{deploy_diamond, upgrade_facet, FacetSpec};
use contracts::web3::contracts::helpers::utils::get_selector;
use contracts::web3::contracts::implementations::diamond_contract::DiamondContract;
use eyre::Result;
use std::path::PathBuf;

use crate::commands::common::{create_deployer, read_provider, write_json};
use crate::config::Config;

#[derive(Subcommand)]
pub enum DiamondCommands {
    /// Deploy the proxy and facets from the [diamond] layout and cut them in
    Deploy {
        /// Deployment record path (defaults to <output_dir>/<network>.json)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Private key source (env:VAR_NAME, file:/path, or interactive)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },
    /// Add, replace or remove one facet on a deployed diamond
    Upgrade {
        /// Diamond proxy address
        #[arg(short = 'd', long)]
        diamond: Address,

        /// Facet contract name
        #[arg(short = 'f', long)]
        facet: String,

        /// Cut action: add, replace or remove
        #[arg(short = 'a', long, default_value = "add")]
        action: FacetCutAction,

        /// Keep only these functions (signature or bare name)
        #[arg(long, num_args = 1..)]
        only: Vec<String>,

        /// Drop these functions (signature or bare name)
        #[arg(long, num_args = 1..)]
        exclude: Vec<String>,

        /// Facet constructor argument, repeated in declaration order
        #[arg(long = "arg")]
        args: Vec<String>,

        /// Private key source (env:VAR_NAME, file:/path, or interactive)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },
    /// List the facets registered on a diamond
    Facets {
        /// Diamond proxy address
        #[arg(short = 'd', long)]
        diamond: Address,

        /// Only report the facet serving this function signature
        #[arg(short = 's', long)]
        selector: Option<String>,
    },
}

pub async fn handle_command(command: DiamondCommands, config: &Config) -> Result<()> {
    match command {
        DiamondCommands::Deploy { output, key } => deploy(output, key, config).await,
        DiamondCommands::Upgrade {
            diamond,
            facet,
            action,
            only,
            exclude,
            args,
            key,
        } => {
            let spec = FacetSpec {
                name: facet,
                args,
                register: true,
                only,
                exclude,
            };
            upgrade(diamond, spec, action, key, config).await
        }
        DiamondCommands::Facets { diamond, selector } => facets(diamond, selector, config).await,
    }
}

async fn deploy(output: Option<PathBuf>, key: Option<String>, config: &Config) -> Result<()> {
    let layout = config.get_diamond_layout()?;
    println!(
        "Deploying {} with {} facets on {}",
        layout.proxy,
        layout.facets.len(),
        config.network_name()
    );

    let deployer = create_deployer(key, config).await?;
    let deployment = deploy_diamond(&deployer, layout).await?;

    for facet in &deployment.facets {
        println!("{} was deployed to {}", facet.name, facet.address);
    }
    println!("{} was deployed to {}", deployment.proxy.name, deployment.proxy.address);
    println!("diamondCut tx: {}", deployment.cut_tx);

    let output = output.unwrap_or_else(|| {
        config
            .get_output_dir()
            .join(format!("{}.json", config.network_name()))
    });
    write_json(&output, &deployment)
}

async fn upgrade(
    diamond: Address,
    spec: FacetSpec,
    action: FacetCutAction,
    key: Option<String>,
    config: &Config,
) -> Result<()> {
    println!("Applying {action} cut for {} on {diamond}", spec.name);

    let deployer = create_deployer(key, config).await?;
    let upgrade = upgrade_facet(&deployer, diamond, &spec, action).await?;

    if let Some(facet) = &upgrade.facet {
        println!("{} was deployed to {}", facet.name, facet.address);
    }
    for entry in &upgrade.cut {
        println!("{} {} selectors of {}", entry.action, entry.selectors.len(), entry.facet);
    }
    println!("diamondCut tx: {}", upgrade.cut_tx);
    Ok(())
}

async fn facets(diamond: Address, selector: Option<String>, config: &Config) -> Result<()> {
    let contract = DiamondContract::new(diamond, read_provider(config)?);

    if let Some(signature) = selector {
        let selector = get_selector(&signature);
        let facet = contract.facet_address(selector).await?;
        if facet == Address::ZERO {
            println!("{signature} ({selector}) is not registered on {diamond}");
        } else {
            println!("{signature} ({selector}) -> {facet}");
        }
        return Ok(());
    }

    let facets = contract.facets().await?;

    println!("{} facets on {diamond}:", facets.len());
    for (address, selectors) in facets {
        println!("{address}");
        for selector in selectors {
            println!("  {selector}");
        }
    }
    Ok(())
}
