use clap::Subcommand;
use eyre::Result;
use std::path::PathBuf;

use crate::commands::common::{artifact_store, write_json};
use crate::config::Config;

#[derive(Subcommand)]
pub enum ArtifactCommands {
    /// Index every compiled artifact by contract name
    Index {
        /// Write the index to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Show the ABI surface of one artifact
    Show {
        /// Contract name
        name: String,
    },
}

pub fn handle_command(command: ArtifactCommands, config: &Config) -> Result<()> {
    match command {
        ArtifactCommands::Index { output } => index(output, config),
        ArtifactCommands::Show { name } => show(&name, config),
    }
}

fn index(output: Option<PathBuf>, config: &Config) -> Result<()> {
    let store = artifact_store(config);
    let index = store.index();
    if index.is_empty() {
        eyre::bail!("No artifacts found under {}", store.root().display());
    }

    match output {
        Some(path) => write_json(&path, &index)?,
        None => println!("{}", serde_json::to_string_pretty(&index)?),
    }
    Ok(())
}

fn show(name: &str, config: &Config) -> Result<()> {
    let artifact = artifact_store(config).load(name)?;

    println!("Contract: {}", artifact.name);
    println!("Path: {}", artifact.path.display());
    println!("Deployable: {}", artifact.is_deployable());
    if let Some(constructor) = &artifact.abi.constructor {
        let inputs: Vec<String> = constructor
            .inputs
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect();
        println!("Constructor: ({})", inputs.join(", "));
    }
    println!("Functions:");
    for function in artifact.interface().functions() {
        println!("  {}  {}", function.selector, function.signature);
    }
    Ok(())
}
