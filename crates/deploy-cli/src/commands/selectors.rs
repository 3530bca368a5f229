use clap::Args;
use eyre::Result;
use serde_json::json;

use crate::commands::common::artifact_store;
use crate::config::Config;

#[derive(Args)]
pub struct SelectorArgs {
    /// Contract name
    pub name: String,

    /// Keep only these functions (signature or bare name)
    #[arg(long, num_args = 1..)]
    pub only: Vec<String>,

    /// Drop these functions (signature or bare name)
    #[arg(long, num_args = 1..)]
    pub exclude: Vec<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle_command(args: SelectorArgs, config: &Config) -> Result<()> {
    let artifact = artifact_store(config).load(&args.name)?;

    let set = artifact.selector_set();
    let set = if args.only.is_empty() {
        set
    } else {
        set.get(&args.only)
    };
    let set = set.remove(&args.exclude);

    if args.json {
        let entries: Vec<_> = set
            .entries()
            .map(|e| json!({ "selector": e.selector.to_string(), "signature": e.signature }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{} selectors of {}:", set.len(), artifact.name);
        for entry in set.entries() {
            println!("  {}  {}", entry.selector, entry.signature);
        }
    }
    Ok(())
}
