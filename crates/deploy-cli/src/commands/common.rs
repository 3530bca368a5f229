use alloy::providers::{Provider, ProviderBuilder};
use contracts::web3::contracts::core::artifact::ArtifactStore;
use contracts::web3::contracts::core::deployer::Deployer;
use contracts::web3::wallet::{Wallet, WalletProvider};
use eyre::Result;
use serde::Serialize;
use std::path::Path;
use url::Url;

use crate::config::Config;
use crate::secure_key::get_private_key;

fn rpc_url(config: &Config) -> Result<Url> {
    let rpc_url = config.get_rpc_url()?;
    Url::parse(&rpc_url).map_err(|e| eyre::eyre!("URL parse error: {e}"))
}

/// A `--key` argument wins; otherwise the configured mnemonic, then the
/// configured private key, then an interactive prompt.
pub fn create_wallet(key: Option<String>, config: &Config) -> Result<Wallet> {
    let url = rpc_url(config)?;

    let wallet = match (key, &config.mnemonic) {
        (None, Some(mnemonic)) => {
            let index = config.account_index.unwrap_or_default();
            Wallet::from_mnemonic(mnemonic, index, url)
        }
        (key, _) => {
            let private_key = get_private_key(key.or_else(|| config.private_key.clone()))?;
            Wallet::new(&private_key, url)
        }
    }
    .map_err(|e| eyre::eyre!("Wallet creation error: {e}"))?;

    Ok(wallet)
}

pub fn artifact_store(config: &Config) -> ArtifactStore {
    ArtifactStore::new(config.get_artifacts_dir())
}

pub async fn create_deployer(key: Option<String>, config: &Config) -> Result<Deployer> {
    let wallet = create_wallet(key, config)?;

    let chain_id = wallet.provider().get_chain_id().await?;
    match config.expected_chain_id() {
        Some(expected) if expected != chain_id => log::warn!(
            "Connected chain id {chain_id} differs from {} network chain id {expected}",
            config.network_name()
        ),
        _ => log::info!("Connected to chain {chain_id} as {}", wallet.address()),
    }

    Ok(Deployer::new(&wallet, artifact_store(config)))
}

/// Provider without a signer, for read-only calls.
pub fn read_provider(config: &Config) -> Result<WalletProvider> {
    Ok(ProviderBuilder::new().connect_http(rpc_url(config)?).erased())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    println!("Wrote {}", path.display());
    Ok(())
}
