use contracts::web3::contracts::diamond::deployment::DiamondLayout;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_NETWORK: &str = "zkTestnet";
const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
const DEFAULT_OUTPUT_DIR: &str = "deployments";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub url: String,
    pub chain_id: u64,
}

fn builtin_network(name: &str) -> Option<NetworkConfig> {
    match name {
        "zkTestnet" => Some(NetworkConfig {
            url: "https://zksync2-testnet.zksync.dev".to_string(),
            chain_id: 280,
        }),
        "hardhat" | "localhost" => Some(NetworkConfig {
            url: "http://127.0.0.1:8545".to_string(),
            chain_id: 31337,
        }),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub network: Option<String>,
    pub rpc_url: Option<String>,
    pub mnemonic: Option<String>,
    pub account_index: Option<u32>,
    pub private_key: Option<String>,
    pub artifacts_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub networks: HashMap<String, NetworkConfig>,
    pub diamond: Option<DiamondLayout>,
}

impl Config {
    pub fn load(config_path: &Option<String>, env_file: &str) -> Result<Self> {
        dotenv::from_filename(env_file).ok();

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        Ok(config)
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            log::debug!("Config file {path} not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path}"))?;

        Ok(config)
    }

    pub fn load_from_env(&mut self) {
        self.load_from_vars(|name| std::env::var(name).ok());
    }

    pub fn load_from_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rpc_url) = lookup("RPC_URL") {
            self.rpc_url = Some(rpc_url);
        }
        if let Some(network) = lookup("NETWORK") {
            self.network = Some(network);
        }
        if let Some(mnemonic) = lookup("MNEMONIC") {
            self.mnemonic = Some(mnemonic);
        }
        if let Some(index) = lookup("ACCOUNT_INDEX") {
            match index.parse() {
                Ok(index) => self.account_index = Some(index),
                Err(_) => log::warn!("Ignoring invalid ACCOUNT_INDEX: {index}"),
            }
        }
        if let Some(key) = lookup("PRIVATE_KEY") {
            self.private_key = Some(key);
        }
        if let Some(dir) = lookup("ARTIFACTS_DIR") {
            self.artifacts_dir = Some(dir.into());
        }
        if let Some(dir) = lookup("OUTPUT_DIR") {
            self.output_dir = Some(dir.into());
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: String) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    /// Selects a network preset. An RPC URL picked up from the file or the
    /// environment no longer applies; only a later `with_rpc_url` overrides it.
    pub fn with_network(mut self, network: String) -> Self {
        self.network = Some(network);
        self.rpc_url = None;
        self
    }

    pub fn with_artifacts_dir(mut self, dir: PathBuf) -> Self {
        self.artifacts_dir = Some(dir);
        self
    }

    pub fn network_name(&self) -> &str {
        self.network.as_deref().unwrap_or(DEFAULT_NETWORK)
    }

    pub fn get_network(&self) -> Option<NetworkConfig> {
        let name = self.network_name();
        self.networks
            .get(name)
            .cloned()
            .or_else(|| builtin_network(name))
    }

    /// An explicit RPC URL wins over the selected network's URL.
    pub fn get_rpc_url(&self) -> Result<String> {
        if let Some(url) = &self.rpc_url {
            return Ok(url.clone());
        }
        self.get_network().map(|n| n.url).ok_or_else(|| {
            eyre::eyre!(
                "RPC URL not configured for network {}. Set RPC_URL or use --rpc-url",
                self.network_name()
            )
        })
    }

    pub fn expected_chain_id(&self) -> Option<u64> {
        self.get_network().map(|n| n.chain_id)
    }

    pub fn get_artifacts_dir(&self) -> PathBuf {
        self.artifacts_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR))
    }

    pub fn get_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn get_diamond_layout(&self) -> Result<&DiamondLayout> {
        self.diamond
            .as_ref()
            .ok_or_else(|| eyre::eyre!("No [diamond] layout in the config file"))
    }
}
