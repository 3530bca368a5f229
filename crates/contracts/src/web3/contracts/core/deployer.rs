use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use log::info;
use serde::Serialize;

use crate::web3::contracts::core::artifact::{Artifact, ArtifactStore};
use crate::web3::contracts::core::contract::Contract;
use crate::web3::contracts::core::error::{ContractError, ContractResult};
use crate::web3::contracts::helpers::utils::confirm;
use crate::web3::wallet::{Wallet, WalletProvider};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Deploys artifacts from a store with one signing account.
#[derive(Clone)]
pub struct Deployer {
    provider: WalletProvider,
    account: Address,
    store: ArtifactStore,
}

impl Deployer {
    pub fn new(wallet: &Wallet, store: ArtifactStore) -> Self {
        Self {
            provider: wallet.provider().clone(),
            account: wallet.address(),
            store,
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn provider(&self) -> &WalletProvider {
        &self.provider
    }

    pub fn load_artifact(&self, name: &str) -> ContractResult<Artifact> {
        self.store.load(name)
    }

    pub fn attach(&self, artifact: &Artifact, address: Address) -> Contract {
        Contract::new(address, self.provider.clone(), artifact)
    }

    pub async fn deploy(&self, artifact: &Artifact, args: &[String]) -> ContractResult<DeployedContract> {
        let code = artifact.deploy_code(args)?;
        let tx = TransactionRequest::default()
            .with_from(self.account)
            .with_deploy_code(code);

        let pending = self.provider.send_transaction(tx).await?;
        let receipt = confirm(pending, &format!("deploy {}", artifact.name)).await?;
        let address = receipt
            .contract_address
            .ok_or_else(|| ContractError::MissingAddress(artifact.name.clone()))?;

        info!("{} was deployed to {address}", artifact.name);
        Ok(DeployedContract {
            name: artifact.name.clone(),
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    /// Loads `name` from the store and deploys it.
    pub async fn deploy_named(&self, name: &str, args: &[String]) -> ContractResult<(Artifact, DeployedContract)> {
        let artifact = self.load_artifact(name)?;
        let deployed = self.deploy(&artifact, args).await?;
        Ok((artifact, deployed))
    }
}
