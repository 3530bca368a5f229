use alloy::contract::{ContractInstance, Interface};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Address;
use alloy::rpc::types::TransactionReceipt;

use crate::web3::contracts::core::artifact::Artifact;
use crate::web3::contracts::core::error::ContractResult;
use crate::web3::contracts::helpers::utils::confirm;
use crate::web3::wallet::WalletProvider;

/// A deployed contract driven through the ABI of its build artifact.
#[derive(Clone)]
pub struct Contract {
    name: String,
    instance: ContractInstance<WalletProvider>,
}

impl Contract {
    pub fn new(address: Address, provider: WalletProvider, artifact: &Artifact) -> Self {
        let instance = ContractInstance::new(address, provider, Interface::new(artifact.abi.clone()));
        Self {
            name: artifact.name.clone(),
            instance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    pub fn instance(&self) -> &ContractInstance<WalletProvider> {
        &self.instance
    }

    pub fn provider(&self) -> &WalletProvider {
        self.instance.provider()
    }

    /// Read-only call returning the decoded outputs.
    pub async fn read(&self, function: &str, args: &[DynSolValue]) -> ContractResult<Vec<DynSolValue>> {
        Ok(self.instance.function(function, args)?.call().await?)
    }

    /// Sends a transaction and fails if the receipt reports a revert.
    pub async fn write(&self, function: &str, args: &[DynSolValue]) -> ContractResult<TransactionReceipt> {
        let pending = self.instance.function(function, args)?.send().await?;
        confirm(pending, &format!("{}.{function}()", self.name)).await
    }
}
