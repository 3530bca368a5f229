use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use url::Url;

use crate::web3::contracts::core::error::{ContractError, ContractResult};

/// BIP-44 account path used by Hardhat HD accounts; the account index is appended.
pub const DERIVATION_BASE_PATH: &str = "m/44'/60'/0'/0";

pub type WalletProvider = DynProvider;

pub struct Wallet {
    pub wallet: EthereumWallet,
    pub signer: PrivateKeySigner,
    pub provider: WalletProvider,
}

impl Wallet {
    pub fn new(private_key: &str, provider_url: Url) -> ContractResult<Self> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| ContractError::Signer(format!("invalid private key: {e}")))?;
        Ok(Self::from_signer(signer, provider_url))
    }

    pub fn from_mnemonic(phrase: &str, index: u32, provider_url: Url) -> ContractResult<Self> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase.trim())
            .derivation_path(format!("{DERIVATION_BASE_PATH}/{index}"))
            .map_err(|e| ContractError::Signer(e.to_string()))?
            .build()
            .map_err(|e| ContractError::Signer(format!("invalid mnemonic: {e}")))?;
        Ok(Self::from_signer(signer, provider_url))
    }

    fn from_signer(signer: PrivateKeySigner, provider_url: Url) -> Self {
        let wallet = EthereumWallet::from(signer.clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect_http(provider_url)
            .erased();

        Self {
            wallet,
            signer,
            provider,
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn provider(&self) -> &WalletProvider {
        &self.provider
    }

    pub async fn get_balance(&self) -> ContractResult<U256> {
        Ok(self.provider.get_balance(self.address()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const HARDHAT_MNEMONIC: &str = "test test test test test test test test test test test junk";
    const HARDHAT_KEY_0: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn local_url() -> Url {
        Url::parse("http://127.0.0.1:8545").unwrap()
    }

    #[test]
    fn mnemonic_and_key_resolve_to_same_account() {
        let expected = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

        let from_phrase = Wallet::from_mnemonic(HARDHAT_MNEMONIC, 0, local_url()).unwrap();
        let from_key = Wallet::new(HARDHAT_KEY_0, local_url()).unwrap();

        assert_eq!(from_phrase.address(), expected);
        assert_eq!(from_key.address(), expected);
    }

    #[test]
    fn account_index_selects_a_different_account() {
        let first = Wallet::from_mnemonic(HARDHAT_MNEMONIC, 0, local_url()).unwrap();
        let second = Wallet::from_mnemonic(HARDHAT_MNEMONIC, 1, local_url()).unwrap();
        assert_ne!(first.address(), second.address());
    }

    #[test]
    fn rejects_malformed_secrets() {
        assert!(matches!(
            Wallet::new("0x1234", local_url()),
            Err(ContractError::Signer(_))
        ));
        assert!(matches!(
            Wallet::from_mnemonic("not a mnemonic", 0, local_url()),
            Err(ContractError::Signer(_))
        ));
    }
}
