use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, Selector};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol_types::SolCall;
use log::info;

use crate::web3::contracts::core::error::{ContractError, ContractResult};
use crate::web3::contracts::diamond::abi::{IDiamondLoupe, FACETS_RETURN_TYPE};
use crate::web3::contracts::diamond::cut::DiamondCut;
use crate::web3::contracts::helpers::utils::confirm;
use crate::web3::wallet::WalletProvider;

/// A deployed EIP-2535 diamond proxy.
#[derive(Clone)]
pub struct DiamondContract {
    address: Address,
    provider: WalletProvider,
}

impl DiamondContract {
    pub fn new(address: Address, provider: WalletProvider) -> Self {
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Applies `cut` in a single `diamondCut` transaction.
    pub async fn diamond_cut(&self, cut: &DiamondCut) -> ContractResult<TransactionReceipt> {
        for entry in cut.entries() {
            info!(
                "Cut {} {} with {} selectors",
                entry.action,
                entry.facet,
                entry.selectors.len()
            );
        }
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(cut.calldata());
        let pending = self.provider.send_transaction(tx).await?;
        confirm(pending, "diamondCut()").await
    }

    /// Current facet table as reported by the loupe.
    pub async fn facets(&self) -> ContractResult<Vec<(Address, Vec<Selector>)>> {
        let data = self.static_call(IDiamondLoupe::facetsCall {}.abi_encode()).await?;
        decode_facets(&data).map_err(|e| ContractError::InvalidResponse(self.address, e))
    }

    pub async fn facet_address(&self, selector: Selector) -> ContractResult<Address> {
        let call = IDiamondLoupe::facetAddressCall {
            _functionSelector: selector,
        };
        let data = self.static_call(call.abi_encode()).await?;
        DynSolType::Address
            .abi_decode(&data)
            .ok()
            .and_then(|value| value.as_address())
            .ok_or_else(|| {
                ContractError::InvalidResponse(self.address, "facetAddress() is not an address".into())
            })
    }

    async fn static_call(&self, calldata: Vec<u8>) -> ContractResult<Bytes> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(calldata);
        Ok(self.provider.call(tx).await?)
    }
}

pub(crate) fn decode_facets(data: &[u8]) -> Result<Vec<(Address, Vec<Selector>)>, String> {
    let ty = DynSolType::parse(FACETS_RETURN_TYPE).map_err(|e| e.to_string())?;
    let decoded = DynSolType::Tuple(vec![ty])
        .abi_decode_params(data)
        .map_err(|e| e.to_string())?;

    let facets = decoded
        .as_tuple()
        .and_then(|values| values.first())
        .and_then(DynSolValue::as_array)
        .ok_or("facets() did not return an array")?;

    facets
        .iter()
        .map(|facet| -> Result<(Address, Vec<Selector>), String> {
            let fields = facet.as_tuple().ok_or("facet entry is not a tuple")?;
            let address = fields
                .first()
                .and_then(DynSolValue::as_address)
                .ok_or("facet address missing")?;
            let selectors = fields
                .get(1)
                .and_then(DynSolValue::as_array)
                .ok_or("facet selectors missing")?
                .iter()
                .map(|value| {
                    value
                        .as_fixed_bytes()
                        .filter(|(bytes, _)| bytes.len() >= 4)
                        .map(|(bytes, _)| Selector::from_slice(&bytes[..4]))
                        .ok_or_else(|| "selector is not bytes4".to_string())
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((address, selectors))
        })
        .collect()
}
