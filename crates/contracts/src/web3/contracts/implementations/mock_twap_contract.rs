use alloy::primitives::{FixedBytes, U256};

use crate::web3::contracts::core::contract::Contract;
use crate::web3::contracts::core::error::ContractResult;

#[derive(Clone)]
pub struct MockTwapContract {
    pub instance: Contract,
}

impl MockTwapContract {
    pub fn new(instance: Contract) -> Self {
        Self { instance }
    }

    /// Sets the mocked `sqrtPriceX96` the oracle will report.
    pub async fn set_sqrt_price_x96(&self, price: U256) -> ContractResult<FixedBytes<32>> {
        let receipt = self
            .instance
            .write("setSqrtPriceX96", &[price.into()])
            .await?;
        Ok(receipt.transaction_hash)
    }
}
