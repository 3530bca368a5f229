use alloy::primitives::U256;

use crate::web3::contracts::core::contract::Contract;
use crate::web3::contracts::core::error::{ContractError, ContractResult};

#[derive(Clone)]
pub struct ProxyContract {
    pub instance: Contract,
}

impl ProxyContract {
    pub fn new(instance: Contract) -> Self {
        Self { instance }
    }

    pub async fn get_total_bouts(&self) -> ContractResult<U256> {
        self.instance
            .read("getTotalBouts", &[])
            .await?
            .into_iter()
            .next()
            .and_then(|value| value.as_uint().map(|(value, _)| value))
            .ok_or_else(|| {
                ContractError::InvalidResponse(
                    self.instance.address(),
                    "getTotalBouts() returned no integer".into(),
                )
            })
    }
}
