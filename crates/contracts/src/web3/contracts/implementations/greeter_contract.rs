use alloy::primitives::FixedBytes;

use crate::web3::contracts::core::contract::Contract;
use crate::web3::contracts::core::error::{ContractError, ContractResult};

#[derive(Clone)]
pub struct GreeterContract {
    pub instance: Contract,
}

impl GreeterContract {
    pub fn new(instance: Contract) -> Self {
        Self { instance }
    }

    pub async fn greet(&self) -> ContractResult<String> {
        self.instance
            .read("greet", &[])
            .await?
            .into_iter()
            .next()
            .and_then(|value| value.as_str().map(str::to_string))
            .ok_or_else(|| {
                ContractError::InvalidResponse(self.instance.address(), "greet() returned no string".into())
            })
    }

    pub async fn set_greeting(&self, greeting: &str) -> ContractResult<FixedBytes<32>> {
        let receipt = self
            .instance
            .write("setGreeting", &[greeting.to_string().into()])
            .await?;
        Ok(receipt.transaction_hash)
    }
}
