pub mod diamond_contract;
pub mod greeter_contract;
pub mod mock_twap_contract;
pub mod proxy_contract;
