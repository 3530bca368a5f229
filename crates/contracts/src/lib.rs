pub mod web3;
