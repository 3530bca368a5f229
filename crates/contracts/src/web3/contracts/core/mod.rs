pub mod artifact;
pub mod contract;
pub mod deployer;
pub mod error;
