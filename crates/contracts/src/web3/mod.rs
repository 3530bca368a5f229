pub mod contracts;
pub mod wallet;

pub use contracts::core::artifact::{Artifact, ArtifactStore};
pub use contracts::core::deployer::Deployer;
pub use wallet::{Wallet, WalletProvider};
