//! EIP-2535 diamond support: selector sets, cut assembly and the deployment flow.

pub mod abi;
pub mod cut;
pub mod deployment;
pub mod selectors;

pub use cut::{CutEntry, DiamondCut, FacetCutAction};
pub use selectors::{ContractInterface, SelectorSet, INITIALIZER_SIGNATURE};
