use alloy::primitives::{Address, TxHash};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    // Artifact errors
    #[error("Failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse artifact {path}: {source}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No artifact named {name} under {dir}")]
    ArtifactNotFound { name: String, dir: PathBuf },
    #[error("Artifact {0} carries no deployable bytecode")]
    MissingBytecode(String),
    #[error("Failed to decode bytecode of {name}: {source}")]
    InvalidBytecode {
        name: String,
        #[source]
        source: hex::FromHexError,
    },

    // Encoding errors
    #[error("Failed to encode arguments: {0}")]
    Encoding(String),
    #[error("Failed to decode data: {0}")]
    Decoding(String),
    #[error("Unknown facet referenced: {0}")]
    UnknownFacet(String),
    #[error("Nothing to cut: {0}")]
    EmptyCut(String),

    // Chain interaction errors
    #[error("RPC error: {0}")]
    Transport(#[from] alloy::transports::TransportError),
    #[error("Pending transaction error: {0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),
    #[error("Contract call failed: {0}")]
    Call(#[from] alloy::contract::Error),
    #[error("Timed out waiting for receipt of {0}")]
    ReceiptTimeout(TxHash),
    #[error("{label} failed: {tx_hash}")]
    TransactionFailed { label: String, tx_hash: TxHash },
    #[error("Deployment of {0} reported no contract address")]
    MissingAddress(String),
    #[error("Contract at {0} returned an unexpected response: {1}")]
    InvalidResponse(Address, String),

    #[error("Signer error: {0}")]
    Signer(String),
}

pub type ContractResult<T> = Result<T, ContractError>;

impl From<alloy::dyn_abi::Error> for ContractError {
    fn from(err: alloy::dyn_abi::Error) -> Self {
        ContractError::Encoding(err.to_string())
    }
}
