use alloy::dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::{Function, Param};
use alloy::network::Ethereum;
use alloy::primitives::{keccak256, Bytes, Selector};
use alloy::providers::PendingTransactionBuilder;
use alloy::rpc::types::TransactionReceipt;
use log::{debug, info};
use tokio::time::{timeout, Duration};

use crate::web3::contracts::core::error::{ContractError, ContractResult};

const RECEIPT_TIMEOUT_SECS: u64 = 180;

pub fn get_selector(fn_image: &str) -> Selector {
    Selector::from_slice(&keccak256(fn_image.as_bytes())[..4])
}

/// Coerces textual arguments into values of the given ABI parameters.
pub fn coerce_args(params: &[Param], args: &[String]) -> ContractResult<Vec<DynSolValue>> {
    if params.len() != args.len() {
        return Err(ContractError::Encoding(format!(
            "expected {} arguments, got {}",
            params.len(),
            args.len()
        )));
    }
    params
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let ty: DynSolType = param.resolve()?;
            Ok(ty.coerce_str(arg)?)
        })
        .collect()
}

/// Selector-prefixed calldata for `signature` applied to textual arguments.
pub fn encode_function_call(signature: &str, args: &[String]) -> ContractResult<Bytes> {
    let function = Function::parse(signature)
        .map_err(|e| ContractError::Encoding(format!("invalid signature {signature}: {e}")))?;
    let values = coerce_args(&function.inputs, args)?;
    Ok(function.abi_encode_input(&values)?.into())
}

/// Waits for a submitted transaction and rejects receipts that report a revert.
pub async fn confirm(
    pending: PendingTransactionBuilder<Ethereum>,
    label: &str,
) -> ContractResult<TransactionReceipt> {
    let tx_hash = *pending.tx_hash();
    info!("{label} tx: {tx_hash}");

    let receipt = timeout(Duration::from_secs(RECEIPT_TIMEOUT_SECS), pending.get_receipt())
        .await
        .map_err(|_| ContractError::ReceiptTimeout(tx_hash))??;
    debug!(
        "{label} mined in block {:?}, gas used {}",
        receipt.block_number, receipt.gas_used
    );

    ensure_success(receipt, label)
}

pub fn ensure_success(receipt: TransactionReceipt, label: &str) -> ContractResult<TransactionReceipt> {
    if !receipt.status() {
        return Err(ContractError::TransactionFailed {
            label: label.to_string(),
            tx_hash: receipt.transaction_hash,
        });
    }
    Ok(receipt)
}
