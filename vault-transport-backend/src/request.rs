use vault_chain_interact::CallHash;
use vault_core::Address;

use crate::response_vo::multisig::TransactionMetadata;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedTransactionsReq {
    pub multisig: Address,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadataReq {
    pub call_hash: CallHash,
}

/// Metadata posted right after a proposal's first approval lands on chain.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMetadataReq {
    pub call_hash: CallHash,
    pub multisig: Address,
    pub chain_id: String,
    #[serde(flatten)]
    pub metadata: TransactionMetadata,
}
