use chrono::{DateTime, Utc};
use vault_chain_interact::CallHash;
use vault_core::Address;

/// New signer set carried by a change-config proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChangeConfigDetails {
    pub signers: Vec<Address>,
    pub threshold: u16,
}

/// Off-chain description of a call, keyed by its hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadata {
    pub description: String,
    #[serde(with = "vault_utils::serde_func::hex_bytes_opt", default)]
    pub call_data: Option<Vec<u8>>,
    #[serde(default)]
    pub change_config_details: Option<ChangeConfigDetails>,
}

/// A metadata row stored for a multisig.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfirmedRecord {
    pub call_hash: CallHash,
    pub multisig: Address,
    pub chain_id: String,
    #[serde(flatten)]
    pub metadata: TransactionMetadata,
    pub created: DateTime<Utc>,
}
