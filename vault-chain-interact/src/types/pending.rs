use super::Timepoint;
use crate::call::CallHash;
use chrono::{DateTime, Utc};
use vault_core::Address;

/// A `multisig.multisigs` storage entry for one multisig account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RawPendingRecord {
    pub call_hash: CallHash,
    pub when: Timepoint,
    pub deposit: u128,
    /// Account that opened the call and the only one allowed to cancel it.
    pub depositor: Address,
    /// Signers that approved so far, depositor included.
    pub approvals: Vec<Address>,
    /// Timestamp of the block at `when.height`.
    pub created_at: DateTime<Utc>,
}

impl RawPendingRecord {
    pub fn is_approved_by(&self, signer: &Address) -> bool {
        self.approvals.contains(signer)
    }
}
