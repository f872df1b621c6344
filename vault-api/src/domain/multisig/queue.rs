use super::account::MultisigConfig;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use vault_chain_interact::types::{RawPendingRecord, Timepoint};
use vault_chain_interact::CallHash;
use vault_core::Address;
use vault_types::balance::Balance;

/// One entry per signer of the config, `true` once that signer approved.
pub type Approvals = BTreeMap<Address, bool>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DecodedCall {
    Transfer {
        recipients: Vec<(Address, Balance)>,
    },
    ChangeConfig {
        new_signers: Vec<Address>,
        new_threshold: u16,
    },
    /// Call data missing or of a shape the vault does not build.
    Unknown { raw_yaml: Option<String> },
}

impl DecodedCall {
    pub fn is_unknown(&self) -> bool {
        matches!(self, DecodedCall::Unknown { .. })
    }

    pub fn is_change_config(&self) -> bool {
        matches!(self, DecodedCall::ChangeConfig { .. })
    }
}

/// A pending vault transaction as shown to a signer. Rebuilt every reconciliation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: CallHash,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
    pub chain_id: String,
    pub config: Arc<MultisigConfig>,
    pub approvals: Approvals,
    pub decoded: DecodedCall,
    pub raw_call_data: Option<Vec<u8>>,
    pub raw_pending: RawPendingRecord,
}

impl Transaction {
    pub fn new(
        config: Arc<MultisigConfig>,
        pending: RawPendingRecord,
        description: Option<String>,
        raw_call_data: Option<Vec<u8>>,
        decoded: DecodedCall,
    ) -> Self {
        let approvals = approvals_for(&config, &pending);
        Self {
            hash: pending.call_hash,
            created_at: pending.created_at,
            description,
            chain_id: config.chain.id.clone(),
            config,
            approvals,
            decoded,
            raw_call_data,
            raw_pending: pending,
        }
    }

    pub fn timepoint(&self) -> Timepoint {
        self.raw_pending.when
    }

    pub fn depositor(&self) -> Address {
        self.raw_pending.depositor
    }

    /// Executable only with call data whose shape is understood.
    pub fn call_data_known(&self) -> bool {
        self.raw_call_data.is_some() && !self.decoded.is_unknown()
    }

    pub fn is_fully_approved(&self) -> bool {
        self.approvals.values().all(|v| *v)
    }
}

// approvals from signers outside the current config are dropped
fn approvals_for(config: &MultisigConfig, pending: &RawPendingRecord) -> Approvals {
    config
        .signers
        .iter()
        .map(|s| (*s, pending.is_approved_by(s)))
        .collect()
}

/// The reconciled pending list of one vault.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingView {
    /// Sorted by creation time.
    pub transactions: Arc<Vec<Transaction>>,
    /// Set while a source has not produced data yet or its last fetch failed.
    pub loading: bool,
}

impl PendingView {
    pub fn find(&self, hash: &CallHash) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.hash == *hash)
    }
}
