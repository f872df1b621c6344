//! Who signs next, when a transaction may execute, and the extrinsics that move it along.

use super::account::{MultisigConfig, VaultStore};
use super::queue::{Approvals, DecodedCall, Transaction};
use crate::error::business::multisig_queue::MultisigQueueError;
use crate::error::business::multisig_vault::MultisigVaultError;
use std::sync::Arc;
use vault_chain_interact::operations::multisig::{
    ApproveAsMultiOpt, AsMultiOpt, CancelAsMultiOpt,
};
use vault_chain_interact::types::{RawPendingRecord, SubmissionOutcome, Timepoint, Weight};
use vault_chain_interact::{CallHash, ChainRpc, Extrinsic, PalletCapabilities};
use vault_core::Address;

/// First signer, in key order, that has not approved and is one of `accounts`.
pub fn next_signer(approvals: &Approvals, accounts: &[Address]) -> Option<Address> {
    approvals
        .iter()
        .find(|(signer, approved)| !**approved && accounts.contains(*signer))
        .map(|(signer, _)| *signer)
}

pub fn approval_count(approvals: &Approvals) -> usize {
    approvals.values().filter(|v| **v).count()
}

/// The executing `as_multi` is itself the last approval, hence `threshold - 1`.
pub fn is_ready_to_execute(approvals: &Approvals, threshold: u16, call_data_known: bool) -> bool {
    call_data_known && approval_count(approvals) >= threshold.saturating_sub(1) as usize
}

/// Why an action is unavailable. Reported as state, not as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum BlockReason {
    NoEligibleSigner,
    ConfigChangePending { others: usize },
    CallDataUnknown,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionActions {
    pub next_signer: Option<Address>,
    pub ready_to_execute: bool,
    pub can_approve: bool,
    pub can_execute: bool,
    pub can_cancel: bool,
    pub blocked: Option<BlockReason>,
}

/// Actions open to the holder of `accounts` on `tx`, given every pending transaction of the vault.
pub fn transaction_actions(
    tx: &Transaction,
    all_pending: &[Transaction],
    accounts: &[Address],
) -> TransactionActions {
    let next = next_signer(&tx.approvals, accounts);
    let others = all_pending.iter().filter(|t| t.hash != tx.hash).count();
    let config_blocked = tx.decoded.is_change_config() && others > 0;
    let enough = is_ready_to_execute(&tx.approvals, tx.config.threshold, true);
    let ready = enough && tx.call_data_known() && !config_blocked;

    let blocked = if config_blocked {
        Some(BlockReason::ConfigChangePending { others })
    } else if next.is_none() {
        Some(BlockReason::NoEligibleSigner)
    } else if enough && !tx.call_data_known() {
        Some(BlockReason::CallDataUnknown)
    } else {
        None
    };

    TransactionActions {
        next_signer: next,
        ready_to_execute: ready,
        can_approve: next.is_some(),
        can_execute: ready && next.is_some(),
        can_cancel: accounts.contains(&tx.depositor()),
        blocked,
    }
}

pub fn build_approve(
    signer: Address,
    call_hash: CallHash,
    timepoint: Option<Timepoint>,
    config: &MultisigConfig,
    caps: &PalletCapabilities,
) -> Result<Extrinsic, crate::ServiceError> {
    let opt = ApproveAsMultiOpt::new(config.party(signer), timepoint, call_hash);
    Ok(opt.extrinsic(&config.chain.id, caps)?)
}

pub fn build_execute(
    signer: Address,
    call_data: Vec<u8>,
    timepoint: Option<Timepoint>,
    config: &MultisigConfig,
    max_weight: Weight,
    caps: &PalletCapabilities,
) -> Result<Extrinsic, crate::ServiceError> {
    let opt = AsMultiOpt::new(config.party(signer), timepoint, call_data, max_weight);
    Ok(opt.extrinsic(&config.chain.id, caps)?)
}

/// Only the depositor of the pending record may cancel.
pub fn build_cancel(
    initiator: Address,
    pending: Option<&RawPendingRecord>,
    config: &MultisigConfig,
    caps: &PalletCapabilities,
) -> Result<Extrinsic, crate::ServiceError> {
    let pending = pending.ok_or(MultisigQueueError::PendingRecordMissing)?;
    if pending.depositor != initiator {
        return Err(MultisigQueueError::NotOriginator.into());
    }
    let opt = CancelAsMultiOpt::new(config.party(initiator), pending.when, pending.call_hash);
    Ok(opt.extrinsic(&config.chain.id, caps)?)
}

/// Swaps the vault's config once the executed change is visible on chain.
///
/// Returns `Ok(None)` when there is nothing to apply: the outcome failed or the
/// transaction is not a config change.
pub async fn apply_config_change_on_success(
    tx: &Transaction,
    outcome: &SubmissionOutcome,
    rpc: &dyn ChainRpc,
    store: &VaultStore,
) -> Result<Option<Arc<MultisigConfig>>, crate::ServiceError> {
    if !outcome.is_success() {
        return Ok(None);
    }
    let DecodedCall::ChangeConfig {
        new_signers,
        new_threshold,
    } = &tx.decoded
    else {
        return Ok(None);
    };

    let next = tx.config.with_signers(new_signers.clone(), *new_threshold)?;
    let confirmed = rpc
        .query_proxy_relationship(&next.address_proxy, &next.address_multisig)
        .await?;
    if !confirmed {
        return Err(MultisigVaultError::ConfigReconciliationFailed(format!(
            "{} is not yet a proxy of {}",
            next.address_multisig, next.address_proxy
        ))
        .into());
    }

    tracing::info!(
        vault = %next.address_proxy,
        old = %tx.config.address_multisig,
        new = %next.address_multisig,
        "multisig config replaced"
    );
    Ok(Some(store.insert(next)))
}
