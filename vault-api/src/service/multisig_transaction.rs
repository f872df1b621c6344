use crate::domain::chain::ChainContext;
use crate::domain::multisig::approval::{
    self, apply_config_change_on_success, transaction_actions, BlockReason, TransactionActions,
};
use crate::domain::multisig::{MultisigConfig, PendingView, Transaction};
use crate::error::business::multisig_queue::MultisigQueueError;
use crate::error::business::multisig_vault::MultisigVaultError;
use crate::manager::Context;
use std::sync::Arc;
use std::time::Duration;
use vault_chain_interact::operations::config::ChangeConfigOpt;
use vault_chain_interact::operations::transfer::TransferOpt;
use vault_chain_interact::operations::CallOperation as _;
use vault_chain_interact::types::SubmissionOutcome;
use vault_chain_interact::{Call, CallHash, Extrinsic};
use vault_core::Address;
use vault_transport_backend::request::SubmitMetadataReq;
use vault_transport_backend::{ChangeConfigDetails, TransactionMetadata};
use vault_types::balance::Balance;

#[derive(Debug, Clone)]
pub struct SubmitResult {
    /// Hash of the vault call the multisig operation is about.
    pub call_hash: CallHash,
    pub outcome: SubmissionOutcome,
    /// Advisory, `None` when the estimate failed or timed out.
    pub fee: Option<Balance>,
    pub executed: bool,
    /// Set when an executed config change replaced the vault's config.
    pub new_config: Option<Arc<MultisigConfig>>,
}

pub struct MultisigTransactionService {
    ctx: Arc<Context>,
}

impl MultisigTransactionService {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self { ctx }
    }

    pub async fn pending(&self, address_proxy: &Address) -> Result<PendingView, crate::ServiceError> {
        let config = self.ctx.vault(address_proxy)?;
        self.ctx.pending_view(config).await
    }

    pub async fn actions(
        &self,
        address_proxy: &Address,
        call_hash: &CallHash,
        accounts: &[Address],
    ) -> Result<TransactionActions, crate::ServiceError> {
        let view = self.pending(address_proxy).await?;
        let tx = find(&view, call_hash)?;
        Ok(transaction_actions(tx, &view.transactions, accounts))
    }

    pub async fn propose_transfer(
        &self,
        address_proxy: &Address,
        signer: Address,
        recipients: Vec<(Address, Balance)>,
        description: &str,
    ) -> Result<SubmitResult, crate::ServiceError> {
        let config = self.ctx.vault(address_proxy)?;
        let chain = self.ctx.chain(&config.chain.id)?;
        let call = TransferOpt::new(config.address_proxy, &recipients).build_call(&chain.caps)?;
        self.propose(&config, &chain, signer, call, description, None)
            .await
    }

    pub async fn propose_change_config(
        &self,
        address_proxy: &Address,
        signer: Address,
        new_signers: Vec<Address>,
        new_threshold: u16,
        description: &str,
    ) -> Result<SubmitResult, crate::ServiceError> {
        let config = self.ctx.vault(address_proxy)?;
        let chain = self.ctx.chain(&config.chain.id)?;
        // validates the new set the same way a fresh vault is validated
        let next = config.with_signers(new_signers, new_threshold)?;
        let call = ChangeConfigOpt::new(
            config.address_proxy,
            config.address_multisig,
            &next.signers,
            next.threshold,
        )?
        .build_call(&chain.caps)?;
        let details = ChangeConfigDetails {
            signers: next.signers.clone(),
            threshold: next.threshold,
        };
        self.propose(&config, &chain, signer, call, description, Some(details))
            .await
    }

    // first approval opens the operation on chain, then the call itself goes to the metadata store
    async fn propose(
        &self,
        config: &MultisigConfig,
        chain: &ChainContext,
        signer: Address,
        call: Call,
        description: &str,
        change_config_details: Option<ChangeConfigDetails>,
    ) -> Result<SubmitResult, crate::ServiceError> {
        let call_data = call.encode_with(&chain.caps)?;
        let call_hash = CallHash::of(&call_data);
        let extrinsic = approval::build_approve(signer, call_hash, None, config, &chain.caps)?;
        let (outcome, fee) = self.submit(chain, extrinsic, signer).await?;

        let req = SubmitMetadataReq {
            call_hash,
            multisig: config.address_multisig,
            chain_id: chain.chain.id.clone(),
            metadata: TransactionMetadata {
                description: description.to_string(),
                call_data: Some(call_data),
                change_config_details,
            },
        };
        self.ctx.metadata.submit_metadata(req).await.map_err(|e| {
            tracing::error!(%call_hash, "proposal on chain but metadata not stored: {e}");
            e
        })?;
        self.ctx.refresh().await;

        Ok(SubmitResult {
            call_hash,
            outcome,
            fee,
            executed: false,
            new_config: None,
        })
    }

    /// Adds the next eligible account's approval without executing.
    pub async fn approve(
        &self,
        address_proxy: &Address,
        call_hash: &CallHash,
        accounts: &[Address],
    ) -> Result<SubmitResult, crate::ServiceError> {
        let (tx, chain, actions) = self.load(address_proxy, call_hash, accounts).await?;
        let signer = actions
            .next_signer
            .ok_or(MultisigQueueError::NoEligibleSigner)?;

        let extrinsic = approval::build_approve(
            signer,
            tx.hash,
            Some(tx.timepoint()),
            &tx.config,
            &chain.caps,
        )?;
        let (outcome, fee) = self.submit(&chain, extrinsic, signer).await?;
        self.ctx.refresh().await;

        Ok(SubmitResult {
            call_hash: tx.hash,
            outcome,
            fee,
            executed: false,
            new_config: None,
        })
    }

    /// Final approval carrying the call data. Executes the vault call.
    pub async fn execute(
        &self,
        address_proxy: &Address,
        call_hash: &CallHash,
        accounts: &[Address],
    ) -> Result<SubmitResult, crate::ServiceError> {
        let (tx, chain, actions) = self.load(address_proxy, call_hash, accounts).await?;
        match actions.blocked {
            Some(BlockReason::ConfigChangePending { others }) => {
                return Err(MultisigQueueError::ConfigChangeBlocked(others).into());
            }
            Some(BlockReason::CallDataUnknown) => {
                return Err(MultisigQueueError::CallDataUnknown.into());
            }
            _ => {}
        }
        let signer = actions
            .next_signer
            .ok_or(MultisigQueueError::NoEligibleSigner)?;
        let call_data = match (&tx.raw_call_data, actions.ready_to_execute) {
            (Some(data), true) => data.clone(),
            (None, _) => return Err(MultisigQueueError::CallDataUnknown.into()),
            (Some(_), false) => {
                return Err(MultisigQueueError::NotReady {
                    approvals: approval::approval_count(&tx.approvals),
                    threshold: tx.config.threshold,
                }
                .into())
            }
        };

        let max_weight = chain.rpc.call_weight(&call_data).await?;
        let extrinsic = approval::build_execute(
            signer,
            call_data,
            Some(tx.timepoint()),
            &tx.config,
            max_weight,
            &chain.caps,
        )?;
        let (outcome, fee) = self.submit(&chain, extrinsic, signer).await?;
        let new_config = self.apply_config_change(&tx, &outcome, &chain).await?;
        self.ctx.refresh().await;

        Ok(SubmitResult {
            call_hash: tx.hash,
            outcome,
            fee,
            executed: true,
            new_config,
        })
    }

    /// Only the account that opened the operation can cancel it.
    pub async fn cancel(
        &self,
        address_proxy: &Address,
        call_hash: &CallHash,
        initiator: Address,
    ) -> Result<SubmitResult, crate::ServiceError> {
        let config = self.ctx.vault(address_proxy)?;
        let chain = self.ctx.chain(&config.chain.id)?;
        let view = self.ctx.pending_view(config.clone()).await?;
        let pending = view.find(call_hash).map(|t| t.raw_pending.clone());

        let extrinsic = approval::build_cancel(initiator, pending.as_ref(), &config, &chain.caps)?;
        let (outcome, fee) = self.submit(&chain, extrinsic, initiator).await?;
        self.ctx.refresh().await;

        Ok(SubmitResult {
            call_hash: *call_hash,
            outcome,
            fee,
            executed: false,
            new_config: None,
        })
    }

    async fn load(
        &self,
        address_proxy: &Address,
        call_hash: &CallHash,
        accounts: &[Address],
    ) -> Result<(Transaction, Arc<ChainContext>, TransactionActions), crate::ServiceError> {
        let config = self.ctx.vault(address_proxy)?;
        let chain = self.ctx.chain(&config.chain.id)?;
        let view = self.ctx.pending_view(config).await?;
        let tx = find(&view, call_hash)?;
        let actions = transaction_actions(tx, &view.transactions, accounts);
        Ok((tx.clone(), chain, actions))
    }

    async fn estimate_fee(&self, chain: &ChainContext, extrinsic: &Extrinsic) -> Option<Balance> {
        let timeout = Duration::from_secs(self.ctx.config.fee.estimate_timeout_secs);
        match tokio::time::timeout(timeout, chain.rpc.estimate_fee(extrinsic)).await {
            Ok(Ok(fee)) => Some(Balance::new(fee, chain.native_token())),
            Ok(Err(e)) => {
                tracing::warn!(chain = %chain.chain.id, "fee estimate failed: {e}");
                None
            }
            Err(_) => {
                tracing::warn!(chain = %chain.chain.id, "fee estimate timed out");
                None
            }
        }
    }

    // the estimate sees exactly the extrinsic that gets signed
    async fn submit(
        &self,
        chain: &ChainContext,
        extrinsic: Extrinsic,
        account: Address,
    ) -> Result<(SubmissionOutcome, Option<Balance>), crate::ServiceError> {
        let fee = self.estimate_fee(chain, &extrinsic).await;
        let call_hash = extrinsic.call_hash();
        let signed = self.ctx.signer.sign(extrinsic, &account).await?;
        let outcome = chain.rpc.submit(&signed).await?;

        match &outcome {
            SubmissionOutcome::Success { extrinsic_hash, .. } => {
                tracing::info!(
                    chain = %chain.chain.id,
                    %call_hash,
                    url = %chain.chain.subscan_extrinsic_url(extrinsic_hash),
                    "extrinsic submitted"
                );
                Ok((outcome, fee))
            }
            SubmissionOutcome::Failure { reason } => {
                tracing::warn!(chain = %chain.chain.id, %call_hash, "extrinsic failed: {reason}");
                Err(MultisigQueueError::SubmissionFailed(reason.clone()).into())
            }
        }
    }

    // the new proxy may not be visible on the first query, so a few attempts are made
    async fn apply_config_change(
        &self,
        tx: &Transaction,
        outcome: &SubmissionOutcome,
        chain: &ChainContext,
    ) -> Result<Option<Arc<MultisigConfig>>, crate::ServiceError> {
        if !tx.decoded.is_change_config() {
            return Ok(None);
        }
        let settings = &self.ctx.config.config_change;
        let attempts = settings.confirm_attempts.max(1);
        let mut attempt = 1;
        loop {
            match apply_config_change_on_success(tx, outcome, chain.rpc.as_ref(), &self.ctx.store)
                .await
            {
                Ok(new_config) => {
                    if new_config.is_some() {
                        self.ctx.reconciler.forget(&tx.config).await;
                    }
                    return Ok(new_config);
                }
                Err(crate::ServiceError::Business(crate::BusinessError::MultisigVault(
                    MultisigVaultError::ConfigReconciliationFailed(reason),
                ))) if attempt < attempts => {
                    tracing::debug!(attempt, "config change not visible yet: {reason}");
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(settings.confirm_delay_ms)).await;
                }
                Err(e) => {
                    tracing::error!(vault = %tx.config.address_proxy, "config change not applied: {e}");
                    return Err(e);
                }
            }
        }
    }
}

fn find<'a>(view: &'a PendingView, call_hash: &CallHash) -> Result<&'a Transaction, crate::ServiceError> {
    view.find(call_hash)
        .ok_or_else(|| MultisigQueueError::NotFound(call_hash.to_hex()).into())
}
