use crate::capability::PalletCapabilities;
use crate::extrinsic::{Extrinsic, SignedExtrinsic};
use crate::types::{RawPendingRecord, SubmissionOutcome, Weight};
use vault_core::Address;

/// Node access for one chain.
#[async_trait::async_trait]
pub trait ChainRpc: Send + Sync {
    /// Call index table of the runtime. Read once when the chain is loaded.
    async fn pallet_capabilities(&self) -> crate::Result<PalletCapabilities>;

    async fn submit(&self, extrinsic: &SignedExtrinsic) -> crate::Result<SubmissionOutcome>;

    /// Partial fee in the native token's smallest unit.
    async fn estimate_fee(&self, extrinsic: &Extrinsic) -> crate::Result<u128>;

    /// Open `multisig.multisigs` entries of `multisig`.
    async fn pending_multisig_calls(
        &self,
        multisig: &Address,
    ) -> crate::Result<Vec<RawPendingRecord>>;

    /// Whether `delegatee` is a proxy of `delegator`.
    async fn query_proxy_relationship(
        &self,
        delegator: &Address,
        delegatee: &Address,
    ) -> crate::Result<bool>;

    async fn call_weight(&self, call_data: &[u8]) -> crate::Result<Weight>;
}

/// Wallet or extension bridge. Signing itself happens outside this crate.
#[async_trait::async_trait]
pub trait ExtrinsicSigner: Send + Sync {
    async fn sign(
        &self,
        extrinsic: Extrinsic,
        account: &Address,
    ) -> crate::Result<SignedExtrinsic>;
}
