//! Joins on-chain pending calls with off-chain metadata into one pending list per vault.

use super::account::MultisigConfig;
use super::decode::decode_call;
use super::queue::{PendingView, Transaction};
use crate::domain::chain::ChainContext;
use crate::error::business::multisig_queue::MultisigQueueError;
use crate::infrastructure::cache::input_hash;
use crate::infrastructure::poller::Dependency;
use crate::infrastructure::MemoCache;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use vault_chain_interact::types::RawPendingRecord;
use vault_chain_interact::CallHash;
use vault_core::Address;
use vault_transport_backend::{MetadataApi, RawConfirmedRecord, TransactionMetadata};

#[derive(Debug)]
struct Source<T> {
    generation: Option<u64>,
    data: Option<Arc<T>>,
    failed: bool,
}

impl<T> Default for Source<T> {
    fn default() -> Self {
        Self {
            generation: None,
            data: None,
            failed: false,
        }
    }
}

impl<T> Source<T> {
    fn is_stale(&self, generation: u64) -> bool {
        self.generation != Some(generation)
    }

    // a failed fetch keeps the previous data
    fn update(&mut self, generation: u64, res: Result<T, MultisigQueueError>, source: &str) {
        self.generation = Some(generation);
        match res {
            Ok(data) => {
                self.data = Some(Arc::new(data));
                self.failed = false;
            }
            Err(e) => {
                tracing::warn!(source, "{e}");
                self.failed = true;
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.data.is_none() || self.failed
    }
}

#[derive(Debug, Default)]
struct VaultSources {
    pending: Source<Vec<RawPendingRecord>>,
    confirmed: Source<HashMap<CallHash, TransactionMetadata>>,
    /// Lookups by call hash for pending calls the confirmed list did not cover.
    fallback: HashMap<CallHash, TransactionMetadata>,
    /// Confirmed generation at which a fallback lookup last came back empty.
    fallback_misses: HashMap<CallHash, u64>,
}

#[derive(Hash)]
struct MergeInput<'a> {
    config: &'a MultisigConfig,
    tokens: &'a [vault_types::token::Token],
    pending: &'a [RawPendingRecord],
    metadata: Vec<(&'a CallHash, &'a TransactionMetadata)>,
}

pub struct Reconciler {
    pending: Dependency,
    confirmed: Dependency,
    sources: DashMap<(String, Address), Arc<Mutex<VaultSources>>>,
    memo: MemoCache<Address, Vec<Transaction>>,
    /// Shared list returned until the first pending fetch succeeds.
    empty: Arc<Vec<Transaction>>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            pending: Dependency::new("pending"),
            confirmed: Dependency::new("confirmed"),
            sources: DashMap::new(),
            memo: MemoCache::new(),
            empty: Arc::new(Vec::new()),
        }
    }

    pub fn pending_dependency(&self) -> &Dependency {
        &self.pending
    }

    pub fn confirmed_dependency(&self) -> &Dependency {
        &self.confirmed
    }

    /// Forces both sources to be fetched again on the next reconcile.
    pub fn invalidate_all(&self) {
        self.pending.invalidate();
        self.confirmed.invalidate();
    }

    pub async fn forget(&self, config: &MultisigConfig) {
        self.sources
            .remove(&(config.chain.id.clone(), config.address_multisig));
        self.memo.delete(&config.address_proxy).await;
    }

    pub async fn reconcile(
        &self,
        config: Arc<MultisigConfig>,
        chain: &ChainContext,
        metadata: &dyn MetadataApi,
    ) -> PendingView {
        let key = (config.chain.id.clone(), config.address_multisig);
        let sources = self.sources.entry(key).or_default().clone();
        let mut sources = sources.lock().await;

        self.refresh_sources(&mut sources, &config, chain, metadata)
            .await;
        let loading = sources.pending.is_loading() || sources.confirmed.is_loading();

        let Some(pending) = sources.pending.data.clone() else {
            return PendingView {
                transactions: self.empty.clone(),
                loading,
            };
        };
        let confirmed = sources.confirmed.data.clone().unwrap_or_default();
        self.lookup_fallbacks(&mut sources, &pending, &confirmed, metadata)
            .await;

        let mut known: Vec<(&CallHash, &TransactionMetadata)> = pending
            .iter()
            .filter_map(|p| {
                let hash = &p.call_hash;
                confirmed
                    .get(hash)
                    .or_else(|| sources.fallback.get(hash))
                    .map(|m| (hash, m))
            })
            .collect();
        known.sort_by_key(|(hash, _)| **hash);

        let hash = input_hash(&MergeInput {
            config: &config,
            tokens: &chain.tokens,
            pending: &pending,
            metadata: known.clone(),
        });
        let lookup: HashMap<CallHash, TransactionMetadata> = known
            .into_iter()
            .map(|(h, m)| (*h, m.clone()))
            .collect();

        let transactions = self
            .memo
            .get_or_compute(&config.address_proxy, hash, || {
                merge(&config, chain, &pending, &lookup)
            })
            .await;

        PendingView {
            transactions,
            loading,
        }
    }

    async fn refresh_sources(
        &self,
        sources: &mut VaultSources,
        config: &MultisigConfig,
        chain: &ChainContext,
        metadata: &dyn MetadataApi,
    ) {
        let pending_gen = self.pending.generation();
        let confirmed_gen = self.confirmed.generation();
        let fetch_pending = sources.pending.is_stale(pending_gen);
        let fetch_confirmed = sources.confirmed.is_stale(confirmed_gen);
        let multisig = config.address_multisig;

        let (pending, confirmed) = tokio::join!(
            async {
                if !fetch_pending {
                    return None;
                }
                Some(
                    chain
                        .rpc
                        .pending_multisig_calls(&multisig)
                        .await
                        .map_err(|e| MultisigQueueError::FetchFailed(e.to_string())),
                )
            },
            async {
                if !fetch_confirmed {
                    return None;
                }
                Some(
                    metadata
                        .confirmed_transactions(&multisig)
                        .await
                        .map(index_confirmed)
                        .map_err(|e| MultisigQueueError::FetchFailed(e.to_string())),
                )
            }
        );

        if let Some(res) = pending {
            sources.pending.update(pending_gen, res, self.pending.name());
        }
        if let Some(res) = confirmed {
            sources
                .confirmed
                .update(confirmed_gen, res, self.confirmed.name());
        }
    }

    async fn lookup_fallbacks(
        &self,
        sources: &mut VaultSources,
        pending: &[RawPendingRecord],
        confirmed: &HashMap<CallHash, TransactionMetadata>,
        metadata: &dyn MetadataApi,
    ) {
        let generation = self.confirmed.generation();
        let missing: Vec<CallHash> = pending
            .iter()
            .map(|p| p.call_hash)
            .filter(|h| !confirmed.contains_key(h) && !sources.fallback.contains_key(h))
            .filter(|h| sources.fallback_misses.get(h) != Some(&generation))
            .collect();
        if missing.is_empty() {
            return;
        }

        let found = futures::future::join_all(
            missing
                .iter()
                .map(|hash| async move { (*hash, metadata.transaction_metadata(hash).await) }),
        )
        .await;

        for (hash, res) in found {
            match res {
                Ok(Some(md)) => {
                    sources.fallback.insert(hash, md);
                }
                Ok(None) => {
                    sources.fallback_misses.insert(hash, generation);
                }
                Err(e) => tracing::warn!(%hash, "metadata lookup failed: {e}"),
            }
        }

        let live: std::collections::HashSet<CallHash> =
            pending.iter().map(|p| p.call_hash).collect();
        sources.fallback.retain(|h, _| live.contains(h));
        sources.fallback_misses.retain(|h, _| live.contains(h));
    }
}

fn index_confirmed(records: Vec<RawConfirmedRecord>) -> HashMap<CallHash, TransactionMetadata> {
    records
        .into_iter()
        .map(|r| (r.call_hash, r.metadata))
        .collect()
}

fn merge(
    config: &Arc<MultisigConfig>,
    chain: &ChainContext,
    pending: &[RawPendingRecord],
    metadata: &HashMap<CallHash, TransactionMetadata>,
) -> Vec<Transaction> {
    let mut res: Vec<Transaction> = pending
        .iter()
        .map(|record| {
            let md = metadata.get(&record.call_hash);
            let call_data = md
                .and_then(|m| m.call_data.as_ref())
                .filter(|data| {
                    let matches = CallHash::of(data) == record.call_hash;
                    if !matches {
                        tracing::warn!(hash = %record.call_hash, "metadata call data does not hash to the pending call");
                    }
                    matches
                })
                .cloned();
            let decoded = decode_call(
                call_data.as_deref(),
                &chain.caps,
                config,
                &chain.tokens,
                md.and_then(|m| m.change_config_details.as_ref()),
            );
            Transaction::new(
                config.clone(),
                record.clone(),
                md.map(|m| m.description.clone()),
                call_data,
                decoded,
            )
        })
        .collect();
    res.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.hash.cmp(&b.hash)));
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::mock::{MockChainRpc, MockMetadataApi};
    use vault_types::chain::{supported_chains, ChainCatalog as _};

    fn addr(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    async fn setup() -> (Arc<MultisigConfig>, ChainContext, Arc<MockChainRpc>, MockMetadataApi) {
        let chain = supported_chains().find_by_id("polkadot").unwrap().clone();
        let config = Arc::new(
            MultisigConfig::new("t", addr(9), vec![addr(1), addr(2), addr(3)], 2, chain.clone())
                .unwrap(),
        );
        let rpc = Arc::new(MockChainRpc::polkadot());
        let ctx = ChainContext::load(chain, rpc.clone(), vec![]).await.unwrap();
        (config, ctx, rpc, MockMetadataApi::default())
    }

    #[tokio::test]
    async fn test_pending_without_metadata_is_unknown() {
        let (config, ctx, rpc, metadata) = setup().await;
        rpc.open_pending(config.address_multisig, CallHash::of(b"mystery"), addr(1));

        let reconciler = Reconciler::new();
        let view = reconciler.reconcile(config.clone(), &ctx, &metadata).await;
        assert!(!view.loading);
        assert_eq!(view.transactions.len(), 1);
        let tx = &view.transactions[0];
        assert!(tx.decoded.is_unknown());
        assert_eq!(tx.description, None);
        assert!(!tx.call_data_known());
    }

    #[tokio::test]
    async fn test_metadata_without_pending_is_excluded() {
        let (config, ctx, _rpc, metadata) = setup().await;
        metadata.insert_confirmed(
            config.address_multisig,
            &config.chain.id,
            CallHash::of(b"done"),
            TransactionMetadata {
                description: "already executed".to_string(),
                call_data: Some(b"done".to_vec()),
                change_config_details: None,
            },
        );
        let view = Reconciler::new().reconcile(config, &ctx, &metadata).await;
        assert!(view.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_unchanged_inputs_give_same_arc() {
        let (config, ctx, rpc, metadata) = setup().await;
        rpc.open_pending(config.address_multisig, CallHash::of(b"a"), addr(1));

        let reconciler = Reconciler::new();
        let first = reconciler.reconcile(config.clone(), &ctx, &metadata).await;
        reconciler.invalidate_all();
        let second = reconciler.reconcile(config.clone(), &ctx, &metadata).await;
        assert!(Arc::ptr_eq(&first.transactions, &second.transactions));

        rpc.open_pending(config.address_multisig, CallHash::of(b"b"), addr(2));
        let third = reconciler.reconcile(config.clone(), &ctx, &metadata).await;
        // generation did not move, so the new record is not fetched yet
        assert!(Arc::ptr_eq(&first.transactions, &third.transactions));

        reconciler.pending_dependency().invalidate();
        let fourth = reconciler.reconcile(config, &ctx, &metadata).await;
        assert_eq!(fourth.transactions.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_first_fetch_gives_same_empty_arc() {
        let (config, ctx, rpc, metadata) = setup().await;
        rpc.set_fail_pending(true);

        let reconciler = Reconciler::new();
        let first = reconciler.reconcile(config.clone(), &ctx, &metadata).await;
        reconciler.invalidate_all();
        let second = reconciler.reconcile(config, &ctx, &metadata).await;
        assert!(first.loading && second.loading);
        assert!(second.transactions.is_empty());
        assert!(Arc::ptr_eq(&first.transactions, &second.transactions));
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_list() {
        let (config, ctx, rpc, metadata) = setup().await;
        rpc.open_pending(config.address_multisig, CallHash::of(b"a"), addr(1));

        let reconciler = Reconciler::new();
        let first = reconciler.reconcile(config.clone(), &ctx, &metadata).await;
        assert_eq!(first.transactions.len(), 1);

        rpc.set_fail_pending(true);
        reconciler.invalidate_all();
        let failed = reconciler.reconcile(config.clone(), &ctx, &metadata).await;
        assert!(failed.loading);
        assert!(Arc::ptr_eq(&first.transactions, &failed.transactions));

        rpc.set_fail_pending(false);
        reconciler.invalidate_all();
        let recovered = reconciler.reconcile(config, &ctx, &metadata).await;
        assert!(!recovered.loading);
    }

    #[tokio::test]
    async fn test_fallback_metadata_lookup() {
        let (config, ctx, rpc, metadata) = setup().await;
        let hash = CallHash::of(b"late");
        rpc.open_pending(config.address_multisig, hash, addr(1));
        metadata.insert_detail(
            hash,
            TransactionMetadata {
                description: "found by hash".to_string(),
                call_data: None,
                change_config_details: None,
            },
        );

        let view = Reconciler::new().reconcile(config, &ctx, &metadata).await;
        assert_eq!(
            view.transactions[0].description.as_deref(),
            Some("found by hash")
        );
    }
}
