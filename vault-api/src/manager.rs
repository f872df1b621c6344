use crate::domain::chain::ChainContext;
use crate::domain::multisig::reconciler::Reconciler;
use crate::domain::multisig::{MultisigConfig, PendingView, VaultStore};
use crate::error::business::multisig_vault::MultisigVaultError;
use crate::infrastructure::poller::PollerHandle;
use crate::service::multisig_account::MultisigAccountService;
use crate::service::multisig_transaction::MultisigTransactionService;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use vault_chain_interact::{ChainRpc, ExtrinsicSigner};
use vault_core::Address;
use vault_transport_backend::MetadataApi;

/// Everything a service call needs, shared behind an `Arc`.
pub struct Context {
    pub config: crate::Config,
    pub store: VaultStore,
    pub chains: DashMap<String, Arc<ChainContext>>,
    pub metadata: Arc<dyn MetadataApi>,
    pub signer: Arc<dyn ExtrinsicSigner>,
    pub reconciler: Reconciler,
    poller: Mutex<Option<PollerHandle>>,
    views: DashMap<Address, watch::Sender<PendingView>>,
}

impl Context {
    pub fn new(
        config: crate::Config,
        metadata: Arc<dyn MetadataApi>,
        signer: Arc<dyn ExtrinsicSigner>,
    ) -> Self {
        Self {
            config,
            store: VaultStore::new(),
            chains: DashMap::new(),
            metadata,
            signer,
            reconciler: Reconciler::new(),
            poller: Mutex::new(None),
            views: DashMap::new(),
        }
    }

    /// A chain that is not in the catalog is a configuration error and is never defaulted.
    pub fn chain(&self, chain_id: &str) -> Result<Arc<ChainContext>, crate::ServiceError> {
        if let Some(chain) = self.chains.get(chain_id) {
            return Ok(chain.value().clone());
        }
        if self.config.chain(chain_id).is_err() {
            tracing::error!(chain_id, "vault refers to a chain missing from the catalog");
            return Err(MultisigVaultError::UnknownChain(chain_id.to_string()).into());
        }
        Err(crate::SystemError::ChainNotLoaded(chain_id.to_string()).into())
    }

    pub fn vault(&self, address_proxy: &Address) -> Result<Arc<MultisigConfig>, crate::ServiceError> {
        self.store
            .get(address_proxy)
            .ok_or_else(|| MultisigVaultError::NotFound(address_proxy.to_hex()).into())
    }

    pub async fn pending_view(
        &self,
        config: Arc<MultisigConfig>,
    ) -> Result<PendingView, crate::ServiceError> {
        let chain = self.chain(&config.chain.id)?;
        let address_proxy = config.address_proxy;
        let view = self
            .reconciler
            .reconcile(config, &chain, self.metadata.as_ref())
            .await;
        self.publish(address_proxy, &view);
        Ok(view)
    }

    // watchers are only woken when the list or the loading flag really changed
    fn publish(&self, address_proxy: Address, view: &PendingView) {
        if let Some(tx) = self.views.get(&address_proxy) {
            tx.send_if_modified(|current| {
                let same = Arc::ptr_eq(&current.transactions, &view.transactions)
                    && current.loading == view.loading;
                if !same {
                    *current = view.clone();
                }
                !same
            });
        }
    }

    pub fn subscribe(&self, address_proxy: Address) -> watch::Receiver<PendingView> {
        self.views
            .entry(address_proxy)
            .or_insert_with(|| watch::channel(PendingView::default()).0)
            .subscribe()
    }

    pub(crate) fn unsubscribe_all(&self, address_proxy: &Address) {
        self.views.remove(address_proxy);
    }

    /// One poll cycle over every stored vault. A vault that fails is logged and skipped.
    pub async fn reconcile_all(&self) -> Result<(), crate::ServiceError> {
        for config in self.store.list() {
            let vault = config.address_proxy;
            if let Err(e) = self.pending_view(config).await {
                tracing::error!(%vault, "reconcile failed: {e}");
            }
        }
        Ok(())
    }

    /// Marks both sources stale and wakes the pollers.
    pub async fn refresh(&self) {
        self.reconciler.invalidate_all();
        if let Some(poller) = self.poller.lock().await.as_ref() {
            poller.refresh();
        }
    }
}

pub struct VaultManager {
    ctx: Arc<Context>,
}

impl VaultManager {
    pub fn new(
        config: crate::Config,
        metadata: Arc<dyn MetadataApi>,
        signer: Arc<dyn ExtrinsicSigner>,
    ) -> Self {
        Self {
            ctx: Arc::new(Context::new(config, metadata, signer)),
        }
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.ctx
    }

    /// Loads a catalog chain with its node client.
    pub async fn register_chain(
        &self,
        chain_id: &str,
        rpc: Arc<dyn ChainRpc>,
    ) -> Result<(), crate::ServiceError> {
        let chain = self.ctx.config.chain(chain_id).map_err(|e| {
            tracing::error!(chain_id, "register chain: {e}");
            e
        })?;
        let ctx = ChainContext::load(
            chain.clone(),
            rpc,
            self.ctx.config.tokens_of(chain_id),
        )
        .await?;
        self.ctx.chains.insert(chain_id.to_string(), Arc::new(ctx));
        Ok(())
    }

    pub async fn start_polling(&self) -> Result<(), crate::ServiceError> {
        let mut poller = self.ctx.poller.lock().await;
        if poller.is_some() {
            return Err(crate::SystemError::PollerStarted.into());
        }

        let poll = &self.ctx.config.poll;
        let mut handle = PollerHandle::new(CancellationToken::new());
        let sources = [
            (
                self.ctx.reconciler.pending_dependency().clone(),
                poll.pending_interval_secs,
            ),
            (
                self.ctx.reconciler.confirmed_dependency().clone(),
                poll.confirmed_interval_secs,
            ),
        ];
        for (dependency, secs) in sources {
            let ctx = Arc::downgrade(&self.ctx);
            handle.spawn(dependency, Duration::from_secs(secs), move || {
                let ctx = ctx.clone();
                async move {
                    match ctx.upgrade() {
                        Some(ctx) => ctx.reconcile_all().await,
                        None => Ok(()),
                    }
                }
            });
        }

        *poller = Some(handle);
        tracing::info!("pending pollers started");
        Ok(())
    }

    /// Latest pending list of a vault, updated by the pollers.
    pub async fn watch_pending(
        &self,
        address_proxy: &Address,
    ) -> Result<watch::Receiver<PendingView>, crate::ServiceError> {
        let config = self.ctx.vault(address_proxy)?;
        let rx = self.ctx.subscribe(*address_proxy);
        self.ctx.pending_view(config).await?;
        Ok(rx)
    }

    pub fn account_service(&self) -> MultisigAccountService {
        MultisigAccountService::new(self.ctx.clone())
    }

    pub fn transaction_service(&self) -> MultisigTransactionService {
        MultisigTransactionService::new(self.ctx.clone())
    }

    pub async fn close(&self) -> Result<(), crate::ServiceError> {
        let handle = self.ctx.poller.lock().await.take();
        if let Some(handle) = handle {
            handle.close().await?;
            tracing::info!("pending pollers stopped");
        }
        Ok(())
    }
}
