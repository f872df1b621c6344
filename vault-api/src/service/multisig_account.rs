use crate::domain::multisig::MultisigConfig;
use crate::error::business::multisig_vault::MultisigVaultError;
use crate::manager::Context;
use std::sync::Arc;
use vault_core::Address;

pub struct MultisigAccountService {
    ctx: Arc<Context>,
}

impl MultisigAccountService {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self { ctx }
    }

    fn build_config(
        &self,
        name: &str,
        chain_id: &str,
        address_proxy: Address,
        signers: Vec<Address>,
        threshold: u16,
    ) -> Result<MultisigConfig, crate::ServiceError> {
        let chain = self.ctx.config.chain(chain_id).map_err(|_| {
            tracing::error!(chain_id, "no configured chain for vault");
            MultisigVaultError::UnknownChain(chain_id.to_string())
        })?;
        if self.ctx.store.contains(&address_proxy) {
            return Err(MultisigVaultError::AlreadyExist(address_proxy.to_hex()).into());
        }
        Ok(MultisigConfig::new(
            name,
            address_proxy,
            signers,
            threshold,
            chain.clone(),
        )?)
    }

    /// Registers a vault whose proxy was just created by this signer set.
    pub async fn create_vault(
        &self,
        name: &str,
        chain_id: &str,
        address_proxy: Address,
        signers: Vec<Address>,
        threshold: u16,
    ) -> Result<Arc<MultisigConfig>, crate::ServiceError> {
        let config = self.build_config(name, chain_id, address_proxy, signers, threshold)?;
        tracing::info!(
            vault = %config.proxy_ss58(),
            multisig = %config.address_multisig,
            threshold,
            "vault created"
        );
        Ok(self.ctx.store.insert(config))
    }

    /// Adds an existing vault after checking on chain that the derived multisig
    /// really is a proxy of `address_proxy`.
    pub async fn import_vault(
        &self,
        name: &str,
        chain_id: &str,
        address_proxy: Address,
        signers: Vec<Address>,
        threshold: u16,
    ) -> Result<Arc<MultisigConfig>, crate::ServiceError> {
        let config = self.build_config(name, chain_id, address_proxy, signers, threshold)?;
        let chain = self.ctx.chain(chain_id)?;
        let is_proxy = chain
            .rpc
            .query_proxy_relationship(&config.address_proxy, &config.address_multisig)
            .await?;
        if !is_proxy {
            return Err(MultisigVaultError::ProxyNotFound {
                proxy: config.proxy_ss58(),
                multisig: config.address_multisig.to_ss58(config.chain.ss58_prefix),
            }
            .into());
        }
        tracing::info!(vault = %config.proxy_ss58(), "vault imported");
        Ok(self.ctx.store.insert(config))
    }

    pub fn list_vaults(&self) -> Vec<Arc<MultisigConfig>> {
        self.ctx.store.list()
    }

    /// Vaults where any of `accounts` is a signer.
    pub fn vaults_of(&self, accounts: &[Address]) -> Vec<Arc<MultisigConfig>> {
        self.ctx
            .store
            .list()
            .into_iter()
            .filter(|c| accounts.iter().any(|a| c.is_signer(a)))
            .collect()
    }

    pub fn get_vault(
        &self,
        address_proxy: &Address,
    ) -> Result<Arc<MultisigConfig>, crate::ServiceError> {
        self.ctx.vault(address_proxy)
    }

    pub async fn remove_vault(&self, address_proxy: &Address) -> Result<(), crate::ServiceError> {
        let config = self
            .ctx
            .store
            .remove(address_proxy)
            .ok_or_else(|| MultisigVaultError::NotFound(address_proxy.to_hex()))?;
        self.ctx.reconciler.forget(&config).await;
        self.ctx.unsubscribe_all(address_proxy);
        tracing::info!(vault = %config.proxy_ss58(), "vault removed");
        Ok(())
    }
}
