use crate::error::business::multisig_vault::MultisigVaultError;
use dashmap::DashMap;
use std::sync::Arc;
use vault_chain_interact::operations::multisig::MultisigParty;
use vault_core::{derive_multisig_address, Address};
use vault_types::chain::Chain;

/// Who must sign for a vault. Replaced as a whole when a config change executes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MultisigConfig {
    pub name: String,
    /// The proxied account holding the funds. Stable across config changes.
    pub address_proxy: Address,
    pub address_multisig: Address,
    /// Sorted by key bytes.
    pub signers: Vec<Address>,
    pub threshold: u16,
    pub chain: Chain,
}

impl MultisigConfig {
    pub fn new(
        name: &str,
        address_proxy: Address,
        signers: Vec<Address>,
        threshold: u16,
        chain: Chain,
    ) -> Result<Self, MultisigVaultError> {
        let signers = Self::check_signers(signers, threshold)?;
        Ok(Self {
            name: name.to_string(),
            address_proxy,
            address_multisig: derive_multisig_address(&signers, threshold),
            signers,
            threshold,
            chain,
        })
    }

    fn check_signers(
        mut signers: Vec<Address>,
        threshold: u16,
    ) -> Result<Vec<Address>, MultisigVaultError> {
        signers.sort();
        if let Some(dup) = signers.windows(2).find(|w| w[0] == w[1]) {
            return Err(MultisigVaultError::DuplicateSigner(dup[0].to_hex()));
        }
        if threshold < 2 || threshold as usize > signers.len() {
            return Err(MultisigVaultError::InvalidThreshold {
                threshold,
                signers: signers.len(),
            });
        }
        Ok(signers)
    }

    /// Same vault under a new signer set, with the multisig address derived again.
    pub fn with_signers(
        &self,
        signers: Vec<Address>,
        threshold: u16,
    ) -> Result<Self, MultisigVaultError> {
        Self::new(
            &self.name,
            self.address_proxy,
            signers,
            threshold,
            self.chain.clone(),
        )
    }

    pub fn is_signer(&self, address: &Address) -> bool {
        self.signers.binary_search(address).is_ok()
    }

    pub fn party(&self, signer: Address) -> MultisigParty<'_> {
        MultisigParty::new(signer, &self.signers, self.threshold)
    }

    pub fn proxy_ss58(&self) -> String {
        self.address_proxy.to_ss58(self.chain.ss58_prefix)
    }
}

/// In-memory vaults keyed by proxy address.
#[derive(Debug, Default)]
pub struct VaultStore {
    inner: DashMap<Address, Arc<MultisigConfig>>,
}

impl VaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address_proxy: &Address) -> Option<Arc<MultisigConfig>> {
        self.inner.get(address_proxy).map(|c| c.value().clone())
    }

    pub fn contains(&self, address_proxy: &Address) -> bool {
        self.inner.contains_key(address_proxy)
    }

    /// Adds or swaps a vault's config. Readers see either the previous `Arc` or this one.
    pub fn insert(&self, config: MultisigConfig) -> Arc<MultisigConfig> {
        let config = Arc::new(config);
        self.inner.insert(config.address_proxy, config.clone());
        config
    }

    pub fn remove(&self, address_proxy: &Address) -> Option<Arc<MultisigConfig>> {
        self.inner.remove(address_proxy).map(|(_, c)| c)
    }

    pub fn list(&self) -> Vec<Arc<MultisigConfig>> {
        let mut res: Vec<_> = self.inner.iter().map(|c| c.value().clone()).collect();
        res.sort_by(|a, b| a.name.cmp(&b.name).then(a.address_proxy.cmp(&b.address_proxy)));
        res
    }
}
