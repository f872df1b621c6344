//! Call index table of a chain runtime.
//!
//! Built once when a chain is loaded. Every call the engine encodes or decodes
//! goes through [`PalletCapabilities::call_index`] or [`PalletCapabilities::lookup`],
//! so a runtime without e.g. the `proxy` pallet is rejected up front.

use std::collections::HashMap;

pub mod pallet {
    pub const BALANCES: &str = "balances";
    pub const ASSETS: &str = "assets";
    pub const TOKENS: &str = "tokens";
    pub const UTILITY: &str = "utility";
    pub const PROXY: &str = "proxy";
    pub const MULTISIG: &str = "multisig";
}

pub mod method {
    pub const TRANSFER_KEEP_ALIVE: &str = "transfer_keep_alive";
    pub const BATCH_ALL: &str = "batch_all";
    pub const PROXY: &str = "proxy";
    pub const ADD_PROXY: &str = "add_proxy";
    pub const REMOVE_PROXY: &str = "remove_proxy";
    pub const AS_MULTI: &str = "as_multi";
    pub const APPROVE_AS_MULTI: &str = "approve_as_multi";
    pub const CANCEL_AS_MULTI: &str = "cancel_as_multi";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PalletCapabilities {
    by_name: HashMap<(String, String), [u8; 2]>,
    by_index: HashMap<[u8; 2], (String, String)>,
}

impl PalletCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call(mut self, pallet: &str, method: &str, pallet_index: u8, call_index: u8) -> Self {
        let key = (pallet.to_string(), method.to_string());
        let index = [pallet_index, call_index];
        self.by_name.insert(key.clone(), index);
        self.by_index.insert(index, key);
        self
    }

    /// Registers the transfer, utility, proxy and multisig calls the engine uses.
    fn with_multisig_stack(self, balances: u8, utility: u8, proxy: u8, multisig: u8) -> Self {
        self.with_call(pallet::BALANCES, method::TRANSFER_KEEP_ALIVE, balances, 3)
            .with_call(pallet::UTILITY, method::BATCH_ALL, utility, 2)
            .with_call(pallet::PROXY, method::PROXY, proxy, 0)
            .with_call(pallet::PROXY, method::ADD_PROXY, proxy, 1)
            .with_call(pallet::PROXY, method::REMOVE_PROXY, proxy, 2)
            .with_call(pallet::MULTISIG, method::AS_MULTI, multisig, 1)
            .with_call(pallet::MULTISIG, method::APPROVE_AS_MULTI, multisig, 2)
            .with_call(pallet::MULTISIG, method::CANCEL_AS_MULTI, multisig, 3)
    }

    pub fn polkadot() -> Self {
        Self::new().with_multisig_stack(5, 26, 29, 30)
    }

    pub fn kusama() -> Self {
        Self::new().with_multisig_stack(4, 24, 30, 31)
    }

    pub fn polkadot_asset_hub() -> Self {
        Self::new()
            .with_multisig_stack(10, 40, 42, 41)
            .with_call(pallet::ASSETS, method::TRANSFER_KEEP_ALIVE, 50, 9)
    }

    /// Tables for the chains of the built-in catalog.
    pub fn for_chain(id: &str) -> Option<Self> {
        use vault_types::constant::chain_id;
        match id {
            chain_id::POLKADOT => Some(Self::polkadot()),
            chain_id::KUSAMA => Some(Self::kusama()),
            chain_id::POLKADOT_ASSET_HUB => Some(Self::polkadot_asset_hub()),
            chain_id::ROCOCO | chain_id::WESTEND => {
                Some(Self::new().with_multisig_stack(4, 16, 22, 30))
            }
            _ => None,
        }
    }

    pub fn supports(&self, pallet: &str, method: &str) -> bool {
        self.by_name
            .contains_key(&(pallet.to_string(), method.to_string()))
    }

    pub fn supports_pallet(&self, pallet: &str) -> bool {
        self.by_name.keys().any(|(p, _)| p == pallet)
    }

    pub fn call_index(&self, pallet: &str, method: &str) -> crate::Result<[u8; 2]> {
        self.by_name
            .get(&(pallet.to_string(), method.to_string()))
            .copied()
            .ok_or_else(|| crate::Error::unsupported(pallet, method))
    }

    pub fn lookup(&self, index: [u8; 2]) -> Option<(&str, &str)> {
        self.by_index
            .get(&index)
            .map(|(p, m)| (p.as_str(), m.as_str()))
    }

    /// Fails with the first missing call.
    pub fn require(&self, calls: &[(&str, &str)]) -> crate::Result<()> {
        for (pallet, method) in calls {
            if !self.supports(pallet, method) {
                return Err(crate::Error::unsupported(pallet, method));
            }
        }
        Ok(())
    }
}
