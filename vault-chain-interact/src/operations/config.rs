use super::CallOperation;
use crate::call::{Call, ProxyType};
use crate::capability::{method, pallet, PalletCapabilities};
use vault_core::{derive_multisig_address, Address};

/// Moves a vault's proxy from its current multisig to the one derived from a
/// new signer set and threshold.
pub struct ChangeConfigOpt<'a> {
    pub vault: Address,
    pub current_multisig: Address,
    pub new_signers: &'a [Address],
    pub new_threshold: u16,
}

impl<'a> ChangeConfigOpt<'a> {
    pub fn new(
        vault: Address,
        current_multisig: Address,
        new_signers: &'a [Address],
        new_threshold: u16,
    ) -> crate::Result<Self> {
        let mut unique = new_signers.to_vec();
        unique.sort();
        unique.dedup();
        if unique.len() != new_signers.len() {
            return Err(crate::Error::InvalidConfig("duplicate signer".to_string()));
        }
        if new_threshold < 2 || new_threshold as usize > new_signers.len() {
            return Err(crate::Error::InvalidConfig(format!(
                "threshold {} with {} signers",
                new_threshold,
                new_signers.len()
            )));
        }
        Ok(Self {
            vault,
            current_multisig,
            new_signers,
            new_threshold,
        })
    }

    pub fn new_multisig_address(&self) -> Address {
        derive_multisig_address(self.new_signers, self.new_threshold)
    }
}

impl CallOperation for ChangeConfigOpt<'_> {
    fn build_call(&self, caps: &PalletCapabilities) -> crate::Result<Call> {
        caps.require(&[
            (pallet::PROXY, method::PROXY),
            (pallet::PROXY, method::ADD_PROXY),
            (pallet::PROXY, method::REMOVE_PROXY),
            (pallet::UTILITY, method::BATCH_ALL),
        ])?;

        let batch = Call::UtilityBatchAll {
            calls: vec![
                Call::ProxyAddProxy {
                    delegate: self.new_multisig_address(),
                    proxy_type: ProxyType::Any,
                    delay: 0,
                },
                Call::ProxyRemoveProxy {
                    delegate: self.current_multisig,
                    proxy_type: ProxyType::Any,
                    delay: 0,
                },
            ],
        };

        Ok(Call::ProxyProxy {
            real: self.vault,
            force_proxy_type: None,
            call: Box::new(batch),
        })
    }
}
