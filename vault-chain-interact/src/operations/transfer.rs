use super::CallOperation;
use crate::call::Call;
use crate::capability::PalletCapabilities;
use vault_core::Address;
use vault_types::balance::Balance;
use vault_types::token::TokenKind;

/// Transfer out of a proxied vault to one or more recipients.
pub struct TransferOpt<'a> {
    pub vault: Address,
    pub recipients: &'a [(Address, Balance)],
}

impl<'a> TransferOpt<'a> {
    pub fn new(vault: Address, recipients: &'a [(Address, Balance)]) -> Self {
        Self { vault, recipients }
    }

    fn transfer_call(to: Address, balance: &Balance) -> Call {
        match balance.token.kind {
            TokenKind::Native => Call::BalancesTransferKeepAlive {
                dest: to,
                value: balance.amount,
            },
            TokenKind::Assets { asset_id } => Call::AssetsTransferKeepAlive {
                id: asset_id,
                target: to,
                amount: balance.amount,
            },
            TokenKind::Generic { on_chain_id } => Call::TokensTransferKeepAlive {
                dest: to,
                currency_id: on_chain_id,
                amount: balance.amount,
            },
        }
    }
}

impl CallOperation for TransferOpt<'_> {
    fn build_call(&self, _caps: &PalletCapabilities) -> crate::Result<Call> {
        let mut calls: Vec<Call> = self
            .recipients
            .iter()
            .map(|(to, balance)| Self::transfer_call(*to, balance))
            .collect();

        let inner = match calls.len() {
            0 => return Err(crate::Error::TransferError("no recipients".to_string())),
            1 => calls.remove(0),
            _ => Call::UtilityBatchAll { calls },
        };

        Ok(Call::ProxyProxy {
            real: self.vault,
            force_proxy_type: None,
            call: Box::new(inner),
        })
    }
}
