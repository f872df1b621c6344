//! Turns the call data of a pending transaction into something a signer can read.
//!
//! Only the shapes this crate builds are recognised: a `proxy.proxy` on the vault
//! wrapping one transfer, a `batch_all` of transfers, or the add/remove proxy pair
//! of a config change. Anything else is [`DecodedCall::Unknown`].

use super::account::MultisigConfig;
use super::queue::DecodedCall;
use vault_chain_interact::{Call, PalletCapabilities};
use vault_core::{derive_multisig_address, Address};
use vault_transport_backend::ChangeConfigDetails;
use vault_types::balance::Balance;
use vault_types::token::{Token, TokenKind};

pub fn decode_call(
    call_data: Option<&[u8]>,
    caps: &PalletCapabilities,
    config: &MultisigConfig,
    tokens: &[Token],
    change_details: Option<&ChangeConfigDetails>,
) -> DecodedCall {
    let Some(bytes) = call_data else {
        return DecodedCall::Unknown { raw_yaml: None };
    };

    let call = match Call::decode_with(bytes, caps) {
        Ok(call) => call,
        Err(e) => {
            tracing::debug!(vault = %config.address_proxy, "undecodable call data: {e}");
            return DecodedCall::Unknown { raw_yaml: None };
        }
    };

    match recognise(&call, config, tokens, change_details) {
        Some(decoded) => decoded,
        None => DecodedCall::Unknown {
            raw_yaml: vault_utils::serde_func::serde_yaml_to_string(&call).ok(),
        },
    }
}

fn recognise(
    call: &Call,
    config: &MultisigConfig,
    tokens: &[Token],
    change_details: Option<&ChangeConfigDetails>,
) -> Option<DecodedCall> {
    let Call::ProxyProxy { real, call: inner, .. } = call else {
        return None;
    };
    if *real != config.address_proxy {
        return None;
    }

    if let Some(recipient) = transfer(inner, tokens) {
        return Some(DecodedCall::Transfer {
            recipients: vec![recipient],
        });
    }

    let Call::UtilityBatchAll { calls } = inner.as_ref() else {
        return None;
    };

    if let [Call::ProxyAddProxy { delegate: added, .. }, Call::ProxyRemoveProxy { delegate: removed, .. }] =
        calls.as_slice()
    {
        return change_config(added, removed, config, change_details);
    }

    let recipients = calls
        .iter()
        .map(|c| transfer(c, tokens))
        .collect::<Option<Vec<_>>>()?;
    if recipients.is_empty() {
        return None;
    }
    Some(DecodedCall::Transfer { recipients })
}

fn transfer(call: &Call, tokens: &[Token]) -> Option<(Address, Balance)> {
    let (to, amount, token) = match call {
        Call::BalancesTransferKeepAlive { dest, value } => {
            (dest, value, tokens.iter().find(|t| t.is_native())?)
        }
        Call::AssetsTransferKeepAlive { id, target, amount } => (
            target,
            amount,
            tokens
                .iter()
                .find(|t| t.kind == TokenKind::Assets { asset_id: *id })?,
        ),
        Call::TokensTransferKeepAlive {
            dest,
            currency_id,
            amount,
        } => (
            dest,
            amount,
            tokens.iter().find(|t| {
                t.kind
                    == TokenKind::Generic {
                        on_chain_id: *currency_id,
                    }
            })?,
        ),
        _ => return None,
    };
    Some((*to, token.balance(*amount)))
}

// the new signer set only lives in metadata, so it has to hash to the added proxy
fn change_config(
    added: &Address,
    removed: &Address,
    config: &MultisigConfig,
    details: Option<&ChangeConfigDetails>,
) -> Option<DecodedCall> {
    let details = details?;
    if *removed != config.address_multisig {
        return None;
    }
    let mut new_signers = details.signers.clone();
    new_signers.sort();
    if derive_multisig_address(&new_signers, details.threshold) != *added {
        tracing::warn!(
            vault = %config.address_proxy,
            "change config details do not match the proposed proxy"
        );
        return None;
    }
    Some(DecodedCall::ChangeConfig {
        new_signers,
        new_threshold: details.threshold,
    })
}
