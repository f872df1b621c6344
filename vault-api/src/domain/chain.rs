use std::sync::Arc;
use vault_chain_interact::capability::{method, pallet};
use vault_chain_interact::{ChainRpc, PalletCapabilities};
use vault_types::chain::Chain;
use vault_types::token::Token;

/// A loaded host chain: node access plus the runtime call table read at load time.
#[derive(Clone)]
pub struct ChainContext {
    pub chain: Chain,
    pub rpc: Arc<dyn ChainRpc>,
    pub caps: PalletCapabilities,
    /// Native token first.
    pub tokens: Vec<Token>,
}

impl std::fmt::Debug for ChainContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainContext")
            .field("chain", &self.chain.id)
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl ChainContext {
    /// Reads the call table once and rejects runtimes without the multisig and proxy pallets.
    pub async fn load(
        chain: Chain,
        rpc: Arc<dyn ChainRpc>,
        extra_tokens: Vec<Token>,
    ) -> Result<Self, crate::ServiceError> {
        let caps = rpc.pallet_capabilities().await?;
        caps.require(&[
            (pallet::MULTISIG, method::AS_MULTI),
            (pallet::MULTISIG, method::APPROVE_AS_MULTI),
            (pallet::MULTISIG, method::CANCEL_AS_MULTI),
            (pallet::PROXY, method::PROXY),
        ])?;

        let mut tokens = vec![chain.native_token()];
        tokens.extend(extra_tokens.into_iter().filter(|t| t.chain_id == chain.id));
        tracing::info!(chain = %chain.id, tokens = tokens.len(), "chain loaded");

        Ok(Self {
            chain,
            rpc,
            caps,
            tokens,
        })
    }

    pub fn native_token(&self) -> Token {
        self.chain.native_token()
    }
}
