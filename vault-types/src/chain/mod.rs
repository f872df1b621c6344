use crate::constant::{chain_id, decimals, genesis_hash, rpc, ss58_prefix, subscan, symbol};
use crate::token::{NativeTokenInfo, Token};

/// A host chain a vault can live on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Chain {
    pub id: String,
    pub genesis_hash: String,
    pub chain_name: String,
    pub ss58_prefix: u16,
    #[serde(default)]
    pub is_testnet: bool,
    pub native_token: NativeTokenInfo,
    #[serde(default)]
    pub rpcs: Vec<String>,
    pub subscan_url: String,
}

impl Chain {
    pub fn native_token(&self) -> Token {
        Token::native(
            &self.native_token.id,
            &self.native_token.symbol,
            self.native_token.decimals,
            self.native_token.coingecko_id.as_deref(),
            &self.id,
        )
    }

    pub fn subscan_extrinsic_url(&self, extrinsic_hash: &str) -> String {
        format!("{}extrinsic/{}", self.subscan_url, extrinsic_hash)
    }
}

/// Lookups over a list of chains.
pub trait ChainCatalog {
    fn find_by_id(&self, id: &str) -> Result<&Chain, crate::Error>;
    fn find_by_genesis_hash(&self, hash: &str) -> Result<&Chain, crate::Error>;
}

impl ChainCatalog for [Chain] {
    fn find_by_id(&self, id: &str) -> Result<&Chain, crate::Error> {
        self.iter()
            .find(|c| c.id == id)
            .ok_or_else(|| crate::Error::UnknownChain(id.to_string()))
    }

    fn find_by_genesis_hash(&self, hash: &str) -> Result<&Chain, crate::Error> {
        self.iter()
            .find(|c| c.genesis_hash.eq_ignore_ascii_case(hash))
            .ok_or_else(|| crate::Error::UnknownChain(hash.to_string()))
    }
}

fn native_info(id: &str, symbol: &str, decimals: u8, coingecko_id: Option<&str>) -> NativeTokenInfo {
    NativeTokenInfo {
        id: id.to_string(),
        symbol: symbol.to_string(),
        decimals,
        coingecko_id: coingecko_id.map(ToString::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn chain(
    id: &str,
    genesis_hash: &str,
    chain_name: &str,
    ss58_prefix: u16,
    is_testnet: bool,
    native_token: NativeTokenInfo,
    rpc: &str,
    subscan_url: &str,
) -> Chain {
    Chain {
        id: id.to_string(),
        genesis_hash: genesis_hash.to_string(),
        chain_name: chain_name.to_string(),
        ss58_prefix,
        is_testnet,
        native_token,
        rpcs: vec![rpc.to_string()],
        subscan_url: subscan_url.to_string(),
    }
}

/// Built-in catalog.
pub fn supported_chains() -> Vec<Chain> {
    vec![
        chain(
            chain_id::POLKADOT,
            genesis_hash::POLKADOT,
            "Polkadot",
            ss58_prefix::POLKADOT,
            false,
            native_info("polkadot-substrate-native-dot", symbol::DOT, decimals::DOT_DECIMALS, Some("polkadot")),
            rpc::POLKADOT,
            subscan::POLKADOT,
        ),
        chain(
            chain_id::KUSAMA,
            genesis_hash::KUSAMA,
            "Kusama",
            ss58_prefix::KUSAMA,
            false,
            native_info("kusama-substrate-native-ksm", symbol::KSM, decimals::KSM_DECIMALS, Some("kusama")),
            rpc::KUSAMA,
            subscan::KUSAMA,
        ),
        chain(
            chain_id::POLKADOT_ASSET_HUB,
            genesis_hash::POLKADOT_ASSET_HUB,
            "Polkadot Asset Hub",
            ss58_prefix::POLKADOT,
            false,
            native_info("polkadot-asset-hub-substrate-native-dot", symbol::DOT, decimals::DOT_DECIMALS, Some("polkadot")),
            rpc::POLKADOT_ASSET_HUB,
            subscan::POLKADOT_ASSET_HUB,
        ),
        chain(
            chain_id::ROCOCO,
            genesis_hash::ROCOCO,
            "Rococo",
            ss58_prefix::GENERIC_SUBSTRATE,
            true,
            native_info("rococo-testnet-substrate-native-roc", symbol::ROC, decimals::ROC_DECIMALS, None),
            rpc::ROCOCO,
            subscan::ROCOCO,
        ),
        chain(
            chain_id::WESTEND,
            genesis_hash::WESTEND,
            "Westend",
            ss58_prefix::GENERIC_SUBSTRATE,
            true,
            native_info("westend-testnet-substrate-native-wnd", symbol::WND, decimals::WND_DECIMALS, None),
            rpc::WESTEND,
            subscan::WESTEND,
        ),
    ]
}
