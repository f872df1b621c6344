use crate::balance::Balance;

/// How a token is moved on chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum TokenKind {
    /// `balances` pallet
    #[serde(rename = "substrate-native")]
    Native,
    /// `assets` pallet
    #[serde(rename = "substrate-assets", rename_all = "camelCase")]
    Assets { asset_id: u32 },
    /// orml `tokens` pallet
    #[serde(rename = "substrate-tokens", rename_all = "camelCase")]
    Generic { on_chain_id: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(deserialize_with = "vault_utils::serde_func::deserialize_uppercase")]
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub coingecko_id: Option<String>,
    /// Owning chain, see [`crate::chain::Chain::id`].
    pub chain_id: String,
    #[serde(flatten)]
    pub kind: TokenKind,
}

impl Token {
    pub fn native(
        id: &str,
        symbol: &str,
        decimals: u8,
        coingecko_id: Option<&str>,
        chain_id: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            symbol: symbol.to_uppercase(),
            decimals,
            coingecko_id: coingecko_id.map(ToString::to_string),
            chain_id: chain_id.to_string(),
            kind: TokenKind::Native,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, TokenKind::Native)
    }

    pub fn balance(&self, amount: u128) -> Balance {
        Balance::new(amount, self.clone())
    }
}

/// Native token fields as written in the chain catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NativeTokenInfo {
    pub id: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub coingecko_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_serde() {
        let json = r#"{
            "id": "polkadot-asset-hub-substrate-assets-1984-usdt",
            "symbol": "usdt",
            "decimals": 6,
            "chain_id": "polkadot-asset-hub",
            "type": "substrate-assets",
            "assetId": 1984
        }"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.symbol, "USDT");
        assert_eq!(token.kind, TokenKind::Assets { asset_id: 1984 });
        assert_eq!(token.coingecko_id, None);
        assert!(!token.is_native());
    }

    #[test]
    fn test_native_constructor() {
        let token = Token::native("polkadot-substrate-native-dot", "dot", 10, Some("polkadot"), "polkadot");
        assert!(token.is_native());
        assert_eq!(token.symbol, "DOT");
    }
}
