use serde::Deserialize;
use vault_types::chain::{supported_chains, Chain, ChainCatalog as _};
use vault_types::constant::{DEFAULT_FEE_ESTIMATE_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS};
use vault_types::token::Token;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub fee: FeeConfig,
    #[serde(default)]
    pub config_change: ConfigChangeConfig,
    #[serde(default = "supported_chains")]
    pub chains: Vec<Chain>,
    /// Non-native tokens recognised when decoding transfers.
    #[serde(default)]
    pub tokens: Vec<Token>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PollConfig {
    pub pending_interval_secs: u64,
    pub confirmed_interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            pending_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            confirmed_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeeConfig {
    pub estimate_timeout_secs: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            estimate_timeout_secs: DEFAULT_FEE_ESTIMATE_TIMEOUT_SECS,
        }
    }
}

/// How long to wait for a new proxy to show up after a config change executes.
#[derive(Deserialize, Debug, Clone)]
pub struct ConfigChangeConfig {
    pub confirm_attempts: u32,
    pub confirm_delay_ms: u64,
}

impl Default for ConfigChangeConfig {
    fn default() -> Self {
        Self {
            confirm_attempts: 3,
            confirm_delay_ms: 2000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll: PollConfig::default(),
            fee: FeeConfig::default(),
            config_change: ConfigChangeConfig::default(),
            chains: supported_chains(),
            tokens: Vec::new(),
        }
    }
}

impl Config {
    pub fn new(config_content: &str) -> Result<Self, crate::ServiceError> {
        let config: Config = vault_utils::serde_func::serde_yaml_from_str(config_content)?;
        Ok(config)
    }

    pub fn chain(&self, id: &str) -> Result<&Chain, crate::ServiceError> {
        Ok(self.chains.find_by_id(id)?)
    }

    pub fn tokens_of(&self, chain_id: &str) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|t| t.chain_id == chain_id)
            .cloned()
            .collect()
    }
}
