#[derive(Debug, thiserror::Error)]
pub enum MultisigVaultError {
    #[error("invalid threshold {threshold} for {signers} signers")]
    InvalidThreshold { threshold: u16, signers: usize },
    #[error("duplicate signer {0}")]
    DuplicateSigner(String),
    #[error("no configured chain for {0}")]
    UnknownChain(String),
    #[error("vault {0} not found")]
    NotFound(String),
    #[error("vault {0} already exists")]
    AlreadyExist(String),
    #[error("{multisig} is not a proxy of {proxy}")]
    ProxyNotFound { proxy: String, multisig: String },
    #[error("config change not confirmed on chain: {0}")]
    ConfigReconciliationFailed(String),
}

impl MultisigVaultError {
    pub(crate) fn get_status_code(&self) -> i64 {
        match self {
            MultisigVaultError::InvalidThreshold { .. } => 3600,
            MultisigVaultError::DuplicateSigner(_) => 3601,
            MultisigVaultError::UnknownChain(_) => 3602,
            MultisigVaultError::NotFound(_) => 3603,
            MultisigVaultError::AlreadyExist(_) => 3604,
            MultisigVaultError::ProxyNotFound { .. } => 3605,
            MultisigVaultError::ConfigReconciliationFailed(_) => 3606,
        }
    }
}
