#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown chain: {0}")]
    UnknownChain(String),
    #[error("Unknown token: {0}")]
    UnknownToken(String),
    #[error("Invalid amount `{input}`: {reason}")]
    InvalidAmount { input: String, reason: String },
    #[error("Utils error: {0}")]
    Utils(#[from] vault_utils::Error),
}

impl Error {
    pub fn get_status_code(&self) -> u32 {
        match self {
            Error::UnknownChain(_) => 6801,
            Error::UnknownToken(_) => 6802,
            Error::InvalidAmount { .. } => 6803,
            Error::Utils(e) => e.get_status_code(),
        }
    }
}
