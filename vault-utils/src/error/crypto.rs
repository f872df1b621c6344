#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Base58 error: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("InvalidLength error: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl CryptoError {
    pub fn get_status_code(&self) -> u32 {
        match self {
            CryptoError::Base58(_) => 6401,
            CryptoError::InvalidLength { .. } => 6402,
        }
    }
}
