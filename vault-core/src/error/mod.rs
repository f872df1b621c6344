#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid base58: {0}")]
    InvalidBase58(String),
    #[error("Invalid address length: {0}")]
    InvalidLength(usize),
    #[error("Invalid ss58 prefix byte: {0}")]
    InvalidPrefix(u8),
    #[error("Invalid checksum")]
    InvalidChecksum,
    #[error("Address prefix mismatch: expected {expected}, found {found}")]
    PrefixMismatch { expected: u16, found: u16 },
    #[error("Invalid hex address: {0}")]
    InvalidHex(String),
}

impl Error {
    pub fn get_status_code(&self) -> u32 {
        match self {
            Error::InvalidBase58(_) => 6501,
            Error::InvalidLength(_) => 6502,
            Error::InvalidPrefix(_) => 6503,
            Error::InvalidChecksum => 6504,
            Error::PrefixMismatch { .. } => 6505,
            Error::InvalidHex(_) => 6506,
        }
    }
}
