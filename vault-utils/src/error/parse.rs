#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("FromHex error: {0}")]
    FromHex(String),
    #[error("Parse vector to array failed")]
    VecToArrayFailed,
    #[error("Decimal error: {0}")]
    Decimal(#[from] rust_decimal::Error),
    #[error("unit convert failed: {0}")]
    UnitConvertFailed(String),
}

impl ParseError {
    pub fn get_status_code(&self) -> u32 {
        match self {
            ParseError::FromHex(_) => 6301,
            ParseError::VecToArrayFailed => 6311,
            ParseError::Decimal(_) => 6311,
            ParseError::UnitConvertFailed(_) => 6311,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(ParseError::FromHex("zz".to_string()).get_status_code(), 6301);
        assert_eq!(ParseError::VecToArrayFailed.get_status_code(), 6311);
    }
}
