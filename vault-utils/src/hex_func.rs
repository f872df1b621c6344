use crate::error::parse::ParseError;

// accepts both `0x` prefixed and bare hex
pub fn hex_decode(hex_str: &str) -> Result<Vec<u8>, crate::Error> {
    let trimmed = hex_str.trim();
    let raw = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(raw).map_err(|e| {
        crate::Error::Parse(ParseError::FromHex(format!(
            "hex decode error: {e} value = {hex_str}"
        )))
    })
}

pub fn hex_encode<T: AsRef<[u8]>>(data: T) -> String {
    hex::encode(data)
}

pub fn hex_encode_prefixed<T: AsRef<[u8]>>(data: T) -> String {
    format!("0x{}", hex::encode(data))
}

pub fn hex_to_array_32(hex_str: &str) -> Result<[u8; 32], crate::Error> {
    let bytes = hex_decode(hex_str)?;
    bytes
        .try_into()
        .map_err(|_| crate::Error::Parse(ParseError::VecToArrayFailed))
}
