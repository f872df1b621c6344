use parity_scale_codec::{Decode, Encode};

const SS58_PREFIX: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;
const MAX_SS58_PREFIX: u16 = 0x3FFF;

/// A 32-byte public key. Equality is key equality whatever text form it was parsed from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub struct Address([u8; 32]);

impl Address {
    pub const fn new(public_key: [u8; 32]) -> Self {
        Self(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parses `text` and requires it to be encoded for `prefix`.
    pub fn parse(text: &str, prefix: u16) -> Result<Self, crate::Error> {
        let (address, found) = Self::from_ss58(text)?;
        if found != prefix {
            return Err(crate::Error::PrefixMismatch {
                expected: prefix,
                found,
            });
        }
        Ok(address)
    }

    /// Parses an ss58 address of any network and returns the prefix it carried.
    pub fn from_ss58(text: &str) -> Result<(Self, u16), crate::Error> {
        let data = vault_utils::base58_decode(text)
            .map_err(|e| crate::Error::InvalidBase58(e.to_string()))?;
        if data.len() < 2 {
            return Err(crate::Error::InvalidLength(data.len()));
        }

        let (prefix_len, prefix) = match data[0] {
            0..=63 => (1, data[0] as u16),
            64..=127 => {
                let lower = (data[0] << 2) | (data[1] >> 6);
                let upper = data[1] & 0b0011_1111;
                (2, (lower as u16) | ((upper as u16) << 8))
            }
            other => return Err(crate::Error::InvalidPrefix(other)),
        };

        if data.len() != prefix_len + 32 + CHECKSUM_LEN {
            return Err(crate::Error::InvalidLength(data.len()));
        }

        let body_len = prefix_len + 32;
        let hash = vault_utils::blake2_512_parts(&[SS58_PREFIX, &data[..body_len]]);
        if data[body_len..] != hash[..CHECKSUM_LEN] {
            return Err(crate::Error::InvalidChecksum);
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&data[prefix_len..body_len]);
        Ok((Self(key), prefix))
    }

    /// Encodes the key for the network identified by `prefix`.
    pub fn to_ss58(&self, prefix: u16) -> String {
        let ident = prefix & MAX_SS58_PREFIX;
        let mut data = match ident {
            0..=63 => vec![ident as u8],
            _ => {
                let first = ((ident & 0b0000_0000_1111_1100) as u8) >> 2;
                let second = ((ident >> 8) as u8) | (((ident & 0b0000_0000_0000_0011) as u8) << 6);
                vec![first | 0b0100_0000, second]
            }
        };
        data.extend_from_slice(&self.0);

        let hash = vault_utils::blake2_512_parts(&[SS58_PREFIX, &data[..]]);
        data.extend_from_slice(&hash[..CHECKSUM_LEN]);
        vault_utils::base58_encode(&data)
    }

    pub fn from_hex(text: &str) -> Result<Self, crate::Error> {
        vault_utils::hex_func::hex_to_array_32(text)
            .map(Self)
            .map_err(|e| crate::Error::InvalidHex(e.to_string()))
    }

    pub fn to_hex(&self) -> String {
        vault_utils::hex_func::hex_encode_prefixed(self.0)
    }

    /// Accepts either a `0x` public key or an ss58 string of any network.
    pub fn from_text(text: &str) -> Result<Self, crate::Error> {
        let trimmed = text.trim();
        if trimmed.starts_with("0x") {
            Self::from_hex(trimmed)
        } else {
            Self::from_ss58(trimmed).map(|(address, _)| address)
        }
    }

    /// `5Grw...utQY` style short form.
    pub fn to_short(&self, prefix: u16) -> String {
        let full = self.to_ss58(prefix);
        if full.len() <= 12 {
            return full;
        }
        format!("{}...{}", &full[..4], &full[full.len() - 4..])
    }
}

impl From<[u8; 32]> for Address {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_text(&raw).map_err(serde::de::Error::custom)
    }
}
