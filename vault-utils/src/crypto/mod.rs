use blake2::digest::consts::U32;
use blake2::{Blake2b, Blake2b512, Digest};

type Blake2b256 = Blake2b<U32>;

pub fn blake2_256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(input);
    hasher.finalize().into()
}

pub fn blake2_512(input: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(input);
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

// hash of several byte slices without concatenating them first
pub fn blake2_512_parts(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

pub fn base58_encode(input: &[u8]) -> String {
    bs58::encode(input).into_string()
}

pub fn base58_decode(input: &str) -> Result<Vec<u8>, crate::Error> {
    bs58::decode(input.trim())
        .into_vec()
        .map_err(|e| crate::Error::Crypto(e.into()))
}

pub fn to_array_32(bytes: &[u8]) -> Result<[u8; 32], crate::Error> {
    bytes.try_into().map_err(|_| {
        crate::Error::Crypto(crate::CryptoError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })
    })
}
