use crate::call::{Call, CallHash};
use crate::capability::PalletCapabilities;
use vault_core::Address;

/// An unsigned extrinsic. The call is encoded once at construction so fee
/// estimation, signing and submission all see the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extrinsic {
    pub chain_id: String,
    pub signer: Address,
    pub call: Call,
    pub call_data: Vec<u8>,
}

impl Extrinsic {
    pub fn new(
        chain_id: &str,
        signer: Address,
        call: Call,
        caps: &PalletCapabilities,
    ) -> crate::Result<Self> {
        let call_data = call.encode_with(caps)?;
        Ok(Self {
            chain_id: chain_id.to_string(),
            signer,
            call,
            call_data,
        })
    }

    pub fn call_hash(&self) -> CallHash {
        CallHash::of(&self.call_data)
    }

    pub fn call_data_hex(&self) -> String {
        vault_utils::hex_func::hex_encode_prefixed(&self.call_data)
    }
}

/// Opaque output of an [`crate::ExtrinsicSigner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedExtrinsic {
    pub extrinsic: Extrinsic,
    pub payload: Vec<u8>,
}
