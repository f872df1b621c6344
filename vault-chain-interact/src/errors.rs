use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("rpc node return error: {0}")]
    RpcNode(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("utils error {0}")]
    UtilsError(#[from] vault_utils::Error),
    #[error("types error {0}")]
    Types(#[from] vault_types::Error),
    #[error("address error {0}")]
    Address(#[from] vault_core::Error),
    #[error("scale decode error {0}")]
    Decode(#[from] parity_scale_codec::Error),
    #[error("chain does not support {pallet}.{method}")]
    UnsupportedCall { pallet: String, method: String },
    #[error("unknown call index {0:?}")]
    UnknownCallIndex([u8; 2]),
    #[error("call nesting deeper than {0}")]
    CallTooDeep(u32),
    #[error("trailing bytes after call: {0}")]
    TrailingBytes(usize),
    #[error("sign error {0}")]
    SignError(String),
    #[error("invalid multisig config: {0}")]
    InvalidConfig(String),
    #[error("signer {0} is not part of the multisig")]
    NotASigner(String),
    #[error("transfer error {0}")]
    TransferError(String),
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn is_network_error(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::UtilsError(e) => e.is_network_error(),
            _ => false,
        }
    }

    pub fn unsupported(pallet: &str, method: &str) -> Self {
        Error::UnsupportedCall {
            pallet: pallet.to_string(),
            method: method.to_string(),
        }
    }
}
