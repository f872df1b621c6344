pub mod call;
pub mod capability;
pub mod extrinsic;
pub mod operations;
pub mod provider;
pub mod types;

mod errors;
pub use errors::*;

pub use call::{Call, CallHash, ProxyType};
pub use capability::PalletCapabilities;
pub use extrinsic::{Extrinsic, SignedExtrinsic};
pub use provider::{ChainRpc, ExtrinsicSigner};

pub type Result<T> = std::result::Result<T, Error>;
