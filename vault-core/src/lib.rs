pub mod address;
pub mod error;
pub mod multisig;

pub use address::Address;
pub use error::Error;
pub use multisig::derive_multisig_address;
