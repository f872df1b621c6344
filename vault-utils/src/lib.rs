mod crypto;
pub mod error;
pub mod hex_func;
pub mod log;
pub mod serde_func;
pub mod system_info;
pub mod time;
pub mod unit;
pub use crypto::*;
pub use error::{crypto::CryptoError, parse::ParseError, serde::SerdeError, Error};
pub use log::{init_log, init_test_log};
