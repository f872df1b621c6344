pub mod balance;
pub mod chain;
pub mod constant;
pub mod error;
pub mod token;

pub use error::Error;
