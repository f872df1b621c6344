pub mod chain;
pub mod multisig;
