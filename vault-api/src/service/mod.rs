pub mod multisig_account;
pub mod multisig_transaction;
