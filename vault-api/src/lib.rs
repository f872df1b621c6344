pub mod config;
pub mod domain;
mod error;
pub(crate) mod infrastructure;
mod manager;
pub mod service;

pub use error::{
    business::{
        multisig_queue::MultisigQueueError, multisig_vault::MultisigVaultError, BusinessError,
    },
    system::SystemError,
    ServiceError,
};

pub use config::*;
pub use domain::multisig::{
    approval::{BlockReason, TransactionActions},
    DecodedCall, MultisigConfig, PendingView, Transaction,
};
pub use infrastructure::poller::Dependency;
pub use manager::{Context, VaultManager};
pub use service::multisig_transaction::SubmitResult;
