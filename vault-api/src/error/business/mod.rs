pub mod multisig_queue;
pub mod multisig_vault;

#[derive(Debug, thiserror::Error)]
pub enum BusinessError {
    #[error("Multisig Vault error: {0}")]
    MultisigVault(#[from] multisig_vault::MultisigVaultError),
    #[error("Multisig Queue error: {0}")]
    MultisigQueue(#[from] multisig_queue::MultisigQueueError),
}

impl BusinessError {
    pub fn get_status_code(&self) -> i64 {
        match self {
            BusinessError::MultisigVault(msg) => msg.get_status_code(),
            BusinessError::MultisigQueue(msg) => msg.get_status_code(),
        }
    }
}

impl From<multisig_vault::MultisigVaultError> for crate::ServiceError {
    fn from(err: multisig_vault::MultisigVaultError) -> Self {
        crate::ServiceError::Business(err.into())
    }
}

impl From<multisig_queue::MultisigQueueError> for crate::ServiceError {
    fn from(err: multisig_queue::MultisigQueueError) -> Self {
        crate::ServiceError::Business(err.into())
    }
}
