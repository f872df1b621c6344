#[derive(Debug, thiserror::Error)]
pub enum MultisigQueueError {
    #[error("transaction {0} not found")]
    NotFound(String),
    #[error("only the originator can cancel")]
    NotOriginator,
    #[error("no on-chain pending record for this transaction")]
    PendingRecordMissing,
    #[error("none of the given accounts can sign next")]
    NoEligibleSigner,
    #[error("call data unknown, cannot execute")]
    CallDataUnknown,
    #[error("config change blocked by {0} other pending transactions")]
    ConfigChangeBlocked(usize),
    #[error("submission failed: {0}")]
    SubmissionFailed(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("{approvals} of {threshold} approvals, not ready to execute")]
    NotReady { approvals: usize, threshold: u16 },
}

impl MultisigQueueError {
    pub(crate) fn get_status_code(&self) -> i64 {
        match self {
            MultisigQueueError::NotFound(_) => 3701,
            MultisigQueueError::NotOriginator => 3702,
            MultisigQueueError::PendingRecordMissing => 3703,
            MultisigQueueError::NoEligibleSigner => 3704,
            MultisigQueueError::CallDataUnknown => 3705,
            MultisigQueueError::ConfigChangeBlocked(_) => 3706,
            MultisigQueueError::SubmissionFailed(_) => 3707,
            MultisigQueueError::FetchFailed(_) => 3708,
            MultisigQueueError::NotReady { .. } => 3709,
        }
    }
}
