#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Service error: {0}")]
    Service(String),
    #[error("Chain not loaded: {0}")]
    ChainNotLoaded(String),
    #[error("Task join failed: {0}")]
    TaskJoin(String),
    #[error("Poller already started")]
    PollerStarted,
}
