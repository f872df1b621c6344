#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Transport error: `{0}`")]
    Transport(String),
    #[error("Backend error: `{0:?}`")]
    Backend(Option<String>),
    #[error("Utils error: `{0}`")]
    Utils(#[from] vault_utils::Error),
    #[error("backend service error")]
    BackendServiceError(#[from] BackendServiceError),
}

impl Error {
    pub fn is_network_error(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Utils(e) => e.is_network_error(),
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendServiceError {
    #[error("metadata already exists for call hash")]
    MetadataExists,
    #[error("unknown multisig")]
    UnknownMultisig,
}
