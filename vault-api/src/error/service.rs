#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Address error: `{0}`")]
    Core(#[from] vault_core::Error),
    #[error("Types error: `{0}`")]
    Types(#[from] vault_types::Error),
    #[error("Utils error: `{0}`")]
    Utils(#[from] vault_utils::Error),
    #[error("TransportBackend error: `{0}`")]
    TransportBackend(#[from] vault_transport_backend::Error),
    #[error("Chain interact error: `{0}`")]
    ChainInteract(#[from] vault_chain_interact::Error),
    #[error("System error: {0}")]
    System(#[from] crate::error::system::SystemError),
    // 业务错误
    #[error("Business error: {0}")]
    Business(#[from] super::business::BusinessError),
    #[error("parameter error: {0}")]
    Parameter(String),
}

impl ServiceError {
    pub fn is_network_error(&self) -> bool {
        match self {
            ServiceError::Utils(err) => err.is_network_error(),
            ServiceError::TransportBackend(err) => err.is_network_error(),
            ServiceError::ChainInteract(err) => err.is_network_error(),
            _ => false,
        }
    }

    pub fn get_status_code(&self) -> i64 {
        match self {
            ServiceError::Core(err) => err.get_status_code() as i64,
            ServiceError::Types(err) => err.get_status_code() as i64,
            ServiceError::Utils(err) => err.get_status_code() as i64,
            ServiceError::TransportBackend(_) => 204,
            ServiceError::ChainInteract(_) => 205,
            ServiceError::System(_) => 500,
            ServiceError::Business(err) => err.get_status_code(),
            ServiceError::Parameter(_) => 400,
        }
    }
}
