pub mod multisig;

use crate::response::BackendResponse;
use vault_chain_interact::CallHash;
use vault_core::Address;

use crate::request::SubmitMetadataReq;
use crate::response_vo::multisig::{RawConfirmedRecord, TransactionMetadata};

/// Off-chain store of transaction descriptions.
#[async_trait::async_trait]
pub trait MetadataApi: Send + Sync {
    async fn confirmed_transactions(
        &self,
        multisig: &Address,
    ) -> Result<Vec<RawConfirmedRecord>, crate::Error>;

    async fn transaction_metadata(
        &self,
        call_hash: &CallHash,
    ) -> Result<Option<TransactionMetadata>, crate::Error>;

    async fn submit_metadata(&self, req: SubmitMetadataReq) -> Result<(), crate::Error>;
}

/// Whatever carries a JSON body to the backend and brings the envelope back.
#[async_trait::async_trait]
pub trait BackendTransport: Send + Sync {
    async fn post(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<BackendResponse, crate::Error>;
}

#[derive(Debug, Clone)]
pub struct BackendApi<T> {
    pub transport: T,
}

impl<T: BackendTransport> BackendApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn post_request<Req, R>(&self, endpoint: &str, req: Req) -> Result<R, crate::Error>
    where
        Req: serde::Serialize + std::fmt::Debug,
        R: serde::de::DeserializeOwned + std::fmt::Debug,
    {
        tracing::debug!(endpoint, "backend request: {:?}", req);
        let body = vault_utils::serde_func::serde_to_value(&req)?;
        let res = self.transport.post(endpoint, body).await?;
        res.process::<R>()
    }
}
