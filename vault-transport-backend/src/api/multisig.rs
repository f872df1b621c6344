use super::{BackendApi, BackendTransport, MetadataApi};
use crate::consts::endpoint;
use crate::request::{ConfirmedTransactionsReq, SubmitMetadataReq, TransactionMetadataReq};
use crate::response_vo::multisig::{RawConfirmedRecord, TransactionMetadata};
use vault_chain_interact::CallHash;
use vault_core::Address;

#[async_trait::async_trait]
impl<T: BackendTransport> MetadataApi for BackendApi<T> {
    async fn confirmed_transactions(
        &self,
        multisig: &Address,
    ) -> Result<Vec<RawConfirmedRecord>, crate::Error> {
        let req = ConfirmedTransactionsReq {
            multisig: *multisig,
        };
        self.post_request(endpoint::CONFIRMED_TRANSACTIONS, req).await
    }

    async fn transaction_metadata(
        &self,
        call_hash: &CallHash,
    ) -> Result<Option<TransactionMetadata>, crate::Error> {
        let req = TransactionMetadataReq {
            call_hash: *call_hash,
        };
        self.post_request(endpoint::TRANSACTION_METADATA, req).await
    }

    async fn submit_metadata(&self, req: SubmitMetadataReq) -> Result<(), crate::Error> {
        self.post_request::<_, Option<()>>(endpoint::SUBMIT_METADATA, req)
            .await?;
        Ok(())
    }
}
