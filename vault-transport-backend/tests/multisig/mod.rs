use crate::backend;
use vault_chain_interact::CallHash;
use vault_core::Address;
use vault_transport_backend::error::BackendServiceError;
use vault_transport_backend::request::SubmitMetadataReq;
use vault_transport_backend::{ChangeConfigDetails, MetadataApi, TransactionMetadata};

fn req(seed: &[u8], multisig: Address) -> SubmitMetadataReq {
    SubmitMetadataReq {
        call_hash: CallHash::of(seed),
        multisig,
        chain_id: "polkadot".to_string(),
        metadata: TransactionMetadata {
            description: "rotate signers".to_string(),
            call_data: Some(seed.to_vec()),
            change_config_details: Some(ChangeConfigDetails {
                signers: vec![Address::new([1; 32]), Address::new([2; 32])],
                threshold: 2,
            }),
        },
    }
}

#[tokio::test]
async fn test_submit_then_list_and_detail() {
    let api = backend();
    let multisig = Address::new([7; 32]);
    let other = Address::new([8; 32]);

    api.submit_metadata(req(b"first", multisig)).await.unwrap();
    api.submit_metadata(req(b"second", other)).await.unwrap();

    let list = api.confirmed_transactions(&multisig).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].call_hash, CallHash::of(b"first"));
    assert_eq!(list[0].metadata.call_data.as_deref(), Some(&b"first"[..]));
    assert_eq!(
        list[0].metadata.change_config_details.as_ref().map(|d| d.threshold),
        Some(2)
    );

    let detail = api
        .transaction_metadata(&CallHash::of(b"second"))
        .await
        .unwrap();
    assert_eq!(detail.map(|m| m.description), Some("rotate signers".to_string()));
    assert!(api
        .transaction_metadata(&CallHash::of(b"missing"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_submit_is_rejected() {
    let api = backend();
    let multisig = Address::new([7; 32]);
    api.submit_metadata(req(b"once", multisig)).await.unwrap();

    let err = api.submit_metadata(req(b"once", multisig)).await.unwrap_err();
    assert!(matches!(
        err,
        vault_transport_backend::Error::BackendServiceError(BackendServiceError::MetadataExists)
    ));
}
