use crate::{get_manager, ALICE, BOB, CHARLIE, DAVE, VAULT};
use std::sync::Arc;
use vault_api::test::mock::MockChainRpc;
use vault_api::{MultisigVaultError, ServiceError};
use vault_chain_interact::capability::{method, pallet};
use vault_chain_interact::PalletCapabilities;
use vault_core::derive_multisig_address;

#[tokio::test]
async fn test_create_vault_validation() {
    let env = get_manager().await;
    let service = env.manager.account_service();

    let err = service
        .create_vault("t", "polkadot", VAULT, vec![ALICE, BOB], 1)
        .await
        .unwrap_err();
    assert_eq!(err.get_status_code(), 3600);

    let err = service
        .create_vault("t", "polkadot", VAULT, vec![ALICE, ALICE, BOB], 2)
        .await
        .unwrap_err();
    assert_eq!(err.get_status_code(), 3601);

    let err = service
        .create_vault("t", "moonbeam", VAULT, vec![ALICE, BOB], 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Business(vault_api::BusinessError::MultisigVault(
            MultisigVaultError::UnknownChain(_)
        ))
    ));

    let vault = service
        .create_vault("t", "polkadot", VAULT, vec![CHARLIE, ALICE, BOB], 2)
        .await
        .unwrap();
    assert_eq!(vault.signers, vec![ALICE, BOB, CHARLIE]);
    assert_eq!(
        vault.address_multisig,
        derive_multisig_address(&[BOB, CHARLIE, ALICE], 2)
    );

    let err = service
        .create_vault("t", "polkadot", VAULT, vec![ALICE, BOB], 2)
        .await
        .unwrap_err();
    assert_eq!(err.get_status_code(), 3604);
}

#[tokio::test]
async fn test_import_vault_checks_proxy() -> anyhow::Result<()> {
    let env = get_manager().await;
    let service = env.manager.account_service();

    let err = service
        .import_vault("t", "polkadot", VAULT, vec![ALICE, BOB, CHARLIE], 2)
        .await
        .unwrap_err();
    assert_eq!(err.get_status_code(), 3605);

    env.rpc
        .add_proxy(VAULT, derive_multisig_address(&[ALICE, BOB, CHARLIE], 2));
    let vault = service
        .import_vault("t", "polkadot", VAULT, vec![ALICE, BOB, CHARLIE], 2)
        .await?;
    assert_eq!(service.get_vault(&VAULT)?, vault);
    Ok(())
}

#[tokio::test]
async fn test_list_and_remove() -> anyhow::Result<()> {
    let env = get_manager().await;
    env.two_of_three().await;
    let service = env.manager.account_service();

    assert_eq!(service.list_vaults().len(), 1);
    assert_eq!(service.vaults_of(&[BOB]).len(), 1);
    assert!(service.vaults_of(&[DAVE]).is_empty());

    service.remove_vault(&VAULT).await?;
    assert!(service.list_vaults().is_empty());
    assert_eq!(service.get_vault(&VAULT).unwrap_err().get_status_code(), 3603);
    assert!(service.remove_vault(&VAULT).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_register_chain_requires_multisig() {
    let env = get_manager().await;
    let caps = PalletCapabilities::new()
        .with_call(pallet::BALANCES, method::TRANSFER_KEEP_ALIVE, 4, 3)
        .with_call(pallet::PROXY, method::PROXY, 30, 0);
    let rpc = Arc::new(MockChainRpc::new(caps, 1));

    let err = env.manager.register_chain("kusama", rpc).await.unwrap_err();
    assert!(matches!(err, ServiceError::ChainInteract(_)));

    let err = env
        .manager
        .register_chain("moonbeam", Arc::new(MockChainRpc::polkadot()))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Types(_)));
}

#[tokio::test]
async fn test_vault_on_unloaded_chain() {
    let env = get_manager().await;
    let service = env.manager.account_service();
    let vault = service
        .create_vault("k", "kusama", VAULT, vec![ALICE, BOB], 2)
        .await
        .unwrap();

    let err = env
        .manager
        .transaction_service()
        .pending(&vault.address_proxy)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::System(_)));
}
