use crate::{get_manager, get_manager_with, ALICE, BOB, CHARLIE, DAVE, VAULT};
use std::time::Duration;
use vault_api::{BlockReason, Config, MultisigQueueError, ServiceError};
use vault_chain_interact::{Call, CallHash};
use vault_types::balance::Balance;

fn queue_error(err: &ServiceError) -> Option<&MultisigQueueError> {
    match err {
        ServiceError::Business(vault_api::BusinessError::MultisigQueue(e)) => Some(e),
        _ => None,
    }
}

#[tokio::test]
async fn test_two_of_three_transfer() -> anyhow::Result<()> {
    let env = get_manager().await;
    env.two_of_three().await;
    let service = env.manager.transaction_service();
    let amount = Balance::from_user_input("1.5", env.dot())?;

    let proposed = service
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, amount.clone())], "pay dave")
        .await?;
    assert_eq!(proposed.fee.as_ref().map(|f| f.amount), Some(15_000_000));
    assert_eq!(env.metadata.submitted().len(), 1);

    let view = service.pending(&VAULT).await?;
    assert!(!view.loading);
    assert_eq!(view.transactions.len(), 1);
    let tx = &view.transactions[0];
    assert_eq!(tx.hash, proposed.call_hash);
    assert_eq!(tx.description.as_deref(), Some("pay dave"));
    assert_eq!(
        tx.decoded,
        vault_api::DecodedCall::Transfer {
            recipients: vec![(DAVE, amount)]
        }
    );
    assert_eq!(tx.approvals.get(&ALICE), Some(&true));
    assert_eq!(tx.approvals.get(&BOB), Some(&false));

    let actions = service.actions(&VAULT, &tx.hash, &[CHARLIE, BOB]).await?;
    assert_eq!(actions.next_signer, Some(BOB));
    assert!(actions.ready_to_execute);
    assert!(!actions.can_cancel);

    let executed = service.execute(&VAULT, &tx.hash, &[CHARLIE]).await?;
    assert!(executed.executed);
    assert!(executed.outcome.is_success());
    assert!(matches!(env.rpc.executed()[0], Call::ProxyProxy { real: VAULT, .. }));
    assert!(service.pending(&VAULT).await?.transactions.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_three_of_three_needs_approval_first() -> anyhow::Result<()> {
    let env = get_manager().await;
    let service = env.manager.account_service();
    let vault = service
        .create_vault("t", "polkadot", VAULT, vec![ALICE, BOB, CHARLIE], 3)
        .await?;
    env.rpc.add_proxy(VAULT, vault.address_multisig);
    let txs = env.manager.transaction_service();

    let proposed = txs
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(1))], "small")
        .await?;
    let err = txs
        .execute(&VAULT, &proposed.call_hash, &[BOB])
        .await
        .unwrap_err();
    assert!(matches!(
        queue_error(&err),
        Some(MultisigQueueError::NotReady {
            approvals: 1,
            threshold: 3
        })
    ));
    assert_eq!(err.get_status_code(), 3709);
    assert!(env.rpc.executed().is_empty());

    txs.approve(&VAULT, &proposed.call_hash, &[BOB]).await?;
    let view = txs.pending(&VAULT).await?;
    assert_eq!(view.transactions[0].approvals.get(&BOB), Some(&true));

    let done = txs.execute(&VAULT, &proposed.call_hash, &[CHARLIE]).await?;
    assert!(done.executed);
    assert_eq!(env.rpc.executed().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_change_config_blocked_then_applied() -> anyhow::Result<()> {
    let env = get_manager().await;
    let old = env.two_of_three().await;
    let service = env.manager.transaction_service();

    let transfer = service
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(7))], "pay")
        .await?;
    let change = service
        .propose_change_config(&VAULT, ALICE, vec![ALICE, BOB, DAVE], 2, "swap charlie")
        .await?;

    let view = service.pending(&VAULT).await?;
    let decoded = &view.find(&change.call_hash).unwrap().decoded;
    assert!(decoded.is_change_config());

    let actions = service.actions(&VAULT, &change.call_hash, &[BOB]).await?;
    assert!(!actions.ready_to_execute);
    assert_eq!(actions.blocked, Some(BlockReason::ConfigChangePending { others: 1 }));
    let err = service
        .execute(&VAULT, &change.call_hash, &[BOB])
        .await
        .unwrap_err();
    assert!(matches!(
        queue_error(&err),
        Some(MultisigQueueError::ConfigChangeBlocked(1))
    ));

    service.cancel(&VAULT, &transfer.call_hash, ALICE).await?;
    let applied = service.execute(&VAULT, &change.call_hash, &[BOB]).await?;

    let new_config = applied.new_config.expect("config replaced");
    assert_eq!(new_config.signers, vec![ALICE, BOB, DAVE]);
    assert_eq!(new_config.address_proxy, VAULT);
    assert_ne!(new_config.address_multisig, old.address_multisig);

    let stored = env.manager.account_service().get_vault(&VAULT)?;
    assert_eq!(stored, new_config);
    // the previous handle still describes the old set
    assert_eq!(old.signers, vec![ALICE, BOB, CHARLIE]);
    assert!(service.pending(&VAULT).await?.transactions.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_config_change_not_confirmed_keeps_old_config() -> anyhow::Result<()> {
    let mut config = Config::default();
    config.config_change.confirm_attempts = 2;
    config.config_change.confirm_delay_ms = 1;
    let env = get_manager_with(config).await;
    let old = env.two_of_three().await;
    let service = env.manager.transaction_service();

    let change = service
        .propose_change_config(&VAULT, ALICE, vec![ALICE, BOB], 2, "shrink")
        .await?;
    env.rpc.set_hide_proxies(true);

    let err = service
        .execute(&VAULT, &change.call_hash, &[CHARLIE])
        .await
        .unwrap_err();
    assert_eq!(err.get_status_code(), 3606);
    assert_eq!(env.manager.account_service().get_vault(&VAULT)?, old);
    Ok(())
}

#[tokio::test]
async fn test_unknown_pending_is_never_executable() -> anyhow::Result<()> {
    let env = get_manager().await;
    let vault = env.two_of_three().await;
    let service = env.manager.transaction_service();
    let hash = CallHash::of(b"made elsewhere");
    env.rpc.open_pending(vault.address_multisig, hash, ALICE);

    let view = service.pending(&VAULT).await?;
    assert!(view.transactions[0].decoded.is_unknown());

    let actions = service.actions(&VAULT, &hash, &[BOB]).await?;
    assert!(!actions.ready_to_execute);
    assert_eq!(actions.blocked, Some(BlockReason::CallDataUnknown));
    let err = service.execute(&VAULT, &hash, &[BOB]).await.unwrap_err();
    assert!(matches!(queue_error(&err), Some(MultisigQueueError::CallDataUnknown)));

    // approving with the hash alone still works
    service.approve(&VAULT, &hash, &[BOB]).await?;
    let view = service.pending(&VAULT).await?;
    assert!(view.transactions[0].approvals.values().filter(|v| **v).count() == 2);
    let actions = service.actions(&VAULT, &hash, &[CHARLIE]).await?;
    assert!(!actions.ready_to_execute);
    Ok(())
}

#[tokio::test]
async fn test_cancel_requires_originator() -> anyhow::Result<()> {
    let env = get_manager().await;
    env.two_of_three().await;
    let service = env.manager.transaction_service();
    let proposed = service
        .propose_transfer(&VAULT, BOB, vec![(DAVE, env.dot().balance(3))], "pay")
        .await?;

    let err = service
        .cancel(&VAULT, &proposed.call_hash, ALICE)
        .await
        .unwrap_err();
    assert_eq!(err.get_status_code(), 3702);

    let err = service
        .cancel(&VAULT, &CallHash::of(b"nothing"), BOB)
        .await
        .unwrap_err();
    assert_eq!(err.get_status_code(), 3703);

    service.cancel(&VAULT, &proposed.call_hash, BOB).await?;
    assert!(service.pending(&VAULT).await?.transactions.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_no_eligible_signer() -> anyhow::Result<()> {
    let env = get_manager().await;
    env.two_of_three().await;
    let service = env.manager.transaction_service();
    let proposed = service
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(3))], "pay")
        .await?;

    let actions = service.actions(&VAULT, &proposed.call_hash, &[ALICE, DAVE]).await?;
    assert_eq!(actions.next_signer, None);
    assert_eq!(actions.blocked, Some(BlockReason::NoEligibleSigner));
    let err = service
        .approve(&VAULT, &proposed.call_hash, &[ALICE])
        .await
        .unwrap_err();
    assert!(matches!(queue_error(&err), Some(MultisigQueueError::NoEligibleSigner)));
    Ok(())
}

#[tokio::test]
async fn test_fee_failure_does_not_block_submission() -> anyhow::Result<()> {
    let env = get_manager().await;
    env.two_of_three().await;
    env.rpc.set_fail_fee(true);

    let proposed = env
        .manager
        .transaction_service()
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(3))], "pay")
        .await?;
    assert!(proposed.fee.is_none());
    assert!(proposed.outcome.is_success());
    assert_eq!(env.rpc.submitted().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_rejected_submission_skips_metadata() {
    let env = get_manager().await;
    env.two_of_three().await;
    env.rpc.set_reject_submit(true);

    let err = env
        .manager
        .transaction_service()
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(3))], "pay")
        .await
        .unwrap_err();
    assert!(matches!(queue_error(&err), Some(MultisigQueueError::SubmissionFailed(_))));
    assert!(env.metadata.submitted().is_empty());

    env.rpc.set_reject_submit(false);
    env.signer.set_refuse(true);
    let err = env
        .manager
        .transaction_service()
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(3))], "pay")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ChainInteract(_)));
    assert!(env.rpc.submitted().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_keeps_list() -> anyhow::Result<()> {
    let env = get_manager().await;
    env.two_of_three().await;
    let service = env.manager.transaction_service();
    service
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(3))], "pay")
        .await?;
    let before = service.pending(&VAULT).await?;

    env.metadata.set_fail(true);
    env.rpc.set_fail_pending(true);
    env.manager.context().reconciler.invalidate_all();
    let during = service.pending(&VAULT).await?;
    assert!(during.loading);
    assert_eq!(during.transactions, before.transactions);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_watch_pending_follows_pollers() -> anyhow::Result<()> {
    let env = get_manager().await;
    env.two_of_three().await;
    env.manager.start_polling().await?;
    assert!(env.manager.start_polling().await.is_err());

    let mut rx = env.manager.watch_pending(&VAULT).await?;
    assert!(rx.borrow().transactions.is_empty());

    env.manager
        .transaction_service()
        .propose_transfer(&VAULT, ALICE, vec![(DAVE, env.dot().balance(3))], "pay")
        .await?;
    let view = tokio::time::timeout(
        Duration::from_secs(10),
        rx.wait_for(|v| v.transactions.len() == 1),
    )
    .await??
    .clone();
    assert_eq!(view.transactions[0].description.as_deref(), Some("pay"));

    env.manager.close().await?;
    Ok(())
}
