use std::sync::Arc;
use vault_api::test::mock::{MockChainRpc, MockMetadataApi, MockSigner};
use vault_api::{Config, MultisigConfig, VaultManager};
use vault_core::Address;
use vault_types::token::Token;
use vault_utils::init_test_log;

mod multisig_account;
mod multisig_tx;

pub const ALICE: Address = Address::new([1; 32]);
pub const BOB: Address = Address::new([2; 32]);
pub const CHARLIE: Address = Address::new([3; 32]);
pub const DAVE: Address = Address::new([4; 32]);
pub const VAULT: Address = Address::new([0xaa; 32]);

pub struct TestEnv {
    pub manager: VaultManager,
    pub rpc: Arc<MockChainRpc>,
    pub metadata: Arc<MockMetadataApi>,
    pub signer: Arc<MockSigner>,
}

impl TestEnv {
    pub fn dot(&self) -> Token {
        self.manager
            .context()
            .config
            .chain("polkadot")
            .unwrap()
            .native_token()
    }

    /// Registers the [ALICE, BOB, CHARLIE] 2-of-3 vault and makes its multisig the proxy.
    pub async fn two_of_three(&self) -> Arc<MultisigConfig> {
        let vault = self
            .manager
            .account_service()
            .create_vault("treasury", "polkadot", VAULT, vec![ALICE, BOB, CHARLIE], 2)
            .await
            .unwrap();
        self.rpc.add_proxy(VAULT, vault.address_multisig);
        vault
    }
}

pub async fn get_manager_with(config: Config) -> TestEnv {
    init_test_log();

    let rpc = Arc::new(MockChainRpc::polkadot());
    let metadata = Arc::new(MockMetadataApi::default());
    let signer = Arc::new(MockSigner::default());
    let manager = VaultManager::new(config, metadata.clone(), signer.clone());
    manager.register_chain("polkadot", rpc.clone()).await.unwrap();

    TestEnv {
        manager,
        rpc,
        metadata,
        signer,
    }
}

pub async fn get_manager() -> TestEnv {
    let mut config = Config::default();
    config.config_change.confirm_delay_ms = 1;
    get_manager_with(config).await
}
