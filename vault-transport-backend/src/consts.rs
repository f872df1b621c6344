pub mod endpoint {
    pub const CONFIRMED_TRANSACTIONS: &str = "multisig/tx_metadata/list";
    pub const TRANSACTION_METADATA: &str = "multisig/tx_metadata/detail";
    pub const SUBMIT_METADATA: &str = "multisig/tx_metadata/insert";
}
