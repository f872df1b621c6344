pub mod chain_id {
    pub const POLKADOT: &str = "polkadot";
    pub const KUSAMA: &str = "kusama";
    pub const POLKADOT_ASSET_HUB: &str = "polkadot-asset-hub";
    pub const ROCOCO: &str = "rococo-testnet";
    pub const WESTEND: &str = "westend-testnet";
}

pub mod genesis_hash {
    pub const POLKADOT: &str = "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3";
    pub const KUSAMA: &str = "0xb0a8d493285c2df73290dfb7e61f870f17b41801197a149ca93654499ea3dafe";
    pub const POLKADOT_ASSET_HUB: &str =
        "0x68d56f15f85d3136970ec16946040bc1752654e906147f7e43e9d539d7c3de2f";
    pub const ROCOCO: &str = "0x6408de7737c59c238890533af25896a2c20608d8b380bb01029acb392781063e";
    pub const WESTEND: &str = "0xe143f23803ac50e8f6f8e62695d1ce9e4e1d68aa36c1cd2cfd15340213f3423e";
}

pub mod ss58_prefix {
    pub const POLKADOT: u16 = 0;
    pub const KUSAMA: u16 = 2;
    pub const GENERIC_SUBSTRATE: u16 = 42;
}

pub mod symbol {
    pub const DOT: &str = "DOT";
    pub const KSM: &str = "KSM";
    pub const ROC: &str = "ROC";
    pub const WND: &str = "WND";
}

pub mod decimals {
    pub const DOT_DECIMALS: u8 = 10;
    pub const KSM_DECIMALS: u8 = 12;
    pub const ROC_DECIMALS: u8 = 12;
    pub const WND_DECIMALS: u8 = 12;
}

pub mod rpc {
    pub const POLKADOT: &str = "wss://rpc.polkadot.io";
    pub const KUSAMA: &str = "wss://kusama-rpc.polkadot.io";
    pub const POLKADOT_ASSET_HUB: &str = "wss://polkadot-asset-hub-rpc.polkadot.io";
    pub const ROCOCO: &str = "wss://rococo-rpc.polkadot.io";
    pub const WESTEND: &str = "wss://westend-rpc.polkadot.io";
}

pub mod subscan {
    pub const POLKADOT: &str = "https://polkadot.subscan.io/";
    pub const KUSAMA: &str = "https://kusama.subscan.io/";
    pub const POLKADOT_ASSET_HUB: &str = "https://assethub-polkadot.subscan.io/";
    pub const ROCOCO: &str = "https://rococo.subscan.io/";
    pub const WESTEND: &str = "https://westend.subscan.io/";
}

/// Poll period of both reconciler sources, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_FEE_ESTIMATE_TIMEOUT_SECS: u64 = 10;
