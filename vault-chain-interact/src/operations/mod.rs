pub mod config;
pub mod multisig;
pub mod transfer;

use crate::call::Call;
use crate::capability::PalletCapabilities;

// to build a runtime call
pub trait CallOperation {
    fn build_call(&self, caps: &PalletCapabilities) -> crate::Result<Call>;
}
