pub mod account;
pub mod approval;
pub mod decode;
pub mod grouping;
pub mod queue;
pub mod reconciler;

pub use account::{MultisigConfig, VaultStore};
pub use queue::{Approvals, DecodedCall, PendingView, Transaction};
