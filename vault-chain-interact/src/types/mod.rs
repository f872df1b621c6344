mod pending;
pub use pending::*;

use parity_scale_codec::{Decode, Encode};

/// Block height and extrinsic index at which a multisig call was first initiated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, serde::Serialize, serde::Deserialize,
)]
pub struct Timepoint {
    pub height: u32,
    pub index: u32,
}

impl Timepoint {
    pub fn new(height: u32, index: u32) -> Self {
        Self { height, index }
    }
}

impl std::fmt::Display for Timepoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.height, self.index)
    }
}

/// Two dimensional dispatch weight.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Encode,
    Decode,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Weight {
    #[codec(compact)]
    pub ref_time: u64,
    #[codec(compact)]
    pub proof_size: u64,
}

impl Weight {
    pub const fn new(ref_time: u64, proof_size: u64) -> Self {
        Self {
            ref_time,
            proof_size,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Result of broadcasting a signed extrinsic.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SubmissionOutcome {
    Success {
        extrinsic_hash: String,
        block_hash: String,
    },
    Failure {
        reason: String,
    },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }
}
