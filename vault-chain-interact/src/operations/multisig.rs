use super::CallOperation;
use crate::call::{Call, CallHash};
use crate::capability::PalletCapabilities;
use crate::extrinsic::Extrinsic;
use crate::types::{Timepoint, Weight};
use vault_core::Address;

/// Signer set and threshold of a multisig account, seen from one signer.
#[derive(Debug, Clone, Copy)]
pub struct MultisigParty<'a> {
    pub signer: Address,
    pub signers: &'a [Address],
    pub threshold: u16,
}

impl<'a> MultisigParty<'a> {
    pub fn new(signer: Address, signers: &'a [Address], threshold: u16) -> Self {
        Self {
            signer,
            signers,
            threshold,
        }
    }

    /// Every signer except `signer`, sorted by key bytes as the pallet requires.
    pub fn other_signatories(&self) -> crate::Result<Vec<Address>> {
        if !self.signers.contains(&self.signer) {
            return Err(crate::Error::NotASigner(self.signer.to_hex()));
        }
        let mut others: Vec<Address> = self
            .signers
            .iter()
            .filter(|s| **s != self.signer)
            .copied()
            .collect();
        others.sort();
        others.dedup();
        Ok(others)
    }

    fn extrinsic(
        &self,
        chain_id: &str,
        call: Call,
        caps: &PalletCapabilities,
    ) -> crate::Result<Extrinsic> {
        Extrinsic::new(chain_id, self.signer, call, caps)
    }
}

/// Approval carrying only the call hash.
pub struct ApproveAsMultiOpt<'a> {
    pub party: MultisigParty<'a>,
    /// `None` opens a new multisig operation.
    pub timepoint: Option<Timepoint>,
    pub call_hash: CallHash,
}

impl<'a> ApproveAsMultiOpt<'a> {
    pub fn new(party: MultisigParty<'a>, timepoint: Option<Timepoint>, call_hash: CallHash) -> Self {
        Self {
            party,
            timepoint,
            call_hash,
        }
    }

    pub fn extrinsic(&self, chain_id: &str, caps: &PalletCapabilities) -> crate::Result<Extrinsic> {
        self.party.extrinsic(chain_id, self.build_call(caps)?, caps)
    }
}

impl CallOperation for ApproveAsMultiOpt<'_> {
    fn build_call(&self, _caps: &PalletCapabilities) -> crate::Result<Call> {
        Ok(Call::MultisigApproveAsMulti {
            threshold: self.party.threshold,
            other_signatories: self.party.other_signatories()?,
            maybe_timepoint: self.timepoint,
            call_hash: self.call_hash,
            max_weight: Weight::zero(),
        })
    }
}

/// Final approval carrying the full call, executed in the same extrinsic.
pub struct AsMultiOpt<'a> {
    pub party: MultisigParty<'a>,
    pub timepoint: Option<Timepoint>,
    pub call_data: Vec<u8>,
    pub max_weight: Weight,
}

impl<'a> AsMultiOpt<'a> {
    pub fn new(
        party: MultisigParty<'a>,
        timepoint: Option<Timepoint>,
        call_data: Vec<u8>,
        max_weight: Weight,
    ) -> Self {
        Self {
            party,
            timepoint,
            call_data,
            max_weight,
        }
    }

    pub fn extrinsic(&self, chain_id: &str, caps: &PalletCapabilities) -> crate::Result<Extrinsic> {
        self.party.extrinsic(chain_id, self.build_call(caps)?, caps)
    }
}

impl CallOperation for AsMultiOpt<'_> {
    fn build_call(&self, _caps: &PalletCapabilities) -> crate::Result<Call> {
        Ok(Call::MultisigAsMulti {
            threshold: self.party.threshold,
            other_signatories: self.party.other_signatories()?,
            maybe_timepoint: self.timepoint,
            call: Box::new(Call::Raw(self.call_data.clone())),
            max_weight: self.max_weight,
        })
    }
}

pub struct CancelAsMultiOpt<'a> {
    pub party: MultisigParty<'a>,
    pub timepoint: Timepoint,
    pub call_hash: CallHash,
}

impl<'a> CancelAsMultiOpt<'a> {
    pub fn new(party: MultisigParty<'a>, timepoint: Timepoint, call_hash: CallHash) -> Self {
        Self {
            party,
            timepoint,
            call_hash,
        }
    }

    pub fn extrinsic(&self, chain_id: &str, caps: &PalletCapabilities) -> crate::Result<Extrinsic> {
        self.party.extrinsic(chain_id, self.build_call(caps)?, caps)
    }
}

impl CallOperation for CancelAsMultiOpt<'_> {
    fn build_call(&self, _caps: &PalletCapabilities) -> crate::Result<Call> {
        Ok(Call::MultisigCancelAsMulti {
            threshold: self.party.threshold,
            other_signatories: self.party.other_signatories()?,
            timepoint: self.timepoint,
            call_hash: self.call_hash,
        })
    }
}
