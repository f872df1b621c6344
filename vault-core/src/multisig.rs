use crate::Address;
use parity_scale_codec::Encode;

const MULTISIG_DOMAIN: &[u8; 16] = b"modlpy/utilisuba";

/// Address of the multisig account controlled by `signers` at `threshold`.
///
/// Signers are sorted by key bytes and de-duplicated first, so the result does
/// not depend on the order they were given in. Matches the derivation of the
/// `multisig` pallet.
pub fn derive_multisig_address(signers: &[Address], threshold: u16) -> Address {
    let mut sorted: Vec<[u8; 32]> = signers.iter().map(|s| *s.as_bytes()).collect();
    sorted.sort();
    sorted.dedup();

    let entropy = (MULTISIG_DOMAIN, sorted, threshold).using_encoded(vault_utils::blake2_256);
    Address::new(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    #[test]
    fn test_permutation_invariance() {
        let a = addr(1);
        let b = addr(2);
        let c = addr(3);
        let expected = derive_multisig_address(&[a, b, c], 2);
        for order in [[a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]] {
            assert_eq!(derive_multisig_address(&order, 2), expected);
        }
    }

    #[test]
    fn test_threshold_and_signers_change_address() {
        let signers = [addr(1), addr(2), addr(3)];
        let two = derive_multisig_address(&signers, 2);
        assert_ne!(two, derive_multisig_address(&signers, 3));
        assert_ne!(two, derive_multisig_address(&signers[..2], 2));
    }

    #[test]
    fn test_preimage_layout() {
        let signers = [addr(9), addr(4)];
        let mut preimage = MULTISIG_DOMAIN.to_vec();
        // compact(2)
        preimage.push(0x08);
        preimage.extend_from_slice(&[4u8; 32]);
        preimage.extend_from_slice(&[9u8; 32]);
        preimage.extend_from_slice(&2u16.to_le_bytes());
        assert_eq!(
            derive_multisig_address(&signers, 2),
            Address::new(vault_utils::blake2_256(&preimage))
        );
    }
}
