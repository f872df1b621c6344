use crate::capability::{method, pallet, PalletCapabilities};
use crate::types::{Timepoint, Weight};
use parity_scale_codec::{Compact, Decode, Encode};
use vault_core::Address;

/// Nesting limit for `proxy`, `batch_all` and `as_multi` while decoding.
pub const MAX_CALL_DEPTH: u32 = 256;

/// `blake2_256` of encoded call data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub struct CallHash(pub [u8; 32]);

impl CallHash {
    pub fn of(call_data: &[u8]) -> Self {
        Self(vault_utils::blake2_256(call_data))
    }

    pub fn from_hex(text: &str) -> crate::Result<Self> {
        Ok(Self(vault_utils::hex_func::hex_to_array_32(text)?))
    }

    pub fn to_hex(&self) -> String {
        vault_utils::hex_func::hex_encode_prefixed(self.0)
    }
}

impl std::fmt::Display for CallHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for CallHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CallHash({})", self.to_hex())
    }
}

impl serde::Serialize for CallHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for CallHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, serde::Serialize, serde::Deserialize)]
pub enum ProxyType {
    #[codec(index = 0)]
    Any,
}

/// The subset of runtime calls a vault builds or has to recognise.
///
/// Pallet and call indices are not part of the value; they come from the
/// chain's [`PalletCapabilities`] at encode and decode time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "call", content = "args", rename_all = "snake_case")]
pub enum Call {
    BalancesTransferKeepAlive {
        dest: Address,
        value: u128,
    },
    AssetsTransferKeepAlive {
        id: u32,
        target: Address,
        amount: u128,
    },
    TokensTransferKeepAlive {
        dest: Address,
        currency_id: u32,
        amount: u128,
    },
    UtilityBatchAll {
        calls: Vec<Call>,
    },
    ProxyProxy {
        real: Address,
        force_proxy_type: Option<ProxyType>,
        call: Box<Call>,
    },
    ProxyAddProxy {
        delegate: Address,
        proxy_type: ProxyType,
        delay: u32,
    },
    ProxyRemoveProxy {
        delegate: Address,
        proxy_type: ProxyType,
        delay: u32,
    },
    MultisigAsMulti {
        threshold: u16,
        other_signatories: Vec<Address>,
        maybe_timepoint: Option<Timepoint>,
        call: Box<Call>,
        max_weight: Weight,
    },
    MultisigApproveAsMulti {
        threshold: u16,
        other_signatories: Vec<Address>,
        maybe_timepoint: Option<Timepoint>,
        call_hash: CallHash,
        max_weight: Weight,
    },
    MultisigCancelAsMulti {
        threshold: u16,
        other_signatories: Vec<Address>,
        timepoint: Timepoint,
        call_hash: CallHash,
    },
    /// Already encoded call data, emitted as is.
    Raw(Vec<u8>),
}

impl Call {
    pub fn pallet_method(&self) -> Option<(&'static str, &'static str)> {
        let res = match self {
            Call::BalancesTransferKeepAlive { .. } => (pallet::BALANCES, method::TRANSFER_KEEP_ALIVE),
            Call::AssetsTransferKeepAlive { .. } => (pallet::ASSETS, method::TRANSFER_KEEP_ALIVE),
            Call::TokensTransferKeepAlive { .. } => (pallet::TOKENS, method::TRANSFER_KEEP_ALIVE),
            Call::UtilityBatchAll { .. } => (pallet::UTILITY, method::BATCH_ALL),
            Call::ProxyProxy { .. } => (pallet::PROXY, method::PROXY),
            Call::ProxyAddProxy { .. } => (pallet::PROXY, method::ADD_PROXY),
            Call::ProxyRemoveProxy { .. } => (pallet::PROXY, method::REMOVE_PROXY),
            Call::MultisigAsMulti { .. } => (pallet::MULTISIG, method::AS_MULTI),
            Call::MultisigApproveAsMulti { .. } => (pallet::MULTISIG, method::APPROVE_AS_MULTI),
            Call::MultisigCancelAsMulti { .. } => (pallet::MULTISIG, method::CANCEL_AS_MULTI),
            Call::Raw(_) => return None,
        };
        Some(res)
    }

    pub fn encode_with(&self, caps: &PalletCapabilities) -> crate::Result<Vec<u8>> {
        let mut dest = Vec::new();
        self.encode_to_with(caps, &mut dest)?;
        Ok(dest)
    }

    fn encode_to_with(&self, caps: &PalletCapabilities, dest: &mut Vec<u8>) -> crate::Result<()> {
        let Some((p, m)) = self.pallet_method() else {
            if let Call::Raw(bytes) = self {
                dest.extend_from_slice(bytes);
            }
            return Ok(());
        };
        dest.extend_from_slice(&caps.call_index(p, m)?);

        match self {
            Call::BalancesTransferKeepAlive { dest: to, value } => {
                encode_multi_address(to, dest);
                Compact(*value).encode_to(dest);
            }
            Call::AssetsTransferKeepAlive { id, target, amount } => {
                Compact(*id).encode_to(dest);
                encode_multi_address(target, dest);
                Compact(*amount).encode_to(dest);
            }
            Call::TokensTransferKeepAlive {
                dest: to,
                currency_id,
                amount,
            } => {
                encode_multi_address(to, dest);
                currency_id.encode_to(dest);
                Compact(*amount).encode_to(dest);
            }
            Call::UtilityBatchAll { calls } => {
                Compact(calls.len() as u32).encode_to(dest);
                for call in calls {
                    call.encode_to_with(caps, dest)?;
                }
            }
            Call::ProxyProxy {
                real,
                force_proxy_type,
                call,
            } => {
                encode_multi_address(real, dest);
                force_proxy_type.encode_to(dest);
                call.encode_to_with(caps, dest)?;
            }
            Call::ProxyAddProxy {
                delegate,
                proxy_type,
                delay,
            }
            | Call::ProxyRemoveProxy {
                delegate,
                proxy_type,
                delay,
            } => {
                encode_multi_address(delegate, dest);
                proxy_type.encode_to(dest);
                delay.encode_to(dest);
            }
            Call::MultisigAsMulti {
                threshold,
                other_signatories,
                maybe_timepoint,
                call,
                max_weight,
            } => {
                threshold.encode_to(dest);
                other_signatories.encode_to(dest);
                maybe_timepoint.encode_to(dest);
                call.encode_to_with(caps, dest)?;
                max_weight.encode_to(dest);
            }
            Call::MultisigApproveAsMulti {
                threshold,
                other_signatories,
                maybe_timepoint,
                call_hash,
                max_weight,
            } => {
                threshold.encode_to(dest);
                other_signatories.encode_to(dest);
                maybe_timepoint.encode_to(dest);
                call_hash.encode_to(dest);
                max_weight.encode_to(dest);
            }
            Call::MultisigCancelAsMulti {
                threshold,
                other_signatories,
                timepoint,
                call_hash,
            } => {
                threshold.encode_to(dest);
                other_signatories.encode_to(dest);
                timepoint.encode_to(dest);
                call_hash.encode_to(dest);
            }
            Call::Raw(_) => {}
        }
        Ok(())
    }

    /// Decodes a complete call. Unknown indices and trailing bytes are errors.
    pub fn decode_with(bytes: &[u8], caps: &PalletCapabilities) -> crate::Result<Self> {
        let mut input = bytes;
        let call = Self::decode_from(&mut input, caps, 0)?;
        if !input.is_empty() {
            return Err(crate::Error::TrailingBytes(input.len()));
        }
        Ok(call)
    }

    fn decode_from(
        input: &mut &[u8],
        caps: &PalletCapabilities,
        depth: u32,
    ) -> crate::Result<Self> {
        if depth > MAX_CALL_DEPTH {
            tracing::warn!(depth, "call nesting exceeds limit");
            return Err(crate::Error::CallTooDeep(MAX_CALL_DEPTH));
        }
        let index = <[u8; 2]>::decode(input)?;
        let Some((p, m)) = caps.lookup(index) else {
            tracing::debug!(?index, "unknown call index");
            return Err(crate::Error::UnknownCallIndex(index));
        };

        let call = match (p, m) {
            (pallet::BALANCES, method::TRANSFER_KEEP_ALIVE) => Call::BalancesTransferKeepAlive {
                dest: decode_multi_address(input)?,
                value: Compact::<u128>::decode(input)?.0,
            },
            (pallet::ASSETS, method::TRANSFER_KEEP_ALIVE) => Call::AssetsTransferKeepAlive {
                id: Compact::<u32>::decode(input)?.0,
                target: decode_multi_address(input)?,
                amount: Compact::<u128>::decode(input)?.0,
            },
            (pallet::TOKENS, method::TRANSFER_KEEP_ALIVE) => Call::TokensTransferKeepAlive {
                dest: decode_multi_address(input)?,
                currency_id: u32::decode(input)?,
                amount: Compact::<u128>::decode(input)?.0,
            },
            (pallet::UTILITY, method::BATCH_ALL) => {
                let len = Compact::<u32>::decode(input)?.0;
                let mut calls = Vec::with_capacity(len.min(64) as usize);
                for _ in 0..len {
                    calls.push(Self::decode_from(input, caps, depth + 1)?);
                }
                Call::UtilityBatchAll { calls }
            }
            (pallet::PROXY, method::PROXY) => Call::ProxyProxy {
                real: decode_multi_address(input)?,
                force_proxy_type: Option::<ProxyType>::decode(input)?,
                call: Box::new(Self::decode_from(input, caps, depth + 1)?),
            },
            (pallet::PROXY, method::ADD_PROXY) => Call::ProxyAddProxy {
                delegate: decode_multi_address(input)?,
                proxy_type: ProxyType::decode(input)?,
                delay: u32::decode(input)?,
            },
            (pallet::PROXY, method::REMOVE_PROXY) => Call::ProxyRemoveProxy {
                delegate: decode_multi_address(input)?,
                proxy_type: ProxyType::decode(input)?,
                delay: u32::decode(input)?,
            },
            (pallet::MULTISIG, method::AS_MULTI) => Call::MultisigAsMulti {
                threshold: u16::decode(input)?,
                other_signatories: Vec::<Address>::decode(input)?,
                maybe_timepoint: Option::<Timepoint>::decode(input)?,
                call: Box::new(Self::decode_from(input, caps, depth + 1)?),
                max_weight: Weight::decode(input)?,
            },
            (pallet::MULTISIG, method::APPROVE_AS_MULTI) => Call::MultisigApproveAsMulti {
                threshold: u16::decode(input)?,
                other_signatories: Vec::<Address>::decode(input)?,
                maybe_timepoint: Option::<Timepoint>::decode(input)?,
                call_hash: CallHash::decode(input)?,
                max_weight: Weight::decode(input)?,
            },
            (pallet::MULTISIG, method::CANCEL_AS_MULTI) => Call::MultisigCancelAsMulti {
                threshold: u16::decode(input)?,
                other_signatories: Vec::<Address>::decode(input)?,
                timepoint: Timepoint::decode(input)?,
                call_hash: CallHash::decode(input)?,
            },
            _ => {
                tracing::debug!(pallet = p, method = m, "call not decodable");
                return Err(crate::Error::unsupported(p, m));
            }
        };
        Ok(call)
    }
}

// MultiAddress::Id
fn encode_multi_address(address: &Address, dest: &mut Vec<u8>) {
    dest.push(0);
    dest.extend_from_slice(address.as_bytes());
}

fn decode_multi_address(input: &mut &[u8]) -> crate::Result<Address> {
    match u8::decode(input)? {
        0 => Ok(Address::decode(input)?),
        other => Err(crate::Error::Other(format!(
            "unsupported MultiAddress variant {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    #[test]
    fn test_transfer_layout() {
        let caps = PalletCapabilities::polkadot();
        let call = Call::BalancesTransferKeepAlive {
            dest: addr(7),
            value: 1,
        };
        let encoded = call.encode_with(&caps).unwrap();

        let mut expected = vec![5, 3, 0];
        expected.extend_from_slice(&[7u8; 32]);
        expected.push(0x04);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_nested_proxy_batch_decodes_back() {
        let caps = PalletCapabilities::polkadot();
        let call = Call::ProxyProxy {
            real: addr(1),
            force_proxy_type: None,
            call: Box::new(Call::UtilityBatchAll {
                calls: vec![
                    Call::ProxyAddProxy {
                        delegate: addr(2),
                        proxy_type: ProxyType::Any,
                        delay: 0,
                    },
                    Call::ProxyRemoveProxy {
                        delegate: addr(3),
                        proxy_type: ProxyType::Any,
                        delay: 0,
                    },
                ],
            }),
        };
        let encoded = call.encode_with(&caps).unwrap();
        assert_eq!(&encoded[..2], &[29, 0]);
        assert_eq!(Call::decode_with(&encoded, &caps).unwrap(), call);
    }

    #[test]
    fn test_unsupported_pallet_is_rejected() {
        let caps = PalletCapabilities::polkadot();
        let call = Call::AssetsTransferKeepAlive {
            id: 1984,
            target: addr(1),
            amount: 10,
        };
        assert!(matches!(
            call.encode_with(&caps),
            Err(crate::Error::UnsupportedCall { .. })
        ));
        assert!(matches!(
            Call::decode_with(&[99, 1, 0], &caps),
            Err(crate::Error::UnknownCallIndex([99, 1]))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let caps = PalletCapabilities::polkadot();
        let mut encoded = Call::BalancesTransferKeepAlive {
            dest: addr(7),
            value: 1,
        }
        .encode_with(&caps)
        .unwrap();
        encoded.push(0xff);
        assert!(matches!(
            Call::decode_with(&encoded, &caps),
            Err(crate::Error::TrailingBytes(1))
        ));
    }

    #[test]
    fn test_raw_call_is_embedded_verbatim() {
        let caps = PalletCapabilities::polkadot();
        let inner = Call::BalancesTransferKeepAlive {
            dest: addr(7),
            value: 1,
        }
        .encode_with(&caps)
        .unwrap();
        let as_multi = Call::MultisigAsMulti {
            threshold: 2,
            other_signatories: vec![addr(2)],
            maybe_timepoint: Some(Timepoint::new(10, 1)),
            call: Box::new(Call::Raw(inner.clone())),
            max_weight: Weight::new(1, 1),
        };
        let encoded = as_multi.encode_with(&caps).unwrap();
        // index, threshold, signatories, timepoint
        let offset = 2 + 2 + 1 + 32 + 1 + 8;
        assert_eq!(&encoded[offset..offset + inner.len()], &inner[..]);

        let decoded = Call::decode_with(&encoded, &caps).unwrap();
        let Call::MultisigAsMulti { call, .. } = decoded else {
            panic!("expected as_multi");
        };
        assert_eq!(call.encode_with(&caps).unwrap(), inner);
    }

    #[test]
    fn test_call_hash_hex() {
        let hash = CallHash::of(b"call");
        assert_eq!(CallHash::from_hex(&hash.to_hex()).unwrap(), hash);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
    }

    fn nested_proxy_data(levels: usize, caps: &PalletCapabilities) -> Vec<u8> {
        let mut data = Vec::new();
        for _ in 0..levels {
            data.extend_from_slice(&caps.call_index(pallet::PROXY, method::PROXY).unwrap());
            data.push(0);
            data.extend_from_slice(&[1u8; 32]);
            data.push(0);
        }
        let transfer = Call::BalancesTransferKeepAlive {
            dest: addr(7),
            value: 1,
        };
        data.extend(transfer.encode_with(caps).unwrap());
        data
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let caps = PalletCapabilities::polkadot();

        let data = nested_proxy_data(200_000, &caps);
        assert!(matches!(
            Call::decode_with(&data, &caps),
            Err(crate::Error::CallTooDeep(MAX_CALL_DEPTH))
        ));

        let data = nested_proxy_data(MAX_CALL_DEPTH as usize, &caps);
        assert!(Call::decode_with(&data, &caps).is_ok());
        let data = nested_proxy_data(MAX_CALL_DEPTH as usize + 1, &caps);
        assert!(matches!(
            Call::decode_with(&data, &caps),
            Err(crate::Error::CallTooDeep(_))
        ));
    }

    #[test]
    fn test_deep_batch_nesting_is_rejected() {
        let caps = PalletCapabilities::polkadot();
        let batch = caps.call_index(pallet::UTILITY, method::BATCH_ALL).unwrap();
        let mut data = Vec::new();
        for _ in 0..10_000 {
            data.extend_from_slice(&batch);
            data.push(0x04); // Compact(1)
        }
        assert!(matches!(
            Call::decode_with(&data, &caps),
            Err(crate::Error::CallTooDeep(_))
        ));
    }
}
