//! [EIP-2930] types.
//!
//! [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930

use alloy_primitives::{Address, B256, U256};
use ethcodec_rlp::{list_length, BufMut, Decodable, Encodable, Header, Result as RlpResult};
use core::mem;

/// One access-list entry: an account and the storage slots under it the
/// transaction declares up front. Declared slots are warmed before
/// execution; undeclared accesses still work, at the higher cold cost.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccessListItem {
    /// The declared account.
    pub address: Address,
    /// The declared storage slots of that account.
    pub storage_keys: Vec<B256>,
}

impl AccessListItem {
    /// Rough heap footprint of the entry, capacity included.
    #[inline]
    pub fn size(&self) -> usize {
        mem::size_of::<Address>() + self.storage_keys.capacity() * mem::size_of::<B256>()
    }

    fn fields_len(&self) -> usize {
        self.address.length() + self.storage_keys.length()
    }
}

impl Encodable for AccessListItem {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.address.encode(out);
        self.storage_keys.encode(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for AccessListItem {
    fn decode(buf: &mut &[u8]) -> RlpResult<Self> {
        let mut payload = Header::decode_bytes(buf, true)?;
        Ok(Self {
            address: Decodable::decode(&mut payload)?,
            storage_keys: Decodable::decode(&mut payload)?,
        })
    }
}

/// The EIP-2930 access list carried by post-Berlin transactions.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    derive_more::Deref,
    derive_more::DerefMut,
    derive_more::From,
    derive_more::IntoIterator,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
    /// Iterates over the entries as `(address, slots-as-integers)` pairs.
    pub fn flatten(&self) -> impl Iterator<Item = (Address, Vec<U256>)> + '_ {
        self.0.iter().map(|item| {
            (
                item.address,
                item.storage_keys.iter().map(|slot| U256::from_be_bytes(slot.0)).collect(),
            )
        })
    }

    /// Rough heap footprint of the whole list, capacity included.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.iter().map(AccessListItem::size).sum::<usize>()
            + self.0.capacity() * mem::size_of::<AccessListItem>()
    }
}

impl Encodable for AccessList {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out)
    }

    fn length(&self) -> usize {
        list_length(&self.0)
    }
}

impl Decodable for AccessList {
    fn decode(buf: &mut &[u8]) -> RlpResult<Self> {
        Vec::decode(buf).map(Self)
    }
}
