use crate::{
    transaction::{Transaction, TxType},
    Signed, TxEip1559, TxEip2930, TxEip4844, TxEip7702, TxError, TxLegacy,
};
use alloy_primitives::{Bytes, ChainId, TxKind, B256, U256};
use ethcodec_eips::{
    eip2718::{Decodable2718, Encodable2718},
    eip2930::AccessList,
    eip7702::SignedAuthorization,
};
use ethcodec_rlp::BufMut;

/// A signed transaction of any supported format, discriminated by its
/// leading type byte per [EIP-2718]. The legacy format has no type byte
/// and travels as a bare RLP list.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxEnvelope {
    /// A signed [`TxLegacy`], untyped on the wire.
    Legacy(Signed<TxLegacy>),
    /// A signed [`TxEip2930`], type byte 1.
    Eip2930(Signed<TxEip2930>),
    /// A signed [`TxEip1559`], type byte 2.
    Eip1559(Signed<TxEip1559>),
    /// A signed [`TxEip4844`], type byte 3.
    Eip4844(Signed<TxEip4844>),
    /// A signed [`TxEip7702`], type byte 4.
    Eip7702(Signed<TxEip7702>),
}

impl From<Signed<TxLegacy>> for TxEnvelope {
    fn from(v: Signed<TxLegacy>) -> Self {
        Self::Legacy(v)
    }
}

impl From<Signed<TxEip2930>> for TxEnvelope {
    fn from(v: Signed<TxEip2930>) -> Self {
        Self::Eip2930(v)
    }
}

impl From<Signed<TxEip1559>> for TxEnvelope {
    fn from(v: Signed<TxEip1559>) -> Self {
        Self::Eip1559(v)
    }
}

impl From<Signed<TxEip4844>> for TxEnvelope {
    fn from(v: Signed<TxEip4844>) -> Self {
        Self::Eip4844(v)
    }
}

impl From<Signed<TxEip7702>> for TxEnvelope {
    fn from(v: Signed<TxEip7702>) -> Self {
        Self::Eip7702(v)
    }
}

impl TxEnvelope {
    /// Which envelope format this is.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::Eip2930(_) => TxType::Eip2930,
            Self::Eip1559(_) => TxType::Eip1559,
            Self::Eip4844(_) => TxType::Eip4844,
            Self::Eip7702(_) => TxType::Eip7702,
        }
    }

    /// The transaction hash of the sealed inner transaction.
    pub const fn tx_hash(&self) -> &B256 {
        match self {
            Self::Legacy(tx) => tx.hash(),
            Self::Eip2930(tx) => tx.hash(),
            Self::Eip1559(tx) => tx.hash(),
            Self::Eip4844(tx) => tx.hash(),
            Self::Eip7702(tx) => tx.hash(),
        }
    }

    /// The signature the inner transaction was sealed with.
    pub const fn signature(&self) -> &alloy_primitives::Signature {
        match self {
            Self::Legacy(tx) => tx.signature(),
            Self::Eip2930(tx) => tx.signature(),
            Self::Eip1559(tx) => tx.signature(),
            Self::Eip4844(tx) => tx.signature(),
            Self::Eip7702(tx) => tx.signature(),
        }
    }

    /// The hash the signature was produced over.
    pub fn signature_hash(&self) -> B256 {
        match self {
            Self::Legacy(tx) => tx.signature_hash(),
            Self::Eip2930(tx) => tx.signature_hash(),
            Self::Eip1559(tx) => tx.signature_hash(),
            Self::Eip4844(tx) => tx.signature_hash(),
            Self::Eip7702(tx) => tx.signature_hash(),
        }
    }

    /// Serialized length, type byte included for the typed formats.
    fn inner_length(&self) -> usize {
        match self {
            Self::Legacy(t) => t.tx().encoded_len_with_signature(t.signature()),
            Self::Eip2930(t) => 1 + t.tx().encoded_len_with_signature(t.signature()),
            Self::Eip1559(t) => 1 + t.tx().encoded_len_with_signature(t.signature()),
            Self::Eip4844(t) => 1 + t.tx().encoded_len_with_signature(t.signature()),
            Self::Eip7702(t) => 1 + t.tx().encoded_len_with_signature(t.signature()),
        }
    }
}

impl Decodable2718 for TxEnvelope {
    type Err = TxError;

    fn typed_decode(ty: u8, buf: &mut &[u8]) -> Result<Self, TxError> {
        match TxType::try_from(ty)? {
            TxType::Eip2930 => Ok(Self::Eip2930(TxEip2930::decode_signed_fields(buf)?)),
            TxType::Eip1559 => Ok(Self::Eip1559(TxEip1559::decode_signed_fields(buf)?)),
            TxType::Eip4844 => Ok(Self::Eip4844(TxEip4844::decode_signed_fields(buf)?)),
            TxType::Eip7702 => Ok(Self::Eip7702(TxEip7702::decode_signed_fields(buf)?)),
            // A 0x00 type byte is not a valid 2718 envelope.
            TxType::Legacy => Err(TxError::InvalidTransactionType(ty)),
        }
    }

    fn fallback_decode(buf: &mut &[u8]) -> Result<Self, TxError> {
        match buf.first() {
            Some(&byte) if byte >= ethcodec_rlp::EMPTY_LIST_CODE => {
                Ok(Self::Legacy(TxLegacy::decode_signed_fields(buf)?))
            }
            Some(&byte) => Err(TxError::InvalidTransactionType(byte)),
            None => Err(ethcodec_rlp::Error::InputTooShort.into()),
        }
    }
}

impl Encodable2718 for TxEnvelope {
    fn type_flag(&self) -> Option<u8> {
        match self {
            Self::Legacy(_) => None,
            Self::Eip2930(_) => Some(TxType::Eip2930 as u8),
            Self::Eip1559(_) => Some(TxType::Eip1559 as u8),
            Self::Eip4844(_) => Some(TxType::Eip4844 as u8),
            Self::Eip7702(_) => Some(TxType::Eip7702 as u8),
        }
    }

    fn encode_2718_len(&self) -> usize {
        self.inner_length()
    }

    fn encode_2718(&self, out: &mut dyn BufMut) {
        if let Some(ty) = self.type_flag() {
            out.put_u8(ty);
        }
        match self {
            Self::Legacy(tx) => tx.tx().encode_with_signature_fields(tx.signature(), out),
            Self::Eip2930(tx) => tx.tx().encode_with_signature(tx.signature(), out),
            Self::Eip1559(tx) => tx.tx().encode_with_signature(tx.signature(), out),
            Self::Eip4844(tx) => tx.tx().encode_with_signature(tx.signature(), out),
            Self::Eip7702(tx) => tx.tx().encode_with_signature(tx.signature(), out),
        }
    }
}

macro_rules! delegate {
    ($self:ident.$method:ident($($arg:expr),*)) => {
        match $self {
            Self::Legacy(tx) => tx.tx().$method($($arg),*),
            Self::Eip2930(tx) => tx.tx().$method($($arg),*),
            Self::Eip1559(tx) => tx.tx().$method($($arg),*),
            Self::Eip4844(tx) => tx.tx().$method($($arg),*),
            Self::Eip7702(tx) => tx.tx().$method($($arg),*),
        }
    };
}

impl Transaction for TxEnvelope {
    fn chain_id(&self) -> Option<ChainId> {
        delegate!(self.chain_id())
    }

    fn nonce(&self) -> u64 {
        delegate!(self.nonce())
    }

    fn gas_limit(&self) -> u64 {
        delegate!(self.gas_limit())
    }

    fn gas_price(&self) -> Option<u64> {
        delegate!(self.gas_price())
    }

    fn max_fee_per_gas(&self) -> u64 {
        delegate!(self.max_fee_per_gas())
    }

    fn max_priority_fee_per_gas(&self) -> Option<u64> {
        delegate!(self.max_priority_fee_per_gas())
    }

    fn max_fee_per_blob_gas(&self) -> Option<u64> {
        delegate!(self.max_fee_per_blob_gas())
    }

    fn kind(&self) -> TxKind {
        delegate!(self.kind())
    }

    fn value(&self) -> U256 {
        delegate!(self.value())
    }

    fn input(&self) -> &Bytes {
        delegate!(self.input())
    }

    fn access_list(&self) -> Option<&AccessList> {
        delegate!(self.access_list())
    }

    fn blob_versioned_hashes(&self) -> Option<&[B256]> {
        delegate!(self.blob_versioned_hashes())
    }

    fn authorization_list(&self) -> Option<&[SignedAuthorization]> {
        delegate!(self.authorization_list())
    }
}
