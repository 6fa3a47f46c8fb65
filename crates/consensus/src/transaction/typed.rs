use crate::{
    transaction::{Transaction, TxType},
    SignableTransaction, TxEip1559, TxEip2930, TxEip4844, TxEip7702, TxEnvelope, TxError,
    TxLegacy,
};
use alloy_primitives::{Bytes, ChainId, Signature, TxKind, B256, U256};
use ethcodec_eips::{
    eip2718::{Decodable2718, Encodable2718},
    eip2930::AccessList,
    eip7702::SignedAuthorization,
};
use ethcodec_rlp::{BufMut, Decodable, Encodable};

/// An unsigned transaction of any supported type.
///
/// The unsigned counterpart of [`TxEnvelope`]: the same type-byte
/// discrimination over the RLP list of unsigned fields. For protected
/// legacy transactions the list carries the EIP-155 signing triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedTransaction {
    /// A [`TxLegacy`], untyped on the wire.
    Legacy(TxLegacy),
    /// A [`TxEip2930`], type byte 1.
    Eip2930(TxEip2930),
    /// A [`TxEip1559`], type byte 2.
    Eip1559(TxEip1559),
    /// A [`TxEip4844`], type byte 3.
    Eip4844(TxEip4844),
    /// A [`TxEip7702`], type byte 4.
    Eip7702(TxEip7702),
}

impl From<TxLegacy> for TypedTransaction {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxEip2930> for TypedTransaction {
    fn from(tx: TxEip2930) -> Self {
        Self::Eip2930(tx)
    }
}

impl From<TxEip1559> for TypedTransaction {
    fn from(tx: TxEip1559) -> Self {
        Self::Eip1559(tx)
    }
}

impl From<TxEip4844> for TypedTransaction {
    fn from(tx: TxEip4844) -> Self {
        Self::Eip4844(tx)
    }
}

impl From<TxEip7702> for TypedTransaction {
    fn from(tx: TxEip7702) -> Self {
        Self::Eip7702(tx)
    }
}

impl From<TxEnvelope> for TypedTransaction {
    fn from(envelope: TxEnvelope) -> Self {
        match envelope {
            TxEnvelope::Legacy(tx) => Self::Legacy(tx.strip_signature()),
            TxEnvelope::Eip2930(tx) => Self::Eip2930(tx.strip_signature()),
            TxEnvelope::Eip1559(tx) => Self::Eip1559(tx.strip_signature()),
            TxEnvelope::Eip4844(tx) => Self::Eip4844(tx.strip_signature()),
            TxEnvelope::Eip7702(tx) => Self::Eip7702(tx.strip_signature()),
        }
    }
}

impl TypedTransaction {
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

    /// Seals the transaction into a signed [`TxEnvelope`] with a signature
    /// produced externally over [`Self::signature_hash`].
    pub fn into_envelope(self, signature: Signature) -> TxEnvelope {
        match self {
            Self::Legacy(tx) => TxEnvelope::Legacy(tx.into_signed(signature)),
            Self::Eip2930(tx) => TxEnvelope::Eip2930(tx.into_signed(signature)),
            Self::Eip1559(tx) => TxEnvelope::Eip1559(tx.into_signed(signature)),
            Self::Eip4844(tx) => TxEnvelope::Eip4844(tx.into_signed(signature)),
            Self::Eip7702(tx) => TxEnvelope::Eip7702(tx.into_signed(signature)),
        }
    }

    /// The hash an external signer must sign.
    pub fn signature_hash(&self) -> B256 {
        match self {
            Self::Legacy(tx) => tx.signature_hash(),
            Self::Eip2930(tx) => tx.signature_hash(),
            Self::Eip1559(tx) => tx.signature_hash(),
            Self::Eip4844(tx) => tx.signature_hash(),
            Self::Eip7702(tx) => tx.signature_hash(),
        }
    }
}

impl Decodable2718 for TypedTransaction {
    type Err = TxError;

    fn typed_decode(ty: u8, buf: &mut &[u8]) -> Result<Self, TxError> {
        let tx = match TxType::try_from(ty)? {
            TxType::Eip2930 => Self::Eip2930(TxEip2930::decode(buf)?),
            TxType::Eip1559 => Self::Eip1559(TxEip1559::decode(buf)?),
            TxType::Eip4844 => Self::Eip4844(TxEip4844::decode(buf)?),
            TxType::Eip7702 => Self::Eip7702(TxEip7702::decode(buf)?),
            // A 0x00 type byte is not a valid 2718 envelope.
            TxType::Legacy => return Err(TxError::InvalidTransactionType(ty)),
        };
        Ok(tx)
    }

    fn fallback_decode(buf: &mut &[u8]) -> Result<Self, TxError> {
        match buf.first() {
            Some(&byte) if byte >= ethcodec_rlp::EMPTY_LIST_CODE => {
                Ok(Self::Legacy(TxLegacy::decode(buf)?))
            }
            Some(&byte) => Err(TxError::InvalidTransactionType(byte)),
            None => Err(ethcodec_rlp::Error::InputTooShort.into()),
        }
    }
}

impl Encodable2718 for TypedTransaction {
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
        let type_len = self.type_flag().map_or(0, |_| 1);
        let inner = match self {
            Self::Legacy(tx) => tx.length(),
            Self::Eip2930(tx) => tx.length(),
            Self::Eip1559(tx) => tx.length(),
            Self::Eip4844(tx) => tx.length(),
            Self::Eip7702(tx) => tx.length(),
        };
        type_len + inner
    }

    fn encode_2718(&self, out: &mut dyn BufMut) {
        if let Some(ty) = self.type_flag() {
            out.put_u8(ty);
        }
        match self {
            Self::Legacy(tx) => tx.encode(out),
            Self::Eip2930(tx) => tx.encode(out),
            Self::Eip1559(tx) => tx.encode(out),
            Self::Eip4844(tx) => tx.encode(out),
            Self::Eip7702(tx) => tx.encode(out),
        }
    }
}

macro_rules! delegate {
    ($self:ident.$method:ident($($arg:expr),*)) => {
        match $self {
            Self::Legacy(tx) => tx.$method($($arg),*),
            Self::Eip2930(tx) => tx.$method($($arg),*),
            Self::Eip1559(tx) => tx.$method($($arg),*),
            Self::Eip4844(tx) => tx.$method($($arg),*),
            Self::Eip7702(tx) => tx.$method($($arg),*),
        }
    };
}

impl Transaction for TypedTransaction {
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
