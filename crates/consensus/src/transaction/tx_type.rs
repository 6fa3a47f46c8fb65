//! The type byte that discriminates transaction envelopes.

use crate::TxError;
use core::fmt;
use ethcodec_rlp::{BufMut, Decodable, Encodable};

/// The EIP-2718 type byte of L2 deposit transactions. Not an envelope this
/// crate parses; dispatch rejects it explicitly.
pub const DEPOSIT_TX_TYPE_ID: u8 = 0x7e;

/// The known envelope type bytes: 0 through 4 as assigned by [EIP-2718]
/// and the EIPs that introduced each format.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TxType {
    /// Untyped legacy format, no type byte on the wire.
    #[default]
    Legacy = 0,
    /// Access-list format (EIP-2930).
    Eip2930 = 1,
    /// Dynamic-fee format (EIP-1559).
    Eip1559 = 2,
    /// Blob format (EIP-4844).
    Eip4844 = 3,
    /// Set-code format (EIP-7702).
    Eip7702 = 4,
}

impl From<TxType> for u8 {
    fn from(value: TxType) -> Self {
        value as Self
    }
}

impl TxType {
    /// True for the untyped legacy format.
    #[inline]
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }

    /// True for the formats priced with fee and tip caps instead of a
    /// fixed gas price.
    #[inline]
    pub const fn is_dynamic_fee(&self) -> bool {
        matches!(self, Self::Eip1559 | Self::Eip4844 | Self::Eip7702)
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "Legacy"),
            Self::Eip2930 => write!(f, "EIP-2930"),
            Self::Eip1559 => write!(f, "EIP-1559"),
            Self::Eip4844 => write!(f, "EIP-4844"),
            Self::Eip7702 => write!(f, "EIP-7702"),
        }
    }
}

impl PartialEq<u8> for TxType {
    fn eq(&self, other: &u8) -> bool {
        (*self as u8) == *other
    }
}

impl PartialEq<TxType> for u8 {
    fn eq(&self, other: &TxType) -> bool {
        *self == *other as Self
    }
}

impl TryFrom<u8> for TxType {
    type Error = TxError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Legacy,
            1 => Self::Eip2930,
            2 => Self::Eip1559,
            3 => Self::Eip4844,
            4 => Self::Eip7702,
            _ => return Err(TxError::InvalidTransactionType(value)),
        })
    }
}

impl Encodable for TxType {
    fn encode(&self, out: &mut dyn BufMut) {
        (*self as u8).encode(out);
    }

    fn length(&self) -> usize {
        1
    }
}

impl Decodable for TxType {
    fn decode(buf: &mut &[u8]) -> ethcodec_rlp::Result<Self> {
        let ty = u8::decode(buf)?;
        Self::try_from(ty).map_err(|_| ethcodec_rlp::Error::Custom("invalid transaction type"))
    }
}
