use alloy_primitives::hex;
use ethcodec_rlp as rlp;

/// Transaction parsing and serialization errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    /// An RLP-level failure in the envelope payload.
    #[error(transparent)]
    Rlp(#[from] rlp::Error),
    /// The leading byte names no known envelope format.
    #[error("invalid transaction type: {0:#04x}")]
    InvalidTransactionType(u8),
    /// A legacy `v` value fits neither the pre-EIP-155 nor the EIP-155
    /// form, or a typed-envelope parity is not 0/1.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u64),
    /// A hex input could not be decoded.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}
