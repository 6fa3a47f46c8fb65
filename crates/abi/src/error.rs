use alloy_primitives::Selector;

/// ABI result type.
pub type Result<T, E = AbiError> = core::result::Result<T, E>;

/// ABI encoding and decoding errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// A value does not fit the descriptor it is paired with, or a slot
    /// holds a byte pattern the descriptor forbids.
    #[error("value does not match the abi parameter")]
    InvalidAbiParameter,
    /// The leading 4-byte selector does not match the descriptor's
    /// canonical signature hash.
    #[error("selector mismatch: expected {expected}, got {got}")]
    InvalidAbiSignature {
        /// Selector of the supplied descriptor.
        expected: Selector,
        /// Selector found on the wire.
        got: Selector,
    },
    /// The input is empty or not a multiple of 32 bytes.
    #[error("decode data size is not a non-zero multiple of 32")]
    InvalidDecodeDataSize,
    /// The decoder visited `max_bytes` or more bytes.
    #[error("decoder read budget exhausted")]
    BufferOverrun,
    /// Bytes trail the decoded value at the top level.
    #[error("junk data after the encoded payload")]
    JunkData,
    /// An integer bit width is zero, not a multiple of 8, or over 256.
    #[error("invalid bit size: {0}")]
    InvalidBits(usize),
    /// A fixed-bytes size is outside 1..=32.
    #[error("invalid fixed bytes size: {0}")]
    InvalidArraySize(usize),
    /// An offset, count or byte range does not fit in the input.
    #[error("invalid length")]
    InvalidLength,
    /// A field name has no matching tuple component.
    #[error("unknown field: {0}")]
    UnknownField(String),
}
