/// SSZ result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// SSZ decoding errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An offset or read position lies beyond the end of the buffer, or the
    /// offsets of a container are not monotonically increasing.
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),
    /// A fixed-size value was handed a payload of the wrong length.
    #[error("invalid byte length: got {len}, expected {expected}")]
    InvalidByteLength {
        /// The length found.
        len: usize,
        /// The length the type requires.
        expected: usize,
    },
    /// An enum payload did not name any known variant.
    #[error("invalid enum type")]
    InvalidEnumType,
    /// A union or option selector byte is out of range.
    #[error("invalid union selector: {0:#04x}")]
    InvalidUnionSelector(u8),
    /// A string payload is not valid UTF-8.
    #[error("invalid utf-8 payload")]
    InvalidUtf8,
}
