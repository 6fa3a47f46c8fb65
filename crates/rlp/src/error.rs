/// RLP result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// RLP decoding errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input ended before the item it announced.
    #[error("input too short")]
    InputTooShort,
    /// A length prefix does not fit in a `usize`.
    #[error("payload length overflows usize")]
    Overflow,
    /// Expected a byte string, found a list.
    #[error("unexpected list")]
    UnexpectedList,
    /// Expected a list, found a byte string.
    #[error("unexpected string")]
    UnexpectedString,
    /// A list payload was shorter or longer than the items it contains, or
    /// bytes trailed the top-level item.
    #[error("unexpected length")]
    UnexpectedLength,
    /// A payload byte pattern is not valid for the requested type.
    #[error("unexpected value")]
    UnexpectedValue,
    /// A fixed-size payload had the wrong length.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// The declared length.
        expected: usize,
        /// The length found on the wire.
        got: usize,
    },
    /// An enum payload did not name any known variant.
    #[error("invalid enum tag")]
    InvalidEnumTag,
    /// A custom error with a static message.
    #[error("{0}")]
    Custom(&'static str),
}
