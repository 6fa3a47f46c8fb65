//! Recursive length prefix (RLP) encoding and decoding, bit-exact with the
//! Yellow Paper Appendix B forms.
//!
//! Values are encoded through the [`Encodable`] trait into any
//! [`BufMut`] and decoded through [`Decodable`] from a shrinking
//! `&mut &[u8]` cursor. Composite types encode themselves as lists by
//! writing a [`Header`] followed by their fields, which is also how the
//! transaction envelopes in this workspace lay out their payloads.
//!
//! A few conventions carried by the wire format:
//!
//! - the integer zero and the empty string share the `0x80` code,
//! - `Option::None` is carried as the empty string,
//! - `bool` is strictly `0x01` (true) or `0x80` (false),
//! - fieldless enums travel as their textual variant names (see
//!   [`decode_enum_name`]),
//! - signed integers are not representable: the signed primitive types do
//!   not implement the codec traits.
//!
//! Note that `Vec<T>` always encodes as a list, including `Vec<u8>`. Byte
//! strings travel as `Bytes`, `[u8; N]` or `&[u8]`.

mod error;
pub use error::{Error, Result};

mod header;
pub use header::{length_of_length, Header};

mod encode;
pub use encode::{encode, encode_enum_name, list_length, Encodable};

mod decode;
pub use decode::{decode_enum_name, decode_exact, Decodable};

pub use bytes::{Buf, BufMut};

/// The code for an RLP empty string, also the encoding of the integer zero
/// and of `None`.
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// The code for an RLP empty list.
pub const EMPTY_LIST_CODE: u8 = 0xc0;
