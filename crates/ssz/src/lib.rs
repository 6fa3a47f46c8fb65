//! Simple serialize (SSZ) encoding and decoding.
//!
//! The consensus-layer layout: little-endian fixed-width scalars, containers
//! that write their fixed-size fields first and then a table of 4-byte
//! offsets pointing at the variable-size payloads, bit-packed bool
//! sequences ([`Bitfield`]), 1-byte-selector options and
//! discriminator-tagged unions. Fieldless enums travel as their textual
//! variant names.
//!
//! Composite types implement [`Encode`]/[`Decode`] by driving an
//! [`Encoder`] and a [`DecoderBuilder`] over their fields, in declaration
//! order.

mod error;
pub use error::{Error, Result};

mod encode;
pub use encode::{encode, encode_enum_name, encode_union, Encode, Encoder};

mod decode;
pub use decode::{decode, decode_enum_name, split_union, Decode, Decoder, DecoderBuilder};

mod bitfield;
pub use bitfield::Bitfield;

/// The number of bytes an offset occupies in a container's fixed region.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;
