use crate::{Decode, Encode, Result};

/// A sequence of bools, bit-packed one bit per element, LSB first within
/// each byte.
///
/// This is the carrier for bool sequences: a bare `Vec<bool>` would spend a
/// byte per element through the generic list impl.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitfield(Vec<bool>);

impl Bitfield {
    /// Creates a bitfield from bits.
    pub fn from_bits(bits: impl Into<Vec<bool>>) -> Self {
        Self(bits.into())
    }

    /// The number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the bitfield, returning the bits.
    pub fn into_bits(self) -> Vec<bool> {
        self.0
    }

    /// The bits as a slice.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }
}

impl Encode for Bitfield {
    fn is_fixed_len() -> bool {
        false
    }

    fn byte_len(&self) -> usize {
        self.0.len().div_ceil(8)
    }

    fn append(&self, buf: &mut Vec<u8>) {
        let start = buf.len();
        buf.resize(start + self.byte_len(), 0);
        for (i, &bit) in self.0.iter().enumerate() {
            if bit {
                buf[start + i / 8] |= 1 << (i % 8);
            }
        }
    }
}

impl Decode for Bitfield {
    fn is_fixed_len() -> bool {
        false
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for position in 0..8 {
                bits.push(byte & (1 << position) != 0);
            }
        }
        Ok(Self(bits))
    }
}
