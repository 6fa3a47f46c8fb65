use crate::BYTES_PER_LENGTH_OFFSET;
use alloy_primitives::{Address, FixedBytes, U256};

/// A type that can be encoded via SSZ.
pub trait Encode {
    /// True if the encoded size is determined by the type alone.
    fn is_fixed_len() -> bool;

    /// The footprint of the type in a container's fixed region: its own
    /// size when fixed, the size of an offset when variable.
    fn fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }

    /// The encoded size of this value in bytes.
    fn byte_len(&self) -> usize;

    /// Appends the encoding to `buf`.
    fn append(&self, buf: &mut Vec<u8>);
}

/// Encodes `value` into a fresh buffer.
pub fn encode<T: Encode>(value: &T) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.byte_len());
    value.append(&mut buf);
    buf
}

/// Writes a container: fixed-size fields in place, variable-size fields as
/// a 4-byte offset in the fixed region and the payload after it.
///
/// Append every field in declaration order, then call [`Encoder::finalize`].
#[derive(Debug)]
pub struct Encoder<'a> {
    buf: &'a mut Vec<u8>,
    variable_bytes: Vec<u8>,
    /// Offset of the next variable payload, relative to the container start.
    offset: usize,
}

impl<'a> Encoder<'a> {
    /// Starts a container whose fixed region is `num_fixed_bytes` long
    /// (the sum of [`Encode::fixed_len`] over its fields).
    pub fn container(buf: &'a mut Vec<u8>, num_fixed_bytes: usize) -> Self {
        buf.reserve(num_fixed_bytes);
        Self { buf, variable_bytes: Vec::new(), offset: num_fixed_bytes }
    }

    /// Appends a field.
    pub fn append<T: Encode>(&mut self, item: &T) {
        if T::is_fixed_len() {
            item.append(self.buf);
        } else {
            let offset = self.offset + self.variable_bytes.len();
            self.buf.extend_from_slice(&(offset as u32).to_le_bytes());
            item.append(&mut self.variable_bytes);
        }
    }

    /// Flushes the variable payloads after the fixed region.
    pub fn finalize(self) {
        self.buf.extend_from_slice(&self.variable_bytes);
    }
}

/// Encodes a tagged-union variant: a 1-byte discriminator then the body.
pub fn encode_union<T: Encode>(selector: u8, value: &T, buf: &mut Vec<u8>) {
    buf.push(selector);
    value.append(buf);
}

/// Encodes a fieldless enum variant as its textual name.
pub fn encode_enum_name(name: &str, buf: &mut Vec<u8>) {
    buf.extend_from_slice(name.as_bytes());
}

macro_rules! uint_encode {
    ($($t:ty),*) => {$(
        impl Encode for $t {
            fn is_fixed_len() -> bool {
                true
            }

            fn fixed_len() -> usize {
                core::mem::size_of::<$t>()
            }

            fn byte_len(&self) -> usize {
                core::mem::size_of::<$t>()
            }

            fn append(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

uint_encode!(u8, u16, u32, u64, u128);

impl Encode for bool {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        1
    }

    fn byte_len(&self) -> usize {
        1
    }

    fn append(&self, buf: &mut Vec<u8>) {
        buf.push(*self as u8);
    }
}

impl Encode for U256 {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        32
    }

    fn byte_len(&self) -> usize {
        32
    }

    fn append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_le_bytes::<32>());
    }
}

impl<const N: usize> Encode for FixedBytes<N> {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        N
    }

    fn byte_len(&self) -> usize {
        N
    }

    fn append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_slice());
    }
}

impl Encode for Address {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        20
    }

    fn byte_len(&self) -> usize {
        20
    }

    fn append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_slice());
    }
}

impl Encode for str {
    fn is_fixed_len() -> bool {
        false
    }

    fn byte_len(&self) -> usize {
        self.len()
    }

    fn append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

impl Encode for String {
    fn is_fixed_len() -> bool {
        false
    }

    fn byte_len(&self) -> usize {
        self.len()
    }

    fn append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

impl<T: Encode> Encode for Option<T> {
    fn is_fixed_len() -> bool {
        false
    }

    fn byte_len(&self) -> usize {
        1 + self.as_ref().map_or(0, Encode::byte_len)
    }

    fn append(&self, buf: &mut Vec<u8>) {
        match self {
            Some(value) => {
                buf.push(1);
                value.append(buf);
            }
            None => buf.push(0),
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn is_fixed_len() -> bool {
        false
    }

    fn byte_len(&self) -> usize {
        if T::is_fixed_len() {
            self.len() * T::fixed_len()
        } else {
            self.iter()
                .map(|item| BYTES_PER_LENGTH_OFFSET + item.byte_len())
                .sum()
        }
    }

    fn append(&self, buf: &mut Vec<u8>) {
        if T::is_fixed_len() {
            for item in self {
                item.append(buf);
            }
        } else {
            let mut encoder = Encoder::container(buf, self.len() * BYTES_PER_LENGTH_OFFSET);
            for item in self {
                encoder.append(item);
            }
            encoder.finalize();
        }
    }
}
