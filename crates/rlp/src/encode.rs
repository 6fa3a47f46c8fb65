use crate::{Header, EMPTY_STRING_CODE};
use alloy_primitives::{Address, Bytes, FixedBytes, TxKind, U256};
use bytes::BufMut;

/// A type that can be encoded via RLP.
pub trait Encodable {
    /// Encodes the type into `out`.
    fn encode(&self, out: &mut dyn BufMut);

    /// The length of the encoding in bytes, header included.
    fn length(&self) -> usize;
}

impl<T: ?Sized + Encodable> Encodable for &T {
    fn encode(&self, out: &mut dyn BufMut) {
        (**self).encode(out)
    }

    fn length(&self) -> usize {
        (**self).length()
    }
}

impl Encodable for [u8] {
    fn encode(&self, out: &mut dyn BufMut) {
        // A lone byte below 0x80 is its own encoding.
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            Header { list: false, payload_length: self.len() }.encode(out);
        }
        out.put_slice(self);
    }

    fn length(&self) -> usize {
        let mut len = self.len();
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            len += Header { list: false, payload_length: self.len() }.length();
        }
        len
    }
}

impl<const N: usize> Encodable for [u8; N] {
    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }

    fn length(&self) -> usize {
        self[..].length()
    }
}

impl Encodable for str {
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_bytes().encode(out)
    }

    fn length(&self) -> usize {
        self.as_bytes().length()
    }
}

impl Encodable for String {
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_bytes().encode(out)
    }

    fn length(&self) -> usize {
        self.as_bytes().length()
    }
}

impl Encodable for Bytes {
    fn encode(&self, out: &mut dyn BufMut) {
        self.as_ref().encode(out)
    }

    fn length(&self) -> usize {
        self.as_ref().length()
    }
}

impl<const N: usize> Encodable for FixedBytes<N> {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out)
    }

    fn length(&self) -> usize {
        self.0.length()
    }
}

impl Encodable for Address {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out)
    }

    fn length(&self) -> usize {
        self.0.length()
    }
}

impl Encodable for bool {
    fn encode(&self, out: &mut dyn BufMut) {
        // true is the integer one, false the integer zero (0x80).
        out.put_u8(if *self { 1 } else { EMPTY_STRING_CODE });
    }

    fn length(&self) -> usize {
        1
    }
}

macro_rules! uint_encodable {
    ($($t:ty),*) => {$(
        impl Encodable for $t {
            fn encode(&self, out: &mut dyn BufMut) {
                let x = *self;
                if x == 0 {
                    out.put_u8(EMPTY_STRING_CODE);
                } else if x < EMPTY_STRING_CODE as $t {
                    out.put_u8(x as u8);
                } else {
                    let be = x.to_be_bytes();
                    let be = &be[x.leading_zeros() as usize / 8..];
                    out.put_u8(EMPTY_STRING_CODE + be.len() as u8);
                    out.put_slice(be);
                }
            }

            fn length(&self) -> usize {
                let x = *self;
                if x < EMPTY_STRING_CODE as $t {
                    1
                } else {
                    1 + core::mem::size_of::<$t>() - x.leading_zeros() as usize / 8
                }
            }
        }
    )*};
}

uint_encodable!(u8, u16, u32, u64, u128, usize);

impl Encodable for U256 {
    fn encode(&self, out: &mut dyn BufMut) {
        let be = self.to_be_bytes_trimmed_vec();
        be.as_slice().encode(out)
    }

    fn length(&self) -> usize {
        let bytes = self.byte_len();
        if bytes == 1 && self.as_limbs()[0] < EMPTY_STRING_CODE as u64 {
            1
        } else if bytes == 0 {
            1
        } else {
            1 + bytes
        }
    }
}

impl Encodable for TxKind {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Call(to) => to.encode(out),
            // Contract creation is the empty string.
            Self::Create => out.put_u8(EMPTY_STRING_CODE),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Call(to) => to.length(),
            Self::Create => 1,
        }
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Some(value) => value.encode(out),
            None => out.put_u8(EMPTY_STRING_CODE),
        }
    }

    fn length(&self) -> usize {
        self.as_ref().map_or(1, Encodable::length)
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        let payload_length = self.iter().map(Encodable::length).sum();
        Header { list: true, payload_length }.encode(out);
        for item in self {
            item.encode(out);
        }
    }

    fn length(&self) -> usize {
        list_length(self)
    }
}

/// The encoded length of `items` as an RLP list, header included.
pub fn list_length<T: Encodable>(items: &[T]) -> usize {
    let payload_length: usize = items.iter().map(Encodable::length).sum();
    Header { list: true, payload_length }.length() + payload_length
}

/// Encodes `value` into a fresh buffer.
pub fn encode<T: Encodable>(value: T) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

/// Encodes a fieldless enum variant as its textual name.
pub fn encode_enum_name(name: &str, out: &mut dyn BufMut) {
    name.encode(out)
}
