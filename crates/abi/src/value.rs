use crate::ParamKind;
use alloy_primitives::{Address, B256, I256, U256};
use std::borrow::Cow;

/// A dynamically typed ABI value.
///
/// Byte-string payloads are [`Cow`]s: the decoder borrows them straight
/// from the input buffer when allowed to, and [`Self::into_owned`] lifts a
/// borrowed tree into a `'static` one. Dropping the value releases every
/// allocation made while decoding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue<'a> {
    /// A boolean.
    Bool(bool),
    /// An unsigned integer with its declared bit width.
    Uint(U256, usize),
    /// A signed integer with its declared bit width.
    Int(I256, usize),
    /// An address.
    Address(Address),
    /// A `bytesN` word, left-aligned, with its declared size.
    FixedBytes(B256, usize),
    /// Dynamic bytes.
    Bytes(Cow<'a, [u8]>),
    /// A string.
    String(Cow<'a, str>),
    /// A fixed-size array.
    FixedArray(Vec<AbiValue<'a>>),
    /// A dynamically sized array.
    Array(Vec<AbiValue<'a>>),
    /// A tuple.
    Tuple(Vec<AbiValue<'a>>),
}

impl<'a> AbiValue<'a> {
    /// A bytes value borrowing `bytes`.
    pub const fn bytes(bytes: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }

    /// A string value borrowing `s`.
    pub const fn string(s: &'a str) -> Self {
        Self::String(Cow::Borrowed(s))
    }

    /// A `bytesN` value from its raw bytes, left-aligned into the word.
    ///
    /// Returns `None` when `bytes` is longer than 32.
    pub fn fixed_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > 32 {
            return None;
        }
        let mut word = B256::ZERO;
        word[..bytes.len()].copy_from_slice(bytes);
        Some(Self::FixedBytes(word, bytes.len()))
    }

    /// Copies every borrowed payload, detaching the value from the buffer
    /// it was decoded from.
    pub fn into_owned(self) -> AbiValue<'static> {
        match self {
            Self::Bool(value) => AbiValue::Bool(value),
            Self::Uint(value, bits) => AbiValue::Uint(value, bits),
            Self::Int(value, bits) => AbiValue::Int(value, bits),
            Self::Address(value) => AbiValue::Address(value),
            Self::FixedBytes(word, size) => AbiValue::FixedBytes(word, size),
            Self::Bytes(bytes) => AbiValue::Bytes(Cow::Owned(bytes.into_owned())),
            Self::String(s) => AbiValue::String(Cow::Owned(s.into_owned())),
            Self::FixedArray(items) => {
                AbiValue::FixedArray(items.into_iter().map(Self::into_owned).collect())
            }
            Self::Array(items) => {
                AbiValue::Array(items.into_iter().map(Self::into_owned).collect())
            }
            Self::Tuple(items) => {
                AbiValue::Tuple(items.into_iter().map(Self::into_owned).collect())
            }
        }
    }

    /// True if the value's shape fits the descriptor.
    pub fn matches(&self, kind: &ParamKind) -> bool {
        match (self, kind) {
            (Self::Bool(_), ParamKind::Bool)
            | (Self::Address(_), ParamKind::Address)
            | (Self::Bytes(_), ParamKind::Bytes)
            | (Self::String(_), ParamKind::String) => true,
            (Self::Uint(_, got), ParamKind::Uint(bits)) => got == bits,
            (Self::Int(_, got), ParamKind::Int(bits)) => got == bits,
            (Self::FixedBytes(_, got), ParamKind::FixedBytes(size)) => got == size,
            (Self::FixedArray(items), ParamKind::FixedArray(child, size)) => {
                items.len() == *size && items.iter().all(|item| item.matches(child))
            }
            (Self::Array(items), ParamKind::Array(child)) => {
                items.iter().all(|item| item.matches(child))
            }
            (Self::Tuple(items), ParamKind::Tuple(fields)) => {
                items.len() == fields.len()
                    && items
                        .iter()
                        .zip(fields)
                        .all(|(item, field)| item.matches(&field.kind))
            }
            _ => false,
        }
    }

    /// The inner bool, if this is a bool.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The inner unsigned integer, if this is a uint.
    pub const fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value, _) => Some(*value),
            _ => None,
        }
    }

    /// The inner signed integer, if this is an int.
    pub const fn as_int(&self) -> Option<I256> {
        match self {
            Self::Int(value, _) => Some(*value),
            _ => None,
        }
    }

    /// The inner address, if this is an address.
    pub const fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(value) => Some(*value),
            _ => None,
        }
    }

    /// The raw `bytesN` payload, if this is a fixed-bytes value.
    pub fn as_fixed_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::FixedBytes(word, size) => Some(&word[..*size]),
            _ => None,
        }
    }

    /// The byte payload, if this is a bytes value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The items, if this is an array, fixed array or tuple.
    pub fn as_slice(&self) -> Option<&[AbiValue<'a>]> {
        match self {
            Self::FixedArray(items) | Self::Array(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_follows_shape_and_width() {
        assert!(AbiValue::Uint(U256::from(1), 256).matches(&ParamKind::Uint(256)));
        assert!(!AbiValue::Uint(U256::from(1), 128).matches(&ParamKind::Uint(256)));
        assert!(AbiValue::bytes(b"ab").matches(&ParamKind::Bytes));
        let array = AbiValue::Array(vec![AbiValue::Bool(true), AbiValue::Bool(false)]);
        assert!(array.matches(&ParamKind::Array(Box::new(ParamKind::Bool))));
        assert!(!array.matches(&ParamKind::Array(Box::new(ParamKind::Address))));
    }

    #[test]
    fn into_owned_detaches_borrows() {
        let data = vec![1u8, 2, 3];
        let value = AbiValue::Tuple(vec![AbiValue::bytes(&data), AbiValue::Bool(true)]);
        let owned: AbiValue<'static> = value.into_owned();
        drop(data);
        assert_eq!(owned.as_slice().unwrap()[0].as_bytes().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn fixed_bytes_is_left_aligned() {
        let value = AbiValue::fixed_bytes(&[0xab, 0xcd]).unwrap();
        assert_eq!(value.as_fixed_bytes().unwrap(), [0xab, 0xcd]);
        let AbiValue::FixedBytes(word, size) = value else { unreachable!() };
        assert_eq!(size, 2);
        assert_eq!(word[0], 0xab);
        assert_eq!(word[31], 0);
        assert!(AbiValue::fixed_bytes(&[0u8; 33]).is_none());
    }
}
