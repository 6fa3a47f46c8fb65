use crate::{Error, Header, Result, EMPTY_STRING_CODE};
use alloy_primitives::{Address, Bytes, FixedBytes, TxKind, U256};

/// A type that can be decoded via RLP.
pub trait Decodable: Sized {
    /// Decodes the type from the front of `buf`, advancing past the
    /// consumed bytes.
    fn decode(buf: &mut &[u8]) -> Result<Self>;
}

/// Decodes a value that must span the entire input; trailing bytes fail
/// with [`Error::UnexpectedLength`].
pub fn decode_exact<T: Decodable>(bytes: impl AsRef<[u8]>) -> Result<T> {
    let mut buf = bytes.as_ref();
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(Error::UnexpectedLength);
    }
    Ok(value)
}

/// Decodes a fieldless enum carried as its textual variant name, resolving
/// the name through `lookup`.
pub fn decode_enum_name<T>(buf: &mut &[u8], lookup: impl Fn(&str) -> Option<T>) -> Result<T> {
    let payload = Header::decode_bytes(buf, false)?;
    let name = core::str::from_utf8(payload).map_err(|_| Error::InvalidEnumTag)?;
    lookup(name).ok_or(Error::InvalidEnumTag)
}

impl Decodable for bool {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let &first = buf.first().ok_or(Error::InputTooShort)?;
        let value = match first {
            0x01 => true,
            EMPTY_STRING_CODE => false,
            _ => return Err(Error::UnexpectedValue),
        };
        *buf = &buf[1..];
        Ok(value)
    }
}

macro_rules! uint_decodable {
    ($($t:ty),*) => {$(
        impl Decodable for $t {
            fn decode(buf: &mut &[u8]) -> Result<Self> {
                let payload = Header::decode_bytes(buf, false)?;
                const SIZE: usize = core::mem::size_of::<$t>();
                if payload.len() > SIZE {
                    return Err(Error::Overflow);
                }
                let mut bytes = [0u8; SIZE];
                bytes[SIZE - payload.len()..].copy_from_slice(payload);
                Ok(<$t>::from_be_bytes(bytes))
            }
        }
    )*};
}

uint_decodable!(u8, u16, u32, u64, u128, usize);

impl Decodable for U256 {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = Header::decode_bytes(buf, false)?;
        if payload.len() > 32 {
            return Err(Error::Overflow);
        }
        Ok(Self::from_be_slice(payload))
    }
}

impl Decodable for String {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = Header::decode_bytes(buf, false)?;
        core::str::from_utf8(payload).map(Into::into).map_err(|_| Error::UnexpectedValue)
    }
}

impl Decodable for Bytes {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        Header::decode_bytes(buf, false).map(Self::copy_from_slice)
    }
}

impl<const N: usize> Decodable for FixedBytes<N> {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = Header::decode_bytes(buf, false)?;
        if payload.len() != N {
            return Err(Error::LengthMismatch { expected: N, got: payload.len() });
        }
        Ok(Self::from_slice(payload))
    }
}

impl Decodable for Address {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        FixedBytes::<20>::decode(buf).map(Self)
    }
}

impl<const N: usize> Decodable for [u8; N] {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        FixedBytes::<N>::decode(buf).map(|bytes| bytes.0)
    }
}

impl Decodable for TxKind {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let payload = Header::decode_bytes(buf, false)?;
        match payload.len() {
            0 => Ok(Self::Create),
            20 => Ok(Self::Call(Address::from_slice(payload))),
            got => Err(Error::LengthMismatch { expected: 20, got }),
        }
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let &first = buf.first().ok_or(Error::InputTooShort)?;
        if first == EMPTY_STRING_CODE {
            *buf = &buf[1..];
            return Ok(None);
        }
        T::decode(buf).map(Some)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(buf: &mut &[u8]) -> Result<Self> {
        let mut payload = Header::decode_bytes(buf, true)?;
        let mut items = Self::new();
        while !payload.is_empty() {
            items.push(T::decode(&mut payload)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;
    use alloy_primitives::{address, hex};
    use assert_matches::assert_matches;

    #[test]
    fn decode_dog() {
        let decoded: String = decode_exact(hex!("83646f67")).unwrap();
        assert_eq!(decoded, "dog");
    }

    #[test]
    fn integer_round_trips() {
        for value in [0u64, 1, 0x7f, 0x80, 0xffff, u64::MAX] {
            let decoded: u64 = decode_exact(encode(value)).unwrap();
            assert_eq!(decoded, value);
        }
        let value = U256::from(2).pow(U256::from(200));
        let decoded: U256 = decode_exact(encode(value)).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn uint_overflow_is_rejected() {
        // Nine byte payload cannot fit a u64.
        let encoded = encode([0x01u8; 9].as_slice());
        assert_matches!(decode_exact::<u64>(encoded), Err(Error::Overflow));
    }

    #[test]
    fn bool_is_strict() {
        assert_eq!(decode_exact::<bool>([0x01]), Ok(true));
        assert_eq!(decode_exact::<bool>([0x80]), Ok(false));
        assert_matches!(decode_exact::<bool>([0x00]), Err(Error::UnexpectedValue));
        assert_matches!(decode_exact::<bool>([0x02]), Err(Error::UnexpectedValue));
    }

    #[test]
    fn option_round_trips() {
        let none: Option<u64> = decode_exact(encode(Option::<u64>::None)).unwrap();
        assert_eq!(none, None);
        let some: Option<u64> = decode_exact(encode(Some(42u64))).unwrap();
        assert_eq!(some, Some(42));
    }

    #[test]
    fn trailing_bytes_are_rejected_at_top_level() {
        let mut encoded = encode("dog");
        encoded.push(0x00);
        assert_matches!(decode_exact::<String>(encoded), Err(Error::UnexpectedLength));
    }

    #[test]
    fn fixed_size_length_mismatch() {
        let encoded = encode([0xabu8; 19].as_slice());
        assert_matches!(
            decode_exact::<Address>(encoded),
            Err(Error::LengthMismatch { expected: 20, got: 19 })
        );
    }

    #[test]
    fn tx_kind_round_trips() {
        let call = TxKind::Call(address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
        assert_eq!(decode_exact::<TxKind>(encode(call)).unwrap(), call);
        assert_eq!(decode_exact::<TxKind>(encode(TxKind::Create)).unwrap(), TxKind::Create);
    }

    #[test]
    fn vectors_decode_as_lists() {
        let values = vec![1u64, 2, 3, 0x80];
        let decoded: Vec<u64> = decode_exact(encode(&values)).unwrap();
        assert_eq!(decoded, values);

        let nested = vec![vec![1u64], vec![], vec![2, 3]];
        let decoded: Vec<Vec<u64>> = decode_exact(encode(&nested)).unwrap();
        assert_eq!(decoded, nested);
    }

    #[test]
    fn enum_names_round_trip() {
        #[derive(Debug, PartialEq)]
        enum Fork {
            Berlin,
            London,
        }

        impl Fork {
            fn from_name(name: &str) -> Option<Self> {
                match name {
                    "Berlin" => Some(Self::Berlin),
                    "London" => Some(Self::London),
                    _ => None,
                }
            }
        }

        let mut out = Vec::new();
        crate::encode_enum_name("London", &mut out);
        let mut buf = out.as_slice();
        assert_eq!(decode_enum_name(&mut buf, Fork::from_name).unwrap(), Fork::London);

        let mut out = Vec::new();
        crate::encode_enum_name("Paris", &mut out);
        let mut buf = out.as_slice();
        assert_matches!(
            decode_enum_name(&mut buf, Fork::from_name),
            Err(Error::InvalidEnumTag)
        );
    }

    #[test]
    fn string_and_list_headers_do_not_cross() {
        // A list where a string is expected.
        assert_matches!(decode_exact::<String>([0xc0]), Err(Error::UnexpectedList));
        // A string where a list is expected.
        assert_matches!(decode_exact::<Vec<u64>>([0x83, b'd', b'o', b'g']), Err(Error::UnexpectedString));
    }
}
