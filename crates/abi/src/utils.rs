//! Byte-level helpers shared by the slot codec: 32-byte padding,
//! fixed-width integer reads and writes, hex round-trips.

use crate::{AbiError, Result};

pub use alloy_primitives::hex;

/// Byte order for multi-byte reads and for `bytesN` slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    /// Most significant byte first.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for u128 {}
    impl Sealed for usize {}
}

/// A fixed-width unsigned integer that can be moved through byte slices.
pub trait FixedInt: sealed::Sealed + Copy {
    /// The width of the integer in bytes.
    const BYTES: usize;

    /// Reads the integer from an exactly [`Self::BYTES`]-long slice.
    fn from_bytes(bytes: &[u8], endian: Endian) -> Self;

    /// Writes the integer into an exactly [`Self::BYTES`]-long slice.
    fn to_bytes(self, out: &mut [u8], endian: Endian);
}

macro_rules! fixed_int {
    ($($t:ty),*) => {$(
        impl FixedInt for $t {
            const BYTES: usize = core::mem::size_of::<$t>();

            fn from_bytes(bytes: &[u8], endian: Endian) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$t>()];
                raw.copy_from_slice(bytes);
                match endian {
                    Endian::Big => <$t>::from_be_bytes(raw),
                    Endian::Little => <$t>::from_le_bytes(raw),
                }
            }

            fn to_bytes(self, out: &mut [u8], endian: Endian) {
                let raw = match endian {
                    Endian::Big => self.to_be_bytes(),
                    Endian::Little => self.to_le_bytes(),
                };
                out.copy_from_slice(&raw);
            }
        }
    )*};
}

fixed_int!(u8, u16, u32, u64, u128, usize);

/// Reads a big-endian integer from the front of `bytes`.
pub fn read_be<T: FixedInt>(bytes: &[u8]) -> Result<T> {
    read(bytes, Endian::Big)
}

/// Reads a little-endian integer from the front of `bytes`.
pub fn read_le<T: FixedInt>(bytes: &[u8]) -> Result<T> {
    read(bytes, Endian::Little)
}

fn read<T: FixedInt>(bytes: &[u8], endian: Endian) -> Result<T> {
    let raw = bytes.get(..T::BYTES).ok_or(AbiError::InvalidLength)?;
    Ok(T::from_bytes(raw, endian))
}

/// Writes a big-endian integer into the front of `out`.
pub fn write_be<T: FixedInt>(out: &mut [u8], value: T) -> Result<()> {
    write(out, value, Endian::Big)
}

/// Writes a little-endian integer into the front of `out`.
pub fn write_le<T: FixedInt>(out: &mut [u8], value: T) -> Result<()> {
    write(out, value, Endian::Little)
}

fn write<T: FixedInt>(out: &mut [u8], value: T, endian: Endian) -> Result<()> {
    let raw = out.get_mut(..T::BYTES).ok_or(AbiError::InvalidLength)?;
    value.to_bytes(raw, endian);
    Ok(())
}

/// Left-pads `bytes` into a 32-byte word, the layout of addresses and
/// integers.
pub fn left_pad_32(bytes: &[u8]) -> Result<[u8; 32]> {
    if bytes.len() > 32 {
        return Err(AbiError::InvalidLength);
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Right-pads `bytes` into a 32-byte word, the layout of `bytesN` slots.
pub fn right_pad_32(bytes: &[u8]) -> Result<[u8; 32]> {
    if bytes.len() > 32 {
        return Err(AbiError::InvalidLength);
    }
    let mut word = [0u8; 32];
    word[..bytes.len()].copy_from_slice(bytes);
    Ok(word)
}

/// Decodes a hex string, with or without a `0x` prefix.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(input)
}

/// Encodes bytes as lowercase hex without a prefix.
pub fn bytes_to_hex_lower(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_directions() {
        let word = left_pad_32(&[0xaa, 0xbb]).unwrap();
        assert_eq!(&word[30..], [0xaa, 0xbb]);
        assert_eq!(word[0], 0);

        let word = right_pad_32(&[0xaa, 0xbb]).unwrap();
        assert_eq!(&word[..2], [0xaa, 0xbb]);
        assert_eq!(word[31], 0);

        assert_eq!(left_pad_32(&[0u8; 33]), Err(AbiError::InvalidLength));
    }

    #[test]
    fn fixed_width_reads_honor_endianness() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(read_be::<u32>(&bytes).unwrap(), 0x0102_0304);
        assert_eq!(read_le::<u32>(&bytes).unwrap(), 0x0403_0201);
        assert_eq!(read_be::<u64>(&bytes), Err(AbiError::InvalidLength));
    }

    #[test]
    fn fixed_width_writes_round_trip() {
        let mut out = [0u8; 8];
        write_be(&mut out, 0x0102_0304_0506_0708u64).unwrap();
        assert_eq!(read_be::<u64>(&out).unwrap(), 0x0102_0304_0506_0708);
        write_le(&mut out, 1u64).unwrap();
        assert_eq!(out[0], 1);
    }

    #[test]
    fn hex_round_trips() {
        let bytes = hex_to_bytes("0xdeadbeef").unwrap();
        assert_eq!(bytes, [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(bytes_to_hex_lower(&bytes), "deadbeef");
        assert!(hex_to_bytes("0xzz").is_err());
    }
}
