use crate::{Error, Result, BYTES_PER_LENGTH_OFFSET};
use alloy_primitives::{Address, FixedBytes, U256};

/// A type that can be decoded via SSZ.
pub trait Decode: Sized {
    /// True if the encoded size is determined by the type alone.
    fn is_fixed_len() -> bool;

    /// The footprint of the type in a container's fixed region: its own
    /// size when fixed, the size of an offset when variable.
    fn fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }

    /// Decodes the type from `bytes`, which must span the value exactly.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Decodes a value spanning the entire input.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T> {
    T::from_bytes(bytes)
}

/// Splits a tagged-union encoding into its 1-byte discriminator and body.
pub fn split_union(bytes: &[u8]) -> Result<(u8, &[u8])> {
    let (&selector, body) = bytes.split_first().ok_or(Error::IndexOutOfBounds(0))?;
    Ok((selector, body))
}

/// Decodes a fieldless enum carried as its textual name, resolving the name
/// through `lookup`.
pub fn decode_enum_name<T>(bytes: &[u8], lookup: impl Fn(&str) -> Option<T>) -> Result<T> {
    let name = core::str::from_utf8(bytes).map_err(|_| Error::InvalidEnumType)?;
    lookup(name).ok_or(Error::InvalidEnumType)
}

fn read_offset(bytes: &[u8], position: usize) -> Result<usize> {
    let end = position + BYTES_PER_LENGTH_OFFSET;
    let raw = bytes.get(position..end).ok_or(Error::IndexOutOfBounds(end))?;
    Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize)
}

enum ItemSlot {
    Fixed { start: usize, len: usize },
    Variable { offset_position: usize },
}

/// Splits a container's byte image into one slice per registered field,
/// reading the offset table for variable-size fields.
///
/// Register every field type in declaration order, [`Self::build`], then
/// pull the fields back out of the [`Decoder`] in the same order.
pub struct DecoderBuilder<'a> {
    bytes: &'a [u8],
    items: Vec<ItemSlot>,
    fixed_cursor: usize,
}

impl core::fmt::Debug for DecoderBuilder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecoderBuilder")
            .field("bytes", &self.bytes.len())
            .field("items", &self.items.len())
            .finish()
    }
}

impl<'a> DecoderBuilder<'a> {
    /// Starts splitting `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, items: Vec::new(), fixed_cursor: 0 }
    }

    /// Registers the next field of the container.
    pub fn register_type<T: Decode>(&mut self) -> Result<()> {
        let slot = if T::is_fixed_len() {
            let start = self.fixed_cursor;
            self.fixed_cursor += T::fixed_len();
            ItemSlot::Fixed { start, len: T::fixed_len() }
        } else {
            let offset_position = self.fixed_cursor;
            self.fixed_cursor += BYTES_PER_LENGTH_OFFSET;
            ItemSlot::Variable { offset_position }
        };
        if self.fixed_cursor > self.bytes.len() {
            return Err(Error::IndexOutOfBounds(self.fixed_cursor));
        }
        self.items.push(slot);
        Ok(())
    }

    /// Resolves every field to its byte range.
    pub fn build(self) -> Result<Decoder<'a>> {
        // Read the offset table and check it is monotone and in bounds,
        // with the first offset landing exactly after the fixed region.
        let mut offsets = Vec::new();
        for item in &self.items {
            if let ItemSlot::Variable { offset_position } = item {
                offsets.push(read_offset(self.bytes, *offset_position)?);
            }
        }
        let mut previous = self.fixed_cursor;
        for (i, &offset) in offsets.iter().enumerate() {
            if offset > self.bytes.len() || offset < previous || (i == 0 && offset != previous) {
                return Err(Error::IndexOutOfBounds(offset));
            }
            previous = offset;
        }

        let mut slices = Vec::with_capacity(self.items.len());
        let mut variable_index = 0;
        for item in &self.items {
            let slice = match *item {
                ItemSlot::Fixed { start, len } => &self.bytes[start..start + len],
                ItemSlot::Variable { .. } => {
                    let start = offsets[variable_index];
                    let end =
                        offsets.get(variable_index + 1).copied().unwrap_or(self.bytes.len());
                    variable_index += 1;
                    &self.bytes[start..end]
                }
            };
            slices.push(slice);
        }
        Ok(Decoder { slices, index: 0 })
    }
}

/// Yields the field slices collected by a [`DecoderBuilder`].
#[derive(Debug)]
pub struct Decoder<'a> {
    slices: Vec<&'a [u8]>,
    index: usize,
}

impl Decoder<'_> {
    /// Decodes the next field.
    pub fn decode_next<T: Decode>(&mut self) -> Result<T> {
        let slice = self.slices.get(self.index).ok_or(Error::IndexOutOfBounds(self.index))?;
        self.index += 1;
        T::from_bytes(slice)
    }
}

fn check_length(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::InvalidByteLength { len: bytes.len(), expected });
    }
    Ok(())
}

macro_rules! uint_decode {
    ($($t:ty),*) => {$(
        impl Decode for $t {
            fn is_fixed_len() -> bool {
                true
            }

            fn fixed_len() -> usize {
                core::mem::size_of::<$t>()
            }

            fn from_bytes(bytes: &[u8]) -> Result<Self> {
                check_length(bytes, core::mem::size_of::<$t>())?;
                let mut raw = [0u8; core::mem::size_of::<$t>()];
                raw.copy_from_slice(bytes);
                Ok(<$t>::from_le_bytes(raw))
            }
        }
    )*};
}

uint_decode!(u8, u16, u32, u64, u128);

impl Decode for bool {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        1
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, 1)?;
        match bytes[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::InvalidUnionSelector(other)),
        }
    }
}

impl Decode for U256 {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        32
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, 32)?;
        Ok(Self::from_le_slice(bytes))
    }
}

impl<const N: usize> Decode for FixedBytes<N> {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        N
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, N)?;
        Ok(Self::from_slice(bytes))
    }
}

impl Decode for Address {
    fn is_fixed_len() -> bool {
        true
    }

    fn fixed_len() -> usize {
        20
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, 20)?;
        Ok(Self::from_slice(bytes))
    }
}

impl Decode for String {
    fn is_fixed_len() -> bool {
        false
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        core::str::from_utf8(bytes).map(Into::into).map_err(|_| Error::InvalidUtf8)
    }
}

impl<T: Decode> Decode for Option<T> {
    fn is_fixed_len() -> bool {
        false
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (selector, body) = split_union(bytes)?;
        match selector {
            0 => {
                check_length(body, 0)?;
                Ok(None)
            }
            1 => T::from_bytes(body).map(Some),
            other => Err(Error::InvalidUnionSelector(other)),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn is_fixed_len() -> bool {
        false
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        if T::is_fixed_len() {
            let item_len = T::fixed_len();
            if bytes.len() % item_len != 0 {
                return Err(Error::InvalidByteLength {
                    len: bytes.len(),
                    expected: bytes.len() / item_len * item_len,
                });
            }
            return bytes.chunks(item_len).map(T::from_bytes).collect();
        }

        // Variable-size items: the first offset also tells us how many
        // items the offset table holds.
        let first = read_offset(bytes, 0)?;
        if first % BYTES_PER_LENGTH_OFFSET != 0 || first == 0 {
            return Err(Error::IndexOutOfBounds(first));
        }
        let count = first / BYTES_PER_LENGTH_OFFSET;
        let mut offsets = Vec::with_capacity(count + 1);
        for i in 0..count {
            offsets.push(read_offset(bytes, i * BYTES_PER_LENGTH_OFFSET)?);
        }
        offsets.push(bytes.len());
        let mut items = Self::with_capacity(count);
        for pair in offsets.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            if end < start || end > bytes.len() {
                return Err(Error::IndexOutOfBounds(end));
            }
            items.push(T::from_bytes(&bytes[start..end])?);
        }
        Ok(items)
    }
}
