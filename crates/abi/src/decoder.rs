use crate::{
    utils::{self, Endian},
    AbiError, AbiValue, Constructor, ErrorItem, Function, Param, ParamKind, Result,
};
use alloy_primitives::{Address, Selector, B256, I256, U256};
use std::borrow::Cow;

/// Allocation policy for decoded byte-string payloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AllocateWhen {
    /// Copy every payload out of the input buffer.
    AlwaysAllocate,
    /// Borrow payloads from the input buffer where possible.
    #[default]
    AllocateIfNeeded,
}

/// Options for the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Ceiling on the total bytes visited across every head and tail read
    /// of the call. The ceiling is exclusive: reaching it fails with
    /// [`AbiError::BufferOverrun`].
    pub max_bytes: u16,
    /// Tolerate bytes trailing the decoded payload.
    pub allow_junk_data: bool,
    /// Allocation policy for byte-string payloads.
    pub allocate: AllocateWhen,
    /// Byte order applied to `bytesN` slots. Big-endian matches the slot
    /// as written; little-endian byte-swaps the payload.
    pub bytes_endian: Endian,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_bytes: 1024,
            allow_junk_data: false,
            allocate: AllocateWhen::default(),
            bytes_endian: Endian::default(),
        }
    }
}

/// The outcome of a decode call: the values, plus the grand total of bytes
/// visited while producing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded<'a> {
    /// The decoded values, one per descriptor.
    pub values: Vec<AbiValue<'a>>,
    /// Total bytes visited across head and tail reads.
    pub bytes_read: usize,
}

/// Decodes a sequence of values against their descriptors.
///
/// The input must be a non-zero multiple of 32 bytes. Every 32-byte read is
/// counted against [`DecodeOptions::max_bytes`], which bounds the work a
/// crafted offset graph can force; bytes trailing the decoded payload fail
/// with [`AbiError::JunkData`] unless allowed.
pub fn decode<'a>(
    params: &[Param],
    data: &'a [u8],
    options: DecodeOptions,
) -> Result<Decoded<'a>> {
    if data.is_empty() || data.len() % 32 != 0 {
        return Err(AbiError::InvalidDecodeDataSize);
    }
    for param in params {
        param.kind.validate()?;
    }
    let mut cursor = Cursor { data, options, bytes_read: 0 };
    let values = cursor.decode_sequence(params.iter().map(|param| &param.kind), 0)?;
    if !options.allow_junk_data && data.len() > cursor.bytes_read {
        return Err(AbiError::JunkData);
    }
    Ok(Decoded { values, bytes_read: cursor.bytes_read })
}

/// Decodes function inputs, verifying and stripping the leading selector.
pub fn decode_function<'a>(
    function: &Function,
    data: &'a [u8],
    options: DecodeOptions,
) -> Result<Decoded<'a>> {
    let rest = strip_selector(data, function.selector())?;
    decode(&function.inputs, rest, options)
}

/// Decodes function outputs, verifying and stripping the leading selector.
pub fn decode_function_outputs<'a>(
    function: &Function,
    data: &'a [u8],
    options: DecodeOptions,
) -> Result<Decoded<'a>> {
    let rest = strip_selector(data, function.selector())?;
    decode(&function.outputs, rest, options)
}

/// Decodes a custom error, verifying and stripping the leading selector.
pub fn decode_error<'a>(
    error: &ErrorItem,
    data: &'a [u8],
    options: DecodeOptions,
) -> Result<Decoded<'a>> {
    let rest = strip_selector(data, error.selector())?;
    decode(&error.inputs, rest, options)
}

/// Decodes constructor arguments. Constructors carry no selector.
pub fn decode_constructor<'a>(
    constructor: &Constructor,
    data: &'a [u8],
    options: DecodeOptions,
) -> Result<Decoded<'a>> {
    decode(&constructor.inputs, data, options)
}

fn strip_selector(data: &[u8], expected: Selector) -> Result<&[u8]> {
    let (selector, rest) = data.split_at_checked(4).ok_or(AbiError::InvalidDecodeDataSize)?;
    let got = Selector::from_slice(selector);
    if got != expected {
        return Err(AbiError::InvalidAbiSignature { expected, got });
    }
    Ok(rest)
}

struct Cursor<'a> {
    data: &'a [u8],
    options: DecodeOptions,
    /// Grand total of bytes visited, head and tail, including re-reads of
    /// aliased regions.
    bytes_read: usize,
}

impl<'a> Cursor<'a> {
    fn track(&mut self, bytes: usize) -> Result<()> {
        self.bytes_read += bytes;
        if self.bytes_read >= self.options.max_bytes as usize {
            return Err(AbiError::BufferOverrun);
        }
        Ok(())
    }

    fn word(&mut self, at: usize) -> Result<&'a [u8]> {
        let end = at.checked_add(32).ok_or(AbiError::InvalidLength)?;
        let word = self.data.get(at..end).ok_or(AbiError::InvalidLength)?;
        self.track(32)?;
        Ok(word)
    }

    /// Reads a word holding a `usize` offset or count.
    fn usize_word(&mut self, at: usize) -> Result<usize> {
        let word = self.word(at)?;
        if word[..24].iter().any(|&byte| byte != 0) {
            return Err(AbiError::InvalidLength);
        }
        let value: u64 = utils::read_be(&word[24..])?;
        Ok(value as usize)
    }

    fn decode_sequence<'p>(
        &mut self,
        kinds: impl Iterator<Item = &'p ParamKind>,
        base: usize,
    ) -> Result<Vec<AbiValue<'a>>> {
        // Not pre-sized: counts are attacker-controlled.
        let mut values = Vec::new();
        let mut head = base;
        for kind in kinds {
            if kind.is_dynamic() {
                let offset = self.usize_word(head)?;
                head += 32;
                let at = base.checked_add(offset).ok_or(AbiError::InvalidLength)?;
                values.push(self.decode_tail(kind, at)?);
            } else {
                values.push(self.decode_static(kind, &mut head)?);
            }
        }
        Ok(values)
    }

    fn decode_static(&mut self, kind: &ParamKind, cursor: &mut usize) -> Result<AbiValue<'a>> {
        match kind {
            ParamKind::Bool => {
                let word = self.word(*cursor)?;
                *cursor += 32;
                if word[..31].iter().any(|&byte| byte != 0) || word[31] > 1 {
                    return Err(AbiError::InvalidAbiParameter);
                }
                Ok(AbiValue::Bool(word[31] == 1))
            }
            ParamKind::Uint(bits) => {
                let word = self.word(*cursor)?;
                *cursor += 32;
                Ok(AbiValue::Uint(U256::from_be_slice(word), *bits))
            }
            ParamKind::Int(bits) => {
                let word = self.word(*cursor)?;
                *cursor += 32;
                Ok(AbiValue::Int(I256::from_raw(U256::from_be_slice(word)), *bits))
            }
            ParamKind::Address => {
                let word = self.word(*cursor)?;
                *cursor += 32;
                Ok(AbiValue::Address(Address::from_slice(&word[12..])))
            }
            ParamKind::FixedBytes(size) => {
                let word = self.word(*cursor)?;
                *cursor += 32;
                let mut raw = [0u8; 32];
                raw[..*size].copy_from_slice(&word[..*size]);
                if self.options.bytes_endian == Endian::Little {
                    raw[..*size].reverse();
                }
                Ok(AbiValue::FixedBytes(B256::from(raw), *size))
            }
            ParamKind::FixedArray(child, size) => {
                let mut items = Vec::new();
                for _ in 0..*size {
                    items.push(self.decode_static(child, cursor)?);
                }
                Ok(AbiValue::FixedArray(items))
            }
            ParamKind::Tuple(fields) => {
                let mut items = Vec::new();
                for field in fields {
                    items.push(self.decode_static(&field.kind, cursor)?);
                }
                Ok(AbiValue::Tuple(items))
            }
            // Dynamic kinds never reach the static path.
            _ => Err(AbiError::InvalidAbiParameter),
        }
    }

    fn decode_tail(&mut self, kind: &ParamKind, at: usize) -> Result<AbiValue<'a>> {
        match kind {
            ParamKind::Bytes => {
                let payload = self.byte_tail(at)?;
                Ok(AbiValue::Bytes(match self.options.allocate {
                    AllocateWhen::AlwaysAllocate => Cow::Owned(payload.to_vec()),
                    AllocateWhen::AllocateIfNeeded => Cow::Borrowed(payload),
                }))
            }
            ParamKind::String => {
                let payload = self.byte_tail(at)?;
                let s = core::str::from_utf8(payload)
                    .map_err(|_| AbiError::InvalidAbiParameter)?;
                Ok(AbiValue::String(match self.options.allocate {
                    AllocateWhen::AlwaysAllocate => Cow::Owned(s.to_owned()),
                    AllocateWhen::AllocateIfNeeded => Cow::Borrowed(s),
                }))
            }
            ParamKind::Array(child) => {
                let count = self.usize_word(at)?;
                let base = at + 32;
                let items =
                    self.decode_sequence(core::iter::repeat_n(child.as_ref(), count), base)?;
                Ok(AbiValue::Array(items))
            }
            ParamKind::FixedArray(child, size) => {
                let items =
                    self.decode_sequence(core::iter::repeat_n(child.as_ref(), *size), at)?;
                Ok(AbiValue::FixedArray(items))
            }
            ParamKind::Tuple(fields) => {
                let items =
                    self.decode_sequence(fields.iter().map(|field| &field.kind), at)?;
                Ok(AbiValue::Tuple(items))
            }
            // Static kinds never reach the tail path.
            _ => Err(AbiError::InvalidAbiParameter),
        }
    }

    /// Reads a length-prefixed, right-padded byte payload.
    fn byte_tail(&mut self, at: usize) -> Result<&'a [u8]> {
        let len = self.usize_word(at)?;
        // The raw length word is attacker-controlled; bound it before any
        // arithmetic touches it.
        if len > self.data.len() {
            return Err(AbiError::InvalidLength);
        }
        let start = at.checked_add(32).ok_or(AbiError::InvalidLength)?;
        let padded = len.div_ceil(32).checked_mul(32).ok_or(AbiError::InvalidLength)?;
        let end = start.checked_add(padded).ok_or(AbiError::InvalidLength)?;
        if end > self.data.len() {
            return Err(AbiError::InvalidLength);
        }
        self.track(padded)?;
        Ok(&self.data[start..start + len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;
    use alloy_primitives::{address, hex};
    use assert_matches::assert_matches;

    fn params(kinds: impl IntoIterator<Item = ParamKind>) -> Vec<Param> {
        kinds.into_iter().map(Param::unnamed).collect()
    }

    fn round_trip(params: &[Param], values: Vec<AbiValue<'_>>) {
        let encoded = encode(params, &values).unwrap();
        let decoded = decode(params, &encoded, DecodeOptions::default()).unwrap();
        assert_eq!(decoded.values, values);
        assert_eq!(decoded.bytes_read, encoded.len());
    }

    #[test]
    fn scalar_round_trips() {
        round_trip(&params([ParamKind::Bool]), vec![AbiValue::Bool(true)]);
        round_trip(
            &params([ParamKind::Uint(256)]),
            vec![AbiValue::Uint(U256::from(420), 256)],
        );
        round_trip(
            &params([ParamKind::Int(256)]),
            vec![AbiValue::Int(I256::try_from(-5).unwrap(), 256)],
        );
        round_trip(
            &params([ParamKind::Address]),
            vec![AbiValue::Address(address!("4648451b5f87ff8f0f7d622bd40574bb97e25980"))],
        );
    }

    #[test]
    fn compound_round_trips() {
        round_trip(
            &params([ParamKind::String, ParamKind::Bytes]),
            vec![AbiValue::string("foo"), AbiValue::bytes(&[1, 2, 3, 4])],
        );
        round_trip(
            &params([ParamKind::Array(Box::new(ParamKind::Uint(256)))]),
            vec![AbiValue::Array(vec![
                AbiValue::Uint(U256::from(4), 256),
                AbiValue::Uint(U256::from(2), 256),
                AbiValue::Uint(U256::ZERO, 256),
            ])],
        );
        round_trip(
            &params([ParamKind::Tuple(vec![
                ParamKind::Address.into(),
                ParamKind::Array(Box::new(ParamKind::Bool)).into(),
            ])]),
            vec![AbiValue::Tuple(vec![
                AbiValue::Address(Address::ZERO),
                AbiValue::Array(vec![AbiValue::Bool(true), AbiValue::Bool(false)]),
            ])],
        );
        round_trip(
            &params([ParamKind::FixedArray(Box::new(ParamKind::String), 2)]),
            vec![AbiValue::FixedArray(vec![
                AbiValue::string("ab"),
                AbiValue::string("longer than a single word, to force padding"),
            ])],
        );
    }

    #[test]
    fn decode_int256_minus_five() {
        let data =
            hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffb");
        let decoded =
            decode(&params([ParamKind::Int(256)]), &data, DecodeOptions::default()).unwrap();
        assert_eq!(decoded.values[0].as_int().unwrap(), I256::try_from(-5).unwrap());
    }

    #[test]
    fn input_size_discipline() {
        let opts = DecodeOptions::default();
        assert_matches!(
            decode(&params([ParamKind::Bool]), &[], opts),
            Err(AbiError::InvalidDecodeDataSize)
        );
        assert_matches!(
            decode(&params([ParamKind::Bool]), &[0u8; 31], opts),
            Err(AbiError::InvalidDecodeDataSize)
        );
    }

    #[test]
    fn strict_bool_rejects_junk_bits() {
        let mut data = [0u8; 32];
        data[31] = 2;
        assert_matches!(
            decode(&params([ParamKind::Bool]), &data, DecodeOptions::default()),
            Err(AbiError::InvalidAbiParameter)
        );
        data[31] = 1;
        data[0] = 1;
        assert_matches!(
            decode(&params([ParamKind::Bool]), &data, DecodeOptions::default()),
            Err(AbiError::InvalidAbiParameter)
        );
    }

    #[test]
    fn junk_data_policy() {
        let p = params([ParamKind::Uint(256)]);
        let mut encoded = encode(&p, &[AbiValue::Uint(U256::from(1), 256)]).unwrap();
        encoded.extend_from_slice(&[0u8; 32]);
        assert_matches!(
            decode(&p, &encoded, DecodeOptions::default()),
            Err(AbiError::JunkData)
        );
        let decoded = decode(
            &p,
            &encoded,
            DecodeOptions { allow_junk_data: true, ..Default::default() },
        )
        .unwrap();
        assert_eq!(decoded.values[0].as_uint().unwrap(), U256::from(1));
    }

    #[test]
    fn allocate_policies_agree() {
        let p = params([ParamKind::String]);
        let encoded = encode(&p, &[AbiValue::string("zig zag")]).unwrap();
        let borrowed = decode(&p, &encoded, DecodeOptions::default()).unwrap();
        let owned = decode(
            &p,
            &encoded,
            DecodeOptions { allocate: AllocateWhen::AlwaysAllocate, ..Default::default() },
        )
        .unwrap();
        assert_eq!(borrowed.values, owned.values);
        assert_matches!(&borrowed.values[0], AbiValue::String(Cow::Borrowed(_)));
        assert_matches!(&owned.values[0], AbiValue::String(Cow::Owned(_)));
    }

    #[test]
    fn bytes_endian_swaps_fixed_bytes() {
        let p = params([ParamKind::FixedBytes(4)]);
        let encoded =
            encode(&p, &[AbiValue::fixed_bytes(&[0xde, 0xad, 0xbe, 0xef]).unwrap()])
                .unwrap();
        let big = decode(&p, &encoded, DecodeOptions::default()).unwrap();
        assert_eq!(big.values[0].as_fixed_bytes().unwrap(), [0xde, 0xad, 0xbe, 0xef]);
        let little = decode(
            &p,
            &encoded,
            DecodeOptions { bytes_endian: Endian::Little, ..Default::default() },
        )
        .unwrap();
        assert_eq!(little.values[0].as_fixed_bytes().unwrap(), [0xef, 0xbe, 0xad, 0xde]);
    }

    // Twelve array elements whose offsets all alias the same tail: the
    // input is only 512 bytes but the decoder visits 1216, which must trip
    // the read budget rather than loop to completion.
    #[test]
    fn aliased_offsets_hit_the_read_budget() {
        let mut data = Vec::new();
        data.extend_from_slice(&U256::from(32).to_be_bytes::<32>()); // top offset
        data.extend_from_slice(&U256::from(12).to_be_bytes::<32>()); // count
        for _ in 0..12 {
            data.extend_from_slice(&U256::from(384).to_be_bytes::<32>()); // aliased
        }
        data.extend_from_slice(&U256::from(5).to_be_bytes::<32>()); // shared len
        data.extend_from_slice(&crate::utils::right_pad_32(b"hello").unwrap());
        assert_eq!(data.len(), 512);

        let p = params([ParamKind::Array(Box::new(ParamKind::Bytes))]);
        assert_matches!(
            decode(&p, &data, DecodeOptions::default()),
            Err(AbiError::BufferOverrun)
        );
        // A raised ceiling decodes the same input fine.
        let decoded = decode(
            &p,
            &data,
            DecodeOptions { max_bytes: 2048, allow_junk_data: true, ..Default::default() },
        )
        .unwrap();
        assert_eq!(decoded.values[0].as_slice().unwrap().len(), 12);
        assert_eq!(decoded.bytes_read, 1216);
    }

    // A length word near u64::MAX must fail cleanly before any padding
    // arithmetic can wrap it past the bounds checks.
    #[test]
    fn huge_byte_lengths_are_rejected() {
        let mut data = Vec::new();
        data.extend_from_slice(&U256::from(32).to_be_bytes::<32>()); // offset
        data.extend_from_slice(&U256::from(u64::MAX - 15).to_be_bytes::<32>()); // length
        let p = params([ParamKind::Bytes]);
        assert_matches!(
            decode(&p, &data, DecodeOptions::default()),
            Err(AbiError::InvalidLength)
        );
    }

    #[test]
    fn selector_discipline() {
        let function = Function {
            name: "transfer".into(),
            inputs: vec![
                Param::new("to", ParamKind::Address),
                Param::new("value", ParamKind::Uint(256)),
            ],
            outputs: vec![],
        };
        let values = [
            AbiValue::Address(address!("4648451b5f87ff8f0f7d622bd40574bb97e25980")),
            AbiValue::Uint(U256::from(77), 256),
        ];
        let mut encoded = crate::encode_function(&function, &values).unwrap();
        let decoded =
            decode_function(&function, &encoded, DecodeOptions::default()).unwrap();
        assert_eq!(decoded.values, values);

        encoded[0] ^= 0xff;
        assert_matches!(
            decode_function(&function, &encoded, DecodeOptions::default()),
            Err(AbiError::InvalidAbiSignature { .. })
        );
    }

    #[test]
    fn field_lookup_by_name() {
        let p = [
            Param::new("to", ParamKind::Address),
            Param::new("value", ParamKind::Uint(256)),
        ];
        let encoded = encode(&p, &[
            AbiValue::Address(Address::ZERO),
            AbiValue::Uint(U256::from(3), 256),
        ])
        .unwrap();
        let decoded = decode(&p, &encoded, DecodeOptions::default()).unwrap();
        let (index, _) = crate::find_param(&p, "value").unwrap();
        assert_eq!(decoded.values[index].as_uint().unwrap(), U256::from(3));
        assert_matches!(crate::find_param(&p, "missing"), Err(AbiError::UnknownField(_)));
    }
}
