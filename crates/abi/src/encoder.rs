use crate::{
    AbiError, AbiValue, Constructor, ErrorItem, Function, Param, ParamKind, Result,
};
use alloy_primitives::U256;

/// Encodes a sequence of values against their descriptors.
///
/// The output is always a multiple of 32 bytes: a head of inline statics
/// and offset words, then the tails of every dynamic value in order.
pub fn encode(params: &[Param], values: &[AbiValue<'_>]) -> Result<Vec<u8>> {
    if params.len() != values.len() {
        return Err(AbiError::InvalidAbiParameter);
    }
    for (param, value) in params.iter().zip(values) {
        param.kind.validate()?;
        if !value.matches(&param.kind) {
            return Err(AbiError::InvalidAbiParameter);
        }
    }
    let pairs =
        params.iter().map(|param| &param.kind).zip(values).collect::<Vec<_>>();
    encode_sequence(&pairs)
}

/// Encodes a function call: the 4-byte selector, then the encoded inputs.
pub fn encode_function(
    function: &Function,
    values: &[AbiValue<'_>],
) -> Result<Vec<u8>> {
    let mut out = function.selector().to_vec();
    out.extend(encode(&function.inputs, values)?);
    Ok(out)
}

/// Encodes a custom error: the 4-byte selector, then the encoded inputs.
pub fn encode_error(error: &ErrorItem, values: &[AbiValue<'_>]) -> Result<Vec<u8>> {
    let mut out = error.selector().to_vec();
    out.extend(encode(&error.inputs, values)?);
    Ok(out)
}

/// Encodes constructor arguments. Constructors carry no selector.
pub fn encode_constructor(
    constructor: &Constructor,
    values: &[AbiValue<'_>],
) -> Result<Vec<u8>> {
    encode(&constructor.inputs, values)
}

fn encode_sequence(pairs: &[(&ParamKind, &AbiValue<'_>)]) -> Result<Vec<u8>> {
    let head_size: usize = pairs.iter().map(|(kind, _)| kind.head_size()).sum();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();
    for &(kind, value) in pairs {
        if kind.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend_from_slice(&U256::from(offset).to_be_bytes::<32>());
            encode_tail(kind, value, &mut tail)?;
        } else {
            encode_static(kind, value, &mut head)?;
        }
    }
    head.extend(tail);
    Ok(head)
}

/// Encodes a static value inline. One 32-byte word per scalar, with fixed
/// arrays and static tuples concatenating their children.
pub(crate) fn encode_static(
    kind: &ParamKind,
    value: &AbiValue<'_>,
    out: &mut Vec<u8>,
) -> Result<()> {
    match (kind, value) {
        (ParamKind::Bool, AbiValue::Bool(value)) => {
            let mut word = [0u8; 32];
            word[31] = *value as u8;
            out.extend_from_slice(&word);
        }
        (ParamKind::Uint(_), AbiValue::Uint(value, _)) => {
            out.extend_from_slice(&value.to_be_bytes::<32>());
        }
        (ParamKind::Int(_), AbiValue::Int(value, _)) => {
            // Two's complement is already sign-extended over the full word.
            out.extend_from_slice(&value.to_be_bytes::<32>());
        }
        (ParamKind::Address, AbiValue::Address(address)) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address.as_slice());
            out.extend_from_slice(&word);
        }
        (ParamKind::FixedBytes(_), AbiValue::FixedBytes(word, _)) => {
            out.extend_from_slice(word.as_slice());
        }
        (ParamKind::FixedArray(child, _), AbiValue::FixedArray(items)) => {
            for item in items {
                encode_static(child, item, out)?;
            }
        }
        (ParamKind::Tuple(fields), AbiValue::Tuple(items)) => {
            for (field, item) in fields.iter().zip(items) {
                encode_static(&field.kind, item, out)?;
            }
        }
        _ => return Err(AbiError::InvalidAbiParameter),
    }
    Ok(())
}

fn encode_tail(kind: &ParamKind, value: &AbiValue<'_>, out: &mut Vec<u8>) -> Result<()> {
    match (kind, value) {
        (ParamKind::Bytes, AbiValue::Bytes(bytes)) => encode_byte_tail(bytes, out)?,
        (ParamKind::String, AbiValue::String(s)) => encode_byte_tail(s.as_bytes(), out)?,
        (ParamKind::Array(child), AbiValue::Array(items)) => {
            out.extend_from_slice(&U256::from(items.len()).to_be_bytes::<32>());
            let pairs =
                items.iter().map(|item| (child.as_ref(), item)).collect::<Vec<_>>();
            out.extend(encode_sequence(&pairs)?);
        }
        (ParamKind::FixedArray(child, _), AbiValue::FixedArray(items)) => {
            let pairs =
                items.iter().map(|item| (child.as_ref(), item)).collect::<Vec<_>>();
            out.extend(encode_sequence(&pairs)?);
        }
        (ParamKind::Tuple(fields), AbiValue::Tuple(items)) => {
            let pairs = fields
                .iter()
                .map(|field| &field.kind)
                .zip(items)
                .collect::<Vec<_>>();
            out.extend(encode_sequence(&pairs)?);
        }
        _ => return Err(AbiError::InvalidAbiParameter),
    }
    Ok(())
}

fn encode_byte_tail(bytes: &[u8], out: &mut Vec<u8>) -> Result<()> {
    out.extend_from_slice(&U256::from(bytes.len()).to_be_bytes::<32>());
    out.extend_from_slice(bytes);
    let rem = bytes.len() % 32;
    if rem != 0 {
        out.extend(core::iter::repeat_n(0u8, 32 - rem));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex, I256};
    use assert_matches::assert_matches;

    fn params(kinds: impl IntoIterator<Item = ParamKind>) -> Vec<Param> {
        kinds.into_iter().map(Param::unnamed).collect()
    }

    #[test]
    fn encode_bool() {
        let out = encode(&params([ParamKind::Bool]), &[AbiValue::Bool(true)]).unwrap();
        assert_eq!(
            out,
            hex!("0000000000000000000000000000000000000000000000000000000000000001")
        );
    }

    #[test]
    fn encode_negative_int() {
        let out = encode(
            &params([ParamKind::Int(256)]),
            &[AbiValue::Int(I256::try_from(-5).unwrap(), 256)],
        )
        .unwrap();
        assert_eq!(
            out,
            hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffb")
        );
    }

    #[test]
    fn encode_address() {
        let out = encode(
            &params([ParamKind::Address]),
            &[AbiValue::Address(address!("4648451b5f87ff8f0f7d622bd40574bb97e25980"))],
        )
        .unwrap();
        assert_eq!(
            out,
            hex!("0000000000000000000000004648451b5f87ff8f0f7d622bd40574bb97e25980")
        );
    }

    #[test]
    fn encode_string_head_and_tail() {
        let out =
            encode(&params([ParamKind::String]), &[AbiValue::string("foo")]).unwrap();
        assert_eq!(
            out,
            hex!(
                "0000000000000000000000000000000000000000000000000000000000000020"
                "0000000000000000000000000000000000000000000000000000000000000003"
                "666f6f0000000000000000000000000000000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn encode_dynamic_int_array() {
        let items = [4u64, 2, 0]
            .into_iter()
            .map(|n| AbiValue::Int(I256::try_from(n).unwrap(), 256))
            .collect::<Vec<_>>();
        let out = encode(
            &params([ParamKind::Array(Box::new(ParamKind::Int(256)))]),
            &[AbiValue::Array(items)],
        )
        .unwrap();
        assert_eq!(
            out,
            hex!(
                "0000000000000000000000000000000000000000000000000000000000000020"
                "0000000000000000000000000000000000000000000000000000000000000003"
                "0000000000000000000000000000000000000000000000000000000000000004"
                "0000000000000000000000000000000000000000000000000000000000000002"
                "0000000000000000000000000000000000000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn encode_empty_dynamic_values() {
        let out = encode(&params([ParamKind::Bytes]), &[AbiValue::bytes(b"")]).unwrap();
        // Offset word, then a zero length word and nothing else.
        assert_eq!(out.len(), 64);
        assert_eq!(&out[32..], [0u8; 32]);

        let out = encode(
            &params([ParamKind::Array(Box::new(ParamKind::Uint(256)))]),
            &[AbiValue::Array(vec![])],
        )
        .unwrap();
        assert_eq!(out.len(), 64);
        assert_eq!(&out[32..], [0u8; 32]);
    }

    #[test]
    fn alignment_always_holds() {
        let cases: Vec<(Vec<Param>, Vec<AbiValue<'_>>)> = vec![
            (params([ParamKind::Bool, ParamKind::String]), vec![
                AbiValue::Bool(false),
                AbiValue::string("hello world, this is longer than one slot"),
            ]),
            (params([ParamKind::Tuple(vec![
                ParamKind::Address.into(),
                ParamKind::Bytes.into(),
            ])]), vec![AbiValue::Tuple(vec![
                AbiValue::Address(address!("4648451b5f87ff8f0f7d622bd40574bb97e25980")),
                AbiValue::bytes(&[1, 2, 3, 4, 5]),
            ])]),
        ];
        for (params, values) in cases {
            assert_eq!(encode(&params, &values).unwrap().len() % 32, 0);
        }
    }

    #[test]
    fn static_tuple_is_inlined() {
        let tuple = ParamKind::Tuple(vec![
            ParamKind::Uint(256).into(),
            ParamKind::Bool.into(),
        ]);
        let out = encode(
            &params([tuple]),
            &[AbiValue::Tuple(vec![
                AbiValue::Uint(U256::from(7), 256),
                AbiValue::Bool(true),
            ])],
        )
        .unwrap();
        // No offsets: two inline words.
        assert_eq!(out.len(), 64);
        assert_eq!(out[31], 7);
        assert_eq!(out[63], 1);
    }

    #[test]
    fn fixed_array_of_dynamic_children_is_dynamic() {
        let kind = ParamKind::FixedArray(Box::new(ParamKind::String), 2);
        let out = encode(
            &params([kind]),
            &[AbiValue::FixedArray(vec![
                AbiValue::string("ab"),
                AbiValue::string("cd"),
            ])],
        )
        .unwrap();
        // Top offset, then two inner offsets, then two (len, data) tails.
        assert_eq!(out.len(), 32 + 64 + 128);
        assert_eq!(U256::from_be_slice(&out[..32]), U256::from(32));
    }

    #[test]
    fn mismatched_value_is_rejected() {
        assert_matches!(
            encode(&params([ParamKind::Bool]), &[AbiValue::string("no")]),
            Err(AbiError::InvalidAbiParameter)
        );
        assert_matches!(
            encode(&params([ParamKind::Bool, ParamKind::Bool]), &[AbiValue::Bool(true)]),
            Err(AbiError::InvalidAbiParameter)
        );
    }

    #[test]
    fn function_encoding_prepends_selector() {
        let function = Function {
            name: "transfer".into(),
            inputs: vec![
                Param::new("to", ParamKind::Address),
                Param::new("value", ParamKind::Uint(256)),
            ],
            outputs: vec![],
        };
        let out = encode_function(&function, &[
            AbiValue::Address(address!("4648451b5f87ff8f0f7d622bd40574bb97e25980")),
            AbiValue::Uint(U256::from(10), 256),
        ])
        .unwrap();
        assert_eq!(&out[..4], hex!("a9059cbb"));
        assert_eq!(out.len(), 4 + 64);
    }
}
