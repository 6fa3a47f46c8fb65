use crate::{
    decoder::{decode, DecodeOptions},
    encoder::encode_static,
    AbiError, AbiValue, Event, Param, ParamKind, Result,
};
use alloy_primitives::{keccak256, B256};

/// The decoded topics of a log: the signature hash, then one slot per
/// indexed parameter.
///
/// Parameters of dynamic type cannot be recovered from their topic; they
/// surface as the raw 32-byte hash ([`AbiValue::FixedBytes`] of size 32).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedTopics {
    /// Topic zero: the keccak-256 hash of the canonical event signature.
    pub signature: B256,
    /// One value per indexed parameter; `None` for null topics.
    pub values: Vec<Option<AbiValue<'static>>>,
}

/// Encodes filter topics for an event.
///
/// `values` holds one optional value per indexed parameter, in declaration
/// order; `None` produces a null (wildcard) topic. Topic zero is always the
/// event signature hash.
pub fn encode_topics(
    event: &Event,
    values: &[Option<AbiValue<'_>>],
) -> Result<Vec<Option<B256>>> {
    let indexed = event.indexed().collect::<Vec<_>>();
    if indexed.len() != values.len() {
        return Err(AbiError::InvalidLength);
    }
    let mut topics = Vec::with_capacity(values.len() + 1);
    topics.push(Some(event.selector()));
    for (param, value) in indexed.iter().zip(values) {
        let topic = match value {
            None => None,
            Some(value) => {
                if !value.matches(&param.kind) {
                    return Err(AbiError::InvalidAbiParameter);
                }
                Some(encode_topic(&param.kind, value)?)
            }
        };
        topics.push(topic);
    }
    Ok(topics)
}

/// Decodes the topics of a log against an event descriptor.
///
/// Topic zero must match the event's signature hash; the remaining topics
/// correspond positionally to the indexed parameters, with `None` slots
/// preserved.
pub fn decode_topics(
    event: &Event,
    topics: &[Option<B256>],
    options: DecodeOptions,
) -> Result<DecodedTopics> {
    let (first, rest) = topics.split_first().ok_or(AbiError::InvalidLength)?;
    let signature = (*first).ok_or(AbiError::InvalidLength)?;
    let expected = event.selector();
    if signature != expected {
        // Surfaced in the 4-byte selector shape of the error.
        return Err(AbiError::InvalidAbiSignature {
            expected: truncated(expected),
            got: truncated(signature),
        });
    }
    let indexed = event.indexed().collect::<Vec<_>>();
    if indexed.len() != rest.len() {
        return Err(AbiError::InvalidLength);
    }
    let mut values = Vec::with_capacity(rest.len());
    for (param, topic) in indexed.iter().zip(rest) {
        let value = match topic {
            None => None,
            Some(topic) => Some(decode_topic(&param.kind, *topic, options)?),
        };
        values.push(value);
    }
    Ok(DecodedTopics { signature, values })
}

fn truncated(hash: B256) -> alloy_primitives::Selector {
    alloy_primitives::Selector::from_slice(&hash[..4])
}

fn encode_topic(kind: &ParamKind, value: &AbiValue<'_>) -> Result<B256> {
    if kind.is_dynamic() {
        let mut preimage = Vec::new();
        encode_topic_preimage(kind, value, &mut preimage)?;
        return Ok(keccak256(preimage));
    }
    let mut word = Vec::with_capacity(32);
    encode_static(kind, value, &mut word)?;
    // Multi-word statics (fixed arrays, tuples) also hash.
    if word.len() > 32 {
        return Ok(keccak256(word));
    }
    Ok(B256::from_slice(&word))
}

/// The in-place encoding hashed into a topic: raw contents for byte
/// strings, concatenated element encodings for compounds.
fn encode_topic_preimage(
    kind: &ParamKind,
    value: &AbiValue<'_>,
    out: &mut Vec<u8>,
) -> Result<()> {
    match (kind, value) {
        (ParamKind::Bytes, AbiValue::Bytes(bytes)) => out.extend_from_slice(bytes),
        (ParamKind::String, AbiValue::String(s)) => out.extend_from_slice(s.as_bytes()),
        (ParamKind::Array(child), AbiValue::Array(items))
        | (ParamKind::FixedArray(child, _), AbiValue::FixedArray(items)) => {
            for item in items {
                if child.is_dynamic() {
                    encode_topic_preimage(child, item, out)?;
                } else {
                    encode_static(child, item, out)?;
                }
            }
        }
        (ParamKind::Tuple(fields), AbiValue::Tuple(items)) => {
            for (field, item) in fields.iter().zip(items) {
                if field.kind.is_dynamic() {
                    encode_topic_preimage(&field.kind, item, out)?;
                } else {
                    encode_static(&field.kind, item, out)?;
                }
            }
        }
        _ => return Err(AbiError::InvalidAbiParameter),
    }
    Ok(())
}

fn decode_topic(
    kind: &ParamKind,
    topic: B256,
    options: DecodeOptions,
) -> Result<AbiValue<'static>> {
    if kind.is_dynamic() || kind.head_size() > 32 {
        // Hashed in-place encodings are unrecoverable.
        return Ok(AbiValue::FixedBytes(topic, 32));
    }
    let decoded = decode(
        &[Param::unnamed(kind.clone())],
        topic.as_slice(),
        DecodeOptions { allow_junk_data: true, ..options },
    )?;
    let mut values = decoded.values;
    let value = values.drain(..).next().ok_or(AbiError::InvalidLength)?;
    Ok(value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventParam;
    use alloy_primitives::{address, hex, U256};
    use assert_matches::assert_matches;

    fn foo_event() -> Event {
        Event {
            name: "Foo".into(),
            inputs: vec![EventParam {
                name: "message".into(),
                kind: ParamKind::String,
                indexed: true,
            }],
        }
    }

    #[test]
    fn string_topics_are_hashed() {
        let topics =
            encode_topics(&foo_event(), &[Some(AbiValue::string("hello"))]).unwrap();
        assert_eq!(
            topics[0].unwrap(),
            B256::from(hex!(
                "9f0b7f1630bdb7d474466e2dfef0fb9dff65f7a50eec83935b68f77d0808f08a"
            ))
        );
        assert_eq!(
            topics[1].unwrap(),
            B256::from(hex!(
                "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
            ))
        );
    }

    #[test]
    fn static_topics_round_trip() {
        let event = Event {
            name: "Transfer".into(),
            inputs: vec![
                EventParam { name: "from".into(), kind: ParamKind::Address, indexed: true },
                EventParam { name: "to".into(), kind: ParamKind::Address, indexed: true },
                EventParam {
                    name: "value".into(),
                    kind: ParamKind::Uint(256),
                    indexed: false,
                },
            ],
        };
        let from = address!("4648451b5f87ff8f0f7d622bd40574bb97e25980");
        let to = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        let topics = encode_topics(&event, &[
            Some(AbiValue::Address(from)),
            Some(AbiValue::Address(to)),
        ])
        .unwrap();
        assert_eq!(topics.len(), 3);

        let decoded =
            decode_topics(&event, &topics, DecodeOptions::default()).unwrap();
        assert_eq!(decoded.signature, event.selector());
        assert_eq!(decoded.values[0].as_ref().unwrap().as_address().unwrap(), from);
        assert_eq!(decoded.values[1].as_ref().unwrap().as_address().unwrap(), to);
    }

    #[test]
    fn null_topics_pass_through() {
        let event = Event {
            name: "Approval".into(),
            inputs: vec![
                EventParam {
                    name: "owner".into(),
                    kind: ParamKind::Address,
                    indexed: true,
                },
                EventParam {
                    name: "spender".into(),
                    kind: ParamKind::Address,
                    indexed: true,
                },
            ],
        };
        let topics = encode_topics(&event, &[None, Some(AbiValue::Address(
            address!("4648451b5f87ff8f0f7d622bd40574bb97e25980"),
        ))])
        .unwrap();
        assert_eq!(topics[1], None);

        let decoded = decode_topics(&event, &topics, DecodeOptions::default()).unwrap();
        assert_eq!(decoded.values[0], None);
        assert!(decoded.values[1].is_some());
    }

    #[test]
    fn no_indexed_slots_returns_only_the_signature() {
        let event = Event {
            name: "Ping".into(),
            inputs: vec![EventParam {
                name: "data".into(),
                kind: ParamKind::Uint(256),
                indexed: false,
            }],
        };
        let topics = encode_topics(&event, &[]).unwrap();
        assert_eq!(topics.len(), 1);
        let decoded = decode_topics(&event, &topics, DecodeOptions::default()).unwrap();
        assert_eq!(decoded.signature, event.selector());
        assert!(decoded.values.is_empty());
    }

    #[test]
    fn hashed_values_surface_as_raw_hashes() {
        let topics =
            encode_topics(&foo_event(), &[Some(AbiValue::string("hello"))]).unwrap();
        let decoded =
            decode_topics(&foo_event(), &topics, DecodeOptions::default()).unwrap();
        assert_eq!(
            decoded.values[0].as_ref().unwrap().as_fixed_bytes().unwrap(),
            topics[1].unwrap().as_slice()
        );
    }

    #[test]
    fn dynamic_array_topic_hashes_padded_elements() {
        let event = Event {
            name: "Batch".into(),
            inputs: vec![EventParam {
                name: "ids".into(),
                kind: ParamKind::Array(Box::new(ParamKind::Uint(256))),
                indexed: true,
            }],
        };
        let topics = encode_topics(&event, &[Some(AbiValue::Array(vec![
            AbiValue::Uint(U256::from(1), 256),
            AbiValue::Uint(U256::from(2), 256),
        ]))])
        .unwrap();
        let mut preimage = Vec::new();
        preimage.extend_from_slice(&U256::from(1).to_be_bytes::<32>());
        preimage.extend_from_slice(&U256::from(2).to_be_bytes::<32>());
        assert_eq!(topics[1].unwrap(), keccak256(preimage));
    }

    #[test]
    fn slot_count_must_match() {
        assert_matches!(
            encode_topics(&foo_event(), &[]),
            Err(AbiError::InvalidLength)
        );
        let topics = vec![Some(B256::ZERO)];
        assert_matches!(
            decode_topics(&foo_event(), &topics, DecodeOptions::default()),
            Err(AbiError::InvalidAbiSignature { .. })
        );
    }
}
