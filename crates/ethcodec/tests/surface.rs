//! Drives the whole public surface: calldata in, envelope out, and back.

use alloy_primitives::{address, hex, Signature, TxKind, U256};
use ethcodec::abi::{self, AbiValue, DecodeOptions, Param, ParamKind};
use ethcodec::{rlp, ssz, tx};

#[test]
fn calldata_through_a_signed_envelope() {
    // ABI-encode a transfer call.
    let function = abi::Function {
        name: "transfer".into(),
        inputs: vec![
            Param::new("to", ParamKind::Address),
            Param::new("value", ParamKind::Uint(256)),
        ],
        outputs: vec![Param::unnamed(ParamKind::Bool)],
    };
    let recipient = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
    let calldata = abi::encode_function(&function, &[
        AbiValue::Address(recipient),
        AbiValue::Uint(U256::from(1_000), 256),
    ])
    .unwrap();
    assert_eq!(&calldata[..4], hex!("a9059cbb"));

    // Wrap it in an EIP-1559 envelope and seal it with an external
    // signature.
    let unsigned = tx::TypedTransaction::Eip1559(tx::TxEip1559 {
        chain_id: 1,
        nonce: 7,
        gas_limit: 60_000,
        max_fee_per_gas: 30_000_000_000,
        max_priority_fee_per_gas: 1_000_000_000,
        to: TxKind::Call(address!("dac17f958d2ee523a2206206994597c13d831ec7")),
        value: U256::ZERO,
        access_list: Default::default(),
        input: calldata.clone().into(),
    });
    let signature = Signature::new(U256::from(0xdead), U256::from(0xbeef), false);
    let raw = tx::serialize(&unsigned, Some(signature));

    // Parse it back and recover the calldata.
    let envelope = tx::parse_signed(&raw).unwrap();
    use tx::Transaction;
    let decoded = abi::decode_function(
        &function,
        envelope.input(),
        DecodeOptions::default(),
    )
    .unwrap();
    assert_eq!(decoded.values[0].as_address().unwrap(), recipient);
    assert_eq!(decoded.values[1].as_uint().unwrap(), U256::from(1_000));
}

#[test]
fn rlp_and_ssz_surfaces() {
    let decoded: String = rlp::decode_exact(rlp::encode("dog")).unwrap();
    assert_eq!(decoded, "dog");

    let bytes = ssz::encode(&0x0102u16);
    assert_eq!(bytes, [0x02, 0x01]);
    assert_eq!(ssz::decode::<u16>(&bytes).unwrap(), 0x0102);
}
