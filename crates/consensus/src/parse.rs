//! The transaction parsing and serialization facade: raw bytes or
//! `0x`-prefixed hex in, envelopes out, and back.

use crate::{TxEnvelope, TxError, TypedTransaction};
use alloy_primitives::{hex, Signature};
use ethcodec_eips::eip2718::{Decodable2718, Encodable2718};

/// Parses an unsigned transaction from its serialized form: a type byte
/// followed by the RLP field list, or a bare RLP list for legacy.
pub fn parse(input: &[u8]) -> Result<TypedTransaction, TxError> {
    let mut buf = input;
    let tx = TypedTransaction::decode_2718(&mut buf)?;
    if !buf.is_empty() {
        return Err(ethcodec_rlp::Error::UnexpectedLength.into());
    }
    Ok(tx)
}

/// Parses a signed transaction from its serialized form.
pub fn parse_signed(input: &[u8]) -> Result<TxEnvelope, TxError> {
    let mut buf = input;
    let tx = TxEnvelope::decode_2718(&mut buf)?;
    if !buf.is_empty() {
        return Err(ethcodec_rlp::Error::UnexpectedLength.into());
    }
    Ok(tx)
}

/// [`parse`] over a hex string, with or without a `0x` prefix.
pub fn parse_hex(input: &str) -> Result<TypedTransaction, TxError> {
    parse(&hex::decode(input)?)
}

/// [`parse_signed`] over a hex string, with or without a `0x` prefix.
pub fn parse_signed_hex(input: &str) -> Result<TxEnvelope, TxError> {
    parse_signed(&hex::decode(input)?)
}

/// Serializes a transaction, sealing it with `signature` when one is
/// given. The signature must have been produced over the transaction's
/// signing hash; it is not verified here.
pub fn serialize(tx: &TypedTransaction, signature: Option<Signature>) -> Vec<u8> {
    match signature {
        None => tx.encoded_2718(),
        Some(signature) => tx.clone().into_envelope(signature).encoded_2718(),
    }
}
