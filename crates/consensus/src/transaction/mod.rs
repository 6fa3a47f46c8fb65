//! Transaction types.

use crate::Signed;
use alloy_primitives::{keccak256, Bytes, ChainId, Signature, TxKind, B256, U256};
use ethcodec_eips::{eip2930::AccessList, eip7702::SignedAuthorization};
use ethcodec_rlp::{BufMut, Decodable, Encodable};

mod legacy;
pub use legacy::{from_eip155_value, to_eip155_value, TxLegacy};

mod eip2930;
pub use eip2930::TxEip2930;

mod eip1559;
pub use eip1559::TxEip1559;

mod eip4844;
pub use eip4844::TxEip4844;

mod eip7702;
pub use eip7702::TxEip7702;

mod tx_type;
pub use tx_type::{TxType, DEPOSIT_TX_TYPE_ID};

mod envelope;
pub use envelope::TxEnvelope;

mod typed;
pub use typed::TypedTransaction;

/// Field accessors shared by every envelope format, with `None` for the
/// fields a format does not carry.
pub trait Transaction {
    /// The chain id, `None` for an unprotected legacy transaction.
    fn chain_id(&self) -> Option<ChainId>;

    /// The sender account's sequence number.
    fn nonce(&self) -> u64;

    /// The gas ceiling of the execution.
    fn gas_limit(&self) -> u64;

    /// The fixed gas price, `None` for dynamic-fee transactions.
    fn gas_price(&self) -> Option<u64>;

    /// The fee cap per unit of gas. For fixed-price transactions this is
    /// `gas_price`.
    fn max_fee_per_gas(&self) -> u64;

    /// The tip cap per unit of gas, `None` for fixed-price transactions.
    fn max_priority_fee_per_gas(&self) -> Option<u64>;

    /// The fee cap per unit of blob gas, `None` outside EIP-4844.
    fn max_fee_per_blob_gas(&self) -> Option<u64>;

    /// The transaction kind: a call target or a contract creation.
    fn kind(&self) -> TxKind;

    /// The call target, `None` for contract creations.
    fn to(&self) -> Option<alloy_primitives::Address> {
        self.kind().into_to()
    }

    /// The wei moved to the recipient.
    fn value(&self) -> U256;

    /// The calldata or init code.
    fn input(&self) -> &Bytes;

    /// The EIP-2930 access list, `None` for legacy transactions.
    fn access_list(&self) -> Option<&AccessList>;

    /// Blob versioned hashes, `None` outside EIP-4844.
    fn blob_versioned_hashes(&self) -> Option<&[B256]>;

    /// The EIP-7702 authorization list, `None` outside EIP-7702.
    fn authorization_list(&self) -> Option<&[SignedAuthorization]>;
}

/// A transaction that can compute its signing preimage and seal itself with
/// a signature produced externally.
pub trait SignableTransaction<Sig>: Transaction {
    /// Sets `chain_id`.
    fn set_chain_id(&mut self, chain_id: ChainId);

    /// Encodes the signing preimage: the type byte (for typed envelopes)
    /// followed by the RLP list of unsigned fields, with the EIP-155 triple
    /// appended for protected legacy transactions.
    fn encode_for_signing(&self, out: &mut dyn BufMut);

    /// The length of the signing preimage.
    fn payload_len_for_signature(&self) -> usize;

    /// The hash an external signer must sign.
    fn signature_hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(self.payload_len_for_signature());
        self.encode_for_signing(&mut buf);
        keccak256(&buf)
    }

    /// Seals the transaction with a signature, computing the transaction
    /// hash over the signed encoding.
    fn into_signed(self, signature: Sig) -> Signed<Self, Sig>
    where
        Self: Sized;
}

/// RLP length of a `(v, r, s)` tail with an explicit `v` value.
pub(crate) fn signature_rlp_len(signature: &Signature, v: u64) -> usize {
    v.length() + signature.r().length() + signature.s().length()
}

/// Writes the `(v, r, s)` tail with an explicit `v` value.
pub(crate) fn write_signature_rlp(signature: &Signature, v: u64, out: &mut dyn BufMut) {
    v.encode(out);
    signature.r().encode(out);
    signature.s().encode(out);
}

/// Reads a `(v, r, s)` tail, leaving `v` uninterpreted.
pub(crate) fn decode_signature_rlp(buf: &mut &[u8]) -> ethcodec_rlp::Result<(u64, U256, U256)> {
    let v = Decodable::decode(buf)?;
    let r = Decodable::decode(buf)?;
    let s = Decodable::decode(buf)?;
    Ok((v, r, s))
}

/// Interprets a typed-envelope `v` as a parity bit.
pub(crate) fn parity_from_v(v: u64) -> Result<bool, crate::TxError> {
    match v {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(crate::TxError::InvalidRecoveryId(other)),
    }
}
