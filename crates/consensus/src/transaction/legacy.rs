use crate::{
    transaction::{decode_signature_rlp, signature_rlp_len, write_signature_rlp, Transaction},
    SignableTransaction, Signed, TxError,
};
use alloy_primitives::{keccak256, Bytes, ChainId, Signature, TxKind, B256, U256};
use ethcodec_eips::eip2930::AccessList;
use ethcodec_eips::eip7702::SignedAuthorization;
use ethcodec_rlp::{length_of_length, BufMut, Decodable, Encodable, Header};

/// The original untyped transaction format, priced with a single gas
/// price and replay-protected only when a chain id is present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxLegacy {
    /// EIP-155 replay protection. `None` for pre-EIP-155 transactions;
    /// recovered from `v` when a signed transaction is decoded.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub chain_id: Option<ChainId>,
    /// Sequence number of the sender account, incremented per published
    /// transaction.
    pub nonce: u64,
    /// Wei paid per unit of gas consumed.
    pub gas_price: u64,
    /// Ceiling on the gas the execution may burn, charged for up front.
    pub gas_limit: u64,
    /// The call target, or a contract creation when the wire slot is the
    /// empty byte string.
    pub to: TxKind,
    /// Wei moved to the recipient, or the endowment of the newly created
    /// contract.
    pub value: U256,
    /// Calldata of the message call, or the init code when creating a
    /// contract.
    pub input: Bytes,
}

/// Builds the legacy `v` value from a parity bit and an optional chain id:
/// `27 + parity` pre-EIP-155, `chain_id * 2 + 35 + parity` after.
pub const fn to_eip155_value(parity: bool, chain_id: Option<ChainId>) -> u64 {
    match chain_id {
        Some(id) => id * 2 + 35 + parity as u64,
        None => 27 + parity as u64,
    }
}

/// Splits a legacy `v` value into its parity bit and chain id. Returns
/// `None` when `v` is neither 27/28 nor a valid EIP-155 value.
pub const fn from_eip155_value(v: u64) -> Option<(bool, Option<ChainId>)> {
    match v {
        27 => Some((false, None)),
        28 => Some((true, None)),
        v if v >= 35 => Some(((v - 35) % 2 == 1, Some((v - 35) / 2))),
        _ => None,
    }
}

impl TxLegacy {
    /// The type byte EIP-2718 reserves for this format.
    pub const TX_TYPE: u8 = 0;

    /// Length of the unsigned fields alone, list header and EIP-155
    /// triple excluded.
    pub(crate) fn fields_len(&self) -> usize {
        let mut len = 0;
        len += self.nonce.length();
        len += self.gas_price.length();
        len += self.gas_limit.length();
        len += self.to.length();
        len += self.value.length();
        len += self.input.length();
        len
    }

    /// Writes the unsigned fields, with no list header and no EIP-155
    /// triple.
    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    /// Reads the unsigned fields; the caller has already consumed the
    /// list header.
    pub(crate) fn decode_fields(data: &mut &[u8]) -> ethcodec_rlp::Result<Self> {
        Ok(Self {
            nonce: Decodable::decode(data)?,
            gas_price: Decodable::decode(data)?,
            gas_limit: Decodable::decode(data)?,
            to: Decodable::decode(data)?,
            value: Decodable::decode(data)?,
            input: Decodable::decode(data)?,
            chain_id: None,
        })
    }

    /// Appends the EIP-155 triple to a signing preimage. Pre-EIP-155
    /// transactions write nothing.
    pub(crate) fn encode_eip155_signing_fields(&self, out: &mut dyn BufMut) {
        if let Some(id) = self.chain_id {
            // chain id followed by two empty slots
            id.encode(out);
            0x00u8.encode(out);
            0x00u8.encode(out);
        }
    }

    /// Length of the EIP-155 triple, zero when there is no chain id.
    pub(crate) fn eip155_fields_len(&self) -> usize {
        self.chain_id.map_or(0, |id| id.length() + 2)
    }

    /// Encodes the transaction with its signature as an RLP list, `v`
    /// carrying the chain id per EIP-155.
    pub(crate) fn encode_with_signature_fields(
        &self,
        signature: &Signature,
        out: &mut dyn BufMut,
    ) {
        let v = to_eip155_value(signature.v(), self.chain_id);
        let payload_length = self.fields_len() + signature_rlp_len(signature, v);
        Header { list: true, payload_length }.encode(out);
        self.encode_fields(out);
        write_signature_rlp(signature, v, out);
    }

    /// Returns what the encoded length would be with the given signature.
    pub(crate) fn encoded_len_with_signature(&self, signature: &Signature) -> usize {
        let v = to_eip155_value(signature.v(), self.chain_id);
        let payload_length = self.fields_len() + signature_rlp_len(signature, v);
        Header { list: true, payload_length }.length() + payload_length
    }

    /// Decodes the transaction from RLP bytes, including the signature, and
    /// recovers the chain id from `v`.
    pub fn decode_signed_fields(buf: &mut &[u8]) -> Result<Signed<Self>, TxError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ethcodec_rlp::Error::UnexpectedString.into());
        }

        // remember where the list started to validate its declared length
        let original_len = buf.len();

        let mut tx = Self::decode_fields(buf)?;
        let (v, r, s) = decode_signature_rlp(buf)?;

        let signature = if r.is_zero() && s.is_zero() && v > 0 {
            // The unprotected pre-signing form some serializers emit: the
            // signature slots are empty and v carries the chain id.
            tx.chain_id = Some(v);
            Signature::new(r, s, false)
        } else {
            let (parity, chain_id) =
                from_eip155_value(v).ok_or(TxError::InvalidRecoveryId(v))?;
            tx.chain_id = chain_id;
            Signature::new(r, s, parity)
        };

        let signed = tx.into_signed(signature);
        if buf.len() + header.payload_length != original_len {
            return Err(ethcodec_rlp::Error::LengthMismatch {
                expected: header.payload_length,
                got: original_len - buf.len(),
            }
            .into());
        }

        Ok(signed)
    }
}

impl Transaction for TxLegacy {
    fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn gas_price(&self) -> Option<u64> {
        Some(self.gas_price)
    }

    fn max_fee_per_gas(&self) -> u64 {
        self.gas_price
    }

    fn max_priority_fee_per_gas(&self) -> Option<u64> {
        None
    }

    fn max_fee_per_blob_gas(&self) -> Option<u64> {
        None
    }

    fn kind(&self) -> TxKind {
        self.to
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn input(&self) -> &Bytes {
        &self.input
    }

    fn access_list(&self) -> Option<&AccessList> {
        None
    }

    fn blob_versioned_hashes(&self) -> Option<&[B256]> {
        None
    }

    fn authorization_list(&self) -> Option<&[SignedAuthorization]> {
        None
    }
}

impl SignableTransaction<Signature> for TxLegacy {
    fn set_chain_id(&mut self, chain_id: ChainId) {
        self.chain_id = Some(chain_id);
    }

    fn encode_for_signing(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() + self.eip155_fields_len() }
            .encode(out);
        self.encode_fields(out);
        self.encode_eip155_signing_fields(out);
    }

    fn payload_len_for_signature(&self) -> usize {
        let payload_length = self.fields_len() + self.eip155_fields_len();
        length_of_length(payload_length) + payload_length
    }

    fn into_signed(self, signature: Signature) -> Signed<Self> {
        let mut buf = Vec::with_capacity(self.encoded_len_with_signature(&signature));
        self.encode_with_signature_fields(&signature, &mut buf);
        let hash = keccak256(&buf);
        Signed::new_unchecked(self, signature, hash)
    }
}

impl Encodable for TxLegacy {
    fn encode(&self, out: &mut dyn BufMut) {
        self.encode_for_signing(out)
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len() + self.eip155_fields_len();
        length_of_length(payload_length) + payload_length
    }
}

impl Decodable for TxLegacy {
    fn decode(data: &mut &[u8]) -> ethcodec_rlp::Result<Self> {
        let header = Header::decode(data)?;
        if !header.list {
            return Err(ethcodec_rlp::Error::UnexpectedString);
        }
        let remaining_len = data.len();

        let mut transaction = Self::decode_fields(data)?;

        // If data remains inside the list, it is the EIP-155 signing triple.
        let consumed = remaining_len - data.len();
        if header.payload_length > consumed {
            transaction.chain_id = Some(Decodable::decode(data)?);
            let _: U256 = Decodable::decode(data)?; // r
            let _: U256 = Decodable::decode(data)?; // s
        }

        let decoded = remaining_len - data.len();
        if decoded != header.payload_length {
            return Err(ethcodec_rlp::Error::UnexpectedLength);
        }

        Ok(transaction)
    }
}
