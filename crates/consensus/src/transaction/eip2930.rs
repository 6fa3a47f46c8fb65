use crate::{
    transaction::{
        decode_signature_rlp, parity_from_v, signature_rlp_len, write_signature_rlp, Transaction,
        TxType,
    },
    SignableTransaction, Signed, TxError,
};
use alloy_primitives::{keccak256, Bytes, ChainId, Signature, TxKind, B256, U256};
use ethcodec_eips::eip2930::AccessList;
use ethcodec_eips::eip7702::SignedAuthorization;
use ethcodec_rlp::{length_of_length, BufMut, Decodable, Encodable, Header};

/// The Berlin format ([EIP-2930](https://eips.ethereum.org/EIPS/eip-2930)):
/// a fixed-price transaction that declares an [`AccessList`] up front.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxEip2930 {
    /// The chain the transaction is bound to (EIP-155).
    pub chain_id: ChainId,
    /// Sequence number of the sender account.
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
    /// Accounts and storage slots the execution expects to touch,
    /// declared ahead of time and pre-warmed at a gas discount.
    pub access_list: AccessList,
    /// Calldata of the message call, or the init code when creating a
    /// contract.
    pub input: Bytes,
}

impl TxEip2930 {
    /// The format's type byte.
    pub(crate) const fn tx_type(&self) -> TxType {
        TxType::Eip2930
    }

    /// Reads the unsigned fields; the caller has already consumed the
    /// list header. Wire order is
    /// `[chain_id, nonce, gas_price, gas_limit, to, value, data,
    /// access_list]`.
    pub(crate) fn decode_fields(buf: &mut &[u8]) -> ethcodec_rlp::Result<Self> {
        Ok(Self {
            chain_id: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            value: Decodable::decode(buf)?,
            input: Decodable::decode(buf)?,
            access_list: Decodable::decode(buf)?,
        })
    }

    pub(crate) fn fields_len(&self) -> usize {
        let mut len = 0;
        len += self.chain_id.length();
        len += self.nonce.length();
        len += self.gas_price.length();
        len += self.gas_limit.length();
        len += self.to.length();
        len += self.value.length();
        len += self.input.length();
        len += self.access_list.length();
        len
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
    }

    /// Encodes the transaction with its signature as an RLP list, without
    /// the type byte.
    pub(crate) fn encode_with_signature(&self, signature: &Signature, out: &mut dyn BufMut) {
        let v = signature.v() as u64;
        let payload_length = self.fields_len() + signature_rlp_len(signature, v);
        Header { list: true, payload_length }.encode(out);
        self.encode_fields(out);
        write_signature_rlp(signature, v, out);
    }

    /// The length of the signed RLP list, without the type byte.
    pub(crate) fn encoded_len_with_signature(&self, signature: &Signature) -> usize {
        let payload_length =
            self.fields_len() + signature_rlp_len(signature, signature.v() as u64);
        Header { list: true, payload_length }.length() + payload_length
    }

    /// Decodes the signed RLP list, without the type byte.
    pub fn decode_signed_fields(buf: &mut &[u8]) -> Result<Signed<Self>, TxError> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(ethcodec_rlp::Error::UnexpectedString.into());
        }
        let tx = Self::decode_fields(buf)?;
        let (v, r, s) = decode_signature_rlp(buf)?;
        let signature = Signature::new(r, s, parity_from_v(v)?);
        Ok(tx.into_signed(signature))
    }
}

impl Transaction for TxEip2930 {
    fn chain_id(&self) -> Option<ChainId> {
        Some(self.chain_id)
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
        Some(&self.access_list)
    }

    fn blob_versioned_hashes(&self) -> Option<&[B256]> {
        None
    }

    fn authorization_list(&self) -> Option<&[SignedAuthorization]> {
        None
    }
}

impl SignableTransaction<Signature> for TxEip2930 {
    fn set_chain_id(&mut self, chain_id: ChainId) {
        self.chain_id = chain_id;
    }

    fn encode_for_signing(&self, out: &mut dyn BufMut) {
        out.put_u8(self.tx_type() as u8);
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn payload_len_for_signature(&self) -> usize {
        let payload_length = self.fields_len();
        1 + length_of_length(payload_length) + payload_length
    }

    fn into_signed(self, signature: Signature) -> Signed<Self> {
        let mut buf = Vec::with_capacity(1 + self.encoded_len_with_signature(&signature));
        buf.put_u8(self.tx_type() as u8);
        self.encode_with_signature(&signature, &mut buf);
        let hash = keccak256(&buf);
        Signed::new_unchecked(self, signature, hash)
    }
}

impl Encodable for TxEip2930 {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        length_of_length(payload_length) + payload_length
    }
}

impl Decodable for TxEip2930 {
    fn decode(data: &mut &[u8]) -> ethcodec_rlp::Result<Self> {
        let header = Header::decode(data)?;
        if !header.list {
            return Err(ethcodec_rlp::Error::UnexpectedString);
        }
        Self::decode_fields(data)
    }
}
