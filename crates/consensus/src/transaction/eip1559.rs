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

/// The London format ([EIP-1559](https://eips.ethereum.org/EIPS/eip-1559)):
/// priced with a fee cap and a tip cap instead of a fixed gas price.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxEip1559 {
    /// The chain the transaction is bound to (EIP-155).
    pub chain_id: ChainId,
    /// Sequence number of the sender account.
    pub nonce: u64,
    /// Ceiling on the gas the execution may burn, charged for up front.
    pub gas_limit: u64,
    /// Fee cap: the most the sender pays per unit of gas, base fee
    /// included.
    pub max_fee_per_gas: u64,
    /// Tip cap: the most the sender routes to the block author per unit
    /// of gas, on top of the base fee.
    pub max_priority_fee_per_gas: u64,
    /// The call target, or a contract creation when the wire slot is the
    /// empty byte string.
    pub to: TxKind,
    /// Wei moved to the recipient, or the endowment of the newly created
    /// contract.
    pub value: U256,
    /// Accounts and storage slots pre-warmed at a gas discount, as in
    /// EIP-2930.
    pub access_list: AccessList,
    /// Calldata of the message call, or the init code when creating a
    /// contract.
    pub input: Bytes,
}

impl TxEip1559 {
    /// The price actually paid per unit of gas under `base_fee`: the tip
    /// cap on top of the base fee, clamped to the fee cap.
    pub const fn effective_gas_price(&self, base_fee: Option<u64>) -> u64 {
        match base_fee {
            None => self.max_fee_per_gas,
            Some(base_fee) => {
                let tip = self.max_fee_per_gas.saturating_sub(base_fee);
                if tip > self.max_priority_fee_per_gas {
                    self.max_priority_fee_per_gas + base_fee
                } else {
                    self.max_fee_per_gas
                }
            }
        }
    }

    /// The format's type byte.
    pub(crate) const fn tx_type(&self) -> TxType {
        TxType::Eip1559
    }

    /// Reads the unsigned fields; the caller has already consumed the
    /// list header. Wire order is
    /// `[chain_id, nonce, max_priority_fee_per_gas, max_fee_per_gas,
    /// gas_limit, to, value, data, access_list]`.
    pub(crate) fn decode_fields(buf: &mut &[u8]) -> ethcodec_rlp::Result<Self> {
        Ok(Self {
            chain_id: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
            max_priority_fee_per_gas: Decodable::decode(buf)?,
            max_fee_per_gas: Decodable::decode(buf)?,
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
        len += self.max_priority_fee_per_gas.length();
        len += self.max_fee_per_gas.length();
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
        self.max_priority_fee_per_gas.encode(out);
        self.max_fee_per_gas.encode(out);
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

impl Transaction for TxEip1559 {
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
        None
    }

    fn max_fee_per_gas(&self) -> u64 {
        self.max_fee_per_gas
    }

    fn max_priority_fee_per_gas(&self) -> Option<u64> {
        Some(self.max_priority_fee_per_gas)
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

impl SignableTransaction<Signature> for TxEip1559 {
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

impl Encodable for TxEip1559 {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        length_of_length(payload_length) + payload_length
    }
}

impl Decodable for TxEip1559 {
    fn decode(data: &mut &[u8]) -> ethcodec_rlp::Result<Self> {
        let header = Header::decode(data)?;
        if !header.list {
            return Err(ethcodec_rlp::Error::UnexpectedString);
        }
        Self::decode_fields(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use assert_matches::assert_matches;

    fn sample() -> TxEip1559 {
        TxEip1559 {
            chain_id: 31337,
            nonce: 0,
            gas_limit: 21_001,
            max_fee_per_gas: 2_000_000_000,
            max_priority_fee_per_gas: 2_000_000_000,
            to: TxKind::Call(address!("70997970c51812dc3a010c7d01b50e0d17dc79c8")),
            value: U256::from(10).pow(U256::from(18)),
            access_list: AccessList::default(),
            input: Bytes::new(),
        }
    }

    #[test]
    fn signed_round_trip() {
        let tx = sample();
        let signature = Signature::new(
            U256::from_be_slice(&[0x2au8; 32]),
            U256::from_be_slice(&[0x45u8; 32]),
            true,
        );
        let signed = tx.clone().into_signed(signature);

        let mut encoded = Vec::new();
        signed.tx().encode_with_signature(signed.signature(), &mut encoded);
        let decoded = TxEip1559::decode_signed_fields(&mut encoded.as_slice()).unwrap();
        assert_eq!(decoded.tx(), &tx);
        assert_eq!(decoded.signature(), signed.signature());
        assert_eq!(*decoded.hash(), *signed.hash());
    }

    #[test]
    fn parity_above_one_is_rejected() {
        let tx = sample();
        let signature_len = 2u64.length() + U256::from(1).length() + U256::from(2).length();
        let mut encoded = Vec::new();
        Header { list: true, payload_length: tx.fields_len() + signature_len }
            .encode(&mut encoded);
        tx.encode_fields(&mut encoded);
        2u64.encode(&mut encoded);
        U256::from(1).encode(&mut encoded);
        U256::from(2).encode(&mut encoded);
        assert_matches!(
            TxEip1559::decode_signed_fields(&mut encoded.as_slice()),
            Err(TxError::InvalidRecoveryId(2))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let tx = sample();
        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(serde_json::from_str::<TxEip1559>(&json).unwrap(), tx);
    }

    #[test]
    fn effective_gas_price_caps_at_max_fee() {
        let tx = TxEip1559 {
            max_fee_per_gas: 100,
            max_priority_fee_per_gas: 10,
            ..Default::default()
        };
        assert_eq!(tx.effective_gas_price(None), 100);
        assert_eq!(tx.effective_gas_price(Some(50)), 60);
        assert_eq!(tx.effective_gas_price(Some(95)), 100);
    }
}
